//! Orchestration result interfaces.

use std::time::Duration;

use conncalc_core::{ConnectivityMethod, Network};

/// Result of one method computation in a multi-method run.
///
/// Results are tagged with their method so consumers never have to rely on
/// collection position, although the returned order is the fixed
/// enumeration order of [`ConnectivityMethod::ALL`].
#[derive(Debug, Clone, PartialEq)]
pub struct MethodResult {
    /// The method that produced this network.
    pub method: ConnectivityMethod,
    /// The computed network.
    pub network: Network,
    /// Wall-clock cost of the computation.
    pub duration: Duration,
}

/// Strip the tags from a multi-method result, preserving its order, for
/// consumers that index by position.
#[must_use]
pub fn into_networks(results: Vec<MethodResult>) -> Vec<Network> {
    results.into_iter().map(|r| r.network).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_networks_preserves_order() {
        let results = vec![
            MethodResult {
                method: ConnectivityMethod::Correlation,
                network: Network::new(ConnectivityMethod::Correlation, 2, 0.0),
                duration: Duration::from_millis(3),
            },
            MethodResult {
                method: ConnectivityMethod::PhaseLagIndex,
                network: Network::new(ConnectivityMethod::PhaseLagIndex, 2, 1.0),
                duration: Duration::from_millis(5),
            },
        ];
        let networks = into_networks(results);
        assert_eq!(networks.len(), 2);
        assert_eq!(networks[0].method(), Some(ConnectivityMethod::Correlation));
        assert_eq!(networks[1].method(), Some(ConnectivityMethod::PhaseLagIndex));
    }
}
