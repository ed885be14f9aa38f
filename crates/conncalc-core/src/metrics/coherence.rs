//! Magnitude coherence.

use crate::error::ConnectivityError;
use crate::method::ConnectivityMethod;
use crate::metric::ConnectivityMetric;
use crate::metrics::coherency::coherency_network;
use crate::network::Network;
use crate::settings::ConnectivitySettings;

/// Magnitude coherence (`COH`).
///
/// Flagged not parallel-safe: the orchestration layer runs it on the
/// submitting thread instead of the worker pool.
#[derive(Debug, Default)]
pub struct Coherence;

impl Coherence {
    /// Create a new coherence metric.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ConnectivityMetric for Coherence {
    fn method(&self) -> ConnectivityMethod {
        ConnectivityMethod::Coherence
    }

    fn parallel_safe(&self) -> bool {
        false
    }

    fn compute(&self, settings: &mut ConnectivitySettings) -> Result<Network, ConnectivityError> {
        coherency_network(self.method(), settings, |c| c.norm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::test_signals::{phase_pair, TONE_BIN};

    #[test]
    fn identical_channels_cohere_fully() {
        let mut settings = phase_pair(0.0, 1);
        let net = Coherence::new().compute(&mut settings).unwrap();
        assert!((net.edges()[0].weights[TONE_BIN] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn phase_offset_does_not_reduce_coherence() {
        // Coherence ignores a fixed phase lag; magnitude stays 1.
        let mut settings = phase_pair(std::f64::consts::FRAC_PI_2, 2);
        let net = Coherence::new().compute(&mut settings).unwrap();
        assert!((net.edges()[0].weights[TONE_BIN] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn weights_bounded_by_one() {
        let mut settings = phase_pair(1.1, 3);
        let net = Coherence::new().compute(&mut settings).unwrap();
        for w in &net.edges()[0].weights {
            assert!((-1e-9..=1.0 + 1e-9).contains(w));
        }
    }

    #[test]
    fn flagged_serial() {
        assert!(!Coherence::new().parallel_safe());
    }
}
