//! Phase lag index: `PLI(k) = |<sign(Im CSD(k))>|` over trials.

use crate::error::ConnectivityError;
use crate::method::ConnectivityMethod;
use crate::metric::ConnectivityMetric;
use crate::metrics::spectral_network;
use crate::network::Network;
use crate::settings::ConnectivitySettings;
use crate::spectral;

/// Phase lag index (`PLI`).
#[derive(Debug, Default)]
pub struct PhaseLagIndex;

impl PhaseLagIndex {
    /// Create a new phase lag index metric.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Sign with `sign(0) = 0`.
pub(crate) fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Per-bin PLI weights for one channel pair.
pub(crate) fn pli_weights(
    settings: &ConnectivitySettings,
    i: usize,
    j: usize,
) -> Result<Vec<f64>, ConnectivityError> {
    let mut acc = vec![0.0; settings.n_bins()];
    let count = spectral::for_each_trial_csd(settings, i, j, |csd| {
        for (slot, c) in acc.iter_mut().zip(csd) {
            *slot += sign(c.im);
        }
    })?;
    let scale = 1.0 / count as f64;
    Ok(acc.into_iter().map(|s| (s * scale).abs()).collect())
}

impl ConnectivityMetric for PhaseLagIndex {
    fn method(&self) -> ConnectivityMethod {
        ConnectivityMethod::PhaseLagIndex
    }

    fn compute(&self, settings: &mut ConnectivitySettings) -> Result<Network, ConnectivityError> {
        spectral_network(self.method(), settings, pli_weights)
    }
}
