//! Phase locking value: magnitude of the trial-averaged unit CSD phasor.

use rustfft::num_complex::Complex64;

use crate::error::ConnectivityError;
use crate::method::ConnectivityMethod;
use crate::metric::ConnectivityMetric;
use crate::metrics::{spectral_network, EPS};
use crate::network::Network;
use crate::settings::ConnectivitySettings;
use crate::spectral;

/// Phase locking value (`PLV`).
#[derive(Debug, Default)]
pub struct PhaseLockingValue;

impl PhaseLockingValue {
    /// Create a new phase locking value metric.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ConnectivityMetric for PhaseLockingValue {
    fn method(&self) -> ConnectivityMethod {
        ConnectivityMethod::PhaseLockingValue
    }

    fn compute(&self, settings: &mut ConnectivitySettings) -> Result<Network, ConnectivityError> {
        spectral_network(self.method(), settings, |settings, i, j| {
            let mut acc = vec![Complex64::new(0.0, 0.0); settings.n_bins()];
            let count = spectral::for_each_trial_csd(settings, i, j, |csd| {
                for (slot, c) in acc.iter_mut().zip(csd) {
                    let magnitude = c.norm();
                    if magnitude > EPS {
                        *slot += *c / magnitude;
                    }
                }
            })?;
            let scale = 1.0 / count as f64;
            Ok(acc.into_iter().map(|c| (c * scale).norm()).collect())
        })
    }
}
