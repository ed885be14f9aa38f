//! Unbiased estimator of the squared phase lag index.

use crate::error::ConnectivityError;
use crate::method::ConnectivityMethod;
use crate::metric::ConnectivityMetric;
use crate::metrics::phase_lag_index::pli_weights;
use crate::metrics::spectral_network;
use crate::network::Network;
use crate::settings::ConnectivitySettings;

/// Unbiased squared phase lag index (`USPLI`).
///
/// `USPLI(k) = (N * PLI(k)^2 - 1) / (N - 1)` for `N` trials. The estimator
/// is undefined for a single trial. Values may be negative; a strongly
/// negative value indicates the PLI was dominated by sampling bias.
#[derive(Debug, Default)]
pub struct UnbiasedSquaredPhaseLagIndex;

impl UnbiasedSquaredPhaseLagIndex {
    /// Create a new unbiased squared phase lag index metric.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ConnectivityMetric for UnbiasedSquaredPhaseLagIndex {
    fn method(&self) -> ConnectivityMethod {
        ConnectivityMethod::UnbiasedSquaredPhaseLagIndex
    }

    fn compute(&self, settings: &mut ConnectivitySettings) -> Result<Network, ConnectivityError> {
        let n_trials = settings.n_trials_used() as f64;
        if n_trials < 2.0 {
            return Err(ConnectivityError::Computation(
                "unbiased squared PLI requires at least two trials".into(),
            ));
        }
        spectral_network(self.method(), settings, move |settings, i, j| {
            let pli = pli_weights(settings, i, j)?;
            Ok(pli
                .into_iter()
                .map(|p| (n_trials * p * p - 1.0) / (n_trials - 1.0))
                .collect())
        })
    }
}
