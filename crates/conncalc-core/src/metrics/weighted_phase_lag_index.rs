//! Weighted phase lag index: `|<Im CSD>| / <|Im CSD|>` over trials.

use crate::error::ConnectivityError;
use crate::method::ConnectivityMethod;
use crate::metric::ConnectivityMetric;
use crate::metrics::{spectral_network, EPS};
use crate::network::Network;
use crate::settings::ConnectivitySettings;
use crate::spectral;

/// Weighted phase lag index (`WPLI`).
#[derive(Debug, Default)]
pub struct WeightedPhaseLagIndex;

impl WeightedPhaseLagIndex {
    /// Create a new weighted phase lag index metric.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ConnectivityMetric for WeightedPhaseLagIndex {
    fn method(&self) -> ConnectivityMethod {
        ConnectivityMethod::WeightedPhaseLagIndex
    }

    fn compute(&self, settings: &mut ConnectivitySettings) -> Result<Network, ConnectivityError> {
        spectral_network(self.method(), settings, |settings, i, j| {
            let n_bins = settings.n_bins();
            let mut sum_im = vec![0.0; n_bins];
            let mut sum_abs = vec![0.0; n_bins];
            spectral::for_each_trial_csd(settings, i, j, |csd| {
                for (k, c) in csd.iter().enumerate() {
                    sum_im[k] += c.im;
                    sum_abs[k] += c.im.abs();
                }
            })?;
            Ok(sum_im
                .iter()
                .zip(&sum_abs)
                .map(|(&im, &abs)| if abs <= EPS { 0.0 } else { im.abs() / abs })
                .collect())
        })
    }
}
