//! Debiased estimator of the squared weighted phase lag index.

use crate::error::ConnectivityError;
use crate::method::ConnectivityMethod;
use crate::metric::ConnectivityMetric;
use crate::metrics::{spectral_network, EPS};
use crate::network::Network;
use crate::settings::ConnectivitySettings;
use crate::spectral;

/// Debiased squared weighted phase lag index (`DSWPLI`).
///
/// With `s = sum Im CSD`, `q = sum (Im CSD)^2`, `a = sum |Im CSD|` over
/// trials: `DSWPLI(k) = (s^2 - q) / (a^2 - q)`. Undefined for a single
/// trial (the debiasing removes the self-terms).
#[derive(Debug, Default)]
pub struct DebiasedSquaredWeightedPhaseLagIndex;

impl DebiasedSquaredWeightedPhaseLagIndex {
    /// Create a new debiased squared weighted phase lag index metric.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ConnectivityMetric for DebiasedSquaredWeightedPhaseLagIndex {
    fn method(&self) -> ConnectivityMethod {
        ConnectivityMethod::DebiasedSquaredWeightedPhaseLagIndex
    }

    fn compute(&self, settings: &mut ConnectivitySettings) -> Result<Network, ConnectivityError> {
        if settings.n_trials_used() < 2 {
            return Err(ConnectivityError::Computation(
                "debiased squared WPLI requires at least two trials".into(),
            ));
        }
        spectral_network(self.method(), settings, |settings, i, j| {
            let n_bins = settings.n_bins();
            let mut sum_im = vec![0.0; n_bins];
            let mut sum_sq = vec![0.0; n_bins];
            let mut sum_abs = vec![0.0; n_bins];
            spectral::for_each_trial_csd(settings, i, j, |csd| {
                for (k, c) in csd.iter().enumerate() {
                    sum_im[k] += c.im;
                    sum_sq[k] += c.im * c.im;
                    sum_abs[k] += c.im.abs();
                }
            })?;
            Ok((0..n_bins)
                .map(|k| {
                    let denom = sum_abs[k] * sum_abs[k] - sum_sq[k];
                    if denom <= EPS {
                        0.0
                    } else {
                        (sum_im[k] * sum_im[k] - sum_sq[k]) / denom
                    }
                })
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::test_signals::{phase_pair, TONE_BIN};

    #[test]
    fn single_trial_is_rejected() {
        let mut settings = phase_pair(0.5, 1);
        assert!(matches!(
            DebiasedSquaredWeightedPhaseLagIndex::new().compute(&mut settings),
            Err(ConnectivityError::Computation(_))
        ));
    }

    #[test]
    fn consistent_lag_yields_one() {
        let mut settings = phase_pair(std::f64::consts::FRAC_PI_2, 3);
        let net = DebiasedSquaredWeightedPhaseLagIndex::new()
            .compute(&mut settings)
            .unwrap();
        assert!((net.edges()[0].weights[TONE_BIN] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_imaginary_part_yields_zero() {
        let mut settings = phase_pair(0.0, 3);
        let net = DebiasedSquaredWeightedPhaseLagIndex::new()
            .compute(&mut settings)
            .unwrap();
        assert_eq!(net.edges()[0].weights[TONE_BIN], 0.0);
    }
}
