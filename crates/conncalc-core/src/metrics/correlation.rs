//! Pearson correlation between channel pairs, averaged over trials.

use crate::error::ConnectivityError;
use crate::method::ConnectivityMethod;
use crate::metric::ConnectivityMetric;
use crate::metrics::time_domain_network;
use crate::network::Network;
use crate::settings::ConnectivitySettings;

/// Pearson correlation (`COR`).
#[derive(Debug, Default)]
pub struct Correlation;

impl Correlation {
    /// Create a new correlation metric.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Pearson correlation coefficient of two equal-length signals.
///
/// Returns 0.0 when either signal has zero variance.
pub(crate) fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let da = a - mean_x;
        let db = b - mean_y;
        cov += da * db;
        var_x += da * da;
        var_y += db * db;
    }
    let denom = (var_x * var_y).sqrt();
    if denom <= f64::EPSILON {
        0.0
    } else {
        cov / denom
    }
}

impl ConnectivityMetric for Correlation {
    fn method(&self) -> ConnectivityMethod {
        ConnectivityMethod::Correlation
    }

    fn compute(&self, settings: &mut ConnectivitySettings) -> Result<Network, ConnectivityError> {
        time_domain_network(self.method(), settings, |settings, i, j| {
            let mut sum = 0.0;
            for trial in settings.used_trials() {
                sum += pearson(trial.row(i), trial.row(j));
            }
            Ok(sum / settings.n_trials_used() as f64)
        })
    }
}
