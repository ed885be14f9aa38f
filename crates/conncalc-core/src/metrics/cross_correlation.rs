//! Normalized cross-correlation, maximum over all lags.
//!
//! Computed per trial via FFT (linear correlation through zero padding),
//! normalized by the signal energies, then averaged over trials.

use std::sync::Arc;

use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftPlanner};

use crate::error::ConnectivityError;
use crate::method::ConnectivityMethod;
use crate::metric::ConnectivityMetric;
use crate::metrics::{time_domain_network, EPS};
use crate::network::Network;
use crate::settings::ConnectivitySettings;

/// Normalized cross-correlation (`XCOR`).
#[derive(Debug, Default)]
pub struct CrossCorrelation;

impl CrossCorrelation {
    /// Create a new cross-correlation metric.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn centered(x: &[f64]) -> (Vec<f64>, f64) {
    let mean = x.iter().sum::<f64>() / x.len() as f64;
    let centered: Vec<f64> = x.iter().map(|&v| v - mean).collect();
    let energy = centered.iter().map(|v| v * v).sum::<f64>();
    (centered, energy)
}

fn spectrum(x: &[f64], fft_len: usize, fft: &Arc<dyn Fft<f64>>) -> Vec<Complex64> {
    let mut buf: Vec<Complex64> = x.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    buf.resize(fft_len, Complex64::new(0.0, 0.0));
    fft.process(&mut buf);
    buf
}

/// Maximum absolute normalized cross-correlation over all lags.
fn max_xcorr(
    x: &[f64],
    y: &[f64],
    fft_len: usize,
    fft: &Arc<dyn Fft<f64>>,
    ifft: &Arc<dyn Fft<f64>>,
) -> f64 {
    let (cx, ex) = centered(x);
    let (cy, ey) = centered(y);
    let norm = (ex * ey).sqrt();
    if norm <= EPS {
        return 0.0;
    }
    let sx = spectrum(&cx, fft_len, fft);
    let sy = spectrum(&cy, fft_len, fft);
    let mut cross: Vec<Complex64> = sx
        .iter()
        .zip(&sy)
        .map(|(a, b)| *a * b.conj())
        .collect();
    ifft.process(&mut cross);
    let scale = 1.0 / fft_len as f64;
    cross
        .iter()
        .map(|c| (c.re * scale).abs())
        .fold(0.0, f64::max)
        / norm
}

impl ConnectivityMetric for CrossCorrelation {
    fn method(&self) -> ConnectivityMethod {
        ConnectivityMethod::CrossCorrelation
    }

    fn compute(&self, settings: &mut ConnectivitySettings) -> Result<Network, ConnectivityError> {
        let n_samples = settings.n_samples();
        // Zero padding to 2n-1 keeps the correlation linear, not circular.
        let fft_len = (2 * n_samples.max(1) - 1).next_power_of_two();
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_len);
        let ifft = planner.plan_fft_inverse(fft_len);

        time_domain_network(self.method(), settings, |settings, i, j| {
            let mut sum = 0.0;
            for trial in settings.used_trials() {
                sum += max_xcorr(trial.row(i), trial.row(j), fft_len, &fft, &ifft);
            }
            Ok(sum / settings.n_trials_used() as f64)
        })
    }
}
