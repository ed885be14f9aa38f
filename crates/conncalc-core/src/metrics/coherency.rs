//! Shared coherency base for the coherence family.
//!
//! Coherency of a channel pair at bin `k` is the trial-averaged
//! cross-spectral density normalized by the power spectral densities:
//! `C_ij(k) = <S_i S_j*> / sqrt(<|S_i|^2> <|S_j|^2>)`. Coherence takes the
//! magnitude, imaginary coherence the absolute imaginary part.

use rayon::prelude::*;
use rustfft::num_complex::Complex64;

use crate::error::ConnectivityError;
use crate::method::ConnectivityMethod;
use crate::metric::{channel_pairs, validate_input, ConnectivityMetric};
use crate::metrics::EPS;
use crate::network::{Network, NetworkEdge};
use crate::settings::ConnectivitySettings;
use crate::spectral;

/// Compute a coherency-family network, projecting each complex coherency
/// value to a weight with `project`.
pub(crate) fn coherency_network(
    method: ConnectivityMethod,
    settings: &mut ConnectivitySettings,
    project: fn(Complex64) -> f64,
) -> Result<Network, ConnectivityError> {
    validate_input(settings)?;
    spectral::ensure_spectra(settings)?;
    let snapshot: &ConnectivitySettings = settings;
    let n_channels = snapshot.n_channels();

    let psds: Vec<Vec<f64>> = (0..n_channels)
        .into_par_iter()
        .map(|ch| spectral::mean_psd(snapshot, ch))
        .collect::<Result<_, _>>()?;

    let edges = channel_pairs(n_channels)
        .into_par_iter()
        .map(|(i, j)| {
            let mut acc = vec![Complex64::new(0.0, 0.0); snapshot.n_bins()];
            let count = spectral::for_each_trial_csd(snapshot, i, j, |csd| {
                for (slot, c) in acc.iter_mut().zip(csd) {
                    *slot += *c;
                }
            })?;
            let scale = 1.0 / count as f64;
            let weights = acc
                .iter()
                .enumerate()
                .map(|(k, c)| {
                    let denom = (psds[i][k] * psds[j][k]).sqrt();
                    if denom <= EPS {
                        0.0
                    } else {
                        project(*c * scale / denom)
                    }
                })
                .collect();
            Ok(NetworkEdge {
                source: i,
                target: j,
                weights,
            })
        })
        .collect::<Result<Vec<_>, ConnectivityError>>()?;

    let mut network = Network::new(method, n_channels, snapshot.bin_hz());
    for edge in edges {
        network.push_edge(edge);
    }
    Ok(network)
}

/// Imaginary part of coherency (`IMAGCOH`).
#[derive(Debug, Default)]
pub struct ImagCoherence;

impl ImagCoherence {
    /// Create a new imaginary coherence metric.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ConnectivityMetric for ImagCoherence {
    fn method(&self) -> ConnectivityMethod {
        ConnectivityMethod::ImagCoherence
    }

    fn compute(&self, settings: &mut ConnectivitySettings) -> Result<Network, ConnectivityError> {
        coherency_network(self.method(), settings, |c| c.im.abs())
    }
}
