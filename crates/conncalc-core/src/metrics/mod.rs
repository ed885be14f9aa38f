//! Metric implementations, one module per method.

pub mod coherence;
pub mod coherency;
pub mod correlation;
pub mod cross_correlation;
pub mod debiased_squared_weighted_phase_lag_index;
pub mod phase_lag_index;
pub mod phase_locking_value;
pub mod unbiased_squared_phase_lag_index;
pub mod weighted_phase_lag_index;

pub use coherence::Coherence;
pub use coherency::ImagCoherence;
pub use correlation::Correlation;
pub use cross_correlation::CrossCorrelation;
pub use debiased_squared_weighted_phase_lag_index::DebiasedSquaredWeightedPhaseLagIndex;
pub use phase_lag_index::PhaseLagIndex;
pub use phase_locking_value::PhaseLockingValue;
pub use unbiased_squared_phase_lag_index::UnbiasedSquaredPhaseLagIndex;
pub use weighted_phase_lag_index::WeightedPhaseLagIndex;

use rayon::prelude::*;

use crate::error::ConnectivityError;
use crate::method::ConnectivityMethod;
use crate::metric::{channel_pairs, validate_input};
use crate::network::{Network, NetworkEdge};
use crate::settings::ConnectivitySettings;
use crate::spectral;

/// Magnitudes below this are treated as zero when normalizing.
pub(crate) const EPS: f64 = 1e-12;

/// Build a spectral network: validate, fill the spectra cache, then compute
/// per-bin edge weights for every channel pair in parallel.
pub(crate) fn spectral_network<F>(
    method: ConnectivityMethod,
    settings: &mut ConnectivitySettings,
    per_pair: F,
) -> Result<Network, ConnectivityError>
where
    F: Fn(&ConnectivitySettings, usize, usize) -> Result<Vec<f64>, ConnectivityError> + Sync,
{
    validate_input(settings)?;
    spectral::ensure_spectra(settings)?;
    let snapshot: &ConnectivitySettings = settings;
    let edges = channel_pairs(snapshot.n_channels())
        .into_par_iter()
        .map(|(i, j)| {
            per_pair(snapshot, i, j).map(|weights| NetworkEdge {
                source: i,
                target: j,
                weights,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let mut network = Network::new(method, snapshot.n_channels(), snapshot.bin_hz());
    for edge in edges {
        network.push_edge(edge);
    }
    Ok(network)
}

/// Build a time-domain network: one scalar weight per channel pair.
pub(crate) fn time_domain_network<F>(
    method: ConnectivityMethod,
    settings: &ConnectivitySettings,
    per_pair: F,
) -> Result<Network, ConnectivityError>
where
    F: Fn(&ConnectivitySettings, usize, usize) -> Result<f64, ConnectivityError> + Sync,
{
    validate_input(settings)?;
    let edges = channel_pairs(settings.n_channels())
        .into_par_iter()
        .map(|(i, j)| {
            per_pair(settings, i, j).map(|weight| NetworkEdge {
                source: i,
                target: j,
                weights: vec![weight],
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let mut network = Network::new(method, settings.n_channels(), 0.0);
    for edge in edges {
        network.push_edge(edge);
    }
    Ok(network)
}
