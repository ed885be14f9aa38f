//! The computation trait consumed by the orchestration layer.

use crate::error::ConnectivityError;
use crate::method::ConnectivityMethod;
use crate::network::Network;
use crate::settings::ConnectivitySettings;

/// A connectivity metric computation routine.
///
/// Implementations receive a mutable settings bundle because spectral
/// metrics fill the per-trial spectra cache as a side effect. The
/// orchestration layer hands every invocation its own snapshot, so a
/// routine never observes mutation from a concurrently running metric.
pub trait ConnectivityMetric: Send + Sync {
    /// The method this routine implements.
    fn method(&self) -> ConnectivityMethod;

    /// Whether this routine may run on the worker pool alongside other
    /// metrics. Routines that return `false` are executed on the
    /// submitting thread.
    fn parallel_safe(&self) -> bool {
        true
    }

    /// Compute the network for the given settings snapshot.
    fn compute(&self, settings: &mut ConnectivitySettings) -> Result<Network, ConnectivityError>;
}

/// Shared input validation for all metric routines.
pub(crate) fn validate_input(
    settings: &ConnectivitySettings,
) -> Result<(), ConnectivityError> {
    if settings.n_trials_used() == 0 {
        return Err(ConnectivityError::InvalidInput(
            "no trials to compute on".into(),
        ));
    }
    let n_channels = settings.n_channels();
    if n_channels < 2 {
        return Err(ConnectivityError::InvalidInput(format!(
            "need at least two channels, got {n_channels}"
        )));
    }
    Ok(())
}

/// All unordered channel pairs `(i, j)` with `i < j`.
pub(crate) fn channel_pairs(n_channels: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(n_channels * (n_channels.saturating_sub(1)) / 2);
    for i in 0..n_channels {
        for j in (i + 1)..n_channels {
            pairs.push((i, j));
        }
    }
    pairs
}
