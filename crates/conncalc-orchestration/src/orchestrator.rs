//! Core orchestration: method dispatch and concurrent fan-out.
//!
//! Two entry points. [`calculate`] answers "what is *the* method" for call
//! sites that want exactly one network: it dispatches the first requested
//! method in the fixed enumeration order. [`calculate_all`] computes a
//! network per recognized requested method, running parallel-safe routines
//! as one worker-pool batch and the rest on the submitting thread, and
//! returns tagged results in the fixed enumeration order regardless of
//! request order or completion order.
//!
//! Every invocation computes on its own settings snapshot; metric routines
//! mutate internal caches while computing and must never observe another
//! routine's mutations.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, warn};

use conncalc_core::{
    ConnectivityError, ConnectivityMethod, ConnectivityMetric, ConnectivitySettings,
    MetricRegistry, Network,
};

use crate::interfaces::MethodResult;

/// Resolve and run the first requested method in the fixed enumeration
/// order, even if the settings request several.
///
/// If no requested token matches the known vocabulary, emits a diagnostic
/// and returns the empty sentinel network; callers must treat it as absence
/// of a result.
pub fn calculate(
    settings: &ConnectivitySettings,
    registry: &dyn MetricRegistry,
) -> Result<Network, ConnectivityError> {
    for method in ConnectivityMethod::ALL {
        if settings.has_method(method.token()) {
            let metric = registry.get(method)?;
            let mut snapshot = settings.clone();
            return metric.compute(&mut snapshot);
        }
    }

    warn!(methods = ?settings.methods(), "connectivity method unknown");
    Ok(Network::empty())
}

/// Compute a network per recognized requested method.
///
/// Unrecognized tokens are skipped without diagnostics. The returned
/// collection holds one tagged result per recognized method, in the fixed
/// enumeration order. An empty or entirely unrecognized request yields an
/// empty collection. The first failing routine (in enumeration order)
/// aborts the call; results computed alongside it are dropped.
pub fn calculate_all(
    settings: &ConnectivitySettings,
    registry: &dyn MetricRegistry,
) -> Result<Vec<MethodResult>, ConnectivityError> {
    let mut recognized = Vec::new();
    for method in ConnectivityMethod::ALL {
        if settings.has_method(method.token()) {
            recognized.push(registry.get(method)?);
        }
    }
    if recognized.is_empty() {
        return Ok(Vec::new());
    }

    let (pooled, serial): (Vec<_>, Vec<_>) =
        recognized.into_iter().partition(|m| m.parallel_safe());

    let mut outcomes: Vec<(ConnectivityMethod, Result<MethodResult, ConnectivityError>)> = pooled
        .par_iter()
        .map(|metric| (metric.method(), run_timed(metric.as_ref(), settings)))
        .collect();

    // Routines flagged unsafe for the pool run here, on the submitting
    // thread, still against their own snapshot.
    for metric in &serial {
        outcomes.push((metric.method(), run_timed(metric.as_ref(), settings)));
    }

    let mut results = Vec::with_capacity(outcomes.len());
    for method in ConnectivityMethod::ALL {
        if let Some(pos) = outcomes.iter().position(|(m, _)| *m == method) {
            let (_, outcome) = outcomes.swap_remove(pos);
            results.push(outcome?);
        }
    }
    Ok(results)
}

fn run_timed(
    metric: &dyn ConnectivityMetric,
    settings: &ConnectivitySettings,
) -> Result<MethodResult, ConnectivityError> {
    let mut snapshot = settings.clone();
    let start = Instant::now();
    let network = metric.compute(&mut snapshot)?;
    let duration = start.elapsed();
    debug!(
        method = %metric.method(),
        elapsed_ms = duration.as_millis(),
        "calculated connectivity method"
    );
    Ok(MethodResult {
        method: metric.method(),
        network,
        duration,
    })
}
