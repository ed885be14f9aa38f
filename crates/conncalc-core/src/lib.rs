//! # conncalc-core
//!
//! Core library for the ConnCalc-rs connectivity calculator: settings,
//! network structures, the method vocabulary and registry, and the metric
//! implementations (correlation, coherence, and the phase-synchrony family).

pub mod error;
pub mod method;
pub mod metric;
pub mod metrics;
pub mod network;
pub mod registry;
pub mod settings;
pub(crate) mod spectral;
pub mod window;

// Re-exports
pub use error::ConnectivityError;
pub use method::ConnectivityMethod;
pub use metric::ConnectivityMetric;
pub use network::{Network, NetworkEdge, NetworkNode};
pub use registry::{DefaultRegistry, MetricRegistry};
pub use settings::{ConnectivitySettings, ConnectivitySettingsBuilder, FreqBand, SignalTrial};
pub use window::WindowType;

/// Compute one connectivity network for the given trials.
///
/// This is a convenience function for simple use cases. For multi-method
/// requests, custom registries, or full parameter control, build a
/// [`ConnectivitySettings`] and use the orchestration crate.
///
/// # Example
/// ```
/// let ramp: Vec<f64> = (0..16).map(f64::from).collect();
/// let trials = vec![vec![ramp.clone(), ramp]];
/// let network = conncalc_core::connectivity(trials, 100.0, "COR").unwrap();
/// assert_eq!(network.edges().len(), 1);
/// assert!((network.edges()[0].weights[0] - 1.0).abs() < 1e-12);
/// ```
pub fn connectivity(
    trials: Vec<Vec<Vec<f64>>>,
    sampling_freq: f64,
    token: &str,
) -> Result<Network, ConnectivityError> {
    let mut builder = ConnectivitySettings::builder()
        .sampling_freq(sampling_freq)
        .method(token);
    for rows in trials {
        builder = builder.trial(rows);
    }
    let mut settings = builder.build()?;
    let registry = DefaultRegistry::new();
    let metric = registry.resolve(token)?;
    metric.compute(&mut settings)
}
