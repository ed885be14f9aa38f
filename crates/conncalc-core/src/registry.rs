//! Metric registry and factory.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::ConnectivityError;
use crate::method::ConnectivityMethod;
use crate::metric::ConnectivityMetric;
use crate::metrics::{
    Coherence, Correlation, CrossCorrelation, DebiasedSquaredWeightedPhaseLagIndex,
    ImagCoherence, PhaseLagIndex, PhaseLockingValue, UnbiasedSquaredPhaseLagIndex,
    WeightedPhaseLagIndex,
};

/// Registry trait mapping methods to computation routines.
pub trait MetricRegistry: Send + Sync {
    /// Get or create the routine for a method.
    fn get(&self, method: ConnectivityMethod)
        -> Result<Arc<dyn ConnectivityMetric>, ConnectivityError>;

    /// Resolve a raw token to its routine. Unknown tokens fail with a
    /// configuration error.
    fn resolve(&self, token: &str) -> Result<Arc<dyn ConnectivityMetric>, ConnectivityError> {
        self.get(token.parse()?)
    }

    /// All methods this registry can serve.
    fn available(&self) -> Vec<ConnectivityMethod>;
}

/// Default registry with lazy creation and cache.
pub struct DefaultRegistry {
    cache: RwLock<HashMap<ConnectivityMethod, Arc<dyn ConnectivityMetric>>>,
}

impl DefaultRegistry {
    /// Create a new default registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn create_metric(method: ConnectivityMethod) -> Arc<dyn ConnectivityMetric> {
        match method {
            ConnectivityMethod::Correlation => Arc::new(Correlation::new()),
            ConnectivityMethod::CrossCorrelation => Arc::new(CrossCorrelation::new()),
            ConnectivityMethod::Coherence => Arc::new(Coherence::new()),
            ConnectivityMethod::ImagCoherence => Arc::new(ImagCoherence::new()),
            ConnectivityMethod::PhaseLagIndex => Arc::new(PhaseLagIndex::new()),
            ConnectivityMethod::PhaseLockingValue => Arc::new(PhaseLockingValue::new()),
            ConnectivityMethod::WeightedPhaseLagIndex => Arc::new(WeightedPhaseLagIndex::new()),
            ConnectivityMethod::UnbiasedSquaredPhaseLagIndex => {
                Arc::new(UnbiasedSquaredPhaseLagIndex::new())
            }
            ConnectivityMethod::DebiasedSquaredWeightedPhaseLagIndex => {
                Arc::new(DebiasedSquaredWeightedPhaseLagIndex::new())
            }
        }
    }
}

impl Default for DefaultRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricRegistry for DefaultRegistry {
    fn get(
        &self,
        method: ConnectivityMethod,
    ) -> Result<Arc<dyn ConnectivityMetric>, ConnectivityError> {
        if let Some(metric) = self.cache.read().get(&method) {
            return Ok(Arc::clone(metric));
        }

        let metric = Self::create_metric(method);
        self.cache.write().insert(method, Arc::clone(&metric));
        Ok(metric)
    }

    fn available(&self) -> Vec<ConnectivityMethod> {
        ConnectivityMethod::ALL.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_serves_every_method() {
        let registry = DefaultRegistry::new();
        for method in ConnectivityMethod::ALL {
            let metric = registry.get(method).unwrap();
            assert_eq!(metric.method(), method);
        }
    }

    #[test]
    fn registry_caches() {
        let registry = DefaultRegistry::new();
        let a = registry.get(ConnectivityMethod::Correlation).unwrap();
        let b = registry.get(ConnectivityMethod::Correlation).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn resolve_known_token() {
        let registry = DefaultRegistry::new();
        let metric = registry.resolve("WPLI").unwrap();
        assert_eq!(metric.method(), ConnectivityMethod::WeightedPhaseLagIndex);
    }

    #[test]
    fn resolve_unknown_token() {
        let registry = DefaultRegistry::new();
        assert!(matches!(
            registry.resolve("NOPE"),
            Err(ConnectivityError::Config(_))
        ));
    }

    #[test]
    fn only_coherence_is_serial() {
        let registry = DefaultRegistry::new();
        for method in registry.available() {
            let metric = registry.get(method).unwrap();
            assert_eq!(
                metric.parallel_safe(),
                method != ConnectivityMethod::Coherence,
                "unexpected parallel-safety for {method}"
            );
        }
    }
}
