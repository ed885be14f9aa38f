//! The closed vocabulary of connectivity methods.
//!
//! Each method is identified by a short case-sensitive token (`"COR"`,
//! `"WPLI"`, ...). The declaration order of the enum is the fixed
//! enumeration order used everywhere: single-method dispatch resolves the
//! first requested method in this order, and multi-method results are
//! returned in this order regardless of request order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConnectivityError;

/// A connectivity method from the known vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConnectivityMethod {
    /// Pearson correlation.
    #[serde(rename = "COR")]
    Correlation,
    /// Normalized cross-correlation (maximum over lags).
    #[serde(rename = "XCOR")]
    CrossCorrelation,
    /// Magnitude coherence.
    #[serde(rename = "COH")]
    Coherence,
    /// Imaginary part of coherency.
    #[serde(rename = "IMAGCOH")]
    ImagCoherence,
    /// Phase lag index.
    #[serde(rename = "PLI")]
    PhaseLagIndex,
    /// Phase locking value.
    #[serde(rename = "PLV")]
    PhaseLockingValue,
    /// Weighted phase lag index.
    #[serde(rename = "WPLI")]
    WeightedPhaseLagIndex,
    /// Unbiased squared phase lag index.
    #[serde(rename = "USPLI")]
    UnbiasedSquaredPhaseLagIndex,
    /// Debiased squared weighted phase lag index.
    #[serde(rename = "DSWPLI")]
    DebiasedSquaredWeightedPhaseLagIndex,
}

impl ConnectivityMethod {
    /// All methods in the fixed enumeration order.
    pub const ALL: [ConnectivityMethod; 9] = [
        ConnectivityMethod::Correlation,
        ConnectivityMethod::CrossCorrelation,
        ConnectivityMethod::Coherence,
        ConnectivityMethod::ImagCoherence,
        ConnectivityMethod::PhaseLagIndex,
        ConnectivityMethod::PhaseLockingValue,
        ConnectivityMethod::WeightedPhaseLagIndex,
        ConnectivityMethod::UnbiasedSquaredPhaseLagIndex,
        ConnectivityMethod::DebiasedSquaredWeightedPhaseLagIndex,
    ];

    /// The wire token for this method.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            ConnectivityMethod::Correlation => "COR",
            ConnectivityMethod::CrossCorrelation => "XCOR",
            ConnectivityMethod::Coherence => "COH",
            ConnectivityMethod::ImagCoherence => "IMAGCOH",
            ConnectivityMethod::PhaseLagIndex => "PLI",
            ConnectivityMethod::PhaseLockingValue => "PLV",
            ConnectivityMethod::WeightedPhaseLagIndex => "WPLI",
            ConnectivityMethod::UnbiasedSquaredPhaseLagIndex => "USPLI",
            ConnectivityMethod::DebiasedSquaredWeightedPhaseLagIndex => "DSWPLI",
        }
    }

    /// Whether this method operates on tapered spectra (as opposed to the
    /// raw time series).
    #[must_use]
    pub fn is_spectral(self) -> bool {
        !matches!(
            self,
            ConnectivityMethod::Correlation | ConnectivityMethod::CrossCorrelation
        )
    }
}

impl fmt::Display for ConnectivityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ConnectivityMethod {
    type Err = ConnectivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConnectivityMethod::ALL
            .iter()
            .copied()
            .find(|m| m.token() == s)
            .ok_or_else(|| ConnectivityError::Config(format!("unknown method: {s}")))
    }
}
