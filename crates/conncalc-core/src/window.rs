//! Window functions for the tapered FFT.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConnectivityError;

/// Window function applied to each trial before the FFT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowType {
    /// Hanning window (default).
    #[default]
    Hanning,
    /// Hamming window.
    Hamming,
    /// Rectangular window (no taper).
    Square,
}

impl WindowType {
    /// Generate the window coefficients for the given length.
    #[must_use]
    pub fn coefficients(self, len: usize) -> Vec<f64> {
        if len <= 1 {
            return vec![1.0; len];
        }
        let denom = (len - 1) as f64;
        match self {
            WindowType::Hanning => (0..len)
                .map(|n| 0.5 * (1.0 - (2.0 * std::f64::consts::PI * n as f64 / denom).cos()))
                .collect(),
            WindowType::Hamming => (0..len)
                .map(|n| 0.54 - 0.46 * (2.0 * std::f64::consts::PI * n as f64 / denom).cos())
                .collect(),
            WindowType::Square => vec![1.0; len],
        }
    }

    /// The token used by the configuration layer.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            WindowType::Hanning => "Hanning",
            WindowType::Hamming => "Hamming",
            WindowType::Square => "Square",
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for WindowType {
    type Err = ConnectivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hanning" => Ok(WindowType::Hanning),
            "Hamming" => Ok(WindowType::Hamming),
            "Square" => Ok(WindowType::Square),
            other => Err(ConnectivityError::Config(format!(
                "unknown window type: {other}"
            ))),
        }
    }
}
