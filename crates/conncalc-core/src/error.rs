//! Error type shared across the connectivity crates.

/// Error type for connectivity computations.
#[derive(Debug, thiserror::Error)]
pub enum ConnectivityError {
    /// Configuration error (unknown method token, invalid builder input).
    #[error("configuration error: {0}")]
    Config(String),

    /// Input signal data is malformed (dimension mismatch, too few channels).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A metric routine failed during computation.
    #[error("computation error: {0}")]
    Computation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ConnectivityError::Config("unknown method: FOO".into());
        assert_eq!(err.to_string(), "configuration error: unknown method: FOO");

        let err = ConnectivityError::InvalidInput("trial 2 has 3 channels, expected 4".into());
        assert!(err.to_string().starts_with("invalid input:"));

        let err = ConnectivityError::Computation("estimator undefined".into());
        assert!(err.to_string().starts_with("computation error:"));
    }
}
