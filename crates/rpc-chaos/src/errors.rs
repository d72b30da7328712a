//! RPC chaos error types.
//!
//! Every variant describes a configuration the operator must fix. Callers are
//! expected to treat these as fatal and stop rather than run chaos tests with
//! a guessed failure budget.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors produced while building a failure budget table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChaosError {
    /// A comma-separated entry did not split into exactly `name=count`.
    #[error("Malformed failure entry '{0}': expected name=count")]
    MalformedEntry(String),

    /// The same method name appeared more than once.
    #[error("Duplicate failure entry for method '{0}'")]
    DuplicateMethod(String),

    /// The configuration could not be read.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias using `ChaosError`
pub type Result<T> = std::result::Result<T, ChaosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChaosError::MalformedEntry("a".to_string());
        assert_eq!(
            err.to_string(),
            "Malformed failure entry 'a': expected name=count"
        );

        let err = ChaosError::DuplicateMethod("PushTask".to_string());
        assert_eq!(
            err.to_string(),
            "Duplicate failure entry for method 'PushTask'"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err: ChaosError = ConfigError::InvalidValue("RPC_CHAOS_FAILURES".to_string()).into();
        assert!(matches!(err, ChaosError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
