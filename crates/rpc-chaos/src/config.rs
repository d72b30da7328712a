//! RPC chaos configuration.
//!
//! Configuration is loaded from environment variables. The failure spec is
//! re-read on every call so test harnesses can change it between cases.

use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Environment variable holding the failure spec (`method=count,...`).
pub const FAILURES_ENV_VAR: &str = "RPC_CHAOS_FAILURES";

/// Environment variable holding the number of probe calls per method.
pub const PROBE_CALLS_ENV_VAR: &str = "RPC_CHAOS_PROBE_CALLS";

/// Default number of probe calls issued per configured method.
pub const DEFAULT_PROBE_CALLS: u32 = 100;

/// RPC chaos configuration.
///
/// An empty `failure_spec` disables injection entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Raw failure spec, e.g. `"PushTask=3,GetObject=5"`.
    pub failure_spec: String,

    /// Queries issued per method by the probe binary (default: 100).
    pub probe_calls: u32,
}

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is present but unusable (not UTF-8, not a number).
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Build a configuration directly from a failure spec.
    pub fn with_failure_spec(failure_spec: impl Into<String>) -> Self {
        Self {
            failure_spec: failure_spec.into(),
            probe_calls: DEFAULT_PROBE_CALLS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A missing failure spec is not an error; it disables injection.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is not valid UTF-8
    /// or `RPC_CHAOS_PROBE_CALLS` is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut vars = HashMap::new();
        for name in [FAILURES_ENV_VAR, PROBE_CALLS_ENV_VAR] {
            match env::var(name) {
                Ok(value) => {
                    vars.insert(name.to_string(), value);
                }
                Err(env::VarError::NotPresent) => {}
                Err(env::VarError::NotUnicode(_)) => {
                    return Err(ConfigError::InvalidValue(format!(
                        "{name} is not valid UTF-8"
                    )));
                }
            }
        }
        Self::from_vars(&vars)
    }

    /// Load configuration from a `HashMap` (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `RPC_CHAOS_PROBE_CALLS` is not
    /// a number.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let failure_spec = vars.get(FAILURES_ENV_VAR).cloned().unwrap_or_default();

        let probe_calls = match vars.get(PROBE_CALLS_ENV_VAR) {
            Some(raw) => raw.trim().parse().map_err(|e| {
                ConfigError::InvalidValue(format!("{PROBE_CALLS_ENV_VAR}={raw}: {e}"))
            })?,
            None => DEFAULT_PROBE_CALLS,
        };

        Ok(Config {
            failure_spec,
            probe_calls,
        })
    }

    /// Whether this configuration enables any injection at all.
    pub fn is_enabled(&self) -> bool {
        !self.failure_spec.is_empty()
    }
}
