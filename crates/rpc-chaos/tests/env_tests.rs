//! Environment-driven lifecycle tests.
//!
//! The process environment is shared by every test in a binary, so all
//! environment mutation lives in this file's single test.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::env;

use rpc_chaos::config::FAILURES_ENV_VAR;
use rpc_chaos::{ChaosError, FailureRegistry};

#[test]
fn test_reinitialize_rereads_environment() {
    env::remove_var(FAILURES_ENV_VAR);
    let registry = FailureRegistry::from_env().expect("unset spec is valid");
    assert!(!registry.is_enabled());

    env::set_var(FAILURES_ENV_VAR, "PushTask=2");
    // Not picked up until reinitialized.
    assert!(!registry.is_enabled());
    registry.reinitialize_from_env().unwrap();
    assert!(registry.is_enabled());
    assert_eq!(registry.remaining("PushTask"), Some(2));

    env::set_var(FAILURES_ENV_VAR, "GetObject=1");
    registry.reinitialize_from_env().unwrap();
    assert_eq!(registry.remaining("PushTask"), None);
    assert_eq!(registry.remaining("GetObject"), Some(1));

    env::set_var(FAILURES_ENV_VAR, "GetObject");
    let result = registry.reinitialize_from_env();
    assert!(matches!(result, Err(ChaosError::MalformedEntry(_))));
    assert!(!registry.is_enabled());

    env::set_var(FAILURES_ENV_VAR, "");
    registry.reinitialize_from_env().unwrap();
    assert!(!registry.is_enabled());

    env::remove_var(FAILURES_ENV_VAR);
}
