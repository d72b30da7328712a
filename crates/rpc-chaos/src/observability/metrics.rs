//! Metrics definitions for RPC chaos injection.
//!
//! All metrics follow Prometheus naming conventions:
//! - `rpc_chaos_` prefix
//! - `_total` suffix for counters
//!
//! # Cardinality
//!
//! - `method`: bounded by the configured failure spec
//! - `kind`: 2 values (request, response)

use metrics::{counter, gauge};

use crate::types::FailureDecision;

/// Record one injected failure.
///
/// Metric: `rpc_chaos_injected_failures_total`
/// Labels: `method`, `kind`
pub fn record_injected_failure(method: &str, decision: FailureDecision) {
    counter!("rpc_chaos_injected_failures_total",
        "method" => method.to_string(),
        "kind" => decision.as_str()
    )
    .increment(1);
}

/// Set the number of methods under test after a (re)initialization.
///
/// Metric: `rpc_chaos_configured_methods`
#[allow(clippy::cast_precision_loss)] // Method counts are tiny
pub fn set_configured_methods(count: usize) {
    gauge!("rpc_chaos_configured_methods").set(count as f64);
}
