//! RPC Chaos Probe
//!
//! Dry-runs the failure spec from the environment against a fresh registry
//! and reports how many failures each method would have seen.
//!
//! # Environment
//!
//! - `RPC_CHAOS_FAILURES`: failure spec, e.g. `PushTask=3,GetObject=5`
//! - `RPC_CHAOS_PROBE_CALLS`: queries issued per method (default: 100)
//!
//! A malformed spec exits non-zero with a diagnostic.

#![warn(clippy::pedantic)]

use rpc_chaos::config::Config;
use rpc_chaos::{FailureDecision, FailureRegistry};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Per-method tally of probe outcomes.
#[derive(Debug, Default)]
struct ProbeSummary {
    request_failures: u32,
    response_failures: u32,
    passed: u32,
}

impl ProbeSummary {
    fn record(&mut self, decision: FailureDecision) {
        match decision {
            FailureDecision::RequestFailure => self.request_failures += 1,
            FailureDecision::ResponseFailure => self.response_failures += 1,
            FailureDecision::None => self.passed += 1,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rpc_chaos=info,rpc_chaos_probe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if !config.is_enabled() {
        info!("RPC_CHAOS_FAILURES is empty, nothing to probe");
        return Ok(());
    }

    let registry = FailureRegistry::new(&config)?;
    let budgets = registry.snapshot();

    info!(
        methods = budgets.len(),
        probe_calls = config.probe_calls,
        "Probing failure spec"
    );

    for method in budgets.method_names() {
        let mut summary = ProbeSummary::default();
        for _ in 0..config.probe_calls {
            summary.record(registry.query(method));
        }

        info!(
            method,
            budget = budgets.remaining(method).unwrap_or_default(),
            request_failures = summary.request_failures,
            response_failures = summary.response_failures,
            passed = summary.passed,
            remaining = registry.remaining(method).unwrap_or_default(),
            "Probe complete"
        );
    }

    Ok(())
}
