//! Failure decision registry.
//!
//! The registry owns the failure budget table and the RNG behind one mutex.
//! Every `query` looks up the method, samples and decrements under that lock,
//! so concurrent callers can never inject more failures than the configured
//! budget. `reinitialize` swaps in a fresh table under the same lock; queries
//! see either the old table or the new one, never a mix.
//!
//! # Usage
//!
//! ```rust,ignore
//! let registry = Arc::new(FailureRegistry::from_env()?);
//!
//! match registry.query("PushTask") {
//!     FailureDecision::RequestFailure => return Err(unavailable()),
//!     FailureDecision::ResponseFailure => { send(request)?; return Err(unavailable()) }
//!     FailureDecision::None => send(request),
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, error, info};

use crate::budget::FailureBudgetTable;
use crate::config::Config;
use crate::errors::Result;
use crate::observability::metrics;
use crate::types::FailureDecision;

/// Number of equally likely outcomes per draw: request, response, and two
/// "no failure" slots.
const OUTCOMES: u8 = 4;

#[derive(Debug, Default)]
struct RegistryState {
    budgets: FailureBudgetTable,
    /// `None` while injection is disabled.
    rng: Option<StdRng>,
}

impl RegistryState {
    /// Decide for one call, consuming budget on injection.
    ///
    /// Returns the decision and the budget left, or `None` for no failure.
    fn decide(&mut self, method: &str) -> Option<(FailureDecision, u64)> {
        if !self.budgets.has_budget(method) {
            return None;
        }
        let rng = self.rng.as_mut()?;

        let decision = match rng.gen_range(0..OUTCOMES) {
            0 => FailureDecision::RequestFailure,
            1 => FailureDecision::ResponseFailure,
            _ => return None,
        };
        let remaining = self.budgets.consume(method)?;
        Some((decision, remaining))
    }
}

/// Budgeted random failure injection for RPC methods.
///
/// Construct one per process (or per test harness) and share it by `Arc`.
#[derive(Debug, Default)]
pub struct FailureRegistry {
    /// Mirrors `state.rng.is_some()`. Only written while holding the lock.
    enabled: AtomicBool,
    state: Mutex<RegistryState>,
}

impl FailureRegistry {
    /// A registry that never injects anything.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Create a registry from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the failure spec is malformed. Callers should treat
    /// this as fatal.
    pub fn new(config: &Config) -> Result<Self> {
        let registry = Self::disabled();
        registry.reinitialize(config)?;
        Ok(registry)
    }

    /// Create a registry from the current environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment holds a malformed failure spec.
    pub fn from_env() -> Result<Self> {
        Self::new(&Config::from_env()?)
    }

    /// Replace the budget table with one built from `config`.
    ///
    /// Old budgets are discarded, not merged. A non-empty spec reseeds the RNG
    /// from OS entropy and logs the seed; an empty spec disables injection.
    ///
    /// # Errors
    ///
    /// Returns an error if the failure spec is malformed. The registry is left
    /// disabled with an empty table in that case.
    pub fn reinitialize(&self, config: &Config) -> Result<()> {
        let budgets = match FailureBudgetTable::parse(&config.failure_spec) {
            Ok(budgets) => budgets,
            Err(e) => {
                error!(
                    error = %e,
                    failure_spec = %config.failure_spec,
                    "Invalid RPC failure spec, disabling failure injection"
                );
                self.install(FailureBudgetTable::default(), None);
                return Err(e);
            }
        };

        let seed = config.is_enabled().then(|| OsRng.next_u64());
        self.install(budgets, seed);
        Ok(())
    }

    /// Re-read the environment and reinitialize from it.
    ///
    /// # Errors
    ///
    /// Same as [`FailureRegistry::reinitialize`].
    pub fn reinitialize_from_env(&self) -> Result<()> {
        self.reinitialize(&Config::from_env()?)
    }

    /// Decide whether the current call to `method` should fail.
    ///
    /// Returns `None` without locking when injection is disabled. Otherwise an
    /// unknown or exhausted method yields `None`, and a method with budget
    /// left fails its request 25% of the time and its response 25% of the
    /// time, each injection consuming one unit of budget.
    pub fn query(&self, method: &str) -> FailureDecision {
        if !self.enabled.load(Ordering::Acquire) {
            return FailureDecision::None;
        }

        let Some((decision, remaining)) = self.lock_state().decide(method) else {
            return FailureDecision::None;
        };

        debug!(
            method,
            kind = %decision,
            remaining,
            "Injecting RPC failure"
        );
        metrics::record_injected_failure(method, decision);
        decision
    }

    /// Whether the last (re)initialization enabled injection.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Remaining budget for `method`, or `None` if it is not under test.
    pub fn remaining(&self, method: &str) -> Option<u64> {
        self.lock_state().budgets.remaining(method)
    }

    /// Copy of the current budget table, taken under the lock.
    pub fn snapshot(&self) -> FailureBudgetTable {
        self.lock_state().budgets.clone()
    }

    /// Swap in `budgets` and reseed, or disable when `seed` is `None`.
    ///
    /// The seed log and the gauge are emitted under the lock so they always
    /// describe the table that won when reinitializations overlap.
    fn install(&self, budgets: FailureBudgetTable, seed: Option<u64>) {
        let mut state = self.lock_state();

        match seed {
            Some(seed) => info!(
                seed,
                methods = ?budgets.method_names(),
                "Seeding RPC failure injection"
            ),
            None => debug!("RPC failure injection disabled"),
        }
        metrics::set_configured_methods(budgets.len());

        state.budgets = budgets;
        state.rng = seed.map(StdRng::seed_from_u64);
        self.enabled.store(seed.is_some(), Ordering::Release);
    }

    // Every mutation leaves the state consistent, so a poisoned lock is safe
    // to keep using.
    fn lock_state(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn reseed(&self, seed: u64) {
        self.lock_state().rng = Some(StdRng::seed_from_u64(seed));
    }
}
