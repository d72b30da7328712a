//! RPC Chaos Library
//!
//! Budgeted random failure injection for exercising the failure paths of an
//! RPC stack in tests. An operator lists RPC methods and a failure budget for
//! each:
//!
//! ```text
//! RPC_CHAOS_FAILURES="PushTask=3,GetObject=5"
//! ```
//!
//! and every call the RPC stack makes to one of those methods asks the
//! [`FailureRegistry`] what to do:
//!
//! - [`FailureDecision::RequestFailure`] (25%): fail before the request is sent
//! - [`FailureDecision::ResponseFailure`] (25%): drop the response after the
//!   call went through
//! - [`FailureDecision::None`] (50%): proceed normally
//!
//! Each injected failure consumes one unit of the method's budget. Once the
//! budget is spent the method is left alone.
//!
//! # Modules
//!
//! - [`budget`] - Failure spec parser and budget table
//! - [`config`] - Configuration from environment
//! - [`errors`] - Error types
//! - [`registry`] - Thread-safe decision registry
//! - [`observability`] - Metrics for injected failures

#![warn(clippy::pedantic)]

pub mod budget;
pub mod config;
pub mod errors;
pub mod observability;
pub mod registry;
pub mod types;

pub use budget::FailureBudgetTable;
pub use config::Config;
pub use errors::ChaosError;
pub use registry::FailureRegistry;
pub use types::FailureDecision;
