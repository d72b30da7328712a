//! Observability for injected failures.
//!
//! Metrics go through the `metrics` facade; the embedding process decides
//! which recorder (if any) is installed.

pub mod metrics;
