//! Decision values handed back to the RPC stack.

use std::fmt;

/// Outcome of a single failure query.
///
/// The caller acts on it and drops it; it is never stored by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FailureDecision {
    /// Proceed normally.
    #[default]
    None,
    /// Simulate a failure to send the request.
    RequestFailure,
    /// Simulate losing the response after the call otherwise succeeded.
    ResponseFailure,
}

impl FailureDecision {
    /// Whether a failure was injected.
    #[must_use]
    pub fn is_injected(self) -> bool {
        !matches!(self, FailureDecision::None)
    }

    /// Stable label used in logs and metrics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FailureDecision::None => "none",
            FailureDecision::RequestFailure => "request",
            FailureDecision::ResponseFailure => "response",
        }
    }
}

impl fmt::Display for FailureDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
