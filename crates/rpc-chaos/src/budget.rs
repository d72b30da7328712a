//! Failure budget table and its configuration parser.
//!
//! The spec format is a comma-separated list of `method=count` pairs:
//!
//! ```text
//! PushTask=3,GetObject=5
//! ```
//!
//! # Parsing rules
//!
//! - Every entry must split into exactly two parts on `=`. Anything else,
//!   including the empty entry produced by a trailing comma, is rejected.
//! - Whitespace around names and counts is ignored. Empty names are rejected.
//! - Counts are parsed permissively: leading digits are taken and the rest is
//!   ignored. `"abc"` is 0, `"3x"` is 3, negative values are 0 and values past
//!   `u64::MAX` saturate. Test configs rely on this leniency, so it is kept.
//! - A method may appear only once.
//! - The empty spec is an empty table.

use std::collections::HashMap;

use crate::errors::{ChaosError, Result};

/// Separator between `method=count` entries.
const ENTRY_SEPARATOR: char = ',';

/// Separator between a method name and its count.
const COUNT_SEPARATOR: char = '=';

/// Remaining failure budget per RPC method.
///
/// Exhausted methods stay in the table with a zero budget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureBudgetTable {
    budgets: HashMap<String, u64>,
}

impl FailureBudgetTable {
    /// Parse a failure spec into a budget table.
    ///
    /// # Errors
    ///
    /// - `ChaosError::MalformedEntry` if an entry is not `name=count` or has
    ///   an empty name.
    /// - `ChaosError::DuplicateMethod` if a method is listed twice.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut budgets = HashMap::new();
        if spec.is_empty() {
            return Ok(Self { budgets });
        }

        for entry in spec.split(ENTRY_SEPARATOR) {
            let mut parts = entry.split(COUNT_SEPARATOR);
            let (Some(name), Some(count), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(ChaosError::MalformedEntry(entry.to_string()));
            };

            let name = name.trim();
            if name.is_empty() {
                return Err(ChaosError::MalformedEntry(entry.to_string()));
            }

            if budgets
                .insert(name.to_string(), parse_count(count))
                .is_some()
            {
                return Err(ChaosError::DuplicateMethod(name.to_string()));
            }
        }

        Ok(Self { budgets })
    }

    /// Remaining budget for `method`, or `None` if it is not under test.
    pub fn remaining(&self, method: &str) -> Option<u64> {
        self.budgets.get(method).copied()
    }

    /// Consume one unit of budget for `method`.
    ///
    /// Returns the budget left after the decrement, or `None` when the method
    /// is unknown or already exhausted. The counter never goes below zero.
    pub(crate) fn consume(&mut self, method: &str) -> Option<u64> {
        let remaining = self.budgets.get_mut(method)?;
        *remaining = remaining.checked_sub(1)?;
        Some(*remaining)
    }

    /// Whether `method` is configured and still has budget left.
    pub fn has_budget(&self, method: &str) -> bool {
        self.remaining(method).is_some_and(|n| n > 0)
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    /// Configured method names, sorted for stable log output.
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.budgets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Leading-digits integer parse.
///
/// Skips leading whitespace, accepts an optional sign and reads the longest
/// run of ASCII digits. No digits and negative numbers both yield 0.
fn parse_count(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('-') {
        return 0;
    }
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}
