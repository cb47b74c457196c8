//! Outcome of a single check.

/// Pass/fail verdict of one validator invocation, before the engine wraps it
/// into a [`ValidationResult`](rules_core::ValidationResult).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Whether the check passed
    pub passed: bool,
    /// Failure explanation
    pub message: Option<String>,
}

impl CheckOutcome {
    /// A passing outcome.
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: None,
        }
    }

    /// A failing outcome with a message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: Some(message.into()),
        }
    }

    /// Passes when `passed` is true, fails with the lazily built message otherwise.
    pub fn check(passed: bool, message: impl FnOnce() -> String) -> Self {
        if passed { Self::pass() } else { Self::fail(message()) }
    }
}
