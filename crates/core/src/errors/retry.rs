/// Classification for retry policy.
///
/// Used by the [`AttemptRunner`](crate::retry::AttemptRunner) to decide
/// whether a failed attempt is worth repeating.
///
/// # Behavior Summary
///
/// | Failure | Class |
/// |---------|-------|
/// | Transport (timeout, connect, I/O) | `Retriable` |
/// | Status missing, 429, or 500-599 | `Retriable` |
/// | Any other status | `Fatal` |
/// | Empty result, parse, config, unknown | `Fatal` |
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum RetryClass {
    /// The same call may succeed if attempted again unchanged.
    Retriable,

    /// Retrying will not help. The failure is surfaced as-is.
    Fatal,
}

impl RetryClass {
    pub fn is_retriable(self) -> bool {
        matches!(self, RetryClass::Retriable)
    }
}

impl std::fmt::Display for RetryClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retriable => write!(f, "Retriable"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Anything the [`AttemptRunner`](crate::retry::AttemptRunner) can judge.
///
/// The judgment must depend on the failure value alone, never on how many
/// attempts came before it.
pub trait Classify {
    fn retry_class(&self) -> RetryClass;
}

/// Classify a status-coded failure.
///
/// `None` covers failures that claim to be status-coded but carry no status.
pub fn classify_status(status: Option<u16>) -> RetryClass {
    match status {
        None | Some(429) | Some(500..=599) => RetryClass::Retriable,
        Some(_) => RetryClass::Fatal,
    }
}
