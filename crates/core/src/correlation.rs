//! Per-attempt correlation identifiers.
//!
//! Every physical attempt carries a fresh token so each one can be traced on
//! its own. The token has no bearing on retry decisions or server-side
//! idempotency.

use uuid::Uuid;

/// Request header carrying the correlation identifier.
pub const CORRELATION_HEADER: &str = "X-Client-Request-Id";

/// Opaque, freshly generated tracing token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
