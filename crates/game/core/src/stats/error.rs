//! Modifier errors.

use crate::error::{ErrorSeverity, GameError};

use super::Capabilities;

/// Errors raised when constructing or invoking a modifier.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// A capability was invoked on a modifier that does not register it.
    #[error("`{modifier}` does not support {capability}")]
    UnsupportedCapability {
        capability: Capabilities,
        modifier: String,
    },

    /// A modifier was built with values that break its invariants.
    #[error("malformed modifier: {reason}")]
    MalformedModifier { reason: &'static str },
}

impl GameError for StatsError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Callers are expected to query `supports` first
            StatsError::UnsupportedCapability { .. } => ErrorSeverity::Internal,
            StatsError::MalformedModifier { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StatsError::UnsupportedCapability { .. } => "STATS_UNSUPPORTED_CAPABILITY",
            StatsError::MalformedModifier { .. } => "STATS_MALFORMED_MODIFIER",
        }
    }
}
