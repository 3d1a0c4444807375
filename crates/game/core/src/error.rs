//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (e.g. `StateError`, `StatsError`, `ActionError`) are
//! defined in their respective modules alongside the operations they guard.
//! Every one of them is a local precondition failure: the operation is
//! rejected and state is left unchanged. Nothing here is retried.

/// Severity level of an error, used for categorization and logging priority.
///
/// - **Recoverable**: the caller may pick another action (e.g. target moved away)
/// - **Validation**: invalid input, should not be retried unchanged
/// - **Internal**: unexpected state inconsistency, indicates a bug
/// - **Fatal**: state can no longer be trusted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
