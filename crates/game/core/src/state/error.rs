//! Entity arena errors.
//!
//! Errors related to property access, ownership transfer and entity lookup.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, ModifierId, PropertyKey};
use crate::stats::StatsError;

/// Errors that occur while reading or mutating the entity tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// A property name outside the registered key set was read or written.
    #[error("property `{key}` is not registered")]
    InvalidProperty { key: String },

    /// A value of one property shape was stored under another key.
    #[error("property `{key}` cannot hold a `{found}` value")]
    PropertyTypeMismatch {
        key: PropertyKey,
        found: PropertyKey,
    },

    /// The property is maintained by the world (e.g. the modifier list).
    #[error("property `{key}` is managed by the world and cannot be set directly")]
    ManagedProperty { key: PropertyKey },

    #[error("entity {0} not found")]
    UnknownEntity(EntityId),

    #[error("modifier {0:?} not found")]
    UnknownModifier(ModifierId),

    /// The requested ownership edge would break the single-owner tree.
    #[error("entity {entity} cannot be owned by {owner}: {reason}")]
    OwnershipViolation {
        entity: EntityId,
        owner: EntityId,
        reason: &'static str,
    },

    /// The operation requires an entity flagged `has_stats`.
    #[error("entity {0} is not an actor")]
    NotAnActor(EntityId),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            InvalidProperty { .. }
            | PropertyTypeMismatch { .. }
            | ManagedProperty { .. }
            | OwnershipViolation { .. }
            | NotAnActor(_) => ErrorSeverity::Validation,

            // Dangling handles mean someone kept an id past removal
            UnknownEntity(_) | UnknownModifier(_) => ErrorSeverity::Internal,

            Stats(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            InvalidProperty { .. } => "STATE_INVALID_PROPERTY",
            PropertyTypeMismatch { .. } => "STATE_PROPERTY_TYPE_MISMATCH",
            ManagedProperty { .. } => "STATE_MANAGED_PROPERTY",
            UnknownEntity(_) => "STATE_UNKNOWN_ENTITY",
            UnknownModifier(_) => "STATE_UNKNOWN_MODIFIER",
            OwnershipViolation { .. } => "STATE_OWNERSHIP_VIOLATION",
            NotAnActor(_) => "STATE_NOT_AN_ACTOR",
            Stats(err) => err.error_code(),
        }
    }
}
