//! Action generation errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, StateError};
use crate::stats::StatsError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The actor is not on the map, so there is nowhere to search from.
    #[error("actor {0} has no position")]
    NotPlaced(EntityId),

    /// The requested action is not in the actor's legal set this turn.
    #[error("action is not available to {actor} this turn")]
    NotAvailable { actor: EntityId },

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::NotPlaced(_) => ErrorSeverity::Validation,
            ActionError::NotAvailable { .. } => ErrorSeverity::Recoverable,
            ActionError::State(err) => err.severity(),
            ActionError::Stats(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::NotPlaced(_) => "ACTION_NOT_PLACED",
            ActionError::NotAvailable { .. } => "ACTION_NOT_AVAILABLE",
            ActionError::State(err) => err.error_code(),
            ActionError::Stats(err) => err.error_code(),
        }
    }
}
