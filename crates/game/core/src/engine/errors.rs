//! Error types for the engine facade.

use crate::action::ActionError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, StateError};

use super::TurnError;

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    /// The action belongs to someone other than the actor whose turn it is.
    #[error("it is not {found}'s turn (current: {expected:?})")]
    NotCurrentActor {
        expected: Option<EntityId>,
        found: EntityId,
    },

    /// A turn was requested while `0` has not acted yet.
    #[error("{0} is still taking its turn")]
    TurnInProgress(EntityId),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Turn(#[from] TurnError),
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExecuteError::NotCurrentActor { .. } => ErrorSeverity::Recoverable,
            ExecuteError::TurnInProgress(_) => ErrorSeverity::Validation,
            ExecuteError::Action(err) => err.severity(),
            ExecuteError::State(err) => err.severity(),
            ExecuteError::Turn(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::NotCurrentActor { .. } => "EXECUTE_NOT_CURRENT_ACTOR",
            ExecuteError::TurnInProgress(_) => "EXECUTE_TURN_IN_PROGRESS",
            ExecuteError::Action(err) => err.error_code(),
            ExecuteError::State(err) => err.error_code(),
            ExecuteError::Turn(err) => err.error_code(),
        }
    }
}
