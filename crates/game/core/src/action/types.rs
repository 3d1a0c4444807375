//! Action values produced by generation and consumed by the engine.
//!
//! Every action that needs the actor to walk first carries that walk in
//! `via`, so a UI can draw "move, then attack" as one choice.

use std::fmt;

use crate::combat::DamageVector;
use crate::state::{EntityId, Position};

/// Walk along `path` (start tile excluded, destination last).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub path: Vec<Position>,
}

impl MoveAction {
    pub fn destination(&self) -> Option<Position> {
        self.path.last().copied()
    }

    pub fn steps(&self) -> usize {
        self.path.len()
    }
}

/// Pick up the unowned `item` lying on `position`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupAction {
    pub actor: EntityId,
    pub item: EntityId,
    pub position: Position,
    pub via: Option<MoveAction>,
}

/// Strike the actor on `position` with a granted melee attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeleeAction {
    pub attacker: EntityId,
    pub target: EntityId,
    pub position: Position,
    pub damage: DamageVector,
    pub via: Option<MoveAction>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Pass the turn.
    Wait { actor: EntityId },
    Move(MoveAction),
    Pickup(PickupAction),
    Melee(MeleeAction),
}

impl Action {
    pub fn actor(&self) -> EntityId {
        match self {
            Action::Wait { actor } => *actor,
            Action::Move(action) => action.actor,
            Action::Pickup(action) => action.actor,
            Action::Melee(action) => action.attacker,
        }
    }

    /// Tile the UI should highlight for this action, if any.
    pub fn marker(&self) -> Option<Position> {
        match self {
            Action::Wait { .. } => None,
            Action::Move(action) => action.destination(),
            Action::Pickup(action) => Some(action.position),
            Action::Melee(action) => Some(action.position),
        }
    }

    /// The walk performed before the action itself.
    pub fn via(&self) -> Option<&MoveAction> {
        match self {
            Action::Wait { .. } | Action::Move(_) => None,
            Action::Pickup(action) => action.via.as_ref(),
            Action::Melee(action) => action.via.as_ref(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(via) = self.via().and_then(MoveAction::destination) {
            write!(f, "move to {via}, then ")?;
        }
        match self {
            Action::Wait { .. } => write!(f, "wait"),
            Action::Move(action) => match action.destination() {
                Some(destination) => write!(f, "move to {destination}"),
                None => write!(f, "stay"),
            },
            Action::Pickup(action) => {
                write!(f, "pick up {} at {}", action.item, action.position)
            }
            Action::Melee(action) => write!(
                f,
                "attack {} at {} ({})",
                action.target, action.position, action.damage
            ),
        }
    }
}
