//! Authoritative simulation state.
//!
//! This module owns the entity arena: entities, their closed property bags,
//! the ownership tree (actor → inventory) and the modifiers attached to items.
//! Stat sheets are never stored here; they are rebuilt on demand from the
//! tree (see [`crate::stats`]).
mod error;
mod summary;
mod types;
mod world;

pub use error::StateError;
pub use summary::EntitySummary;
pub use types::{
    Entity, EntityId, ModifierId, Position, Properties, PropertyKey, PropertyValue, Tick,
};
pub use world::{AttachedModifier, World};
