mod common;
mod entity;

pub use common::{EntityId, ModifierId, Position, Tick};
pub use entity::{Entity, Properties, PropertyKey, PropertyValue};
