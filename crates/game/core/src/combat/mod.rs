//! Damage resolution.
//!
//! Two stages, kept apart so the first can be previewed without touching
//! state:
//!
//! - [`DamageVector::resolve`] subtracts the defender's resistances (pure)
//! - [`World::apply_damage`](crate::state::World::apply_damage) runs the
//!   result through damage-modifying attributes and drains HP gauges

mod apply;
pub mod damage;

pub use apply::DamageReport;
pub use damage::{DamageComponent, DamageVector};
