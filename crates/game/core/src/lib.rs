//! Deterministic simulation core for a tile-based tactical game.
//!
//! `tactics-core` owns the entity tree and the rules that read it: stat
//! aggregation from carried items, damage resolution, legal-action
//! enumeration and initiative scheduling. It performs no I/O. Content
//! loading lives in `tactics-content`; presentation belongs to clients.
//!
//! All state mutation during play flows through [`engine::GameEngine`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use action::{
    Action, ActionContext, ActionError, MeleeAction, MoveAction, PickupAction,
    get_available_actions,
};
pub use combat::{DamageComponent, DamageReport, DamageVector};
pub use config::GameConfig;
pub use engine::{ActionOutcome, ExecuteError, GameEngine, GameState, TurnError, TurnScheduler};
pub use env::{Grid, ItemTemplate, Legend, MapError, Tile, TileMap};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    EntityId, EntitySummary, ModifierId, Position, PropertyKey, PropertyValue, StateError, Tick,
    World,
};
pub use stats::{Capabilities, Modifier, StatName, StatSheet, StatsError, Temperature};
