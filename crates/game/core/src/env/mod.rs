//! Read-only world data.
//!
//! The tile map answers walkability queries for action generation, and item
//! templates describe what can be spawned. Neither is mutated during play.
mod error;
mod items;
mod map;

pub use error::MapError;
pub use items::ItemTemplate;
pub use map::{Bounds, Grid, Legend, Tile, TileMap};
