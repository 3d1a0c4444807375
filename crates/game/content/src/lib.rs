//! Data-driven content and loaders.
//!
//! This crate turns files into core types:
//! - Item catalogs (RON) into [`ItemTemplate`](tactics_core::ItemTemplate)s
//! - Game configuration (TOML) into [`GameConfig`](tactics_core::GameConfig)
//! - ASCII layouts into [`Grid`](tactics_core::Grid)s
//!
//! Content is consumed when a session is built and never appears in game
//! state. A sample data directory ships in `data/` (see [`sample_data_dir`]).

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ItemCatalog, ItemLoader, MapLoader};

use std::path::PathBuf;

/// The `data/` directory bundled with this crate.
pub fn sample_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}
