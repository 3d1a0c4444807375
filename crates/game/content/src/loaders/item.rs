//! Item catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::ItemTemplate;

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemTemplate>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item templates from a RON file.
    ///
    /// Every modifier is validated up front so a bad catalog fails at load
    /// time rather than on first spawn.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ItemTemplate>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        for item in &catalog.items {
            for modifier in &item.modifiers {
                modifier
                    .validate()
                    .map_err(|e| anyhow::anyhow!("Invalid modifier on '{}': {}", item.name, e))?;
            }
        }

        tracing::debug!(count = catalog.items.len(), "loaded item catalog");
        Ok(catalog.items)
    }
}
