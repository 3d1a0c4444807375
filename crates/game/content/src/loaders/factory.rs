//! Content factory for building session inputs from data files.

use std::path::{Path, PathBuf};

use tactics_core::{GameConfig, Grid, ItemTemplate};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult, MapLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// └── maps/
///     ├── arena.txt
///     └── corridor.txt
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load item templates from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemTemplate>> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Load a map from `maps/{map_name}.txt`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<Grid> {
        let path = self.data_dir.join("maps").join(format!("{}.txt", map_name));
        MapLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_data_dir;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn sample_data_loads() {
        let factory = ContentFactory::new(sample_data_dir());
        let config = factory.load_config().unwrap();
        assert!(config.turn_threshold > 0);

        let items = factory.load_items().unwrap();
        assert!(items.iter().any(|item| item.name == "training sword"));

        let map = factory.load_map("arena").unwrap();
        assert!(!map.is_empty());
    }

    #[test]
    fn missing_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        let err = factory.load_items().unwrap_err();
        assert!(err.to_string().contains("items.ron"));
    }
}
