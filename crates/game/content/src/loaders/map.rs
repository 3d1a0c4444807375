//! Map layout loader.
//!
//! Maps are plain ASCII text, one row per line, parsed with the default
//! legend (`#` wall, `.` floor). Spaces leave holes in the map.

use std::path::Path;

use tactics_core::{Grid, Legend};

use crate::loaders::{LoadResult, read_file};

/// Loader for map layouts from text files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<Grid> {
        Self::load_with_legend(path, &Legend::default())
    }

    pub fn load_with_legend(path: &Path, legend: &Legend) -> LoadResult<Grid> {
        let content = read_file(path)?;
        let grid = Grid::from_ascii(&content, legend)
            .map_err(|e| anyhow::anyhow!("Failed to parse map {}: {}", path.display(), e))?;
        Ok(grid)
    }
}
