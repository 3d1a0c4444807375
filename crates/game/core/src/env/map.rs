use std::collections::HashMap;

use super::MapError;
use crate::state::Position;

/// Static tile layout queried by action generation.
pub trait TileMap {
    fn bounds(&self) -> Bounds;
    fn tile(&self, position: Position) -> Option<&Tile>;

    fn contains(&self, position: Position) -> bool {
        self.bounds().contains(position)
    }

    /// Undefined tiles are not walkable.
    fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(|tile| tile.walkable)
    }

    fn describe(&self, position: Position) -> Option<&str> {
        self.tile(position).map(|tile| tile.description.as_str())
    }
}

/// Inclusive rectangle spanned by the defined tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min: Position,
    pub max: Position,
}

impl Bounds {
    pub fn contains(&self, position: Position) -> bool {
        (self.min.x..=self.max.x).contains(&position.x)
            && (self.min.y..=self.max.y).contains(&position.y)
    }

    pub fn width(&self) -> u32 {
        self.min.x.abs_diff(self.max.x) + 1
    }

    pub fn height(&self) -> u32 {
        self.min.y.abs_diff(self.max.y) + 1
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub walkable: bool,
    pub glyph: char,
    pub description: String,
}

impl Tile {
    pub fn floor() -> Self {
        Self {
            walkable: true,
            glyph: '.',
            description: "A plain stone floor.".into(),
        }
    }

    pub fn wall() -> Self {
        Self {
            walkable: false,
            glyph: '#',
            description: "A solid wall.".into(),
        }
    }
}

/// Glyph to tile mapping used when parsing ASCII layouts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Legend {
    tiles: HashMap<char, Tile>,
}

impl Legend {
    pub fn empty() -> Self {
        Self {
            tiles: HashMap::new(),
        }
    }

    /// Registers `tile` under its own glyph.
    pub fn with(mut self, tile: Tile) -> Self {
        self.tiles.insert(tile.glyph, tile);
        self
    }

    pub fn get(&self, glyph: char) -> Option<&Tile> {
        self.tiles.get(&glyph)
    }
}

impl Default for Legend {
    /// `#` wall, `.` floor.
    fn default() -> Self {
        Self::empty().with(Tile::wall()).with(Tile::floor())
    }
}

/// Sparse tile grid. Positions without a tile are out of the map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    tiles: HashMap<Position, Tile>,
    bounds: Bounds,
}

impl Grid {
    /// Parses an ASCII layout: line index is `y`, column is `x`, spaces are
    /// left undefined.
    pub fn from_ascii(text: &str, legend: &Legend) -> Result<Self, MapError> {
        let mut tiles = HashMap::new();
        for (y, line) in text.lines().enumerate() {
            for (x, glyph) in line.chars().enumerate() {
                if glyph == ' ' {
                    continue;
                }
                let tile = legend.get(glyph).ok_or(MapError::UnknownGlyph {
                    glyph,
                    line: y + 1,
                    column: x + 1,
                })?;
                tiles.insert(Position::new(x as i32, y as i32), tile.clone());
            }
        }
        Self::from_tiles(tiles)
    }

    /// An open `width` x `height` room of floor tiles with its corner at the
    /// origin.
    pub fn open(width: u32, height: u32) -> Result<Self, MapError> {
        let tiles = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| (Position::new(x, y), Tile::floor())))
            .collect();
        Self::from_tiles(tiles)
    }

    pub fn from_tiles(tiles: HashMap<Position, Tile>) -> Result<Self, MapError> {
        let mut positions = tiles.keys();
        let first = *positions.next().ok_or(MapError::Empty)?;
        let bounds = positions.fold(
            Bounds {
                min: first,
                max: first,
            },
            |b, p| Bounds {
                min: Position::new(b.min.x.min(p.x), b.min.y.min(p.y)),
                max: Position::new(b.max.x.max(p.x), b.max.y.max(p.y)),
            },
        );
        Ok(Self { tiles, bounds })
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl TileMap for Grid {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn tile(&self, position: Position) -> Option<&Tile> {
        self.tiles.get(&position)
    }
}
