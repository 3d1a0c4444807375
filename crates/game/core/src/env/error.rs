//! Tile map errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised while building a [`Grid`](super::Grid).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// The ASCII layout used a glyph the legend does not define.
    #[error("unknown glyph {glyph:?} at line {line}, column {column}")]
    UnknownGlyph {
        glyph: char,
        line: usize,
        column: usize,
    },

    /// The layout defined no tiles at all.
    #[error("map is empty")]
    Empty,
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            MapError::UnknownGlyph { .. } => "MAP_UNKNOWN_GLYPH",
            MapError::Empty => "MAP_EMPTY",
        }
    }
}
