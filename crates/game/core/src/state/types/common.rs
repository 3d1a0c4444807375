use std::fmt;

use arrayvec::ArrayVec;
use slotmap::{Key, new_key_type};

new_key_type! {
    /// Unique identifier for any entity tracked in the [`World`](crate::state::World).
    ///
    /// Identifiers are generation-checked arena handles: a stale id never
    /// aliases a newer entity. `EntityId::null()` is the reserved
    /// "not yet assigned" value.
    pub struct EntityId;

    /// Identifier of a modifier attached to an item.
    pub struct ModifierId;
}

impl EntityId {
    /// The reserved sentinel carried by entities that were never spawned.
    #[inline]
    pub fn unassigned() -> Self {
        Self::null()
    }

    /// Returns true if this id has not been assigned by a world yet.
    #[inline]
    pub fn is_unassigned(self) -> bool {
        self.is_null()
    }

    /// Slot index of this id, stable for the entity's lifetime.
    pub fn index(self) -> u32 {
        (self.data().as_ffi() & 0xffff_ffff) as u32
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "#unassigned")
        } else {
            write!(f, "#{}", self.index())
        }
    }
}

const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The tile `(dx, dy)` away, or `None` if it lies outside the `i32` plane.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// The orthogonally adjacent positions (north, south, east, west).
    ///
    /// `y` grows downward. Neighbours past the edge of the coordinate space
    /// are left out, so a tile on `i32::MAX` has fewer than four.
    pub fn neighbors(self) -> ArrayVec<Position, 4> {
        ORTHOGONAL
            .into_iter()
            .filter_map(|(dx, dy)| self.offset(dx, dy))
            .collect()
    }

    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Discrete time unit of the initiative clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
