//! Stat names.
//!
//! Stats are open-ended (items in data files introduce names like `FAITH`
//! or `MATURITY`), so names are strings. The ones the core itself reads are
//! provided as constants.

use std::borrow::{Borrow, Cow};
use std::fmt;

/// Name of a stat on a [`StatSheet`](super::StatSheet).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatName(Cow<'static, str>);

impl StatName {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StatName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for StatName {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for StatName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health. An actor without it, or with a zero numerator, is dead.
pub const HP: StatName = StatName::from_static("HP");
/// Initiative gained per tick.
pub const SPD: StatName = StatName::from_static("SPD");
/// Tiles an actor may walk per turn.
pub const MOV: StatName = StatName::from_static("MOV");
pub const STR: StatName = StatName::from_static("STR");
pub const DEF: StatName = StatName::from_static("DEF");
