//! Stat model: modifiers, capabilities and the aggregated sheet.
//!
//! ```text
//! [ Entity tree ] --fold--> [ StatSheet ] --> action generation / damage
//!        ^                                          |
//!        +------------- consume / refund -----------+
//! ```
//!
//! Sheets are derived and throwaway. Anything that changes a stat does it
//! through a modifier in the arena, never through a sheet.

mod aggregate;
mod capability;
mod error;
pub mod modifiers;
pub mod names;
pub mod sheet;
mod temperature;
mod tick;

pub use capability::Capabilities;
pub use error::StatsError;
pub use modifiers::{Addition, FoldContext, Gauge, Grant, Modifier, ModifierKind, Regen};
pub use names::StatName;
pub use sheet::{Attribute, FractionStat, IntegerStat, Stat, StatSheet};
pub use temperature::Temperature;
