//! Aggregated stat sheet.
//!
//! A sheet is rebuilt from the ownership tree on every query (see
//! [`World::build_sheet`](crate::state::World::build_sheet)) and is never
//! stored on an entity, so nothing ever has to invalidate it.

use std::collections::BTreeMap;
use std::fmt;

use super::{Capabilities, Grant, Regen, StatName, StatsError, Temperature, names};
use crate::state::EntityId;

/// Plain numeric stat. `multiplier` is an integer percentage (100 = x1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntegerStat {
    pub value: i32,
    pub multiplier: i32,
}

impl IntegerStat {
    pub const UNIT_MULTIPLIER: i32 = 100;

    pub fn effective(&self) -> i32 {
        self.value.saturating_mul(self.multiplier) / Self::UNIT_MULTIPLIER
    }

    /// Adds values and composes multipliers.
    pub fn merge(&mut self, value: i32, multiplier: i32) {
        self.value = self.value.saturating_add(value);
        self.multiplier = self.multiplier.saturating_mul(multiplier) / Self::UNIT_MULTIPLIER;
    }
}

/// Current/maximum pair such as HP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FractionStat {
    pub numerator: u32,
    pub denominator: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stat {
    Integer(IntegerStat),
    Fraction(FractionStat),
}

impl Stat {
    /// The value used when this stat resists or gates something: the
    /// effective value of an integer stat, the numerator of a fraction.
    pub fn value(&self) -> i32 {
        match self {
            Stat::Integer(stat) => stat.effective(),
            Stat::Fraction(stat) => i32::try_from(stat.numerator).unwrap_or(i32::MAX),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Stat::Integer(_) => "integer",
            Stat::Fraction(_) => "fraction",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Integer(stat) if stat.multiplier == IntegerStat::UNIT_MULTIPLIER => {
                write!(f, "{}", stat.value)
            }
            Stat::Integer(stat) => write!(f, "{} x{}%", stat.value, stat.multiplier),
            Stat::Fraction(stat) => write!(f, "{}/{}", stat.numerator, stat.denominator),
        }
    }
}

/// An effect that cannot be reduced to a named number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attribute {
    Temperature(Temperature),
    Regen(Regen),
    /// A granted capability, bound to the actor that carries it.
    Grant {
        grant: Grant,
        actor: Option<EntityId>,
    },
}

impl Attribute {
    /// Regeneration is driven from the modifier arena, so a regen
    /// attribute on the sheet is informational only.
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Attribute::Temperature(_) => Capabilities::MODIFY_INCOMING_DAMAGE,
            Attribute::Regen(_) => Capabilities::empty(),
            Attribute::Grant { .. } => Capabilities::ADD_ACTION,
        }
    }

    pub fn supports(&self, capability: Capabilities) -> bool {
        self.capabilities().contains(capability)
    }

    pub fn modify_incoming_damage(&self, amount: f64) -> Result<f64, StatsError> {
        match self {
            Attribute::Temperature(temperature) => Ok(temperature.modify_incoming_damage(amount)),
            _ => Err(StatsError::UnsupportedCapability {
                capability: Capabilities::MODIFY_INCOMING_DAMAGE,
                modifier: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Temperature(temperature) => write!(f, "{temperature}"),
            Attribute::Regen(regen) => write!(f, "{regen}"),
            Attribute::Grant { grant, .. } => write!(f, "{grant}"),
        }
    }
}

/// Consolidated view of every modifier reachable from an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatSheet {
    stats: BTreeMap<StatName, Stat>,
    attributes: Vec<Attribute>,
}

impl StatSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty() && self.attributes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Stat> {
        self.stats.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Stat> {
        self.stats.get_mut(name)
    }

    pub fn insert(&mut self, name: StatName, stat: Stat) -> Option<Stat> {
        self.stats.insert(name, stat)
    }

    /// Stats in name order.
    pub fn stats(&self) -> impl Iterator<Item = (&StatName, &Stat)> {
        self.stats.iter()
    }

    /// Attributes in fold order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }

    pub fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Attributes answering `capability`, in fold order.
    pub fn supporting(&self, capability: Capabilities) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .filter(move |attribute| attribute.supports(capability))
    }

    /// Value of `name` as used for resistances; a missing stat is zero.
    pub fn value_of(&self, name: &str) -> i32 {
        self.get(name).map(Stat::value).unwrap_or(0)
    }

    pub fn integer(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            Stat::Integer(stat) => Some(stat.effective()),
            Stat::Fraction(_) => None,
        }
    }

    pub fn fraction(&self, name: &str) -> Option<FractionStat> {
        match self.get(name)? {
            Stat::Fraction(stat) => Some(*stat),
            Stat::Integer(_) => None,
        }
    }

    pub fn hp(&self) -> Option<FractionStat> {
        self.fraction(names::HP.as_str())
    }

    /// No HP gauge, or an empty one.
    pub fn is_dead(&self) -> bool {
        self.hp().is_none_or(|hp| hp.numerator == 0)
    }

    /// Runs `amount` through every damage-modifying attribute in fold order.
    ///
    /// The arithmetic is done in floating point and truncated once at the
    /// end, so COLD then HOT on 5 gives 5. Negative results clamp to zero.
    pub fn modify_incoming_damage(&self, amount: i32) -> Result<i32, StatsError> {
        let mut modified = f64::from(amount);
        for attribute in self.supporting(Capabilities::MODIFY_INCOMING_DAMAGE) {
            modified = attribute.modify_incoming_damage(modified)?;
        }
        Ok((modified.trunc() as i32).max(0))
    }
}

impl fmt::Display for StatSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .stats
            .iter()
            .map(|(name, stat)| format!("{name}: {stat}"))
            .chain(self.attributes.iter().map(Attribute::to_string))
            .collect::<Vec<_>>();
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Temperature::{Cold, Hot};

    #[test]
    fn integer_merge_composes_multipliers() {
        let mut stat = IntegerStat {
            value: 10,
            multiplier: 100,
        };
        stat.merge(5, 200);
        stat.merge(0, 150);
        assert_eq!(stat.value, 15);
        assert_eq!(stat.multiplier, 300);
        assert_eq!(stat.effective(), 45);
    }

    #[test]
    fn cold_and_hot_cancel_in_both_orders() {
        for order in [[Cold, Hot], [Hot, Cold]] {
            let mut sheet = StatSheet::new();
            for temperature in order {
                sheet.push_attribute(Attribute::Temperature(temperature));
            }
            assert_eq!(sheet.modify_incoming_damage(10), Ok(10));
        }
    }

    #[test]
    fn damage_modification_truncates_once() {
        let mut sheet = StatSheet::new();
        sheet.push_attribute(Attribute::Temperature(Cold));
        sheet.push_attribute(Attribute::Temperature(Hot));
        assert_eq!(sheet.modify_incoming_damage(5), Ok(5));

        let mut cold = StatSheet::new();
        cold.push_attribute(Attribute::Temperature(Cold));
        assert_eq!(cold.modify_incoming_damage(5), Ok(2));
        assert_eq!(cold.modify_incoming_damage(-4), Ok(0));
    }

    #[test]
    fn missing_stats_resist_nothing() {
        let mut sheet = StatSheet::new();
        sheet.insert(
            names::DEF,
            Stat::Integer(IntegerStat {
                value: 2,
                multiplier: 150,
            }),
        );
        assert_eq!(sheet.value_of("DEF"), 3);
        assert_eq!(sheet.value_of("STR"), 0);
    }

    #[test]
    fn actor_without_hp_is_dead() {
        let mut sheet = StatSheet::new();
        assert!(sheet.is_dead());
        sheet.insert(
            names::HP,
            Stat::Fraction(FractionStat {
                numerator: 1,
                denominator: 10,
            }),
        );
        assert!(!sheet.is_dead());
    }

    #[test]
    fn display_lists_stats_then_attributes() {
        let mut sheet = StatSheet::new();
        sheet.insert(
            names::STR,
            Stat::Integer(IntegerStat {
                value: 4,
                multiplier: 100,
            }),
        );
        sheet.insert(
            names::HP,
            Stat::Fraction(FractionStat {
                numerator: 3,
                denominator: 5,
            }),
        );
        sheet.push_attribute(Attribute::Temperature(Cold));
        assert_eq!(sheet.to_string(), "HP: 3/5\nSTR: 4\nCOLD");
    }
}
