//! Modifier variants.
//!
//! A modifier is attached to an item and does two things: it folds itself
//! into an actor's [`StatSheet`] during aggregation, and it may answer a
//! fixed set of [`Capabilities`] (consume, refund, damage modification,
//! action grants, periodic ticks). The set is decided by the variant and is
//! queried with [`Modifier::supports`] before any capability is invoked.

use std::fmt;

use super::sheet::{Attribute, FractionStat, IntegerStat, Stat, StatSheet};
use super::{Capabilities, StatName, StatsError, Temperature, names};
use crate::combat::DamageVector;
use crate::state::EntityId;

/// Flat addition to an integer stat, or a percentage multiplier on it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Addition {
    pub stat: StatName,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: i32,
    #[cfg_attr(feature = "serde", serde(default = "unit_multiplier"))]
    pub multiplier: i32,
}

#[cfg(feature = "serde")]
fn unit_multiplier() -> i32 {
    IntegerStat::UNIT_MULTIPLIER
}

/// Fractional gauge such as HP.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gauge {
    stat: StatName,
    current: u32,
    maximum: u32,
}

impl Gauge {
    pub fn new(stat: StatName, current: u32, maximum: u32) -> Self {
        Self {
            stat,
            current,
            maximum,
        }
    }

    pub fn stat(&self) -> &StatName {
        &self.stat
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Drains up to `amount`, returning the part that could not be taken.
    pub fn consume(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.current);
        self.current -= taken;
        amount - taken
    }

    /// Restores up to `amount`, returning the part that did not fit.
    pub fn refund(&mut self, amount: u32) -> u32 {
        let given = amount.min(self.maximum.saturating_sub(self.current));
        self.current += given;
        amount - given
    }
}

/// Restores `amount` of `stat` to sibling gauges on each periodic tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Regen {
    pub stat: StatName,
    pub amount: u32,
}

impl fmt::Display for Regen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} regen x{}", self.stat, self.amount)
    }
}

/// Capabilities an item lends to whoever carries it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Grant {
    /// Attack any stat-bearing entity orthogonally adjacent to a reachable tile.
    Melee { damage: DamageVector },
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grant::Melee { damage } => write!(f, "melee: {damage}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierKind {
    Addition(Addition),
    Gauge(Gauge),
    Temperature(Temperature),
    Regen(Regen),
    Grant(Grant),
}

/// Aggregation context handed to [`Modifier::fold_into`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FoldContext {
    /// The actor whose sheet is being built, found by walking up from the
    /// modifier's item.
    pub actor: Option<EntityId>,
}

/// An effect attached to an item, with an optional display-only reason.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub kind: ModifierKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reason: Option<String>,
}

impl Modifier {
    pub fn new(kind: ModifierKind) -> Self {
        Self { kind, reason: None }
    }

    /// HP gauge at `current` out of `maximum`.
    pub fn hp(current: u32, maximum: u32) -> Self {
        Self::new(ModifierKind::Gauge(Gauge::new(names::HP, current, maximum)))
    }

    /// Full gauge of `amount` out of `amount`.
    pub fn gauge_add(stat: impl Into<StatName>, amount: u32) -> Self {
        Self::new(ModifierKind::Gauge(Gauge::new(stat.into(), amount, amount)))
    }

    pub fn flat(stat: impl Into<StatName>, value: i32) -> Self {
        Self::new(ModifierKind::Addition(Addition {
            stat: stat.into(),
            value,
            multiplier: IntegerStat::UNIT_MULTIPLIER,
        }))
    }

    /// Percentage multiplier (200 doubles the stat).
    pub fn scaled(stat: impl Into<StatName>, percent: i32) -> Self {
        Self::new(ModifierKind::Addition(Addition {
            stat: stat.into(),
            value: 0,
            multiplier: percent,
        }))
    }

    pub fn temperature(temperature: Temperature) -> Self {
        Self::new(ModifierKind::Temperature(temperature))
    }

    pub fn regen(stat: impl Into<StatName>, amount: u32) -> Self {
        Self::new(ModifierKind::Regen(Regen {
            stat: stat.into(),
            amount,
        }))
    }

    pub fn melee(damage: DamageVector) -> Self {
        Self::new(ModifierKind::Grant(Grant::Melee { damage }))
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Checks construction invariants.
    pub fn validate(&self) -> Result<(), StatsError> {
        match &self.kind {
            ModifierKind::Addition(addition) => {
                let adds = addition.value != 0;
                let scales = addition.multiplier != IntegerStat::UNIT_MULTIPLIER;
                if adds == scales {
                    return Err(StatsError::MalformedModifier {
                        reason: "an addition sets exactly one of value and multiplier",
                    });
                }
            }
            ModifierKind::Gauge(gauge) if gauge.current > gauge.maximum => {
                return Err(StatsError::MalformedModifier {
                    reason: "gauge is above its maximum",
                });
            }
            _ => {}
        }
        Ok(())
    }

    pub fn capabilities(&self) -> Capabilities {
        match &self.kind {
            ModifierKind::Addition(_) => Capabilities::empty(),
            ModifierKind::Gauge(_) => Capabilities::CONSUME | Capabilities::REFUND,
            ModifierKind::Temperature(_) => Capabilities::MODIFY_INCOMING_DAMAGE,
            ModifierKind::Regen(_) => Capabilities::PERIODIC_TICK,
            ModifierKind::Grant(_) => Capabilities::ADD_ACTION,
        }
    }

    pub fn supports(&self, capability: Capabilities) -> bool {
        self.capabilities().contains(capability)
    }

    pub fn gauge(&self) -> Option<&Gauge> {
        match &self.kind {
            ModifierKind::Gauge(gauge) => Some(gauge),
            _ => None,
        }
    }

    pub fn regen_effect(&self) -> Option<&Regen> {
        match &self.kind {
            ModifierKind::Regen(regen) => Some(regen),
            _ => None,
        }
    }

    fn unsupported(&self, capability: Capabilities) -> StatsError {
        StatsError::UnsupportedCapability {
            capability,
            modifier: self.to_string(),
        }
    }

    /// CONSUME: drains the gauge if it tracks `stat`.
    ///
    /// Returns the unconsumed remainder; a gauge for another stat returns
    /// `amount` untouched.
    pub fn consume(&mut self, stat: &StatName, amount: u32) -> Result<u32, StatsError> {
        if !self.supports(Capabilities::CONSUME) {
            return Err(self.unsupported(Capabilities::CONSUME));
        }
        match &mut self.kind {
            ModifierKind::Gauge(gauge) if gauge.stat == *stat => Ok(gauge.consume(amount)),
            _ => Ok(amount),
        }
    }

    /// REFUND: restores the gauge if it tracks `stat`, returning what did
    /// not fit.
    pub fn refund(&mut self, stat: &StatName, amount: u32) -> Result<u32, StatsError> {
        if !self.supports(Capabilities::REFUND) {
            return Err(self.unsupported(Capabilities::REFUND));
        }
        match &mut self.kind {
            ModifierKind::Gauge(gauge) if gauge.stat == *stat => Ok(gauge.refund(amount)),
            _ => Ok(amount),
        }
    }

    /// MODIFY_INCOMING_DAMAGE for a single modifier.
    pub fn modify_incoming_damage(&self, amount: f64) -> Result<f64, StatsError> {
        match &self.kind {
            ModifierKind::Temperature(temperature) => Ok(temperature.modify_incoming_damage(amount)),
            _ => Err(self.unsupported(Capabilities::MODIFY_INCOMING_DAMAGE)),
        }
    }

    /// Folds this modifier into `sheet`.
    ///
    /// Numeric variants merge by stat name and commute. Attribute variants
    /// merge into the attribute list and may not: temperatures mix into the
    /// first temperature already present.
    pub fn fold_into(&self, sheet: &mut StatSheet, ctx: FoldContext) {
        match &self.kind {
            ModifierKind::Addition(addition) => fold_addition(addition, sheet),
            ModifierKind::Gauge(gauge) => fold_gauge(gauge, sheet),
            ModifierKind::Temperature(incoming) => {
                let existing = sheet.attributes_mut().iter_mut().find_map(|attr| match attr {
                    Attribute::Temperature(current) => Some(current),
                    _ => None,
                });
                match existing {
                    Some(current) => *current = current.mix(*incoming),
                    None => sheet.push_attribute(Attribute::Temperature(*incoming)),
                }
            }
            ModifierKind::Regen(regen) => {
                let existing = sheet.attributes_mut().iter_mut().find_map(|attr| match attr {
                    Attribute::Regen(current) if current.stat == regen.stat => Some(current),
                    _ => None,
                });
                match existing {
                    Some(current) => current.amount = current.amount.saturating_add(regen.amount),
                    None => sheet.push_attribute(Attribute::Regen(regen.clone())),
                }
            }
            ModifierKind::Grant(grant) => sheet.push_attribute(Attribute::Grant {
                grant: grant.clone(),
                actor: ctx.actor,
            }),
        }
    }

    /// Effect text without the reason.
    pub fn effect(&self) -> String {
        match &self.kind {
            ModifierKind::Addition(addition) if addition.value != 0 => {
                format!("{}: {:+}", addition.stat, addition.value)
            }
            ModifierKind::Addition(addition) => {
                format!("{}: {}%", addition.stat, addition.multiplier)
            }
            ModifierKind::Gauge(gauge) => {
                format!("{}: {}/{}", gauge.stat, gauge.current, gauge.maximum)
            }
            ModifierKind::Temperature(temperature) => temperature.to_string(),
            ModifierKind::Regen(regen) => regen.to_string(),
            ModifierKind::Grant(grant) => grant.to_string(),
        }
    }
}

fn fold_addition(addition: &Addition, sheet: &mut StatSheet) {
    match sheet.get_mut(addition.stat.as_str()) {
        None => {
            sheet.insert(
                addition.stat.clone(),
                Stat::Integer(IntegerStat {
                    value: addition.value,
                    multiplier: addition.multiplier,
                }),
            );
        }
        Some(Stat::Integer(stat)) => stat.merge(addition.value, addition.multiplier),
        Some(existing) => warn_kind_mismatch(&addition.stat, existing, "integer"),
    }
}

fn fold_gauge(gauge: &Gauge, sheet: &mut StatSheet) {
    match sheet.get_mut(gauge.stat.as_str()) {
        None => {
            sheet.insert(
                gauge.stat.clone(),
                Stat::Fraction(FractionStat {
                    numerator: gauge.current,
                    denominator: gauge.maximum,
                }),
            );
        }
        Some(Stat::Fraction(stat)) => {
            stat.numerator = stat.numerator.saturating_add(gauge.current);
            stat.denominator = stat.denominator.saturating_add(gauge.maximum);
        }
        Some(existing) => warn_kind_mismatch(&gauge.stat, existing, "fraction"),
    }
}

fn warn_kind_mismatch(stat: &StatName, existing: &Stat, incoming: &'static str) {
    tracing::warn!(
        %stat,
        existing = existing.kind(),
        incoming,
        "stat kind mismatch, keeping existing entry"
    );
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{} ({reason})", self.effect()),
            None => f.write_str(&self.effect()),
        }
    }
}
