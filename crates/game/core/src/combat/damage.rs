//! Damage vectors and resistance.

use std::fmt;

use crate::stats::{StatName, StatSheet};

/// One part of an attack: an amount, reduced by a named resistance stat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageComponent {
    pub amount: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resisted_by: Option<StatName>,
}

impl DamageComponent {
    pub fn new(amount: i32) -> Self {
        Self {
            amount,
            resisted_by: None,
        }
    }

    pub fn resisted_by(mut self, stat: impl Into<StatName>) -> Self {
        self.resisted_by = Some(stat.into());
        self
    }

    /// `amount` minus the sheet's value for the resistance stat. A missing
    /// stat resists nothing.
    pub fn resolve(&self, sheet: &StatSheet) -> i32 {
        let resist = self
            .resisted_by
            .as_ref()
            .map(|stat| sheet.value_of(stat.as_str()))
            .unwrap_or(0);
        self.amount.saturating_sub(resist)
    }
}

impl fmt::Display for DamageComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resisted_by {
            Some(stat) => write!(f, "{} vs {stat}", self.amount),
            None => write!(f, "{}", self.amount),
        }
    }
}

/// Ordered list of damage components dealt together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DamageVector {
    components: Vec<DamageComponent>,
}

impl DamageVector {
    pub fn new(components: Vec<DamageComponent>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[DamageComponent] {
        &self.components
    }

    /// Raw damage against `sheet`: the sum of every component's resolved
    /// amount. May be negative when resistances exceed the damage.
    pub fn resolve(&self, sheet: &StatSheet) -> i32 {
        self.components
            .iter()
            .fold(0i32, |total, component| total.saturating_add(component.resolve(sheet)))
    }
}

impl From<Vec<DamageComponent>> for DamageVector {
    fn from(components: Vec<DamageComponent>) -> Self {
        Self::new(components)
    }
}

impl fmt::Display for DamageVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(" + "))
    }
}
