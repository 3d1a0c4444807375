//! Entity record and its closed property bag.
//!
//! The property set is fixed at compile time ([`PropertyKey`]). String keys
//! coming from outside (inspect commands, data files) are parsed into a key
//! first; anything unregistered is rejected with
//! [`StateError::InvalidProperty`] rather than silently ignored.

use std::str::FromStr;

use strum::IntoEnumIterator;

use super::{EntityId, ModifierId, Position};
use crate::state::StateError;

/// Registered property keys.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyKey {
    Name,
    Description,
    Glyph,
    Position,
    HasStats,
    Modifiers,
}

impl PropertyKey {
    /// Parses an external property name.
    pub fn parse(key: &str) -> Result<Self, StateError> {
        Self::from_str(key).map_err(|_| StateError::InvalidProperty {
            key: key.to_string(),
        })
    }
}

/// A value stored under a [`PropertyKey`]. The variant must match the key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyValue {
    Name(String),
    Description(String),
    Glyph(char),
    Position(Position),
    HasStats(bool),
    Modifiers(Vec<ModifierId>),
}

impl PropertyValue {
    /// The key this value belongs under.
    pub fn key(&self) -> PropertyKey {
        match self {
            PropertyValue::Name(_) => PropertyKey::Name,
            PropertyValue::Description(_) => PropertyKey::Description,
            PropertyValue::Glyph(_) => PropertyKey::Glyph,
            PropertyValue::Position(_) => PropertyKey::Position,
            PropertyValue::HasStats(_) => PropertyKey::HasStats,
            PropertyValue::Modifiers(_) => PropertyKey::Modifiers,
        }
    }
}

/// Fixed-shape property record. Absent properties are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    name: Option<String>,
    description: Option<String>,
    glyph: Option<char>,
    position: Option<Position>,
    has_stats: Option<bool>,
    modifiers: Option<Vec<ModifierId>>,
}

impl Properties {
    pub fn contains(&self, key: PropertyKey) -> bool {
        match key {
            PropertyKey::Name => self.name.is_some(),
            PropertyKey::Description => self.description.is_some(),
            PropertyKey::Glyph => self.glyph.is_some(),
            PropertyKey::Position => self.position.is_some(),
            PropertyKey::HasStats => self.has_stats.is_some(),
            PropertyKey::Modifiers => self.modifiers.is_some(),
        }
    }

    /// Returns a copy of the value under `key`, or `None` if not present.
    pub fn get(&self, key: PropertyKey) -> Option<PropertyValue> {
        match key {
            PropertyKey::Name => self.name.clone().map(PropertyValue::Name),
            PropertyKey::Description => self.description.clone().map(PropertyValue::Description),
            PropertyKey::Glyph => self.glyph.map(PropertyValue::Glyph),
            PropertyKey::Position => self.position.map(PropertyValue::Position),
            PropertyKey::HasStats => self.has_stats.map(PropertyValue::HasStats),
            PropertyKey::Modifiers => self.modifiers.clone().map(PropertyValue::Modifiers),
        }
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn set(
        &mut self,
        key: PropertyKey,
        value: PropertyValue,
    ) -> Result<Option<PropertyValue>, StateError> {
        if value.key() != key {
            return Err(StateError::PropertyTypeMismatch {
                key,
                found: value.key(),
            });
        }
        Ok(self.insert(value))
    }

    /// Stores `value` under the key it belongs to, returning the previous value.
    pub(crate) fn insert(&mut self, value: PropertyValue) -> Option<PropertyValue> {
        let previous = self.get(value.key());
        match value {
            PropertyValue::Name(v) => self.name = Some(v),
            PropertyValue::Description(v) => self.description = Some(v),
            PropertyValue::Glyph(v) => self.glyph = Some(v),
            PropertyValue::Position(v) => self.position = Some(v),
            PropertyValue::HasStats(v) => self.has_stats = Some(v),
            PropertyValue::Modifiers(v) => self.modifiers = Some(v),
        }
        previous
    }

    pub fn remove(&mut self, key: PropertyKey) -> Option<PropertyValue> {
        let previous = self.get(key);
        match key {
            PropertyKey::Name => self.name = None,
            PropertyKey::Description => self.description = None,
            PropertyKey::Glyph => self.glyph = None,
            PropertyKey::Position => self.position = None,
            PropertyKey::HasStats => self.has_stats = None,
            PropertyKey::Modifiers => self.modifiers = None,
        }
        previous
    }

    /// Keys currently present, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = PropertyKey> + '_ {
        PropertyKey::iter().filter(|key| self.contains(*key))
    }
}

/// A node in the ownership tree.
///
/// Ownership edges are kept on both ends (`parent` and the parent's
/// `children`) and are only changed through the [`World`](crate::state::World).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    id: EntityId,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    properties: Properties,
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            properties: Properties::default(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Owned entities (the inventory), in pick-up order.
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn name(&self) -> Option<&str> {
        self.properties.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.properties.description.as_deref()
    }

    pub fn glyph(&self) -> Option<char> {
        self.properties.glyph
    }

    pub fn position(&self) -> Option<Position> {
        self.properties.position
    }

    /// Actors are entities with an independently computed stat sheet.
    pub fn has_stats(&self) -> bool {
        self.properties.has_stats.unwrap_or(false)
    }

    pub fn modifiers(&self) -> &[ModifierId] {
        self.properties.modifiers.as_deref().unwrap_or(&[])
    }

    pub(crate) fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub(crate) fn set_parent(&mut self, parent: Option<EntityId>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: EntityId) {
        self.children.push(child);
    }

    pub(crate) fn remove_child(&mut self, child: EntityId) -> bool {
        match self.children.iter().position(|c| *c == child) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn push_modifier(&mut self, modifier: ModifierId) {
        self.properties
            .modifiers
            .get_or_insert_with(Vec::new)
            .push(modifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_key_name_is_rejected() {
        let err = PropertyKey::parse("turn_points").unwrap_err();
        assert_eq!(
            err,
            StateError::InvalidProperty {
                key: "turn_points".into()
            }
        );
        assert_eq!(PropertyKey::parse("has_stats"), Ok(PropertyKey::HasStats));
    }

    #[test]
    fn set_rejects_value_of_other_key() {
        let mut props = Properties::default();
        let err = props
            .set(PropertyKey::Name, PropertyValue::Glyph('@'))
            .unwrap_err();
        assert!(matches!(err, StateError::PropertyTypeMismatch { .. }));
        assert!(props.get(PropertyKey::Name).is_none());
    }

    #[test]
    fn insert_files_value_under_its_own_key() {
        let mut props = Properties::default();
        assert_eq!(props.insert(PropertyValue::HasStats(true)), None);
        assert_eq!(
            props.insert(PropertyValue::HasStats(false)),
            Some(PropertyValue::HasStats(true))
        );
        assert_eq!(props.keys().collect::<Vec<_>>(), vec![PropertyKey::HasStats]);
    }

    #[test]
    fn keys_lists_only_present_properties() {
        let mut props = Properties::default();
        props
            .set(PropertyKey::Glyph, PropertyValue::Glyph('!'))
            .unwrap();
        props
            .set(PropertyKey::Name, PropertyValue::Name("potion".into()))
            .unwrap();

        let keys: Vec<_> = props.keys().collect();
        assert_eq!(keys, vec![PropertyKey::Name, PropertyKey::Glyph]);

        assert_eq!(
            props.remove(PropertyKey::Glyph),
            Some(PropertyValue::Glyph('!'))
        );
        assert!(!props.contains(PropertyKey::Glyph));
    }
}
