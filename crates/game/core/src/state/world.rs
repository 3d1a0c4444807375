//! Entity and modifier arenas.
//!
//! Entities and modifiers live in generation-checked slot maps. Back-references
//! (modifier → item, item → owner) are plain ids into these arenas, so walking
//! up to siblings never extends anyone's lifetime and stale ids fail lookups
//! instead of aliasing.

use slotmap::SlotMap;

use super::{Entity, EntityId, ModifierId, Position, PropertyKey, PropertyValue, StateError};
use crate::env::ItemTemplate;
use crate::stats::Modifier;

/// A modifier stored in the arena together with the item it is attached to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachedModifier {
    item: EntityId,
    modifier: Modifier,
}

impl AttachedModifier {
    /// The item this modifier belongs to (non-owning).
    pub fn item(&self) -> EntityId {
        self.item
    }

    pub fn modifier(&self) -> &Modifier {
        &self.modifier
    }
}

/// Owner of every entity and modifier in a session.
#[derive(Clone, Debug, Default)]
pub struct World {
    entities: SlotMap<EntityId, Entity>,
    modifiers: SlotMap<ModifierId, AttachedModifier>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Creates an entity with an empty property bag and no owner.
    pub fn create(&mut self) -> EntityId {
        self.entities.insert_with_key(Entity::new)
    }

    /// Creates an actor: a named entity with an independent stat sheet.
    pub fn create_actor(&mut self, name: impl Into<String>) -> EntityId {
        let id = self.create();
        let props = self.entities[id].properties_mut();
        props.insert(PropertyValue::Name(name.into()));
        props.insert(PropertyValue::HasStats(true));
        props.insert(PropertyValue::Modifiers(Vec::new()));
        id
    }

    /// Creates a plain item with display properties and no modifiers yet.
    pub fn create_item(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        glyph: char,
    ) -> EntityId {
        let id = self.create();
        let props = self.entities[id].properties_mut();
        props.insert(PropertyValue::Name(name.into()));
        props.insert(PropertyValue::Description(description.into()));
        props.insert(PropertyValue::Glyph(glyph));
        props.insert(PropertyValue::Modifiers(Vec::new()));
        id
    }

    /// Instantiates an item template at `position`.
    ///
    /// Every modifier is cloned into a fresh arena slot owned by the new item,
    /// so two spawns of the same template never share mutable state.
    pub fn spawn(
        &mut self,
        template: &ItemTemplate,
        position: Option<Position>,
    ) -> Result<EntityId, StateError> {
        for modifier in &template.modifiers {
            modifier.validate()?;
        }

        let id = self.create_item(
            template.name.clone(),
            template.description.clone(),
            template.glyph,
        );
        if let Some(position) = position {
            self.set(id, PropertyKey::Position, PropertyValue::Position(position))?;
        }
        for modifier in &template.modifiers {
            self.attach_modifier(id, modifier.clone())?;
        }

        tracing::debug!(item = %id, name = %template.name, ?position, "spawned item");
        Ok(id)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn entity(&self, id: EntityId) -> Result<&Entity, StateError> {
        self.entities.get(id).ok_or(StateError::UnknownEntity(id))
    }

    fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, StateError> {
        self.entities.get_mut(id).ok_or(StateError::UnknownEntity(id))
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities lying on the map: unowned and positioned.
    pub fn placed(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .values()
            .filter(|e| e.parent().is_none() && e.position().is_some())
    }

    /// The placed entity standing on `position`, if any.
    ///
    /// Owned entities keep their last position but are not on the map.
    pub fn entity_at(&self, position: Position) -> Option<EntityId> {
        self.placed()
            .find(|e| e.position() == Some(position))
            .map(Entity::id)
    }

    // ========================================================================
    // Property bag
    // ========================================================================

    /// Reads a property. `Ok(None)` means the key is registered but absent.
    pub fn get(&self, id: EntityId, key: PropertyKey) -> Result<Option<PropertyValue>, StateError> {
        Ok(self.entity(id)?.properties().get(key))
    }

    /// Reads a property by its external name.
    pub fn get_named(&self, id: EntityId, key: &str) -> Result<Option<PropertyValue>, StateError> {
        let key = PropertyKey::parse(key)?;
        self.get(id, key)
    }

    /// Writes a property.
    ///
    /// The modifier list is maintained by [`World::attach_modifier`] and
    /// cannot be replaced wholesale.
    pub fn set(
        &mut self,
        id: EntityId,
        key: PropertyKey,
        value: PropertyValue,
    ) -> Result<(), StateError> {
        if key == PropertyKey::Modifiers {
            return Err(StateError::ManagedProperty { key });
        }
        self.entity_mut(id)?.properties_mut().set(key, value)?;
        Ok(())
    }

    /// Writes a property by its external name.
    pub fn set_named(
        &mut self,
        id: EntityId,
        key: &str,
        value: PropertyValue,
    ) -> Result<(), StateError> {
        let key = PropertyKey::parse(key)?;
        self.set(id, key, value)
    }

    /// Writes several properties; either all of them are applied or none.
    pub fn update(
        &mut self,
        id: EntityId,
        pairs: impl IntoIterator<Item = (PropertyKey, PropertyValue)>,
    ) -> Result<(), StateError> {
        let mut staged = self.entity(id)?.properties().clone();
        for (key, value) in pairs {
            if key == PropertyKey::Modifiers {
                return Err(StateError::ManagedProperty { key });
            }
            staged.set(key, value)?;
        }
        *self.entity_mut(id)?.properties_mut() = staged;
        Ok(())
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    /// Attaches a modifier to `item`, validating its construction invariants.
    pub fn attach_modifier(
        &mut self,
        item: EntityId,
        modifier: Modifier,
    ) -> Result<ModifierId, StateError> {
        modifier.validate()?;
        self.entity(item)?;

        let id = self
            .modifiers
            .insert(AttachedModifier { item, modifier });
        self.entity_mut(item)?.push_modifier(id);
        Ok(id)
    }

    pub fn modifier(&self, id: ModifierId) -> Result<&AttachedModifier, StateError> {
        self.modifiers.get(id).ok_or(StateError::UnknownModifier(id))
    }

    pub fn modifier_mut(&mut self, id: ModifierId) -> Result<&mut Modifier, StateError> {
        self.modifiers
            .get_mut(id)
            .map(|slot| &mut slot.modifier)
            .ok_or(StateError::UnknownModifier(id))
    }

    /// Modifiers attached directly to `item`, in attach order.
    pub fn modifiers_of(
        &self,
        item: EntityId,
    ) -> Result<impl Iterator<Item = (ModifierId, &Modifier)>, StateError> {
        let entity = self.entity(item)?;
        Ok(entity.modifiers().iter().filter_map(|id| {
            self.modifiers
                .get(*id)
                .map(|slot| (*id, &slot.modifier))
        }))
    }

    // ========================================================================
    // Ownership
    // ========================================================================

    pub fn parent(&self, id: EntityId) -> Result<Option<EntityId>, StateError> {
        Ok(self.entity(id)?.parent())
    }

    pub fn children(&self, id: EntityId) -> Result<&[EntityId], StateError> {
        Ok(self.entity(id)?.children())
    }

    /// Returns true if `ancestor` owns `id`, directly or transitively.
    pub fn is_ancestor(&self, ancestor: EntityId, id: EntityId) -> bool {
        let mut cursor = self.entities.get(id).and_then(Entity::parent);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.entities.get(current).and_then(Entity::parent);
        }
        false
    }

    /// The nearest entity with a stat sheet, starting at `id` and walking up
    /// the ownership chain.
    pub fn owning_actor(&self, id: EntityId) -> Option<EntityId> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let entity = self.entities.get(current)?;
            if entity.has_stats() {
                return Some(current);
            }
            cursor = entity.parent();
        }
        None
    }

    /// Everything owned by `id`, depth-first in child-list order (pre-order).
    pub fn descendants(&self, id: EntityId) -> Result<Vec<EntityId>, StateError> {
        let mut out = Vec::new();
        let mut stack: Vec<EntityId> = self.children(id)?.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(entity) = self.entities.get(current) {
                stack.extend(entity.children().iter().rev().copied());
            }
        }
        Ok(out)
    }

    /// `item` and the other children of its owner, in child-list order.
    /// An unowned item is its own only sibling.
    pub fn siblings(&self, item: EntityId) -> Result<Vec<EntityId>, StateError> {
        match self.entity(item)?.parent() {
            Some(owner) => Ok(self.children(owner)?.to_vec()),
            None => Ok(vec![item]),
        }
    }

    fn check_new_edge(&self, owner: EntityId, entity: EntityId) -> Result<(), StateError> {
        self.entity(owner)?;
        self.entity(entity)?;
        if owner == entity {
            return Err(StateError::OwnershipViolation {
                entity,
                owner,
                reason: "an entity cannot own itself",
            });
        }
        if self.is_ancestor(entity, owner) {
            return Err(StateError::OwnershipViolation {
                entity,
                owner,
                reason: "the owner is inside the entity's inventory",
            });
        }
        Ok(())
    }

    /// Moves `entity` into `owner`'s inventory.
    ///
    /// Detaches it from its current owner first (no-op if it has none), then
    /// appends it to `owner`'s children. Nothing else changes.
    pub fn pick_up(&mut self, owner: EntityId, entity: EntityId) -> Result<(), StateError> {
        self.check_new_edge(owner, entity)?;

        if let Some(previous) = self.entity(entity)?.parent() {
            self.entity_mut(previous)?.remove_child(entity);
        }
        self.entity_mut(entity)?.set_parent(Some(owner));
        self.entity_mut(owner)?.push_child(entity);

        tracing::debug!(%owner, %entity, "picked up");
        Ok(())
    }

    /// Attaches an unowned `entity` to `owner` without a detach step.
    ///
    /// Fails with [`StateError::OwnershipViolation`] if the entity already
    /// has an owner.
    pub fn adopt(&mut self, owner: EntityId, entity: EntityId) -> Result<(), StateError> {
        self.check_new_edge(owner, entity)?;
        if self.entity(entity)?.parent().is_some() {
            return Err(StateError::OwnershipViolation {
                entity,
                owner,
                reason: "already owned",
            });
        }
        self.entity_mut(entity)?.set_parent(Some(owner));
        self.entity_mut(owner)?.push_child(entity);
        Ok(())
    }

    /// Removes `id` from its owner and drops it, its subtree and all of their
    /// modifiers.
    pub fn remove(&mut self, id: EntityId) -> Result<(), StateError> {
        let mut doomed = self.descendants(id)?;
        doomed.push(id);

        if let Some(owner) = self.entity(id)?.parent() {
            self.entity_mut(owner)?.remove_child(id);
        }
        for current in doomed {
            if let Some(entity) = self.entities.remove(current) {
                for modifier in entity.modifiers() {
                    self.modifiers.remove(*modifier);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::stats::{Modifier, names};

    fn potion(world: &mut World) -> EntityId {
        let item = world.create_item("health potion", "It's practically SWAG.", '!');
        world
            .attach_modifier(item, Modifier::hp(5, 5).with_reason("tingly"))
            .unwrap();
        item
    }

    fn owners_of(world: &World, id: EntityId) -> usize {
        world
            .entities()
            .filter(|e| e.children().contains(&id))
            .count()
    }

    #[test]
    fn pick_up_moves_entity_between_owners() {
        let mut world = World::new();
        let alice = world.create_actor("alice");
        let bob = world.create_actor("bob");
        let item = potion(&mut world);

        world.pick_up(alice, item).unwrap();
        assert_eq!(world.parent(item).unwrap(), Some(alice));
        assert_eq!(owners_of(&world, item), 1);

        world.pick_up(bob, item).unwrap();
        assert_eq!(world.parent(item).unwrap(), Some(bob));
        assert!(world.children(alice).unwrap().is_empty());
        assert_eq!(world.children(bob).unwrap(), &[item]);
        assert_eq!(owners_of(&world, item), 1);
    }

    #[test]
    fn pick_up_rejects_cycles() {
        let mut world = World::new();
        let bag = world.create_item("bag", "Holds things.", '(');
        let pouch = world.create_item("pouch", "Holds smaller things.", '(');
        world.pick_up(bag, pouch).unwrap();

        let err = world.pick_up(pouch, bag).unwrap_err();
        assert!(matches!(err, StateError::OwnershipViolation { .. }));
        assert_eq!(world.parent(bag).unwrap(), None);

        let err = world.pick_up(bag, bag).unwrap_err();
        assert!(matches!(err, StateError::OwnershipViolation { .. }));
    }

    #[test]
    fn adopt_refuses_owned_entities() {
        let mut world = World::new();
        let alice = world.create_actor("alice");
        let bob = world.create_actor("bob");
        let item = potion(&mut world);

        world.adopt(alice, item).unwrap();
        let err = world.adopt(bob, item).unwrap_err();
        assert_eq!(err.error_code(), "STATE_OWNERSHIP_VIOLATION");
        assert_eq!(world.children(alice).unwrap(), &[item]);
        assert!(world.children(bob).unwrap().is_empty());
    }

    #[test]
    fn named_property_access_is_validated() {
        let mut world = World::new();
        let actor = world.create_actor("foo");

        assert_eq!(
            world.get_named(actor, "name").unwrap(),
            Some(PropertyValue::Name("foo".into()))
        );
        assert_eq!(world.get(actor, PropertyKey::Glyph).unwrap(), None);
        assert!(matches!(
            world.get_named(actor, "turn_points"),
            Err(StateError::InvalidProperty { .. })
        ));
        assert!(matches!(
            world.set_named(actor, "mana", PropertyValue::HasStats(true)),
            Err(StateError::InvalidProperty { .. })
        ));
        assert!(matches!(
            world.set(actor, PropertyKey::Modifiers, PropertyValue::Modifiers(vec![])),
            Err(StateError::ManagedProperty { .. })
        ));
    }

    #[test]
    fn update_is_all_or_nothing() {
        let mut world = World::new();
        let actor = world.create_actor("foo");

        let result = world.update(
            actor,
            [
                (PropertyKey::Glyph, PropertyValue::Glyph('@')),
                (PropertyKey::Position, PropertyValue::Glyph('x')),
            ],
        );
        assert!(result.is_err());
        assert_eq!(world.get(actor, PropertyKey::Glyph).unwrap(), None);
    }

    #[test]
    fn entity_at_ignores_owned_entities() {
        let mut world = World::new();
        let actor = world.create_actor("foo");
        let item = potion(&mut world);
        let spot = Position::new(3, 4);
        world
            .set(item, PropertyKey::Position, PropertyValue::Position(spot))
            .unwrap();

        assert_eq!(world.entity_at(spot), Some(item));
        world.pick_up(actor, item).unwrap();
        assert_eq!(world.entity_at(spot), None);
    }

    #[test]
    fn spawned_items_do_not_share_modifiers() {
        let mut world = World::new();
        let template = ItemTemplate::new(
            "health potion",
            "Don't drop it!",
            '!',
            vec![Modifier::gauge_add(names::HP, 15)],
        );

        let first = world.spawn(&template, None).unwrap();
        let second = world.spawn(&template, Some(Position::new(1, 1))).unwrap();
        assert_ne!(first, second);

        let (first_mod, _) = world.modifiers_of(first).unwrap().next().unwrap();
        let (second_mod, _) = world.modifiers_of(second).unwrap().next().unwrap();
        assert_ne!(first_mod, second_mod);

        world
            .modifier_mut(first_mod)
            .unwrap()
            .consume(&names::HP, 10)
            .unwrap();

        let gauge = |world: &World, id| world.modifier(id).unwrap().modifier().gauge().cloned();
        assert_eq!(gauge(&world, first_mod).map(|g| g.current()), Some(5));
        assert_eq!(gauge(&world, second_mod).map(|g| g.current()), Some(15));
        assert_eq!(world.modifier(second_mod).unwrap().item(), second);
    }

    #[test]
    fn remove_drops_subtree_and_detaches() {
        let mut world = World::new();
        let actor = world.create_actor("foo");
        let bag = world.create_item("bag", "Holds things.", '(');
        let item = potion(&mut world);
        let (modifier, _) = world.modifiers_of(item).unwrap().next().unwrap();
        world.pick_up(actor, bag).unwrap();
        world.pick_up(bag, item).unwrap();

        world.remove(bag).unwrap();

        assert!(world.children(actor).unwrap().is_empty());
        assert!(!world.contains(item));
        assert!(world.modifier(modifier).is_err());
    }
}
