//! Applying damage to an actor's HP gauges.

use super::DamageVector;
use crate::state::{EntityId, ModifierId, StateError, World};
use crate::stats::{Capabilities, names};

/// What happened when damage was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    /// Damage after resistances, before attributes.
    pub raw: i32,
    /// Damage after incoming-damage attributes, truncated and clamped.
    pub modified: u32,
    /// Part of `modified` no gauge could absorb.
    pub unabsorbed: u32,
    pub remaining_hp: u32,
    pub dead: bool,
}

impl DamageReport {
    pub fn dealt(&self) -> u32 {
        self.modified - self.unabsorbed
    }
}

impl World {
    fn require_actor(&self, actor: EntityId) -> Result<(), StateError> {
        if self.entity(actor)?.has_stats() {
            Ok(())
        } else {
            Err(StateError::NotAnActor(actor))
        }
    }

    /// True if `actor` has no HP gauge or an empty one.
    pub fn is_dead(&self, actor: EntityId) -> Result<bool, StateError> {
        self.require_actor(actor)?;
        Ok(self.build_sheet(actor)?.is_dead())
    }

    /// Applies `raw` damage to `actor`.
    ///
    /// The full sheet is computed before anything is mutated. The amount is
    /// passed through every MODIFY_INCOMING_DAMAGE attribute in sheet order,
    /// then drained from the HP gauges of the actor's items in child-list
    /// order, each taking what it can and passing the rest on.
    pub fn apply_damage(&mut self, actor: EntityId, raw: i32) -> Result<DamageReport, StateError> {
        self.require_actor(actor)?;
        let sheet = self.build_sheet(actor)?;
        let modified = sheet.modify_incoming_damage(raw)?.unsigned_abs();

        let mut gauges: Vec<ModifierId> = Vec::new();
        for item in self.children(actor)? {
            gauges.extend(
                self.modifiers_of(*item)?
                    .filter(|(_, m)| m.supports(Capabilities::CONSUME))
                    .map(|(id, _)| id),
            );
        }

        let mut remaining = modified;
        for gauge in gauges {
            remaining = self.modifier_mut(gauge)?.consume(&names::HP, remaining)?;
        }

        let after = self.build_sheet(actor)?;
        let report = DamageReport {
            raw,
            modified,
            unabsorbed: remaining,
            remaining_hp: after.hp().map(|hp| hp.numerator).unwrap_or(0),
            dead: after.is_dead(),
        };

        tracing::debug!(
            %actor,
            raw,
            modified,
            dealt = report.dealt(),
            remaining_hp = report.remaining_hp,
            "damage applied"
        );
        if report.dead {
            tracing::info!(%actor, "actor died");
        }
        Ok(report)
    }

    /// Resolves `damage` against `defender`'s resistances and applies it.
    pub fn deal_damage(
        &mut self,
        defender: EntityId,
        damage: &DamageVector,
    ) -> Result<DamageReport, StateError> {
        self.require_actor(defender)?;
        let raw = damage.resolve(&self.build_sheet(defender)?);
        self.apply_damage(defender, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageComponent;
    use crate::stats::{Modifier, Temperature};

    fn actor_with_gauges(world: &mut World, gauges: &[(u32, u32)]) -> EntityId {
        let actor = world.create_actor("foo");
        for (current, maximum) in gauges {
            let item = world.create_item("heart", "Beating.", '<');
            world
                .attach_modifier(item, Modifier::hp(*current, *maximum))
                .unwrap();
            world.pick_up(actor, item).unwrap();
        }
        actor
    }

    #[test]
    fn damage_carries_across_gauges() {
        let mut world = World::new();
        let actor = actor_with_gauges(&mut world, &[(3, 5), (5, 5)]);

        let report = world.apply_damage(actor, 4).unwrap();
        assert_eq!(report.remaining_hp, 4);
        assert_eq!(report.unabsorbed, 0);
        assert!(!report.dead);

        let report = world.apply_damage(actor, 10).unwrap();
        assert_eq!(report.remaining_hp, 0);
        assert_eq!(report.unabsorbed, 6);
        assert_eq!(report.dealt(), 4);
        assert!(report.dead);
    }

    #[test]
    fn cold_halves_before_gauges_drain() {
        let mut world = World::new();
        let actor = actor_with_gauges(&mut world, &[(10, 10)]);
        let ice = world.create_item("ice cube", "Brr.", '*');
        world
            .attach_modifier(ice, Modifier::temperature(Temperature::Cold))
            .unwrap();
        world.pick_up(actor, ice).unwrap();

        let report = world.apply_damage(actor, 7).unwrap();
        assert_eq!(report.modified, 3);
        assert_eq!(report.remaining_hp, 7);
    }

    #[test]
    fn negative_damage_heals_nothing() {
        let mut world = World::new();
        let actor = actor_with_gauges(&mut world, &[(2, 5)]);
        let report = world.apply_damage(actor, -3).unwrap();
        assert_eq!(report.modified, 0);
        assert_eq!(report.remaining_hp, 2);
    }

    #[test]
    fn deal_damage_applies_resistance() {
        let mut world = World::new();
        let actor = actor_with_gauges(&mut world, &[(10, 10)]);
        let shield = world.create_item("shield", "Dented.", ']');
        world
            .attach_modifier(shield, Modifier::flat(names::DEF, 2))
            .unwrap();
        world.pick_up(actor, shield).unwrap();

        let hit = DamageVector::new(vec![DamageComponent::new(5).resisted_by(names::DEF)]);
        let report = world.deal_damage(actor, &hit).unwrap();
        assert_eq!(report.raw, 3);
        assert_eq!(report.remaining_hp, 7);
    }

    #[test]
    fn items_cannot_take_damage() {
        let mut world = World::new();
        let rock = world.create_item("rock", "Solid.", '*');
        assert_eq!(
            world.apply_damage(rock, 1),
            Err(StateError::NotAnActor(rock))
        );
    }

    #[test]
    fn actor_without_hp_is_dead() {
        let mut world = World::new();
        let ghost = world.create_actor("ghost");
        assert_eq!(world.is_dead(ghost), Ok(true));
    }
}
