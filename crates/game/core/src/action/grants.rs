//! Actions contributed by ADD_ACTION attributes.

use std::collections::HashSet;

use super::{Action, ActionContext, ActionError, MeleeAction, MoveAction};
use crate::state::Position;
use crate::stats::{Attribute, Capabilities, Grant, StatsError};

impl Attribute {
    /// ADD_ACTION: appends the actions this attribute allows from `tile`,
    /// reached by `via`. Positions already in `targeted` are skipped and
    /// every new target position is added to it.
    pub fn add_actions(
        &self,
        ctx: &ActionContext<'_>,
        tile: Position,
        via: Option<&MoveAction>,
        targeted: &mut HashSet<Position>,
        out: &mut Vec<Action>,
    ) -> Result<(), ActionError> {
        let Attribute::Grant { grant, actor } = self else {
            return Err(StatsError::UnsupportedCapability {
                capability: Capabilities::ADD_ACTION,
                modifier: self.to_string(),
            }
            .into());
        };
        let attacker = actor.unwrap_or(ctx.actor);

        match grant {
            Grant::Melee { damage } => {
                for neighbor in tile.neighbors() {
                    if targeted.contains(&neighbor) {
                        continue;
                    }
                    let Some(target) = ctx.world.entity_at(neighbor) else {
                        continue;
                    };
                    if target == attacker || !ctx.world.entity(target)?.has_stats() {
                        continue;
                    }
                    if ctx.world.is_dead(target)? {
                        continue;
                    }
                    out.push(Action::Melee(MeleeAction {
                        attacker,
                        target,
                        position: neighbor,
                        damage: damage.clone(),
                        via: via.cloned(),
                    }));
                    targeted.insert(neighbor);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DamageComponent, DamageVector};
    use crate::config::GameConfig;
    use crate::env::Grid;
    use crate::action::get_available_actions;
    use crate::state::{EntityId, PropertyKey, PropertyValue, World};
    use crate::stats::{Modifier, StatSheet, Temperature, names};

    fn place(world: &mut World, id: EntityId, x: i32, y: i32) {
        world
            .set(
                id,
                PropertyKey::Position,
                PropertyValue::Position(Position::new(x, y)),
            )
            .unwrap();
    }

    fn fighter(world: &mut World, name: &str, x: i32, y: i32) -> EntityId {
        let actor = world.create_actor(name);
        let heart = world.create_item("heart", "Beating.", '<');
        world.attach_modifier(heart, Modifier::hp(5, 5)).unwrap();
        world.pick_up(actor, heart).unwrap();
        place(world, actor, x, y);
        actor
    }

    fn jab() -> DamageVector {
        DamageVector::new(vec![DamageComponent::new(3).resisted_by(names::DEF)])
    }

    fn arm(world: &mut World, actor: EntityId, movement: i32) {
        let sword = world.create_item("training sword", "Blunt.", '/');
        world.attach_modifier(sword, Modifier::melee(jab())).unwrap();
        world
            .attach_modifier(sword, Modifier::flat(names::MOV, movement))
            .unwrap();
        world.pick_up(actor, sword).unwrap();
    }

    fn melees(actions: &[Action]) -> Vec<&MeleeAction> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::Melee(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn melee_grant_targets_adjacent_actors_once() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 0, 0);
        arm(&mut world, hero, 2);
        let goblin = fighter(&mut world, "goblin", 2, 0);
        let map = Grid::open(4, 2).unwrap();

        let actions = get_available_actions(&world, &map, hero, &GameConfig::default()).unwrap();
        let attacks = melees(&actions);
        assert_eq!(attacks.len(), 1);
        assert_eq!(attacks[0].target, goblin);
        assert_eq!(attacks[0].attacker, hero);
        assert_eq!(attacks[0].damage, jab());
        assert_eq!(
            attacks[0].via.as_ref().and_then(MoveAction::destination),
            Some(Position::new(1, 0))
        );
    }

    #[test]
    fn unarmed_actor_has_no_melee() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 0, 0);
        fighter(&mut world, "goblin", 1, 0);
        let map = Grid::open(2, 1).unwrap();

        let actions = get_available_actions(&world, &map, hero, &GameConfig::default()).unwrap();
        assert!(melees(&actions).is_empty());
    }

    #[test]
    fn dead_actors_are_not_targeted() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 0, 0);
        arm(&mut world, hero, 0);
        let corpse = world.create_actor("corpse");
        place(&mut world, corpse, 1, 0);
        let map = Grid::open(2, 1).unwrap();

        let actions = get_available_actions(&world, &map, hero, &GameConfig::default()).unwrap();
        assert!(melees(&actions).is_empty());
    }

    #[test]
    fn non_grant_attributes_refuse_add_action() {
        let world = World::new();
        let map = Grid::open(1, 1).unwrap();
        let sheet = StatSheet::new();
        let ctx = ActionContext {
            world: &world,
            map: &map,
            actor: EntityId::default(),
            sheet: &sheet,
        };
        let err = Attribute::Temperature(Temperature::Hot)
            .add_actions(&ctx, Position::ORIGIN, None, &mut HashSet::new(), &mut Vec::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ActionError::Stats(StatsError::UnsupportedCapability { .. })
        ));
    }
}
