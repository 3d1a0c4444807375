//! Sheet aggregation over the ownership tree.

use super::{FoldContext, StatSheet};
use crate::state::{EntityId, StateError, World};

impl World {
    /// Builds `actor`'s sheet from scratch.
    ///
    /// Walks the actor's whole owned subtree depth-first in child-list order
    /// and folds every attached modifier in attach order. Attribute merges
    /// are order-dependent, so this traversal order is part of the contract.
    pub fn build_sheet(&self, actor: EntityId) -> Result<StatSheet, StateError> {
        let mut sheet = StatSheet::new();
        for item in self.descendants(actor)? {
            let ctx = FoldContext {
                actor: self.owning_actor(item),
            };
            for (_, modifier) in self.modifiers_of(item)? {
                modifier.fold_into(&mut sheet, ctx);
            }
        }
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use crate::state::World;
    use crate::stats::sheet::{Attribute, FractionStat};
    use crate::stats::{Modifier, Temperature, names};

    #[test]
    fn nested_containers_are_included() {
        let mut world = World::new();
        let actor = world.create_actor("foo");
        let bag = world.create_item("bag", "Holds things.", '(');
        let potion = world.create_item("health potion", "It's practically SWAG.", '!');
        world.attach_modifier(potion, Modifier::hp(5, 5)).unwrap();
        let boots = world.create_item("boots", "Well worn.", '[');
        world.attach_modifier(boots, Modifier::flat(names::MOV, 3)).unwrap();

        world.pick_up(actor, bag).unwrap();
        world.pick_up(bag, potion).unwrap();
        world.pick_up(actor, boots).unwrap();

        let sheet = world.build_sheet(actor).unwrap();
        assert_eq!(
            sheet.hp(),
            Some(FractionStat {
                numerator: 5,
                denominator: 5
            })
        );
        assert_eq!(sheet.integer("MOV"), Some(3));
    }

    #[test]
    fn actor_own_modifiers_are_not_folded() {
        let mut world = World::new();
        let actor = world.create_actor("foo");
        world.attach_modifier(actor, Modifier::hp(9, 9)).unwrap();
        assert!(world.build_sheet(actor).unwrap().is_empty());
    }

    #[test]
    fn grants_bind_to_the_carrying_actor() {
        let mut world = World::new();
        let actor = world.create_actor("foo");
        let sword = world.create_item("sword", "Pointy.", '/');
        world
            .attach_modifier(sword, Modifier::melee(Default::default()))
            .unwrap();
        world.pick_up(actor, sword).unwrap();

        let sheet = world.build_sheet(actor).unwrap();
        assert!(matches!(
            sheet.attributes(),
            [Attribute::Grant { actor: Some(bound), .. }] if *bound == actor
        ));
    }

    #[test]
    fn traversal_order_decides_temperature() {
        let mut world = World::new();
        let actor = world.create_actor("foo");
        for temperature in [Temperature::Hot, Temperature::Cold, Temperature::Hot] {
            let item = world.create_item("mug", "Warm-ish.", 'u');
            world
                .attach_modifier(item, Modifier::temperature(temperature))
                .unwrap();
            world.pick_up(actor, item).unwrap();
        }
        let sheet = world.build_sheet(actor).unwrap();
        assert_eq!(sheet.attributes(), &[Attribute::Temperature(Temperature::Hot)]);
    }
}
