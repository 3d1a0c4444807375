//! Headless turn-order preview.
//!
//! Places a hero and a slime on a map, then lets the engine hand out turns.
//! Each turn lists what the actor could do and then passes, so the preview
//! shows initiative and action enumeration without choosing for anyone.

use std::fmt;

use anyhow::{Context, Result, bail};
use tactics_content::ContentFactory;
use tactics_core::{
    Action, EntityId, GameEngine, GameState, ItemTemplate, Position, Tick, TileMap, World,
};

const HERO_KIT: &[&str] = &["training sword", "boots", "buckler", "small health potion"];
const SLIME_KIT: &[&str] = &["health potion sample", "lucky penny"];
const LOOT: &str = "hot coffee";

/// What a preview run saw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
    /// Actor names in the order they were given turns.
    pub order: Vec<String>,
    pub clock: Tick,
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} turns by tick {}: {}",
            self.order.len(),
            self.clock,
            self.order.join(" ")
        )
    }
}

/// Per-kind counts of an actor's available actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Options {
    moves: usize,
    pickups: usize,
    attacks: usize,
}

impl Options {
    fn count(actions: &[Action]) -> Self {
        actions.iter().fold(Self::default(), |mut options, action| {
            match action {
                Action::Wait { .. } => {}
                Action::Move(_) => options.moves += 1,
                Action::Pickup(_) => options.pickups += 1,
                Action::Melee(_) => options.attacks += 1,
            }
            options
        })
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} moves, {} pickups, {} attacks",
            self.moves, self.pickups, self.attacks
        )
    }
}

/// Loads content and hands out `max_turns` turns, each ending in a pass.
pub fn run(config: &crate::config::SkirmishConfig) -> Result<Preview> {
    let factory = ContentFactory::new(&config.data_dir);
    let game_config = factory.load_config()?;
    let templates = factory.load_items()?;
    let map = factory.load_map(&config.map)?;
    tracing::info!(data_dir = %factory.data_dir().display(), map = %config.map, "content loaded");

    let (first, last) = spawn_points(&map).context("map has fewer than two walkable tiles")?;
    let mut state = GameState::new(World::new());
    let hero = recruit(&mut state.world, "hero", HERO_KIT, &templates, first)?;
    let slime = recruit(&mut state.world, "slime", SLIME_KIT, &templates, last)?;
    if let Some(middle) = free_tile_near(&map, &state.world, midpoint(first, last)) {
        state.world.spawn(template(&templates, LOOT)?, Some(middle))?;
    }

    let mut engine = GameEngine::new(&mut state, &map, &game_config);
    engine.register_actor(hero)?;
    engine.register_actor(slime)?;

    let mut order = Vec::new();
    for turn in 1..=config.max_turns {
        let actor = engine.prepare_next_turn()?;
        let actions = engine.available_actions(actor)?;
        let name = name_of(&engine.state().world, actor);
        println!(
            "[{turn:>3}] tick {:>4}  {name:<6} {}",
            engine.state().turns.clock(),
            Options::count(&actions)
        );
        for action in &actions {
            tracing::debug!(%actor, %action, "available");
        }

        engine.execute(&Action::Wait { actor })?;
        order.push(name);
    }

    Ok(Preview {
        order,
        clock: engine.state().turns.clock(),
    })
}

fn recruit(
    world: &mut World,
    name: &str,
    kit: &[&str],
    templates: &[ItemTemplate],
    at: Position,
) -> Result<EntityId> {
    let actor = world.create_actor(name);
    for item in kit {
        let id = world.spawn(template(templates, item)?, None)?;
        world.pick_up(actor, id)?;
    }
    world.set(
        actor,
        tactics_core::PropertyKey::Position,
        tactics_core::PropertyValue::Position(at),
    )?;
    tracing::info!(%actor, name, "recruited\n{}", world.summary(actor)?);
    Ok(actor)
}

fn template<'a>(templates: &'a [ItemTemplate], name: &str) -> Result<&'a ItemTemplate> {
    match templates.iter().find(|t| t.name == name) {
        Some(template) => Ok(template),
        None => bail!("item catalog has no \"{name}\""),
    }
}

fn walkable_tiles(map: &dyn TileMap) -> Vec<Position> {
    let bounds = map.bounds();
    (bounds.min.y..=bounds.max.y)
        .flat_map(|y| (bounds.min.x..=bounds.max.x).map(move |x| Position::new(x, y)))
        .filter(|p| map.is_walkable(*p))
        .collect()
}

/// First and last walkable tiles in row-major order.
fn spawn_points(map: &dyn TileMap) -> Option<(Position, Position)> {
    let tiles = walkable_tiles(map);
    match (tiles.first(), tiles.last()) {
        (Some(first), Some(last)) if first != last => Some((*first, *last)),
        _ => None,
    }
}

fn midpoint(a: Position, b: Position) -> Position {
    Position::new((a.x + b.x) / 2, (a.y + b.y) / 2)
}

fn free_tile_near(map: &dyn TileMap, world: &World, target: Position) -> Option<Position> {
    walkable_tiles(map)
        .into_iter()
        .filter(|p| world.entity_at(*p).is_none())
        .min_by_key(|p| p.manhattan(target))
}

fn name_of(world: &World, id: EntityId) -> String {
    world
        .entity(id)
        .ok()
        .and_then(|e| e.name())
        .unwrap_or("someone")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SkirmishConfig;
    use tactics_core::Grid;

    #[test]
    fn faster_slime_acts_twice_per_hero_turn() {
        let config = SkirmishConfig {
            max_turns: 6,
            ..SkirmishConfig::default()
        };
        let preview = run(&config).unwrap();
        assert_eq!(
            preview.order,
            vec!["slime", "slime", "hero", "slime", "slime", "hero"]
        );
        assert_eq!(preview.clock, Tick(40));
    }

    #[test]
    fn corridor_map_is_playable() {
        let config = SkirmishConfig {
            map: "corridor".into(),
            max_turns: 3,
            ..SkirmishConfig::default()
        };
        assert_eq!(run(&config).unwrap().order.len(), 3);
    }

    #[test]
    fn options_are_counted_by_kind() {
        let actor = EntityId::default();
        let walk = tactics_core::MoveAction {
            actor,
            path: vec![Position::new(1, 0)],
        };
        let actions = vec![
            Action::Wait { actor },
            Action::Move(walk.clone()),
            Action::Move(walk),
        ];
        assert_eq!(
            Options::count(&actions),
            Options {
                moves: 2,
                pickups: 0,
                attacks: 0
            }
        );
    }

    #[test]
    fn spawn_points_are_opposite_corners() {
        let map = Grid::open(3, 2).unwrap();
        assert_eq!(
            spawn_points(&map),
            Some((Position::new(0, 0), Position::new(2, 1)))
        );
        assert_eq!(spawn_points(&Grid::open(1, 1).unwrap()), None);
    }
}
