//! Generate the legal action set for an actor.
//!
//! The search is a breadth-first expansion from the actor's tile, bounded by
//! its MOV stat. Every reached tile yields a move, pickups of adjacent loose
//! items, and whatever the sheet's ADD_ACTION attributes contribute from
//! that tile. One target set is shared across all tiles so a position is
//! only ever targeted once.

use std::collections::{HashMap, HashSet, VecDeque};

use super::{Action, ActionError, MoveAction, PickupAction};
use crate::config::GameConfig;
use crate::env::TileMap;
use crate::state::{EntityId, Position, StateError, World};
use crate::stats::{Capabilities, StatSheet, names};

/// Read-only view handed to ADD_ACTION attributes.
#[derive(Clone, Copy)]
pub struct ActionContext<'a> {
    pub world: &'a World,
    pub map: &'a dyn TileMap,
    pub actor: EntityId,
    pub sheet: &'a StatSheet,
}

/// Get every action `actor` may take this turn.
///
/// The list starts with `Wait`, followed by actions in BFS order of the tile
/// they are taken from.
pub fn get_available_actions(
    world: &World,
    map: &dyn TileMap,
    actor: EntityId,
    config: &GameConfig,
) -> Result<Vec<Action>, ActionError> {
    let entity = world.entity(actor)?;
    if !entity.has_stats() {
        return Err(StateError::NotAnActor(actor).into());
    }
    let start = entity.position().ok_or(ActionError::NotPlaced(actor))?;

    let sheet = world.build_sheet(actor)?;
    let movement = movement_range(&sheet, config);
    let ctx = ActionContext {
        world,
        map,
        actor,
        sheet: &sheet,
    };

    let mut actions = vec![Action::Wait { actor }];
    let mut targeted: HashSet<Position> = HashSet::new();

    for (tile, via) in reachable(world, map, actor, start, movement) {
        if let Some(walk) = &via {
            actions.push(Action::Move(walk.clone()));
        }

        for neighbor in tile.neighbors() {
            if targeted.contains(&neighbor) {
                continue;
            }
            let Some(item) = world.entity_at(neighbor) else {
                continue;
            };
            if world.entity(item)?.has_stats() {
                continue;
            }
            actions.push(Action::Pickup(PickupAction {
                actor,
                item,
                position: neighbor,
                via: via.clone(),
            }));
            targeted.insert(neighbor);
        }

        for attribute in sheet.supporting(Capabilities::ADD_ACTION) {
            attribute.add_actions(&ctx, tile, via.as_ref(), &mut targeted, &mut actions)?;
        }
    }

    tracing::trace!(%actor, movement, count = actions.len(), "generated actions");
    Ok(actions)
}

/// MOV from the sheet, or the configured default when the sheet has none.
/// Negative MOV means no movement.
fn movement_range(sheet: &StatSheet, config: &GameConfig) -> u32 {
    match sheet.integer(names::MOV.as_str()) {
        Some(value) => value.max(0).unsigned_abs(),
        None => config.default_movement,
    }
}

/// Tiles reachable from `start` within `range` steps, in BFS order, each
/// paired with the walk that reaches it. The start tile comes first with no
/// walk.
///
/// A tile can be entered if it is on the map, walkable and free of placed
/// entities. The start tile is always included.
pub fn reachable(
    world: &World,
    map: &dyn TileMap,
    actor: EntityId,
    start: Position,
    range: u32,
) -> Vec<(Position, Option<MoveAction>)> {
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut order = vec![start];
    let mut frontier = VecDeque::from([(start, 0u32)]);

    while let Some((current, depth)) = frontier.pop_front() {
        if depth == range {
            continue;
        }
        for next in current.neighbors() {
            if next == start || came_from.contains_key(&next) {
                continue;
            }
            if !map.contains(next) || !map.is_walkable(next) || world.entity_at(next).is_some() {
                continue;
            }
            came_from.insert(next, current);
            order.push(next);
            frontier.push_back((next, depth + 1));
        }
    }

    order
        .into_iter()
        .map(|tile| {
            let walk = (tile != start).then(|| MoveAction {
                actor,
                path: trace_path(&came_from, start, tile),
            });
            (tile, walk)
        })
        .collect()
}

fn trace_path(came_from: &HashMap<Position, Position>, start: Position, end: Position) -> Vec<Position> {
    let mut path = vec![end];
    let mut cursor = end;
    while let Some(previous) = came_from.get(&cursor).copied() {
        if previous == start {
            break;
        }
        path.push(previous);
        cursor = previous;
    }
    path.reverse();
    path
}
