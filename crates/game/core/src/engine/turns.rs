//! Initiative scheduling.
//!
//! Every registered actor accumulates initiative points at its SPD per tick.
//! Advancing jumps the clock straight to the first tick at which somebody
//! reaches the threshold, instead of stepping one tick at a time.

use std::collections::VecDeque;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Tick, World};
use crate::stats::names;

/// Errors that can occur during turn operations
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("no entities are currently active")]
    NoActiveEntities,

    /// Living participants exist but none of them gains initiative.
    #[error("no active entity can gain initiative")]
    Stalled,

    #[error("entity {0} is not scheduled")]
    UnknownActor(EntityId),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TurnError::NoActiveEntities | TurnError::Stalled => ErrorSeverity::Fatal,
            TurnError::UnknownActor(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::NoActiveEntities => "TURN_NO_ACTIVE_ENTITIES",
            TurnError::Stalled => "TURN_STALLED",
            TurnError::UnknownActor(_) => "TURN_UNKNOWN_ACTOR",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TurnEntry {
    actor: EntityId,
    points: u32,
}

/// Initiative accumulator over the registered actors.
///
/// Entries keep registration order, which breaks ties between actors of
/// equal SPD that become ready on the same tick.
#[derive(Clone, Debug, Default)]
pub struct TurnScheduler {
    entries: Vec<TurnEntry>,
    clock: Tick,
    ready: VecDeque<EntityId>,
    current: Option<EntityId>,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `actor` with zero points. Returns false if already registered.
    pub fn register(&mut self, actor: EntityId) -> bool {
        if self.is_registered(actor) {
            return false;
        }
        self.entries.push(TurnEntry { actor, points: 0 });
        true
    }

    /// Removes `actor` from scheduling, including any queued turn.
    pub fn unregister(&mut self, actor: EntityId) -> Result<(), TurnError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.actor == actor)
            .ok_or(TurnError::UnknownActor(actor))?;
        self.entries.remove(index);
        self.ready.retain(|queued| *queued != actor);
        if self.current == Some(actor) {
            self.current = None;
        }
        Ok(())
    }

    pub fn is_registered(&self, actor: EntityId) -> bool {
        self.entries.iter().any(|entry| entry.actor == actor)
    }

    pub fn points(&self, actor: EntityId) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.actor == actor)
            .map(|entry| entry.points)
    }

    /// Registered actors, in registration order.
    pub fn participants(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entries.iter().map(|entry| entry.actor)
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }

    /// The actor whose turn is in progress.
    pub fn current(&self) -> Option<EntityId> {
        self.current
    }

    /// Ends the current turn.
    pub fn finish_turn(&mut self) {
        self.current = None;
    }

    /// Advances the clock to the next tick at which someone can act.
    ///
    /// Returns the actors that reached the threshold, fastest first (ties
    /// in registration order). Their points are reduced by the threshold
    /// and whatever exceeds it carries over. Dead or removed actors neither
    /// gain points nor act.
    pub fn advance(&mut self, world: &World, config: &GameConfig) -> Result<Vec<EntityId>, TurnError> {
        let threshold = config.turn_threshold;
        let speeds: Vec<Option<u32>> = self
            .entries
            .iter()
            .map(|entry| speed_of(world, entry.actor, config))
            .collect();

        if speeds.iter().all(Option::is_none) {
            return Err(TurnError::NoActiveEntities);
        }

        let ticks = self
            .entries
            .iter()
            .zip(&speeds)
            .filter_map(|(entry, speed)| {
                let speed = (*speed)?;
                let missing = threshold.saturating_sub(entry.points);
                if missing == 0 {
                    Some(0)
                } else if speed == 0 {
                    None
                } else {
                    Some(missing.div_ceil(speed))
                }
            })
            .min()
            .ok_or(TurnError::Stalled)?;

        let mut eligible: Vec<(EntityId, u32)> = Vec::new();
        for (entry, speed) in self.entries.iter_mut().zip(&speeds) {
            let Some(speed) = *speed else { continue };
            entry.points = entry.points.saturating_add(speed.saturating_mul(ticks));
            if entry.points >= threshold {
                eligible.push((entry.actor, speed));
            }
        }
        self.clock = self.clock + u64::from(ticks);

        // Stable sort keeps registration order among equal speeds
        eligible.sort_by(|a, b| b.1.cmp(&a.1));
        let order: Vec<EntityId> = eligible.into_iter().map(|(actor, _)| actor).collect();
        for entry in self.entries.iter_mut().filter(|e| order.contains(&e.actor)) {
            entry.points -= threshold;
        }

        tracing::debug!(ticks, clock = %self.clock, ?order, "initiative advanced");
        Ok(order)
    }

    /// Pops the next ready actor, advancing the clock when nobody is queued,
    /// and makes it the current actor.
    pub fn next_actor(&mut self, world: &World, config: &GameConfig) -> Result<EntityId, TurnError> {
        loop {
            while let Some(actor) = self.ready.pop_front() {
                if self.is_registered(actor) && is_alive(world, actor) {
                    self.current = Some(actor);
                    return Ok(actor);
                }
            }
            let order = self.advance(world, config)?;
            self.ready.extend(order);
        }
    }
}

fn is_alive(world: &World, actor: EntityId) -> bool {
    matches!(world.is_dead(actor), Ok(false))
}

/// SPD of a living actor (the configured default when its sheet has none),
/// or `None` if it cannot take part.
fn speed_of(world: &World, actor: EntityId, config: &GameConfig) -> Option<u32> {
    if !is_alive(world, actor) {
        return None;
    }
    let sheet = world.build_sheet(actor).ok()?;
    Some(match sheet.integer(names::SPD.as_str()) {
        Some(speed) => speed.max(0).unsigned_abs(),
        None => config.default_speed,
    })
}
