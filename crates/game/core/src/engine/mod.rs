//! Turn scheduling and action execution.
//!
//! The [`GameEngine`] is the only place where a chosen [`Action`] turns into
//! state changes. It borrows the session state together with the tile map
//! and configuration for the duration of a step.

mod errors;
mod turns;

pub use errors::ExecuteError;
pub use turns::{TurnError, TurnScheduler};

use crate::action::{Action, ActionError, MoveAction, get_available_actions};
use crate::combat::DamageReport;
use crate::config::GameConfig;
use crate::env::TileMap;
use crate::state::{EntityId, Position, PropertyKey, PropertyValue, StateError, World};

/// Mutable state of a session.
#[derive(Clone, Debug, Default)]
pub struct GameState {
    pub world: World,
    pub turns: TurnScheduler,
}

impl GameState {
    pub fn new(world: World) -> Self {
        Self {
            world,
            turns: TurnScheduler::new(),
        }
    }
}

/// What an executed action did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Waited,
    Moved { to: Position },
    PickedUp { item: EntityId },
    Attacked { target: EntityId, report: DamageReport },
}

pub struct GameEngine<'a> {
    state: &'a mut GameState,
    map: &'a dyn TileMap,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, map: &'a dyn TileMap, config: &'a GameConfig) -> Self {
        Self { state, map, config }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Adds an actor to turn scheduling.
    pub fn register_actor(&mut self, actor: EntityId) -> Result<(), ExecuteError> {
        if !self.state.world.entity(actor)?.has_stats() {
            return Err(StateError::NotAnActor(actor).into());
        }
        self.state.turns.register(actor);
        Ok(())
    }

    /// Picks whose turn it is, advancing initiative if needed.
    ///
    /// Fails while the current actor has not executed an action yet.
    pub fn prepare_next_turn(&mut self) -> Result<EntityId, ExecuteError> {
        if let Some(actor) = self.state.turns.current() {
            tracing::debug!(%actor, "turn already in progress");
            return Err(ExecuteError::TurnInProgress(actor));
        }
        let actor = self
            .state
            .turns
            .next_actor(&self.state.world, self.config)?;
        tracing::debug!(%actor, clock = %self.state.turns.clock(), "turn started");
        Ok(actor)
    }

    pub fn current_actor(&self) -> Option<EntityId> {
        self.state.turns.current()
    }

    pub fn available_actions(&self, actor: EntityId) -> Result<Vec<Action>, ExecuteError> {
        Ok(get_available_actions(
            &self.state.world,
            self.map,
            actor,
            self.config,
        )?)
    }

    /// Executes `action` for the current actor and ends its turn.
    ///
    /// The action must be one of the actor's available actions right now;
    /// anything else is rejected before state is touched.
    pub fn execute(&mut self, action: &Action) -> Result<ActionOutcome, ExecuteError> {
        let actor = action.actor();
        let current = self.state.turns.current();
        if current != Some(actor) {
            return Err(ExecuteError::NotCurrentActor {
                expected: current,
                found: actor,
            });
        }
        if !self.available_actions(actor)?.contains(action) {
            return Err(ActionError::NotAvailable { actor }.into());
        }

        if let Some(walk) = action.via() {
            self.walk(walk)?;
        }
        let outcome = match action {
            Action::Wait { .. } => ActionOutcome::Waited,
            Action::Move(walk) => {
                let to = self.walk(walk)?;
                ActionOutcome::Moved { to }
            }
            Action::Pickup(pickup) => {
                self.state.world.pick_up(actor, pickup.item)?;
                ActionOutcome::PickedUp { item: pickup.item }
            }
            Action::Melee(melee) => {
                let report = self.state.world.deal_damage(melee.target, &melee.damage)?;
                if report.dead && self.state.turns.is_registered(melee.target) {
                    self.state.turns.unregister(melee.target)?;
                }
                ActionOutcome::Attacked {
                    target: melee.target,
                    report,
                }
            }
        };

        self.state.turns.finish_turn();
        tracing::debug!(%actor, %action, ?outcome, "action executed");
        Ok(outcome)
    }

    fn walk(&mut self, walk: &MoveAction) -> Result<Position, ExecuteError> {
        let current = self.state.world.entity(walk.actor)?.position();
        let Some(to) = walk.destination().or(current) else {
            return Err(ActionError::NotPlaced(walk.actor).into());
        };
        self.state
            .world
            .set(walk.actor, PropertyKey::Position, PropertyValue::Position(to))?;
        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DamageComponent, DamageVector};
    use crate::env::Grid;
    use crate::error::{ErrorSeverity, GameError};
    use crate::stats::Modifier;

    fn setup() -> (GameState, EntityId, EntityId) {
        let mut world = World::new();
        let hero = world.create_actor("hero");
        let sword = world.create_item("training sword", "Blunt.", '/');
        world
            .attach_modifier(
                sword,
                Modifier::melee(DamageVector::new(vec![DamageComponent::new(5)])),
            )
            .unwrap();
        world.attach_modifier(sword, Modifier::hp(5, 5)).unwrap();
        world
            .attach_modifier(sword, Modifier::flat(crate::stats::names::MOV, 1))
            .unwrap();
        world.pick_up(hero, sword).unwrap();
        world
            .set(hero, PropertyKey::Position, PropertyValue::Position(Position::new(0, 0)))
            .unwrap();

        let rat = world.create_actor("rat");
        let tail = world.create_item("tail", "Wiggly.", '~');
        world.attach_modifier(tail, Modifier::hp(3, 3)).unwrap();
        world.pick_up(rat, tail).unwrap();
        world
            .set(rat, PropertyKey::Position, PropertyValue::Position(Position::new(2, 0)))
            .unwrap();

        (GameState::new(world), hero, rat)
    }

    #[test]
    fn only_the_current_actor_may_act() {
        let (mut state, hero, rat) = setup();
        let map = Grid::open(3, 1).unwrap();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &map, &config);
        engine.register_actor(hero).unwrap();
        engine.register_actor(rat).unwrap();

        let first = engine.prepare_next_turn().unwrap();
        assert_eq!(first, hero);
        let err = engine.execute(&Action::Wait { actor: rat }).unwrap_err();
        assert!(matches!(err, ExecuteError::NotCurrentActor { .. }));
        assert_eq!(engine.execute(&Action::Wait { actor: hero }), Ok(ActionOutcome::Waited));
        assert_eq!(engine.current_actor(), None);
    }

    #[test]
    fn turn_cannot_be_prepared_twice() {
        let (mut state, hero, rat) = setup();
        let map = Grid::open(3, 1).unwrap();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &map, &config);
        engine.register_actor(hero).unwrap();
        engine.register_actor(rat).unwrap();

        assert_eq!(engine.prepare_next_turn(), Ok(hero));
        let err = engine.prepare_next_turn().unwrap_err();
        assert_eq!(err, ExecuteError::TurnInProgress(hero));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(engine.current_actor(), Some(hero));

        engine.execute(&Action::Wait { actor: hero }).unwrap();
        assert_eq!(engine.prepare_next_turn(), Ok(rat));
    }

    #[test]
    fn illegal_actions_leave_state_unchanged() {
        let (mut state, hero, _) = setup();
        let map = Grid::open(3, 1).unwrap();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &map, &config);
        engine.register_actor(hero).unwrap();
        engine.prepare_next_turn().unwrap();

        let teleport = Action::Move(MoveAction {
            actor: hero,
            path: vec![Position::new(2, 0)],
        });
        assert_eq!(
            engine.execute(&teleport),
            Err(ExecuteError::Action(ActionError::NotAvailable { actor: hero }))
        );
        assert_eq!(
            engine.state().world.entity(hero).unwrap().position(),
            Some(Position::new(0, 0))
        );
        assert_eq!(engine.current_actor(), Some(hero));
    }

    #[test]
    fn killing_blow_unschedules_target() {
        let (mut state, hero, rat) = setup();
        let map = Grid::open(3, 1).unwrap();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &map, &config);
        engine.register_actor(hero).unwrap();
        engine.register_actor(rat).unwrap();
        engine.prepare_next_turn().unwrap();

        let attack = engine
            .available_actions(hero)
            .unwrap()
            .into_iter()
            .find(|a| matches!(a, Action::Melee(_)))
            .unwrap();
        let outcome = engine.execute(&attack).unwrap();

        let ActionOutcome::Attacked { target, report } = outcome else {
            panic!("expected an attack, got {outcome:?}");
        };
        assert_eq!(target, rat);
        assert!(report.dead);
        assert_eq!(
            engine.state().world.entity(hero).unwrap().position(),
            Some(Position::new(1, 0))
        );
        assert!(!engine.state().turns.is_registered(rat));
    }

    #[test]
    fn items_cannot_be_registered() {
        let (mut state, _, _) = setup();
        let rock = state.world.create_item("rock", "Solid.", '*');
        let map = Grid::open(1, 1).unwrap();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &map, &config);
        assert_eq!(
            engine.register_actor(rock),
            Err(ExecuteError::State(StateError::NotAnActor(rock)))
        );
    }
}
