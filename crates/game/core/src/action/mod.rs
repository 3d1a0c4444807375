//! Action discovery.
//!
//! Actions are enumerated, never chosen here: [`get_available_actions`]
//! returns every legal action for an actor this turn, and the engine only
//! accepts actions from that set.
//!
//! # Module Structure
//!
//! - `types`: action values (`Action`, `MoveAction`, ...)
//! - `available`: bounded BFS over the tile map plus capability dispatch
//! - `grants`: actions contributed by ADD_ACTION attributes
//! - `error`: `ActionError`

mod available;
pub mod error;
mod grants;
pub mod types;

pub use available::{ActionContext, get_available_actions, reachable};
pub use error::ActionError;
pub use types::{Action, MeleeAction, MoveAction, PickupAction};
