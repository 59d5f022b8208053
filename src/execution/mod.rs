//! Turn execution: the one-turn-at-a-time state machine and its events.

pub mod events;
pub mod executor;

pub use events::TurnEvent;
pub use executor::{TurnExecutor, TurnSummary};
