//! Turn lifecycle events.
//!
//! Events are broadcast over crossbeam channels to every subscriber. The
//! executor sends them only after its state lock has been released, so
//! subscriber code can never deadlock against the engine.

use std::time::Duration;

use crate::core::Position2D;
use crate::planning::path::TurnStyle;

/// Lifecycle event emitted by the turn executor.
#[derive(Clone, Debug)]
pub enum TurnEvent {
    /// A turn was adopted and is now being driven.
    TurnStarted {
        /// Maneuver topology of the adopted path
        style: TurnStyle,
        /// Vehicle position when the turn began
        start_position: Position2D,
        /// Full waypoint list, for display or section control
        waypoints: Vec<Position2D>,
    },
    /// The active turn finished.
    TurnCompleted {
        /// Maneuver topology of the completed path
        style: TurnStyle,
        /// Final waypoint of the path
        end_position: Position2D,
        /// Wall-clock time spent in the turn
        duration: Duration,
    },
}

impl TurnEvent {
    /// Style the event refers to.
    pub fn style(&self) -> TurnStyle {
        match self {
            TurnEvent::TurnStarted { style, .. } => *style,
            TurnEvent::TurnCompleted { style, .. } => *style,
        }
    }
}
