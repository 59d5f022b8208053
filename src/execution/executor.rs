//! Turn execution state machine.
//!
//! One [`TurnExecutor`] instance owns at most one active turn. It is
//! shared between a configuration/UI thread (configure, start, complete)
//! and a high-frequency position-feed thread (progress updates), so all
//! mutable state sits behind a [`parking_lot::Mutex`]. The lock is held
//! only for state mutation; path generation happens before the lock is
//! taken and events are broadcast after it is released.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::f32::consts::{FRAC_PI_2, PI};
use std::time::{Duration, Instant};

use crate::config::TurnParameters;
use crate::core::{Pose2D, Position2D};
use crate::error::{Result, TurnError};
use crate::execution::events::TurnEvent;
use crate::planning::generators::TurnGenerator;
use crate::planning::path::{TurnPath, TurnStyle};
use crate::planning::provider::DubinsPathProvider;

/// The turn currently being driven.
#[derive(Debug)]
struct ActiveTurn {
    path: TurnPath,
    start_position: Position2D,
    started_at: Instant,
    /// Monotonic within one turn, clamped to [0, 1]
    progress: f32,
    /// Monotonic floor: never searched backward, so GPS jitter cannot
    /// regress reported progress
    waypoint_index: usize,
}

/// Summary handed back when a turn completes.
#[derive(Clone, Debug)]
pub struct TurnSummary {
    /// Maneuver topology of the completed turn
    pub style: TurnStyle,
    /// Final waypoint of the path
    pub end_position: Position2D,
    /// Wall-clock time spent in the turn
    pub duration: Duration,
}

/// Turn execution engine: generates, adopts and tracks one turn at a time.
pub struct TurnExecutor<P> {
    generator: TurnGenerator<P>,
    params: Mutex<TurnParameters>,
    active: Mutex<Option<ActiveTurn>>,
    subscribers: Mutex<Vec<Sender<TurnEvent>>>,
}

impl<P: DubinsPathProvider> TurnExecutor<P> {
    /// Create an executor with validated parameters.
    pub fn new(provider: P, params: TurnParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            generator: TurnGenerator::new(provider),
            params: Mutex::new(params),
            active: Mutex::new(None),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    /// Replace the active turn configuration. Allowed whether or not a
    /// turn is in progress; the running turn keeps the path it was
    /// generated with.
    pub fn configure(&self, params: TurnParameters) -> Result<()> {
        params.validate()?;
        *self.params.lock() = params;
        Ok(())
    }

    /// Snapshot of the current configuration.
    pub fn parameters(&self) -> TurnParameters {
        self.params.lock().clone()
    }

    /// The generator backing this executor, for off-thread candidate
    /// evaluation.
    pub fn generator(&self) -> &TurnGenerator<P> {
        &self.generator
    }

    /// Subscribe to turn lifecycle events.
    pub fn subscribe(&self) -> Receiver<TurnEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Generate and start a turn from the vehicle's current pose.
    ///
    /// With no explicit next-track pose from the caller, the exit defaults
    /// to the parallel-track assumption: heading reversed 180° at a
    /// 2×radius lateral offset to the left of travel. Fails with
    /// [`TurnError::TurnInProgress`] if a turn is already active.
    pub fn start_turn(&self, position: Position2D, heading: f32) -> Result<TurnPath> {
        let params = self.parameters();
        let entry = Pose2D::new(position, heading);
        let exit_position = position.point_at(heading + FRAC_PI_2, 2.0 * params.turning_radius);
        let exit = Pose2D::new(exit_position, heading + PI);

        let path = self
            .generator
            .generate(params.turn_style, entry, exit, &params)?;
        self.adopt(path, position)
    }

    /// Start a turn from an externally generated (and typically
    /// boundary-validated) path.
    pub fn start_turn_with(&self, path: TurnPath, position: Position2D) -> Result<TurnPath> {
        self.adopt(path, position)
    }

    /// Advance progress tracking from a new vehicle position.
    ///
    /// Searches forward from the current waypoint index (never backward)
    /// for the nearest waypoint, then reports progress as
    /// `index / (count - 1)`, clamped and monotonic for the lifetime of
    /// the turn. Returns `None` when no turn is active.
    pub fn update_progress(&self, position: Position2D) -> Option<f32> {
        let mut guard = self.active.lock();
        let turn = guard.as_mut()?;

        let waypoints = &turn.path.waypoints;
        let n = waypoints.len();

        let mut best_index = turn.waypoint_index;
        let mut best_dist = f32::INFINITY;
        for (i, wp) in waypoints.iter().enumerate().skip(turn.waypoint_index) {
            let d = wp.distance_squared(&position);
            if d < best_dist {
                best_dist = d;
                best_index = i;
            }
        }
        turn.waypoint_index = best_index;

        let progress = if n > 1 {
            best_index as f32 / (n - 1) as f32
        } else {
            1.0
        };
        turn.progress = turn.progress.max(progress.clamp(0.0, 1.0));
        Some(turn.progress)
    }

    /// Finish the active turn.
    ///
    /// Emits [`TurnEvent::TurnCompleted`] and resets the engine to idle.
    /// Returns `None` (and does nothing) when no turn is active.
    pub fn complete_turn(&self) -> Option<TurnSummary> {
        let (summary, event) = {
            let mut guard = self.active.lock();
            let turn = guard.take()?;

            let duration = turn.started_at.elapsed();
            let end_position = turn
                .path
                .waypoints
                .last()
                .copied()
                .unwrap_or(turn.start_position);

            let summary = TurnSummary {
                style: turn.path.style,
                end_position,
                duration,
            };
            let event = TurnEvent::TurnCompleted {
                style: turn.path.style,
                end_position,
                duration,
            };
            (summary, event)
        };

        log::info!(
            "{} turn completed in {:.1}s",
            summary.style.as_str(),
            summary.duration.as_secs_f32()
        );
        self.broadcast(event);
        Some(summary)
    }

    /// Whether a turn is currently active.
    pub fn is_in_turn(&self) -> bool {
        self.active.lock().is_some()
    }

    /// Snapshot of the active turn's path.
    pub fn current_turn(&self) -> Option<TurnPath> {
        self.active.lock().as_ref().map(|t| t.path.clone())
    }

    /// Progress through the active turn, 0.0 when idle.
    pub fn progress(&self) -> f32 {
        self.active.lock().as_ref().map_or(0.0, |t| t.progress)
    }

    /// Waypoint index the vehicle is nearest to, when in a turn.
    pub fn current_waypoint_index(&self) -> Option<usize> {
        self.active.lock().as_ref().map(|t| t.waypoint_index)
    }

    /// Adopt a path as the active turn and announce it.
    fn adopt(&self, path: TurnPath, position: Position2D) -> Result<TurnPath> {
        if path.waypoints.len() < 2 {
            return Err(TurnError::DegeneratePath);
        }

        let event = {
            let mut guard = self.active.lock();
            if guard.is_some() {
                return Err(TurnError::TurnInProgress);
            }

            let event = TurnEvent::TurnStarted {
                style: path.style,
                start_position: position,
                waypoints: path.waypoints.clone(),
            };
            *guard = Some(ActiveTurn {
                path: path.clone(),
                start_position: position,
                started_at: Instant::now(),
                progress: 0.0,
                waypoint_index: 0,
            });
            event
        };

        log::info!(
            "{} turn started: {} waypoints, {:.1}m",
            path.style.as_str(),
            path.len(),
            path.total_length
        );
        self.broadcast(event);
        Ok(path)
    }

    /// Send an event to every live subscriber, dropping closed channels.
    fn broadcast(&self, event: TurnEvent) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
