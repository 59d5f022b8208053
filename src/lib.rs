//! KshetraGuidance - Turn path generation and execution for
//! precision-agriculture guidance.
//!
//! Computes and drives the maneuver connecting the end of one parallel
//! guidance track to the start of the next: constrained-curvature turn
//! paths in several topologies, boundary-clearance validation, next-track
//! selection, optional smoothing, and a thread-safe execution state
//! machine fed by the live position stream.
//!
//! # Architecture
//!
//! The crate is organized into 3 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  execution/                         │  ← State machine
//! │             (executor, events)                      │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   planning/                         │  ← Pure planning
//! │   (generators, boundary, smoothing, tracks)         │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │              (point, math, geometry)                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Raw Dubins-curve synthesis is an external collaborator consumed through
//! the traits in [`planning::provider`]; the generators degrade to a
//! deterministic semicircular arc when no provider path exists, so a turn
//! is always produced for valid parameters.
//!
//! # Threading
//!
//! Everything under `planning/` is stateless and may run concurrently.
//! [`TurnExecutor`] is the only mutable state holder; it is safe to share
//! between a configuration thread and a high-frequency position-update
//! thread, and it broadcasts lifecycle events only after releasing its
//! internal lock.

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;

// ============================================================================
// Layer 2: Pure planning (depends on core)
// ============================================================================
pub mod planning;

// ============================================================================
// Layer 3: Execution state machine (depends on core, planning)
// ============================================================================
pub mod execution;

pub mod config;
pub mod error;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

pub use crate::core::{math, Pose2D, Position2D};

pub use config::TurnParameters;
pub use error::{Result, TurnError};

pub use planning::{
    check_boundaries, check_boundary, find_next_track, next_track_for, BoundaryAwarePathProvider,
    BoundaryCheck, BoundaryViolation, DubinsPathProvider, GuidedPathResult, PathSmoother, RawPath,
    RowSkipMode, TurnGenerator, TurnPath, TurnStyle, BOUNDARY_SEARCH_ITERATIONS,
};

pub use execution::{TurnEvent, TurnExecutor, TurnSummary};
