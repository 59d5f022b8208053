//! Turn pattern generators.
//!
//! One pure generation routine per [`TurnStyle`]:
//! - Omega/Wide delegate to the Dubins provider and fall back to a
//!   synthesized semicircular arc when the provider has no path
//! - K, T and Y are closed-form forward/reverse segment sequences
//!
//! Generators take no locks and touch no shared state; the same inputs
//! always produce the same path, so candidate turns for different styles
//! may be generated concurrently.

use std::cmp::Ordering;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::time::Instant;

use crate::config::TurnParameters;
use crate::core::{Pose2D, Position2D};
use crate::error::Result;
use crate::planning::path::{TurnPath, TurnStyle};
use crate::planning::provider::DubinsPathProvider;

/// Fixed forward pull-ahead length for the T maneuver (meters).
const T_TURN_PULL_AHEAD: f32 = 3.0;

/// One analytic maneuver segment: constant heading, fixed length.
struct Segment {
    /// Vehicle facing while traversing the segment
    heading: f32,
    /// Travel distance (meters)
    length: f32,
    /// Whether the vehicle backs along this segment
    reverse: bool,
}

/// Turn path generator over an external Dubins provider.
pub struct TurnGenerator<P> {
    provider: P,
}

impl<P: DubinsPathProvider> TurnGenerator<P> {
    /// Create a generator backed by the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Access the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Generate a turn path for one style.
    ///
    /// Fails only on invalid parameters; degraded provider results are
    /// recovered via the arc fallback, so a turn is always produced for
    /// valid inputs.
    pub fn generate(
        &self,
        style: TurnStyle,
        entry: Pose2D,
        exit: Pose2D,
        params: &TurnParameters,
    ) -> Result<TurnPath> {
        params.validate()?;
        let spacing = params.spacing();
        let radius = params.turning_radius;
        let started = Instant::now();

        let (waypoints, total_length, exit_pose) = match style {
            TurnStyle::Omega => self.constant_curvature(entry, exit, radius, spacing),
            TurnStyle::Wide => self.constant_curvature(
                entry,
                exit,
                radius * params.wide_radius_multiplier,
                spacing,
            ),
            TurnStyle::K => sample_segments(
                entry.position,
                exit,
                &[
                    Segment {
                        heading: entry.heading + FRAC_PI_4,
                        length: 0.8 * radius,
                        reverse: false,
                    },
                    Segment {
                        heading: entry.heading + FRAC_PI_4 - FRAC_PI_2,
                        length: 0.6 * radius,
                        reverse: true,
                    },
                    Segment {
                        heading: exit.heading,
                        length: 0.8 * radius,
                        reverse: false,
                    },
                ],
                spacing,
            ),
            TurnStyle::T => sample_segments(
                entry.position,
                exit,
                &[
                    Segment {
                        heading: entry.heading,
                        length: T_TURN_PULL_AHEAD,
                        reverse: false,
                    },
                    Segment {
                        heading: entry.heading + FRAC_PI_2,
                        length: radius,
                        reverse: true,
                    },
                    Segment {
                        heading: exit.heading,
                        length: radius + T_TURN_PULL_AHEAD,
                        reverse: false,
                    },
                ],
                spacing,
            ),
            TurnStyle::Y => sample_segments(
                entry.position,
                exit,
                &[
                    Segment {
                        heading: entry.heading + FRAC_PI_4,
                        length: 1.5 * radius,
                        reverse: false,
                    },
                    Segment {
                        heading: entry.heading + FRAC_PI_4 - FRAC_PI_2,
                        length: 0.5 * radius,
                        reverse: true,
                    },
                    Segment {
                        heading: exit.heading,
                        length: 1.5 * radius,
                        reverse: false,
                    },
                ],
                spacing,
            ),
        };

        Ok(TurnPath {
            style,
            entry,
            exit: exit_pose,
            waypoints,
            total_length,
            computation_time: started.elapsed(),
            requires_reverse: style.requires_reverse(),
            boundary_check: None,
        })
    }

    /// Generate candidate paths for the requested styles, sorted ascending
    /// by total length.
    ///
    /// A style that fails to generate is skipped so it cannot block
    /// evaluation of the others.
    pub fn generate_options(
        &self,
        entry: Pose2D,
        exit: Pose2D,
        params: &TurnParameters,
        styles: &[TurnStyle],
    ) -> Vec<TurnPath> {
        let mut options: Vec<TurnPath> = styles
            .iter()
            .filter_map(|&style| match self.generate(style, entry, exit, params) {
                Ok(path) => Some(path),
                Err(err) => {
                    log::warn!("{} generation failed: {}", style.as_str(), err);
                    None
                }
            })
            .collect();

        options.sort_by(|a, b| {
            a.total_length
                .partial_cmp(&b.total_length)
                .unwrap_or(Ordering::Equal)
        });
        options
    }

    /// Generate candidates for every style, shortest first.
    pub fn generate_all_options(
        &self,
        entry: Pose2D,
        exit: Pose2D,
        params: &TurnParameters,
    ) -> Vec<TurnPath> {
        self.generate_options(entry, exit, params, &TurnStyle::ALL)
    }

    /// Omega/Wide body: provider path with cluster removal, or the
    /// semicircular-arc fallback.
    fn constant_curvature(
        &self,
        entry: Pose2D,
        exit: Pose2D,
        radius: f32,
        spacing: f32,
    ) -> (Vec<Position2D>, f32, Pose2D) {
        match self.provider.generate_path(entry, exit, radius, spacing) {
            Some(raw) if raw.waypoints.len() >= 2 => {
                let waypoints = discard_clustered(raw.waypoints, spacing);
                let exit_pose = Pose2D::new(waypoints[waypoints.len() - 1], exit.heading);
                (waypoints, raw.total_length, exit_pose)
            }
            _ => {
                log::debug!(
                    "dubins provider returned no path (radius {:.2}m), using semicircular arc",
                    radius
                );
                fallback_arc(entry, exit, radius, spacing)
            }
        }
    }
}

/// Drop interior waypoints closer than `spacing` to the last retained one.
///
/// The first and last waypoints are always kept. Near-duplicate clusters
/// would otherwise break downstream heading and curvature calculations.
fn discard_clustered(waypoints: Vec<Position2D>, spacing: f32) -> Vec<Position2D> {
    if waypoints.len() <= 2 {
        return waypoints;
    }

    let spacing_sq = spacing * spacing;
    let last_index = waypoints.len() - 1;
    let mut kept = Vec::with_capacity(waypoints.len());
    kept.push(waypoints[0]);

    for wp in &waypoints[1..last_index] {
        let retained = kept[kept.len() - 1];
        if retained.distance_squared(wp) >= spacing_sq {
            kept.push(*wp);
        }
    }

    kept.push(waypoints[last_index]);
    kept
}

/// Semicircular arc used when the Dubins provider has no path.
///
/// The arc center sits one radius to the side of the entry heading, on the
/// side the exit lies; waypoints sweep a half circle, so the path length is
/// exactly π·radius and the final heading is the entry heading reversed.
fn fallback_arc(
    entry: Pose2D,
    exit: Pose2D,
    radius: f32,
    spacing: f32,
) -> (Vec<Position2D>, f32, Pose2D) {
    let forward = Position2D::new(entry.heading.cos(), entry.heading.sin());
    let to_exit = exit.position - entry.position;
    let side = if forward.cross(&to_exit) >= 0.0 { 1.0 } else { -1.0 };

    let center = entry
        .position
        .point_at(entry.heading + side * FRAC_PI_2, radius);
    let start_angle = entry.heading - side * FRAC_PI_2;

    let arc_length = PI * radius;
    let steps = ((arc_length / spacing).ceil() as usize).max(2);
    let mut waypoints = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let angle = start_angle + side * PI * i as f32 / steps as f32;
        waypoints.push(center.point_at(angle, radius));
    }

    let exit_pose = Pose2D::new(waypoints[waypoints.len() - 1], entry.heading + PI);
    (waypoints, arc_length, exit_pose)
}

/// Sample a forward/reverse segment sequence at the waypoint spacing.
///
/// Returns the waypoints, the analytic total length (sum of segment
/// lengths, reverse travel included) and the exit pose at the final
/// waypoint with the requested exit heading.
fn sample_segments(
    entry: Position2D,
    exit: Pose2D,
    segments: &[Segment],
    spacing: f32,
) -> (Vec<Position2D>, f32, Pose2D) {
    let mut waypoints = vec![entry];
    let mut cursor = entry;
    let mut total = 0.0_f32;

    for seg in segments {
        let travel = if seg.reverse {
            seg.heading + PI
        } else {
            seg.heading
        };
        let steps = ((seg.length / spacing).ceil() as usize).max(1);
        for i in 1..=steps {
            let d = seg.length * i as f32 / steps as f32;
            waypoints.push(cursor.point_at(travel, d));
        }
        cursor = cursor.point_at(travel, seg.length);
        total += seg.length;
    }

    let exit_pose = Pose2D::new(cursor, exit.heading);
    (waypoints, total, exit_pose)
}
