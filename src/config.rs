//! Turn parameter configuration.
//!
//! [`TurnParameters`] is the value object a guidance coordinator hands to
//! the engine. It is never mutated by the engine; a host application can
//! embed it in its own TOML configuration via serde. Persistence itself is
//! the configuration layer's job, not this crate's.

use serde::Deserialize;

use crate::error::{Result, TurnError};
use crate::planning::path::TurnStyle;
use crate::planning::tracks::RowSkipMode;

/// Parameters governing turn generation and track selection.
#[derive(Clone, Debug, Deserialize)]
pub struct TurnParameters {
    /// Turn maneuver topology to generate
    #[serde(default)]
    pub turn_style: TurnStyle,

    /// Minimum turning radius of the vehicle/implement combination (meters)
    #[serde(default = "default_turning_radius")]
    pub turning_radius: f32,

    /// Policy for choosing the next guidance track after a turn
    #[serde(default)]
    pub row_skip_mode: RowSkipMode,

    /// Number of tracks to skip in `Alternative` mode
    #[serde(default)]
    pub row_skip_width: usize,

    /// Distance between generated waypoints (meters).
    /// `None` derives `turning_radius * 0.1`.
    #[serde(default)]
    pub waypoint_spacing: Option<f32>,

    /// Minimum clearance to keep from field boundaries (meters)
    #[serde(default = "default_boundary_min_distance")]
    pub boundary_min_distance: f32,

    /// Catmull-Rom smoothing factor, 0 disables smoothing
    #[serde(default)]
    pub smoothing_factor: f32,

    /// Radius multiplier for the Wide turn style
    #[serde(default = "default_wide_radius_multiplier")]
    pub wide_radius_multiplier: f32,
}

fn default_turning_radius() -> f32 {
    6.0
}
fn default_boundary_min_distance() -> f32 {
    1.0
}
fn default_wide_radius_multiplier() -> f32 {
    1.5
}

impl Default for TurnParameters {
    fn default() -> Self {
        Self {
            turn_style: TurnStyle::default(),
            turning_radius: default_turning_radius(),
            row_skip_mode: RowSkipMode::default(),
            row_skip_width: 0,
            waypoint_spacing: None,
            boundary_min_distance: default_boundary_min_distance(),
            smoothing_factor: 0.0,
            wide_radius_multiplier: default_wide_radius_multiplier(),
        }
    }
}

impl TurnParameters {
    /// Effective waypoint spacing: the explicit value, or a tenth of the
    /// turning radius when unset.
    #[inline]
    pub fn spacing(&self) -> f32 {
        self.waypoint_spacing
            .unwrap_or(self.turning_radius * 0.1)
    }

    /// Validate the configuration.
    ///
    /// Out-of-range values are rejected, never clamped: a silently adjusted
    /// radius or spacing would mask an operator mistake that affects how
    /// the vehicle moves.
    pub fn validate(&self) -> Result<()> {
        if !(self.turning_radius > 0.0) {
            return Err(TurnError::InvalidTurningRadius(self.turning_radius));
        }
        if let Some(spacing) = self.waypoint_spacing {
            if !(spacing > 0.0) {
                return Err(TurnError::InvalidWaypointSpacing(spacing));
            }
        }
        if !(0.0..=1.0).contains(&self.smoothing_factor) {
            return Err(TurnError::InvalidSmoothingFactor(self.smoothing_factor));
        }
        if !(self.wide_radius_multiplier > 1.0) {
            return Err(TurnError::InvalidWideRadiusMultiplier(
                self.wide_radius_multiplier,
            ));
        }
        Ok(())
    }
}
