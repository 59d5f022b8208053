//! Position and pose types for field-local planar coordinates.
//!
//! All positions are in a local planar projection centered on the field,
//! in meters. Headings are radians, counter-clockwise from the +easting
//! axis, normalized to [-π, π].

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use super::math::normalize_angle;

/// A 2-D position in field-local coordinates (meters).
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Position2D {
    /// Easting in meters
    pub easting: f32,
    /// Northing in meters
    pub northing: f32,
}

impl Position2D {
    /// Create a new position.
    #[inline]
    pub fn new(easting: f32, northing: f32) -> Self {
        Self { easting, northing }
    }

    /// Origin of the local projection.
    pub const ZERO: Position2D = Position2D {
        easting: 0.0,
        northing: 0.0,
    };

    /// Euclidean distance to another position.
    #[inline]
    pub fn distance(&self, other: &Position2D) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Position2D) -> f32 {
        let de = self.easting - other.easting;
        let dn = self.northing - other.northing;
        de * de + dn * dn
    }

    /// Heading from this position to another (radians, CCW from +easting).
    #[inline]
    pub fn heading_to(&self, other: &Position2D) -> f32 {
        let de = other.easting - self.easting;
        let dn = other.northing - self.northing;
        dn.atan2(de)
    }

    /// Position at a given heading and distance from this one.
    #[inline]
    pub fn point_at(&self, heading: f32, distance: f32) -> Position2D {
        Position2D::new(
            self.easting + distance * heading.cos(),
            self.northing + distance * heading.sin(),
        )
    }

    /// Dot product with another position (as vectors).
    #[inline]
    pub fn dot(&self, other: &Position2D) -> f32 {
        self.easting * other.easting + self.northing * other.northing
    }

    /// Z-component of the 3-D cross product (as vectors).
    #[inline]
    pub fn cross(&self, other: &Position2D) -> f32 {
        self.easting * other.northing - self.northing * other.easting
    }
}

impl Add for Position2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Position2D::new(self.easting + other.easting, self.northing + other.northing)
    }
}

impl Sub for Position2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Position2D::new(self.easting - other.easting, self.northing - other.northing)
    }
}

impl Mul<f32> for Position2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Position2D::new(self.easting * scalar, self.northing * scalar)
    }
}

/// An oriented position: where the vehicle is and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// Position in field-local coordinates
    pub position: Position2D,
    /// Heading in radians, normalized to [-π, π]
    pub heading: f32,
}

impl Pose2D {
    /// Create a new pose with the heading normalized to [-π, π].
    #[inline]
    pub fn new(position: Position2D, heading: f32) -> Self {
        Self {
            position,
            heading: normalize_angle(heading),
        }
    }

    /// Pose at the origin facing +easting.
    #[inline]
    pub fn identity() -> Self {
        Self {
            position: Position2D::ZERO,
            heading: 0.0,
        }
    }
}
