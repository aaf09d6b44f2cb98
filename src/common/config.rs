//! Simulation-wide policy constants and world configuration.
//!
//! The constants here are physical policy shared by every body and world;
//! they are not per-instance state.

use crate::math::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest accepted body area (m²).
pub const MIN_BODY_SIZE: f64 = 0.01 * 0.01;
/// Largest accepted body area (m²).
pub const MAX_BODY_SIZE: f64 = 64.0 * 64.0;

/// Smallest accepted density (g/cm³).
pub const MIN_DENSITY: f64 = 0.05;
/// Largest accepted density (g/cm³).
pub const MAX_DENSITY: f64 = 21.4;

/// Bounds for the sub-iteration count passed to `PhysicsWorld::step`.
pub const MIN_ITERATIONS: usize = 1;
pub const MAX_ITERATIONS: usize = 128;

/// Tolerance for approximate comparisons. Half a millimetre.
pub const VERY_SMALL_AMOUNT: f64 = 0.0005;

pub const EARTH_GRAVITY: Vec2 = Vec2::new(0.0, -9.81);

/// Configuration for a `PhysicsWorld`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldConfig {
    /// Constant acceleration applied to every dynamic body.
    pub gravity: Vec2,
    /// Whether to keep the contact points of the last sub-iteration for debug drawing.
    pub record_contact_points: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: EARTH_GRAVITY,
            record_contact_points: true,
        }
    }
}

impl WorldConfig {
    /// Default configuration with a custom gravity vector.
    #[must_use]
    pub fn with_gravity(gravity: Vec2) -> Self {
        Self {
            gravity,
            ..Default::default()
        }
    }

    /// Configuration without gravity, for top-down scenes.
    #[must_use]
    pub fn zero_gravity() -> Self {
        Self::with_gravity(Vec2::ZERO)
    }
}

/// Clamps a requested sub-iteration count into `[MIN_ITERATIONS, MAX_ITERATIONS]`.
pub fn clamp_iterations(iterations: usize) -> usize {
    iterations.clamp(MIN_ITERATIONS, MAX_ITERATIONS)
}
