//! Defines physical material properties.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents the physical properties of a rigid body affecting collisions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Friction coefficient while the contact is sticking. Range [0, infinity).
    pub static_friction: f64,
    /// Friction coefficient while the contact is sliding. Range [0, infinity).
    pub dynamic_friction: f64,
}

impl Material {
    /// Creates a new material, clamping every coefficient into its valid range.
    pub fn new(restitution: f64, static_friction: f64, dynamic_friction: f64) -> Self {
        Material {
            restitution: restitution.clamp(0.0, 1.0),
            static_friction: static_friction.max(0.0),
            dynamic_friction: dynamic_friction.max(0.0),
        }
    }

    /// Restitution used for a contact between two materials: the less bouncy one wins.
    pub fn combined_restitution(&self, other: &Material) -> f64 {
        self.restitution.min(other.restitution)
    }

    pub fn combined_static_friction(&self, other: &Material) -> f64 {
        (self.static_friction + other.static_friction) * 0.5
    }

    pub fn combined_dynamic_friction(&self, other: &Material) -> f64 {
        (self.dynamic_friction + other.dynamic_friction) * 0.5
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            restitution: 0.5,
            static_friction: 0.6,
            dynamic_friction: 0.4,
        }
    }
}
