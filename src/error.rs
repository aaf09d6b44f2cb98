//! Error types for body construction.

use thiserror::Error;

use crate::shapes::ShapeKind;

/// Validation failures reported by the body factories.
///
/// These are expected, recoverable conditions: the caller asked for a body
/// outside the simulation's size or density policy.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BodyError {
    /// A dimension was negative, NaN or infinite.
    #[error("{kind} dimensions must be finite and non-negative")]
    InvalidDimensions {
        /// Shape being constructed.
        kind: ShapeKind,
    },

    /// Area below `MIN_BODY_SIZE`.
    #[error("{kind} area is too small: {area} (min {min})")]
    AreaTooSmall {
        /// Shape being constructed.
        kind: ShapeKind,
        /// Requested area.
        area: f64,
        /// Smallest accepted area.
        min: f64,
    },

    /// Area above `MAX_BODY_SIZE`.
    #[error("{kind} area is too large: {area} (max {max})")]
    AreaTooLarge {
        /// Shape being constructed.
        kind: ShapeKind,
        /// Requested area.
        area: f64,
        /// Largest accepted area.
        max: f64,
    },

    /// Density below `MIN_DENSITY`.
    #[error("{kind} density is too small: {density} (min {min})")]
    DensityTooSmall {
        /// Shape being constructed.
        kind: ShapeKind,
        /// Requested density.
        density: f64,
        /// Smallest accepted density.
        min: f64,
    },

    /// Density above `MAX_DENSITY`.
    #[error("{kind} density is too large: {density} (max {max})")]
    DensityTooLarge {
        /// Shape being constructed.
        kind: ShapeKind,
        /// Requested density.
        density: f64,
        /// Largest accepted density.
        max: f64,
    },
}

/// Result alias for body construction.
pub type Result<T> = std::result::Result<T, BodyError>;
