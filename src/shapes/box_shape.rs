use crate::math::vec2::Vec2;

/// A box centred on its body's position, described by its size and its four
/// local-space corners.
///
/// Corners are stored (left, top), (right, top), (right, bottom), (left, bottom),
/// which is clockwise for a y-up frame. The collision routines only rely on the
/// corners forming a closed convex loop, not on the winding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub width: f64,
    pub height: f64,
    pub vertices: [Vec2; 4],
}

impl BoxShape {
    /// Creates a box of the given size centred on the local origin.
    ///
    /// Panics if either dimension is negative.
    pub fn new(width: f64, height: f64) -> Self {
        assert!(width >= 0.0 && height >= 0.0, "Box dimensions cannot be negative");

        let left = -width / 2.0;
        let right = left + width;
        let bottom = -height / 2.0;
        let top = bottom + height;

        BoxShape {
            width,
            height,
            vertices: [
                Vec2::new(left, top),
                Vec2::new(right, top),
                Vec2::new(right, bottom),
                Vec2::new(left, bottom),
            ],
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Moment of inertia about the centre for the given mass: m·(w² + h²)/12.
    pub fn inertia(&self, mass: f64) -> f64 {
        mass * (self.width * self.width + self.height * self.height) / 12.0
    }
}
