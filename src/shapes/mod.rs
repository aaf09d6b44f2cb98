pub mod box_shape;
pub mod circle;

use std::fmt;

pub use box_shape::BoxShape;
pub use circle::Circle;

/// Geometric shape of a rigid body. The set is closed: every collision
/// routine matches on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Box(BoxShape),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Box(_) => ShapeKind::Box,
        }
    }

    pub fn area(&self) -> f64 {
        match self {
            Shape::Circle(circle) => circle.area(),
            Shape::Box(rect) => rect.area(),
        }
    }

    /// Moment of inertia about the shape's centre for the given mass.
    pub fn inertia(&self, mass: f64) -> f64 {
        match self {
            Shape::Circle(circle) => circle.inertia(mass),
            Shape::Box(rect) => rect.inertia(mass),
        }
    }
}

/// Fieldless tag of a `Shape`, used in error reports and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Box,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Circle => f.write_str("circle"),
            ShapeKind::Box => f.write_str("box"),
        }
    }
}
