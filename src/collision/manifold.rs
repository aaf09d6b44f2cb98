use crate::math::vec2::Vec2;

/// Minimum translation between two overlapping shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Unit vector pointing from shape A towards shape B.
    pub normal: Vec2,
    /// How far the shapes overlap along `normal`. Never negative.
    pub depth: f64,
}

impl Penetration {
    /// The same overlap seen from the other shape.
    pub fn flipped(self) -> Self {
        Penetration {
            normal: -self.normal,
            depth: self.depth,
        }
    }
}

/// Up to two world-space contact points between a pair of bodies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactPoints {
    points: [Vec2; 2],
    // Number of valid entries in `points`: 0, 1 or 2.
    count: usize,
}

impl ContactPoints {
    pub fn one(point: Vec2) -> Self {
        ContactPoints {
            points: [point, Vec2::ZERO],
            count: 1,
        }
    }

    pub fn two(first: Vec2, second: Vec2) -> Self {
        ContactPoints {
            points: [first, second],
            count: 2,
        }
    }

    /// The valid contact points.
    pub fn as_slice(&self) -> &[Vec2] {
        &self.points[..self.count]
    }

    /// Number of contact points: 0, 1 or 2.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Stores information about a collision between two bodies.
/// Built fresh for every colliding pair in every sub-iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionManifold {
    /// Index of the first body involved in the collision.
    pub body_a_idx: usize,
    /// Index of the second body involved in the collision.
    pub body_b_idx: usize,
    /// The collision normal, pointing from body A towards body B.
    pub normal: Vec2,
    /// The amount of penetration between the shapes.
    pub depth: f64,
    pub contacts: ContactPoints,
}
