use super::vec2::Vec2;

/// A rigid transform with its trigonometry precomputed, so a whole vertex
/// list can be moved into world space with a single `sin_cos` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub sin: f64,
    pub cos: f64,
}

impl Transform {
    /// Creates a transform from a translation and an angle in radians.
    pub fn new(position: Vec2, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { position, sin, cos }
    }

    /// Applies the transform (rotation then translation) to a point.
    pub fn apply(self, point: Vec2) -> Vec2 {
        let rotated_x = point.x * self.cos - point.y * self.sin;
        let rotated_y = point.x * self.sin + point.y * self.cos;
        Vec2::new(rotated_x, rotated_y) + self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_transform_zero_angle_is_pure_translation() {
        let t = Transform::new(Vec2::ZERO, 0.0);
        let p = Vec2::new(5.0, -3.0);
        assert_eq!(t.apply(p), p);
    }

    #[test]
    fn test_transform_apply_translation() {
        let t = Transform::new(Vec2::new(10.0, 5.0), 0.0);
        let tp = t.apply(Vec2::new(1.0, 2.0));
        assert_abs_diff_eq!(tp.x, 11.0, epsilon = EPSILON);
        assert_abs_diff_eq!(tp.y, 7.0, epsilon = EPSILON);
    }

    #[test]
    fn test_transform_apply_rotation_90_deg() {
        let t = Transform::new(Vec2::ZERO, PI / 2.0);
        let tp = t.apply(Vec2::new(1.0, 0.0));
        assert_abs_diff_eq!(tp.x, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(tp.y, 1.0, epsilon = EPSILON);

        let tp2 = t.apply(Vec2::new(0.0, 1.0));
        assert_abs_diff_eq!(tp2.x, -1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(tp2.y, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_transform_matches_vec2_rotate() {
        let angle = 0.73;
        let t = Transform::new(Vec2::new(-2.0, 4.0), angle);
        let p = Vec2::new(1.5, -0.25);
        let expected = p.rotate(angle) + Vec2::new(-2.0, 4.0);
        let actual = t.apply(p);
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = EPSILON);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = EPSILON);
    }
}
