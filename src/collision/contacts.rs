//! Contact point generation for pairs already known to overlap.

use crate::math::vec2::{nearly_equal, Vec2};
use crate::objects::rigid_body::RigidBody;
use crate::shapes::Shape;
use super::detection::edges;
use super::manifold::ContactPoints;

/// Segments shorter than this are treated as a single point.
const MIN_SEGMENT_LENGTH_SQ: f64 = 1e-12;

/// Finds the closest point to `p` on the segment `a`-`b`.
///
/// Returns the point together with its squared distance to `p`.
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> (Vec2, f64) {
    let ab = b - a;
    let length_sq = ab.magnitude_squared();

    if length_sq < MIN_SEGMENT_LENGTH_SQ {
        return (a, p.distance_squared(a));
    }

    let d = (p - a).dot(ab) / length_sq;
    let closest = if d <= 0.0 {
        a
    } else if d >= 1.0 {
        b
    } else {
        a + ab * d
    };

    (closest, p.distance_squared(closest))
}

/// Computes the contact points of two overlapping bodies.
pub fn find_contact_points(body_a: &RigidBody, body_b: &RigidBody) -> ContactPoints {
    match (body_a.shape(), body_b.shape()) {
        (Shape::Circle(circle_a), Shape::Circle(_)) => ContactPoints::one(circles_contact_point(
            body_a.position(),
            circle_a.radius,
            body_b.position(),
        )),
        (Shape::Circle(_), Shape::Box(_)) => ContactPoints::one(circle_polygon_contact_point(
            body_a.position(),
            body_b.transformed_vertices(),
        )),
        (Shape::Box(_), Shape::Circle(_)) => ContactPoints::one(circle_polygon_contact_point(
            body_b.position(),
            body_a.transformed_vertices(),
        )),
        (Shape::Box(_), Shape::Box(_)) => {
            polygons_contact_points(body_a.transformed_vertices(), body_b.transformed_vertices())
        }
    }
}

/// The point on circle A's boundary facing circle B's centre.
pub fn circles_contact_point(center_a: Vec2, radius_a: f64, center_b: Vec2) -> Vec2 {
    let direction = center_b - center_a;
    let direction = if direction.magnitude_squared() > 0.0 {
        direction.normalize()
    } else {
        Vec2::UP
    };
    center_a + direction * radius_a
}

/// The point on the polygon boundary nearest to the circle centre.
pub fn circle_polygon_contact_point(circle_center: Vec2, vertices: &[Vec2]) -> Vec2 {
    let mut contact = Vec2::ZERO;
    let mut min_distance_sq = f64::MAX;

    for (va, vb) in edges(vertices) {
        let (closest, distance_sq) = point_segment_distance(circle_center, va, vb);
        if distance_sq < min_distance_sq {
            min_distance_sq = distance_sq;
            contact = closest;
        }
    }

    contact
}

/// One or two contact points between overlapping convex polygons.
///
/// Each vertex of either polygon is measured against every edge of the other.
/// The closest vertex-edge pair gives the first contact; a second pair at
/// nearly the same distance but a distinct location gives the second.
pub fn polygons_contact_points(vertices_a: &[Vec2], vertices_b: &[Vec2]) -> ContactPoints {
    let mut search = ContactSearch::default();
    search.scan(vertices_a, vertices_b);
    search.scan(vertices_b, vertices_a);
    search.contacts
}

struct ContactSearch {
    contacts: ContactPoints,
    min_distance_sq: f64,
}

impl Default for ContactSearch {
    fn default() -> Self {
        ContactSearch {
            contacts: ContactPoints::default(),
            min_distance_sq: f64::MAX,
        }
    }
}

impl ContactSearch {
    fn scan(&mut self, points: &[Vec2], polygon: &[Vec2]) {
        for &p in points {
            for (va, vb) in edges(polygon) {
                let (closest, distance_sq) = point_segment_distance(p, va, vb);
                self.consider(closest, distance_sq);
            }
        }
    }

    fn consider(&mut self, closest: Vec2, distance_sq: f64) {
        if nearly_equal(distance_sq, self.min_distance_sq) {
            if let Some(&first) = self.contacts.as_slice().first() {
                if !closest.nearly_equal(first) {
                    self.contacts = ContactPoints::two(first, closest);
                }
            }
        } else if distance_sq < self.min_distance_sq {
            self.min_distance_sq = distance_sq;
            self.contacts = ContactPoints::one(closest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f64 = 1e-9;

    fn square(size: f64, x: f64, y: f64) -> RigidBody {
        RigidBody::new_box(size, size, Vec2::new(x, y), 1.0, false, 0.5).unwrap()
    }

    fn circle(radius: f64, x: f64, y: f64) -> RigidBody {
        RigidBody::new_circle(radius, Vec2::new(x, y), 1.0, false, 0.5).unwrap()
    }

    fn contains(points: &[Vec2], expected: Vec2) -> bool {
        points.iter().any(|p| p.distance(expected) < EPSILON)
    }

    #[test]
    fn test_point_segment_distance_interior() {
        let (cp, d) =
            point_segment_distance(Vec2::new(1.0, 2.0), Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0));
        assert_eq!(cp, Vec2::new(1.0, 0.0));
        assert_abs_diff_eq!(d, 4.0, epsilon = EPSILON);
    }

    #[test]
    fn test_point_segment_distance_clamps_to_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(4.0, 0.0);

        let (cp, d) = point_segment_distance(Vec2::new(-3.0, 4.0), a, b);
        assert_eq!(cp, a);
        assert_abs_diff_eq!(d, 25.0, epsilon = EPSILON);

        let (cp, d) = point_segment_distance(Vec2::new(5.0, 1.0), a, b);
        assert_eq!(cp, b);
        assert_abs_diff_eq!(d, 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_point_segment_distance_degenerate_segment() {
        let a = Vec2::new(1.0, 1.0);
        let (cp, d) = point_segment_distance(Vec2::new(4.0, 5.0), a, a);
        assert_eq!(cp, a);
        assert_abs_diff_eq!(d, 25.0, epsilon = EPSILON);
    }

    #[test]
    fn test_circles_contact_point_on_surface_of_a() {
        let a = circle(1.0, 0.0, 0.0);
        let b = circle(1.0, 1.5, 0.0);
        let contacts = find_contact_points(&a, &b);
        assert_eq!(contacts.len(), 1);
        assert_abs_diff_eq!(contacts.as_slice()[0].x, 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(contacts.as_slice()[0].y, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_circles_contact_point_coincident_centres() {
        let p = circles_contact_point(Vec2::new(2.0, 3.0), 0.5, Vec2::new(2.0, 3.0));
        assert_eq!(p, Vec2::new(2.0, 3.5));
    }

    #[test]
    fn test_circle_box_contact_point_either_order() {
        let ground = square(2.0, 0.0, 0.0);
        let ball = circle(0.5, 0.3, 1.4);

        let ab = find_contact_points(&ball, &ground);
        let ba = find_contact_points(&ground, &ball);
        assert_eq!(ab.len(), 1);
        assert_eq!(ba.len(), 1);
        assert_abs_diff_eq!(ab.as_slice()[0].x, 0.3, epsilon = EPSILON);
        assert_abs_diff_eq!(ab.as_slice()[0].y, 1.0, epsilon = EPSILON);
        assert_eq!(ab.as_slice()[0], ba.as_slice()[0]);
    }

    #[test]
    fn test_boxes_face_overlap_gives_two_contacts() {
        let a = square(2.0, 0.0, 0.0);
        let b = square(2.0, 1.5, 0.0);
        let contacts = find_contact_points(&a, &b);

        assert_eq!(contacts.len(), 2);
        let points = contacts.as_slice();
        assert!(contains(points, Vec2::new(1.0, 1.0)) || contains(points, Vec2::new(0.5, 1.0)));
        assert!(contains(points, Vec2::new(1.0, -1.0)) || contains(points, Vec2::new(0.5, -1.0)));
        assert!(points[0].distance(points[1]) > 1.0);
    }

    #[test]
    fn test_boxes_corner_overlap_gives_one_contact() {
        let a = square(2.0, 0.0, 0.0);
        let mut b = square(2.0, 2.2, 0.0);
        b.rotate_to(std::f64::consts::FRAC_PI_4);

        let contacts = find_contact_points(&a, &b);
        assert_eq!(contacts.len(), 1);
        // B's left corner pokes into A's right face; the contact lies on that face.
        assert_abs_diff_eq!(contacts.as_slice()[0].x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(contacts.as_slice()[0].y, 0.0, epsilon = 1e-6);
    }
}
