//! Narrow phase: exact overlap tests between circles and convex polygons.
//!
//! Every routine returns `None` when the shapes are separated (touching counts
//! as separated) or a `Penetration` whose normal points from the first shape
//! towards the second.

use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;
use crate::shapes::Shape;
use super::manifold::Penetration;

/// Candidate axes shorter than this are skipped instead of projected.
const MIN_AXIS_LENGTH_SQ: f64 = 1e-20;

/// Tests two bodies for overlap, dispatching on their shapes.
///
/// Box-then-circle pairs reuse the circle-polygon test with the arguments
/// swapped and the resulting normal negated, so the normal always points from
/// `body_a` towards `body_b`.
pub fn collide(body_a: &RigidBody, body_b: &RigidBody) -> Option<Penetration> {
    match (body_a.shape(), body_b.shape()) {
        (Shape::Circle(circle_a), Shape::Circle(circle_b)) => intersect_circles(
            body_a.position(),
            circle_a.radius,
            body_b.position(),
            circle_b.radius,
        ),
        (Shape::Circle(circle), Shape::Box(_)) => intersect_circle_polygon(
            body_a.position(),
            circle.radius,
            body_b.position(),
            body_b.transformed_vertices(),
        ),
        (Shape::Box(_), Shape::Circle(circle)) => intersect_circle_polygon(
            body_b.position(),
            circle.radius,
            body_a.position(),
            body_a.transformed_vertices(),
        )
        .map(Penetration::flipped),
        (Shape::Box(_), Shape::Box(_)) => intersect_polygons(
            body_a.position(),
            body_a.transformed_vertices(),
            body_b.position(),
            body_b.transformed_vertices(),
        ),
    }
}

/// Checks for overlap between two circles.
///
/// Coincident centres have no defined direction; the normal is then `Vec2::UP`
/// and the depth is the sum of the radii.
pub fn intersect_circles(
    center_a: Vec2,
    radius_a: f64,
    center_b: Vec2,
    radius_b: f64,
) -> Option<Penetration> {
    let distance = center_a.distance(center_b);
    let radii = radius_a + radius_b;

    if distance >= radii {
        return None;
    }

    let normal = if distance > 0.0 {
        (center_b - center_a) * (1.0 / distance)
    } else {
        Vec2::UP
    };

    Some(Penetration {
        normal,
        depth: radii - distance,
    })
}

/// Checks for overlap between a circle and a convex polygon using SAT.
///
/// Tests every edge normal of the polygon plus the axis from the circle centre
/// to the polygon vertex nearest it. The normal points from the circle towards
/// the polygon.
pub fn intersect_circle_polygon(
    circle_center: Vec2,
    circle_radius: f64,
    polygon_center: Vec2,
    vertices: &[Vec2],
) -> Option<Penetration> {
    let mut best = AxisSearch::new();

    for (va, vb) in edges(vertices) {
        let axis = (vb - va).perpendicular().normalize();
        let (min_a, max_a) = project_vertices(vertices, axis);
        let (min_b, max_b) = project_circle(circle_center, circle_radius, axis);
        best.test(axis, (min_a, max_a), (min_b, max_b))?;
    }

    let closest = closest_vertex(circle_center, vertices)?;
    let axis = (closest - circle_center).normalize();
    if axis.magnitude_squared() > MIN_AXIS_LENGTH_SQ {
        let (min_a, max_a) = project_vertices(vertices, axis);
        let (min_b, max_b) = project_circle(circle_center, circle_radius, axis);
        best.test(axis, (min_a, max_a), (min_b, max_b))?;
    }

    best.finish(polygon_center - circle_center)
}

/// Checks for overlap between two convex polygons using SAT over the edge
/// normals of both. The normal points from polygon A towards polygon B.
pub fn intersect_polygons(
    center_a: Vec2,
    vertices_a: &[Vec2],
    center_b: Vec2,
    vertices_b: &[Vec2],
) -> Option<Penetration> {
    let mut best = AxisSearch::new();

    for (va, vb) in edges(vertices_a).chain(edges(vertices_b)) {
        let axis = (vb - va).perpendicular().normalize();
        if axis.magnitude_squared() <= MIN_AXIS_LENGTH_SQ {
            continue;
        }
        let (min_a, max_a) = project_vertices(vertices_a, axis);
        let (min_b, max_b) = project_vertices(vertices_b, axis);
        best.test(axis, (min_a, max_a), (min_b, max_b))?;
    }

    best.finish(center_b - center_a)
}

/// Running minimum over the candidate separating axes.
struct AxisSearch {
    normal: Vec2,
    depth: f64,
}

impl AxisSearch {
    fn new() -> Self {
        AxisSearch {
            normal: Vec2::ZERO,
            depth: f64::MAX,
        }
    }

    /// Returns `None` when the projections do not overlap, proving separation.
    /// On ties the earlier axis is kept.
    fn test(
        &mut self,
        axis: Vec2,
        (min_a, max_a): (f64, f64),
        (min_b, max_b): (f64, f64),
    ) -> Option<()> {
        if min_a >= max_b || min_b >= max_a {
            return None;
        }

        let axis_depth = (max_b - min_a).min(max_a - min_b);
        if axis_depth < self.depth {
            self.depth = axis_depth;
            self.normal = axis;
        }
        Some(())
    }

    /// Orients the winning axis along `direction` (centre of A to centre of B).
    fn finish(self, direction: Vec2) -> Option<Penetration> {
        if self.depth == f64::MAX {
            return None;
        }
        let normal = if direction.dot(self.normal) < 0.0 {
            -self.normal
        } else {
            self.normal
        };
        Some(Penetration {
            normal,
            depth: self.depth,
        })
    }
}

/// Consecutive vertex pairs, closing the loop back to the first vertex.
pub(crate) fn edges(vertices: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

/// Projects a vertex set onto an axis and returns the min/max interval.
fn project_vertices(vertices: &[Vec2], axis: Vec2) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for v in vertices {
        let projection = v.dot(axis);
        min = min.min(projection);
        max = max.max(projection);
    }
    (min, max)
}

/// A circle projects onto a unit axis as a segment of length 2r around its centre.
fn project_circle(center: Vec2, radius: f64, axis: Vec2) -> (f64, f64) {
    let offset = axis.normalize() * radius;
    let p1 = (center + offset).dot(axis);
    let p2 = (center - offset).dot(axis);
    if p1 < p2 {
        (p1, p2)
    } else {
        (p2, p1)
    }
}

/// Vertex nearest to `point`; the first one wins on ties.
fn closest_vertex(point: Vec2, vertices: &[Vec2]) -> Option<Vec2> {
    let mut closest = None;
    let mut min_distance = f64::MAX;
    for &v in vertices {
        let distance = v.distance(point);
        if distance < min_distance {
            min_distance = distance;
            closest = Some(v);
        }
    }
    closest
}
