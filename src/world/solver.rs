//! Collision response: positional separation and sequential impulses.

use tracing::trace;

use crate::collision::CollisionManifold;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Pushes two overlapping bodies apart along `normal` by `depth`.
///
/// A static body never moves; its partner takes the whole correction.
/// Two dynamic bodies split it evenly.
pub fn separate_bodies(body_a: &mut RigidBody, body_b: &mut RigidBody, normal: Vec2, depth: f64) {
    if body_a.is_static() {
        body_b.move_by(normal * depth);
    } else if body_b.is_static() {
        body_a.move_by(-normal * depth);
    } else {
        body_a.move_by(-normal * (depth / 2.0));
        body_b.move_by(normal * (depth / 2.0));
    }
}

/// Resolves velocities for one manifold with rotation and Coulomb friction.
///
/// All normal impulses are computed from the incoming velocities before any
/// of them is applied; friction then runs on the updated velocities the same
/// way. Each impulse is divided by the contact count.
pub fn resolve_collision(
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    manifold: &CollisionManifold,
) {
    let contacts = manifold.contacts.as_slice();
    if contacts.is_empty() {
        return;
    }

    let normal = manifold.normal;
    let count = contacts.len() as f64;
    let restitution = body_a.material.combined_restitution(&body_b.material);
    let static_friction = body_a.material.combined_static_friction(&body_b.material);
    let dynamic_friction = body_a.material.combined_dynamic_friction(&body_b.material);

    let mut ra_list = [Vec2::ZERO; 2];
    let mut rb_list = [Vec2::ZERO; 2];
    let mut impulses = [Vec2::ZERO; 2];
    let mut j_list = [0.0; 2];

    // --- Normal impulses --- //
    for (i, &contact) in contacts.iter().enumerate() {
        let ra = contact - body_a.position();
        let rb = contact - body_b.position();
        ra_list[i] = ra;
        rb_list[i] = rb;

        let relative_velocity = relative_velocity_at(body_a, body_b, ra, rb);
        let contact_velocity_mag = relative_velocity.dot(normal);

        if contact_velocity_mag > 0.0 {
            trace!(
                a = manifold.body_a_idx,
                b = manifold.body_b_idx,
                contact_velocity_mag,
                "contact already separating"
            );
            continue;
        }

        let denom = effective_mass(body_a, body_b, ra, rb, normal);
        if denom <= 0.0 {
            continue;
        }

        let j = -(1.0 + restitution) * contact_velocity_mag / denom / count;
        j_list[i] = j;
        impulses[i] = normal * j;
    }

    for i in 0..contacts.len() {
        apply_impulse(body_a, body_b, impulses[i], ra_list[i], rb_list[i]);
    }

    // --- Friction impulses --- //
    let mut friction_impulses = [Vec2::ZERO; 2];

    for i in 0..contacts.len() {
        let (ra, rb) = (ra_list[i], rb_list[i]);
        let relative_velocity = relative_velocity_at(body_a, body_b, ra, rb);

        let tangent = relative_velocity - normal * relative_velocity.dot(normal);
        if tangent.nearly_equal(Vec2::ZERO) {
            continue;
        }
        let tangent = tangent.normalize();

        let denom = effective_mass(body_a, body_b, ra, rb, tangent);
        if denom <= 0.0 {
            continue;
        }

        let jt = -relative_velocity.dot(tangent) / denom / count;
        let j = j_list[i];

        // Coulomb's law: stick strictly inside the static cone, otherwise slide.
        friction_impulses[i] = if jt.abs() < j * static_friction {
            tangent * jt
        } else {
            tangent * (-j * dynamic_friction)
        };
    }

    for i in 0..contacts.len() {
        apply_impulse(body_a, body_b, friction_impulses[i], ra_list[i], rb_list[i]);
    }
}

/// Velocity of B relative to A at the contact, including the rotational terms.
fn relative_velocity_at(body_a: &RigidBody, body_b: &RigidBody, ra: Vec2, rb: Vec2) -> Vec2 {
    let velocity_a = body_a.linear_velocity + ra.perpendicular() * body_a.angular_velocity;
    let velocity_b = body_b.linear_velocity + rb.perpendicular() * body_b.angular_velocity;
    velocity_b - velocity_a
}

/// Inverse effective mass of the pair along `direction` at the given lever arms.
fn effective_mass(
    body_a: &RigidBody,
    body_b: &RigidBody,
    ra: Vec2,
    rb: Vec2,
    direction: Vec2,
) -> f64 {
    let ra_perp_dot = ra.perpendicular().dot(direction);
    let rb_perp_dot = rb.perpendicular().dot(direction);
    body_a.inv_mass()
        + body_b.inv_mass()
        + ra_perp_dot * ra_perp_dot * body_a.inv_inertia()
        + rb_perp_dot * rb_perp_dot * body_b.inv_inertia()
}

fn apply_impulse(
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    impulse: Vec2,
    ra: Vec2,
    rb: Vec2,
) {
    body_a.linear_velocity -= impulse * body_a.inv_mass();
    body_a.angular_velocity -= ra.cross(impulse) * body_a.inv_inertia();
    body_b.linear_velocity += impulse * body_b.inv_mass();
    body_b.angular_velocity += rb.cross(impulse) * body_b.inv_inertia();
}
