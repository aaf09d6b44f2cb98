use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Advances a body by `dt` using semi-implicit Euler.
///
/// Velocity is updated first from gravity plus accumulated force, then the
/// new velocity moves the body. Static bodies are left untouched.
pub fn integrate(body: &mut RigidBody, gravity: Vec2, dt: f64) {
    if body.is_static() {
        return;
    }

    // --- Linear Motion --- //
    let acceleration = gravity + body.force() * body.inv_mass();
    body.linear_velocity += acceleration * dt;
    body.move_by(body.linear_velocity * dt);

    // --- Angular Motion --- //
    body.rotate(body.angular_velocity * dt);

    body.clear_accumulators();
}
