use tracing::{debug, trace, warn};

use crate::collision::{self, CollisionManifold};
use crate::common::config::clamp_iterations;
use crate::common::WorldConfig;
use crate::integration::integrator;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

use super::solver;

/// Owns the bodies and advances them through time.
///
/// Bodies are addressed by insertion index. Removing a body shifts every later
/// index down by one.
#[derive(Debug, Clone, Default)]
pub struct PhysicsWorld {
    bodies: Vec<RigidBody>,
    config: WorldConfig,
    // Scratch buffers, rebuilt every sub-iteration.
    contact_pairs: Vec<(usize, usize)>,
    manifolds: Vec<CollisionManifold>,
    // Contact points of the final sub-iteration of the last step.
    contact_points: Vec<Vec2>,
}

impl PhysicsWorld {
    /// Creates an empty world with earth gravity.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Bodies in insertion order.
    pub fn bodies(&self) -> impl Iterator<Item = &RigidBody> + '_ {
        self.bodies.iter()
    }

    pub fn get_body(&self, index: usize) -> Option<&RigidBody> {
        self.bodies.get(index)
    }

    pub fn get_body_mut(&mut self, index: usize) -> Option<&mut RigidBody> {
        self.bodies.get_mut(index)
    }

    /// Adds a rigid body to the world and returns its index.
    pub fn add_body(&mut self, body: RigidBody) -> usize {
        let index = self.bodies.len();
        self.bodies.push(body);
        index
    }

    /// Removes and returns the body at `index`, or `None` if there is none.
    pub fn remove_body(&mut self, index: usize) -> Option<RigidBody> {
        if index < self.bodies.len() {
            Some(self.bodies.remove(index))
        } else {
            None
        }
    }

    /// Unique contact points resolved in the final sub-iteration of the last
    /// `step`. Empty when recording is disabled.
    pub fn contact_points(&self) -> &[Vec2] {
        &self.contact_points
    }

    /// Advances the simulation by `dt` seconds, split into `iterations`
    /// equal sub-steps (clamped to `[MIN_ITERATIONS, MAX_ITERATIONS]`).
    ///
    /// Each sub-step integrates, runs the broad and narrow phases, then
    /// resolves every manifold in ascending pair order.
    pub fn step(&mut self, dt: f64, iterations: usize) {
        if !dt.is_finite() || dt <= 0.0 {
            warn!(dt, "ignoring step with invalid time step");
            return;
        }

        let sub_iterations = clamp_iterations(iterations);
        if sub_iterations != iterations {
            debug!(requested = iterations, used = sub_iterations, "clamped sub-iteration count");
        }
        let sub_dt = dt / sub_iterations as f64;

        debug!(dt, sub_iterations, bodies = self.bodies.len(), "stepping world");
        self.contact_points.clear();

        for it in 0..sub_iterations {
            self.contact_pairs.clear();
            self.manifolds.clear();

            // 1. Integrate motion
            self.integrate_bodies(sub_dt);

            // 2. Broad phase
            self.broad_phase();

            // 3. Narrow phase, with positional separation
            self.narrow_phase();

            // 4. Resolve velocities
            let record = self.config.record_contact_points && it + 1 == sub_iterations;
            self.resolve_collisions(record);
        }
    }

    fn integrate_bodies(&mut self, dt: f64) {
        let gravity = self.config.gravity;
        for body in self.bodies.iter_mut() {
            integrator::integrate(body, gravity, dt);
        }
    }

    /// Collects index pairs `(i, j)`, `i < j`, whose bounding boxes overlap.
    fn broad_phase(&mut self) {
        for i in 0..self.bodies.len() {
            let body_a = &self.bodies[i];
            let aabb_a = body_a.aabb();

            for j in (i + 1)..self.bodies.len() {
                let body_b = &self.bodies[j];

                if body_a.is_static() && body_b.is_static() {
                    continue;
                }

                if aabb_a.intersects(&body_b.aabb()) {
                    self.contact_pairs.push((i, j));
                }
            }
        }
    }

    fn narrow_phase(&mut self) {
        for k in 0..self.contact_pairs.len() {
            let (i, j) = self.contact_pairs[k];

            let Some(penetration) = collision::collide(&self.bodies[i], &self.bodies[j]) else {
                continue;
            };

            let (body_a, body_b) = pair_mut(&mut self.bodies, i, j);
            solver::separate_bodies(body_a, body_b, penetration.normal, penetration.depth);

            let contacts = collision::find_contact_points(body_a, body_b);
            trace!(
                a = i,
                b = j,
                depth = penetration.depth,
                contacts = contacts.len(),
                "collision manifold"
            );

            self.manifolds.push(CollisionManifold {
                body_a_idx: i,
                body_b_idx: j,
                normal: penetration.normal,
                depth: penetration.depth,
                contacts,
            });
        }
    }

    fn resolve_collisions(&mut self, record: bool) {
        for manifold in &self.manifolds {
            let (body_a, body_b) =
                pair_mut(&mut self.bodies, manifold.body_a_idx, manifold.body_b_idx);
            solver::resolve_collision(body_a, body_b, manifold);

            if record {
                for &point in manifold.contacts.as_slice() {
                    if !self.contact_points.contains(&point) {
                        self.contact_points.push(point);
                    }
                }
            }
        }
    }
}

/// Mutable references to two distinct bodies; requires `i < j`.
fn pair_mut(bodies: &mut [RigidBody], i: usize, j: usize) -> (&mut RigidBody, &mut RigidBody) {
    debug_assert!(i < j, "body pair must be ordered");
    let (left, right) = bodies.split_at_mut(j);
    (&mut left[i], &mut right[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f64 = 1e-9;

    fn ball(radius: f64, x: f64, y: f64) -> RigidBody {
        RigidBody::new_circle(radius, Vec2::new(x, y), 1.0, false, 0.5).unwrap()
    }

    fn zero_gravity_world() -> PhysicsWorld {
        PhysicsWorld::with_config(WorldConfig::zero_gravity())
    }

    #[test]
    fn test_world_new() {
        let world = PhysicsWorld::new();
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.gravity(), Vec2::new(0.0, -9.81));
        assert!(world.contact_points().is_empty());
    }

    #[test]
    fn test_add_get_remove_body() {
        let mut world = PhysicsWorld::new();
        let idx1 = world.add_body(ball(1.0, 0.0, 0.0));
        let idx2 = world.add_body(ball(2.0, 5.0, 0.0));
        let idx3 = world.add_body(ball(3.0, 10.0, 0.0));
        assert_eq!((idx1, idx2, idx3), (0, 1, 2));
        assert_eq!(world.body_count(), 3);

        assert!(world.get_body(3).is_none());
        assert!(world.remove_body(7).is_none());

        let removed = world.remove_body(idx2).unwrap();
        assert_eq!(removed.position(), Vec2::new(5.0, 0.0));
        assert_eq!(world.body_count(), 2);
        // Later bodies shift down.
        assert_eq!(world.get_body(1).unwrap().position(), Vec2::new(10.0, 0.0));

        let positions: Vec<Vec2> = world.bodies().map(|b| b.position()).collect();
        assert_eq!(positions, vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]);
    }

    #[test]
    fn test_get_body_mut() {
        let mut world = PhysicsWorld::new();
        let idx = world.add_body(ball(1.0, 0.0, 0.0));
        world.get_body_mut(idx).unwrap().linear_velocity = Vec2::new(3.0, 0.0);
        assert_eq!(world.get_body(idx).unwrap().linear_velocity, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_set_gravity() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Vec2::new(1.0, 2.0));
        assert_eq!(world.gravity(), Vec2::new(1.0, 2.0));
        assert_eq!(world.config().gravity, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_step_gravity() {
        let mut world = PhysicsWorld::with_config(WorldConfig::with_gravity(Vec2::new(0.0, -10.0)));
        let idx = world.add_body(ball(1.0, 0.0, 0.0));

        world.step(0.1, 1);

        let body = world.get_body(idx).unwrap();
        assert_abs_diff_eq!(body.linear_velocity.x, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(body.linear_velocity.y, -1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(body.position().y, -0.1, epsilon = EPSILON);
    }

    #[test]
    fn test_step_splits_dt_across_iterations() {
        let mut world = PhysicsWorld::with_config(WorldConfig::with_gravity(Vec2::new(0.0, -10.0)));
        let idx = world.add_body(ball(1.0, 0.0, 0.0));

        world.step(0.1, 2);

        let body = world.get_body(idx).unwrap();
        assert_abs_diff_eq!(body.linear_velocity.y, -1.0, epsilon = EPSILON);
        // -0.5 * 0.05 then -1.0 * 0.05
        assert_abs_diff_eq!(body.position().y, -0.075, epsilon = EPSILON);
    }

    #[test]
    fn test_step_clamps_iterations() {
        let mut zero = PhysicsWorld::with_config(WorldConfig::with_gravity(Vec2::new(0.0, -10.0)));
        let mut one = zero.clone();
        zero.add_body(ball(1.0, 0.0, 0.0));
        one.add_body(ball(1.0, 0.0, 0.0));

        zero.step(0.1, 0);
        one.step(0.1, 1);
        assert_eq!(zero.get_body(0), one.get_body(0));

        let mut many = PhysicsWorld::with_config(WorldConfig::with_gravity(Vec2::new(0.0, -10.0)));
        let mut max = many.clone();
        many.add_body(ball(1.0, 0.0, 0.0));
        max.add_body(ball(1.0, 0.0, 0.0));

        many.step(0.1, 10_000);
        max.step(0.1, 128);
        assert_eq!(many.get_body(0), max.get_body(0));
    }

    #[test]
    fn test_step_ignores_invalid_dt() {
        let mut world = PhysicsWorld::new();
        let idx = world.add_body(ball(1.0, 0.0, 0.0));
        let before = world.get_body(idx).unwrap().clone();

        world.step(0.0, 4);
        world.step(-0.1, 4);
        world.step(f64::NAN, 4);
        world.step(f64::INFINITY, 4);

        assert_eq!(world.get_body(idx).unwrap(), &before);
    }

    #[test]
    fn test_step_no_gravity_on_static() {
        let mut world = PhysicsWorld::new();
        let idx = world.add_body(RigidBody::new_circle(1.0, Vec2::ZERO, 1.0, true, 0.5).unwrap());
        let initial_state = world.get_body(idx).unwrap().clone();

        world.step(0.1, 8);
        assert_eq!(world.get_body(idx).unwrap(), &initial_state);
    }

    #[test]
    fn test_dynamic_separation_is_an_even_split() {
        // Not mass-weighted: the heavy body moves as far as the light one.
        let mut world = zero_gravity_world();
        let light = RigidBody::new_circle(1.0, Vec2::ZERO, 0.1, false, 0.5).unwrap();
        let heavy = RigidBody::new_circle(1.0, Vec2::new(1.5, 0.0), 20.0, false, 0.5).unwrap();
        world.add_body(light);
        world.add_body(heavy);

        world.step(0.01, 1);

        assert_abs_diff_eq!(world.get_body(0).unwrap().position().x, -0.25, epsilon = EPSILON);
        assert_abs_diff_eq!(world.get_body(1).unwrap().position().x, 1.75, epsilon = EPSILON);
    }

    #[test]
    fn test_static_pairs_are_never_resolved() {
        let mut world = zero_gravity_world();
        world.add_body(RigidBody::new_box(2.0, 2.0, Vec2::ZERO, 1.0, true, 0.5).unwrap());
        world.add_body(RigidBody::new_box(2.0, 2.0, Vec2::new(1.0, 0.0), 1.0, true, 0.5).unwrap());

        world.step(0.01, 4);

        assert_eq!(world.get_body(0).unwrap().position(), Vec2::ZERO);
        assert_eq!(world.get_body(1).unwrap().position(), Vec2::new(1.0, 0.0));
        assert!(world.contact_points().is_empty());
    }

    #[test]
    fn test_contact_points_recorded() {
        let mut world = zero_gravity_world();
        world.add_body(ball(1.0, 0.0, 0.0));
        world.add_body(ball(1.0, 1.5, 0.0));

        world.step(0.01, 1);

        let points = world.contact_points();
        assert_eq!(points.len(), 1);
        // A's surface after the even split moved A to x = -0.25.
        assert_abs_diff_eq!(points[0].x, 0.75, epsilon = EPSILON);
        assert_abs_diff_eq!(points[0].y, 0.0, epsilon = EPSILON);

        // Cleared on the next step once the bodies no longer touch.
        world.step(0.01, 1);
        assert!(world.contact_points().is_empty());
    }

    #[test]
    fn test_contact_points_not_recorded_when_disabled() {
        let config = WorldConfig {
            record_contact_points: false,
            ..WorldConfig::zero_gravity()
        };
        let mut world = PhysicsWorld::with_config(config);
        world.add_body(ball(1.0, 0.0, 0.0));
        world.add_body(ball(1.0, 1.5, 0.0));

        world.step(0.01, 1);

        assert!(world.contact_points().is_empty());
        assert!(world.get_body(1).unwrap().position().x > 1.5);
    }

    #[test]
    fn test_touching_bodies_are_pruned() {
        let mut world = zero_gravity_world();
        world.add_body(ball(1.0, 0.0, 0.0));
        world.add_body(ball(1.0, 2.0, 0.0));

        world.step(0.01, 1);

        assert_eq!(world.get_body(0).unwrap().position(), Vec2::ZERO);
        assert_eq!(world.get_body(1).unwrap().position(), Vec2::new(2.0, 0.0));
    }
}
