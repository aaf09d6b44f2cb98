//! A small 2D rigid-body physics core.
//!
//! Circles and boxes are integrated under gravity, pruned with bounding boxes,
//! tested with the separating axis theorem and resolved by a sequential
//! impulse solver with restitution, rotation and Coulomb friction.
//!
//! ```
//! use rigid2d::{PhysicsWorld, RigidBody, Vec2};
//!
//! let mut world = PhysicsWorld::new();
//! let ground = RigidBody::new_box(20.0, 1.0, Vec2::new(0.0, -5.0), 1.0, true, 0.5)?;
//! let ball = RigidBody::new_circle(0.5, Vec2::new(0.0, 2.0), 1.0, false, 0.6)?;
//! world.add_body(ground);
//! let ball = world.add_body(ball);
//!
//! for _ in 0..60 {
//!     world.step(1.0 / 60.0, 8);
//! }
//! assert!(world.get_body(ball).unwrap().position().y < 2.0);
//! # Ok::<(), rigid2d::BodyError>(())
//! ```

pub mod collision;
pub mod common;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{CollisionManifold, ContactPoints, Penetration, AABB};
pub use common::{Material, WorldConfig};
pub use error::BodyError;
pub use math::vec2::Vec2;
pub use objects::rigid_body::RigidBody;
pub use shapes::{box_shape::BoxShape, circle::Circle, Shape, ShapeKind};
pub use world::PhysicsWorld;
