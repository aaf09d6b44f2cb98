pub mod physics_world;
pub mod solver;

pub use physics_world::PhysicsWorld;
