pub mod aabb;
pub mod contacts;
pub mod detection;
pub mod manifold;

// Re-export key types
pub use aabb::AABB;
pub use contacts::{find_contact_points, point_segment_distance};
pub use detection::collide;
pub use manifold::{CollisionManifold, ContactPoints, Penetration};
