pub mod transform;
pub mod vec2;

pub use transform::Transform;
pub use vec2::{nearly_equal, Vec2};
