pub mod config;
pub mod material;

pub use config::WorldConfig;
pub use material::Material;
