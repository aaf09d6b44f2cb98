use std::cell::OnceCell;

use tracing::debug;

use crate::collision::AABB;
use crate::common::config::{MAX_BODY_SIZE, MAX_DENSITY, MIN_BODY_SIZE, MIN_DENSITY};
use crate::common::Material;
use crate::error::{BodyError, Result};
use crate::math::{Transform, Vec2};
use crate::shapes::{BoxShape, Circle, Shape, ShapeKind};

/// A circle or box with its kinematic state, mass properties and material.
///
/// World-space vertices and the bounding box are derived lazily: every
/// mutator of position or rotation empties the caches, and the next read
/// recomputes them.
#[derive(Debug, Clone)]
pub struct RigidBody {
    // Geometry
    shape: Shape,
    /// Physical material properties
    pub material: Material,

    // Primary state
    position: Vec2,
    rotation: f64, // Radians
    pub linear_velocity: Vec2,
    pub angular_velocity: f64, // Radians per second

    // Force accumulated for the next integration, cleared afterwards.
    force: Vec2,

    // Physical properties
    density: f64,
    area: f64,
    mass: f64,
    inv_mass: f64, // 0.0 for static
    inertia: f64,
    inv_inertia: f64, // 0.0 for static
    is_static: bool,

    // Derived geometry. An empty cell means dirty.
    transformed_vertices: OnceCell<Vec<Vec2>>,
    aabb: OnceCell<AABB>,
}

impl RigidBody {
    /// Creates a circle body centred at `position`.
    ///
    /// Fails if the area `πr²` or the density is outside the simulation policy.
    /// Restitution is clamped to [0, 1].
    pub fn new_circle(
        radius: f64,
        position: Vec2,
        density: f64,
        is_static: bool,
        restitution: f64,
    ) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(reject(BodyError::InvalidDimensions { kind: ShapeKind::Circle }));
        }
        let circle = Circle::new(radius);
        Self::from_shape(Shape::Circle(circle), position, density, is_static, restitution)
    }

    /// Creates an axis-oriented box body centred at `position`.
    ///
    /// Fails if the area `w·h` or the density is outside the simulation policy.
    /// Restitution is clamped to [0, 1].
    pub fn new_box(
        width: f64,
        height: f64,
        position: Vec2,
        density: f64,
        is_static: bool,
        restitution: f64,
    ) -> Result<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(reject(BodyError::InvalidDimensions { kind: ShapeKind::Box }));
        }
        let rect = BoxShape::new(width, height);
        Self::from_shape(Shape::Box(rect), position, density, is_static, restitution)
    }

    fn from_shape(
        shape: Shape,
        position: Vec2,
        density: f64,
        is_static: bool,
        restitution: f64,
    ) -> Result<Self> {
        let kind = shape.kind();
        let area = shape.area();

        if area < MIN_BODY_SIZE {
            return Err(reject(BodyError::AreaTooSmall { kind, area, min: MIN_BODY_SIZE }));
        }
        if area > MAX_BODY_SIZE {
            return Err(reject(BodyError::AreaTooLarge { kind, area, max: MAX_BODY_SIZE }));
        }
        if density.is_nan() || density < MIN_DENSITY {
            return Err(reject(BodyError::DensityTooSmall { kind, density, min: MIN_DENSITY }));
        }
        if density > MAX_DENSITY {
            return Err(reject(BodyError::DensityTooLarge { kind, density, max: MAX_DENSITY }));
        }

        let (mass, inertia) = if is_static {
            (0.0, 0.0)
        } else {
            let mass = area * density;
            (mass, shape.inertia(mass))
        };
        let inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        let inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };

        let material = Material {
            restitution: restitution.clamp(0.0, 1.0),
            ..Material::default()
        };

        Ok(Self {
            shape,
            material,
            position,
            rotation: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            density,
            area,
            mass,
            inv_mass,
            inertia,
            inv_inertia,
            is_static,
            transformed_vertices: OnceCell::new(),
            aabb: OnceCell::new(),
        })
    }

    /// Replaces the friction coefficients, keeping restitution.
    #[must_use]
    pub fn with_friction(mut self, static_friction: f64, dynamic_friction: f64) -> Self {
        self.material = Material::new(self.material.restitution, static_friction, dynamic_friction);
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn inv_inertia(&self) -> f64 {
        self.inv_inertia
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Translates the body by `amount`.
    pub fn move_by(&mut self, amount: Vec2) {
        self.position += amount;
        self.invalidate_geometry();
    }

    /// Places the body's centre at `position`.
    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
        self.invalidate_geometry();
    }

    /// Rotates the body by `amount` radians.
    pub fn rotate(&mut self, amount: f64) {
        self.rotation += amount;
        self.invalidate_geometry();
    }

    /// Sets the body's rotation to `angle` radians.
    pub fn rotate_to(&mut self, angle: f64) {
        self.rotation = angle;
        self.invalidate_geometry();
    }

    /// Adds a force at the centre of mass, consumed by the next integration.
    /// Static bodies ignore forces.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.is_static {
            return;
        }
        self.force += force;
    }

    /// Should typically be called after integration in each simulation step.
    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
    }

    fn invalidate_geometry(&mut self) {
        self.transformed_vertices.take();
        self.aabb.take();
    }

    /// World-space corners of a box body; empty for a circle.
    pub fn transformed_vertices(&self) -> &[Vec2] {
        self.transformed_vertices.get_or_init(|| match &self.shape {
            Shape::Box(rect) => {
                let transform = Transform::new(self.position, self.rotation);
                rect.vertices.iter().map(|&v| transform.apply(v)).collect()
            }
            Shape::Circle(_) => Vec::new(),
        })
    }

    /// World-space axis-aligned bounding box.
    pub fn aabb(&self) -> AABB {
        *self.aabb.get_or_init(|| match &self.shape {
            Shape::Circle(circle) => {
                let radius_vec = Vec2::new(circle.radius, circle.radius);
                AABB::new(self.position - radius_vec, self.position + radius_vec)
            }
            // A box always has four corners.
            Shape::Box(_) => AABB::from_points(self.transformed_vertices())
                .unwrap_or_else(|| AABB::new(self.position, self.position)),
        })
    }
}

fn reject(error: BodyError) -> BodyError {
    debug!(%error, "rejected body construction");
    error
}

/// Compares physical state only; the derived-geometry caches are ignored.
impl PartialEq for RigidBody {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && self.material == other.material
            && self.position == other.position
            && self.rotation == other.rotation
            && self.linear_velocity == other.linear_velocity
            && self.angular_velocity == other.angular_velocity
            && self.force == other.force
            && self.density == other.density
            && self.area == other.area
            && self.mass == other.mass
            && self.inv_mass == other.inv_mass
            && self.inertia == other.inertia
            && self.inv_inertia == other.inv_inertia
            && self.is_static == other.is_static
    }
}
