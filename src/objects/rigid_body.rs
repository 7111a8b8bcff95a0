use crate::collision::aabb::AABB;
use crate::collision::detection::segment_hull;
use crate::common::error::{check_finite, PhysicsError, Result};
use crate::common::material::Material;
use crate::integration::integrator::{self, Motion};
use crate::math::{Transform, Vec2};
use crate::shapes::{polygon, Shape, ShapeKind};

/// Safety margin added to the bounding radius after box vertices are recentered.
pub const RECENTER_RADIUS_MARGIN: f64 = 5.0;

/// World-space geometry derived from the body state.
#[derive(Debug, Clone, PartialEq)]
struct GeometryCache {
    vertices: Vec<Vec2>,
    aabb: AABB,
    /// Generation the cache was built against. `None` until the first build.
    built_for: Option<u64>,
    rebuilds: u64,
}

impl GeometryCache {
    fn with_capacity(n: usize) -> Self {
        GeometryCache {
            vertices: Vec::with_capacity(n),
            aabb: AABB::default(),
            built_for: None,
            rebuilds: 0,
        }
    }
}

/// A 2D rigid body with a lazily rebuilt world-space vertex cache.
///
/// Every mutator that can move or reshape the body bumps `generation`.
/// `transformed_vertices` and `aabb` rebuild the cache at most once per
/// generation, so a read always reflects the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    // Geometry
    shape: Shape,
    local_vertices: Vec<Vec2>,
    material: Material,
    is_static: bool,

    // Primary state
    motion: Motion,
    // Accumulated force for the next step
    force: Vec2,

    // Physical properties
    area: f64,
    mass: f64,
    inv_mass: f64, // 0.0 iff static

    // Circle radius, or the broad-phase bounding radius for other shapes
    radius: f64,
    radius_margin: f64,

    generation: u64,
    cache: GeometryCache,
}

impl RigidBody {
    /// Builds a body from a shape and material.
    ///
    /// Mass is `area * density`. Static bodies keep their mass for
    /// bookkeeping but get `inv_mass == 0`.
    pub fn from_shape(
        position: Vec2,
        rotation: f64,
        shape: Shape,
        material: Material,
        is_static: bool,
    ) -> Result<Self> {
        check_finite("x", position.x)?;
        check_finite("y", position.y)?;
        check_finite("rotation", rotation)?;
        let shape = shape.validated()?;
        // Re-run the checks in case the material was built field by field
        let material = Material::new(material.density, material.restitution)?;

        let area = shape.area();
        let mass = area * material.density;
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidDimension { name: "mass", value: mass });
        }
        let inv_mass = if is_static { 0.0 } else { 1.0 / mass };
        let local_vertices = shape.local_vertices();

        Ok(Self {
            shape,
            cache: GeometryCache::with_capacity(local_vertices.len()),
            local_vertices,
            material,
            is_static,
            motion: Motion {
                position,
                rotation,
                ..Motion::default()
            },
            force: Vec2::ZERO,
            area,
            mass,
            inv_mass,
            radius: shape.bounding_radius(),
            radius_margin: 0.0,
            generation: 0,
        })
    }

    pub fn new_circle(
        position: Vec2,
        rotation: f64,
        radius: f64,
        density: f64,
        is_static: bool,
        restitution: f64,
    ) -> Result<Self> {
        let material = Material::new(density, restitution)?;
        Self::from_shape(position, rotation, Shape::circle(radius)?, material, is_static)
    }

    pub fn new_box(
        position: Vec2,
        rotation: f64,
        width: f64,
        height: f64,
        density: f64,
        is_static: bool,
        restitution: f64,
    ) -> Result<Self> {
        let material = Material::new(density, restitution)?;
        Self::from_shape(position, rotation, Shape::rectangle(width, height)?, material, is_static)
    }

    /// A segment of length `width` and thickness `height`.
    pub fn new_line(
        position: Vec2,
        rotation: f64,
        width: f64,
        height: f64,
        density: f64,
        is_static: bool,
        restitution: f64,
    ) -> Result<Self> {
        let material = Material::new(density, restitution)?;
        Self::from_shape(position, rotation, Shape::line(width, height)?, material, is_static)
    }

    /// Polygon bodies currently share the four-corner box layout.
    pub fn new_polygon(
        position: Vec2,
        rotation: f64,
        width: f64,
        height: f64,
        density: f64,
        is_static: bool,
        restitution: f64,
    ) -> Result<Self> {
        let material = Material::new(density, restitution)?;
        Self::from_shape(position, rotation, Shape::polygon(width, height)?, material, is_static)
    }

    // --- Accessors ---

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn position(&self) -> Vec2 {
        self.motion.position
    }

    pub fn rotation(&self) -> f64 {
        self.motion.rotation
    }

    /// Local-to-world transform for the current position and rotation.
    pub fn transform(&self) -> Transform {
        Transform::new(self.motion.position, self.motion.rotation)
    }

    pub fn linear_velocity(&self) -> Vec2 {
        self.motion.linear_velocity
    }

    pub fn angular_velocity(&self) -> f64 {
        self.motion.angular_velocity
    }

    /// Force accumulated since the last `step`.
    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn density(&self) -> f64 {
        self.material.density
    }

    pub fn restitution(&self) -> f64 {
        self.material.restitution
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Circle radius for circles; for other shapes the bounding radius
    /// used for broad-phase sizing.
    pub fn radius(&self) -> f64 {
        match self.shape {
            Shape::Circle { radius } => radius,
            _ => self.radius,
        }
    }

    /// Extra distance folded into the bounding radius of recentered boxes.
    pub fn radius_margin(&self) -> f64 {
        self.radius_margin
    }

    pub fn width(&self) -> f64 {
        self.shape.size().0
    }

    pub fn height(&self) -> f64 {
        self.shape.size().1
    }

    pub fn local_vertices(&self) -> &[Vec2] {
        &self.local_vertices
    }

    /// Current geometry generation. Bumped by every geometry mutator.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// How many times the world-space geometry has been rebuilt.
    pub fn rebuild_count(&self) -> u64 {
        self.cache.rebuilds
    }

    /// True when the next geometry read will rebuild the cache.
    pub fn is_geometry_stale(&self) -> bool {
        self.cache.built_for != Some(self.generation)
    }

    /// True when every state scalar is a finite number.
    pub fn is_finite(&self) -> bool {
        self.motion.position.is_finite()
            && self.motion.linear_velocity.is_finite()
            && self.motion.rotation.is_finite()
            && self.motion.angular_velocity.is_finite()
            && self.force.is_finite()
    }

    // --- Cached geometry ---

    /// World-space vertices, rebuilt only if the body changed since the last read.
    pub fn transformed_vertices(&mut self) -> &[Vec2] {
        self.refresh_geometry();
        &self.cache.vertices
    }

    /// World-space bounding box, rebuilt only if the body changed since the last read.
    pub fn aabb(&mut self) -> AABB {
        self.refresh_geometry();
        self.cache.aabb
    }

    fn refresh_geometry(&mut self) {
        if self.is_geometry_stale() {
            self.rebuild_geometry();
        }
    }

    fn rebuild_geometry(&mut self) {
        let transform = self.transform();

        self.cache.vertices.clear();
        self.cache
            .vertices
            .extend(self.local_vertices.iter().map(|v| transform.apply(*v)));

        let vertices = &self.cache.vertices;
        let fallback = AABB::around(self.motion.position, 0.0);
        let aabb = match self.shape {
            Shape::Circle { radius } => {
                let center = vertices.first().copied().unwrap_or(self.motion.position);
                AABB::around(center, radius)
            }
            Shape::Line { height, .. } => match vertices.as_slice() {
                // Same thick hull the narrow phase tests against
                [start, end] => {
                    AABB::from_points(&segment_hull(*start, *end, height / 2.0)).unwrap_or(fallback)
                }
                _ => fallback,
            },
            Shape::Box { .. } | Shape::Polygon { .. } => {
                self.radius =
                    polygon::max_distance_from(self.motion.position, vertices) + self.radius_margin;
                AABB::from_points(vertices).unwrap_or(fallback)
            }
        };

        self.cache.aabb = aabb;
        self.cache.built_for = Some(self.generation);
        self.cache.rebuilds += 1;
    }

    fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    // --- Mutators ---

    /// Forces a geometry rebuild on the next read.
    pub fn mark_dirty(&mut self) {
        self.touch();
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.motion.position = position;
        self.touch();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.motion.position += delta;
        self.touch();
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.motion.rotation = rotation;
        self.touch();
    }

    pub fn set_linear_velocity(&mut self, velocity: Vec2) {
        self.motion.linear_velocity = velocity;
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.motion.angular_velocity = angular_velocity;
    }

    /// Accumulates a force applied at the center. Consumed by the next `step`.
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    pub fn clear_force(&mut self) {
        self.force = Vec2::ZERO;
    }

    /// Instantaneous change of momentum. No effect on static bodies.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.motion.linear_velocity += impulse * self.inv_mass;
    }

    /// Changes the shape's dimensions, keeping its kind.
    ///
    /// Area, mass and local vertices are re-derived. Circles take `width`
    /// as the new diameter.
    pub fn set_dimensions(&mut self, width: f64, height: f64) -> Result<()> {
        let shape = self.shape.resized(width, height)?;
        let area = shape.area();
        let mass = area * self.material.density;
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidDimension { name: "mass", value: mass });
        }

        self.shape = shape;
        self.area = area;
        self.mass = mass;
        self.inv_mass = if self.is_static { 0.0 } else { 1.0 / mass };
        self.local_vertices = shape.local_vertices();
        self.radius = shape.bounding_radius();
        self.radius_margin = 0.0;
        self.touch();
        Ok(())
    }

    /// Replaces the local vertex set.
    ///
    /// The count must match the shape's arity (1 circle, 2 line, 4 box or
    /// polygon). A rejected update logs a warning and leaves the body
    /// untouched. On success the world geometry is rebuilt immediately.
    pub fn set_local_vertices(&mut self, vertices: Vec<Vec2>) -> Result<()> {
        let shape = self.kind();
        let expected = self.shape.arity();
        if vertices.len() != expected {
            log::warn!(
                "rejected local vertex update for {} body: expected {} vertices, got {}",
                shape,
                expected,
                vertices.len()
            );
            return Err(PhysicsError::VertexCountMismatch {
                shape,
                expected,
                got: vertices.len(),
            });
        }
        if let Some(bad) = vertices.iter().find(|v| !v.is_finite()) {
            log::warn!("rejected local vertex update for {} body: non-finite vertex {:?}", shape, bad);
            let value = if bad.x.is_finite() { bad.y } else { bad.x };
            return Err(PhysicsError::NonFiniteState { name: "vertex", value });
        }

        self.cache.vertices = Vec::with_capacity(vertices.len());
        self.local_vertices = vertices;
        self.touch();
        self.rebuild_geometry();
        Ok(())
    }

    /// Reapplies a saved bounding-radius margin to a Box/Polygon.
    pub(crate) fn restore_radius_margin(&mut self, margin: f64) -> Result<()> {
        match self.shape {
            Shape::Box { .. } | Shape::Polygon { .. } => {}
            _ => {
                return Err(PhysicsError::UnsupportedShape {
                    operation: "restore_radius_margin",
                    shape: self.kind(),
                })
            }
        }
        if !margin.is_finite() || margin < 0.0 {
            return Err(PhysicsError::InvalidDimension {
                name: "radius_margin",
                value: margin,
            });
        }
        self.radius_margin = margin;
        self.radius = polygon::max_distance_from(Vec2::ZERO, &self.local_vertices) + margin;
        self.touch();
        Ok(())
    }

    /// Recenters the local vertices of a Box/Polygon on their centroid.
    ///
    /// The position moves by the same offset, so the world geometry stays
    /// put. The bounding radius gets `RECENTER_RADIUS_MARGIN` added from
    /// now on. Returns the local offset that was removed.
    pub fn recalculate_box_centroid_and_radius(&mut self) -> Result<Vec2> {
        match self.shape {
            Shape::Box { .. } | Shape::Polygon { .. } => {}
            _ => {
                return Err(PhysicsError::UnsupportedShape {
                    operation: "recalculate_box_centroid_and_radius",
                    shape: self.kind(),
                })
            }
        }

        let centroid = polygon::centroid(&self.local_vertices);
        for v in self.local_vertices.iter_mut() {
            *v -= centroid;
        }
        self.motion.position += centroid.rotate(self.motion.rotation);
        self.radius_margin = RECENTER_RADIUS_MARGIN;
        self.radius = polygon::max_distance_from(Vec2::ZERO, &self.local_vertices) + self.radius_margin;
        self.touch();
        Ok(centroid)
    }

    // --- Simulation ---

    /// Advances the body by `dt` under `gravity`.
    ///
    /// Static bodies and non-positive or non-finite `dt` are no-ops.
    /// The force accumulator is cleared afterwards.
    pub fn step(&mut self, dt: f64, gravity: Vec2) {
        if self.is_static {
            return;
        }
        if !(dt.is_finite() && dt > 0.0) {
            log::debug!("ignoring step with dt = {}", dt);
            return;
        }
        integrator::integrate(&mut self.motion, self.force, self.inv_mass, gravity, dt);
        self.force = Vec2::ZERO;
        self.touch();
    }
}
