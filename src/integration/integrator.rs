use crate::math::vec2::Vec2;

/// Kinematic state advanced by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    pub position: Vec2,
    pub rotation: f64, // Radians
    pub linear_velocity: Vec2,
    pub angular_velocity: f64, // Radians per second
}

/// Advances `motion` by `dt` using Semi-Implicit (symplectic) Euler.
///
/// Velocity is updated first and the new velocity moves the position.
/// `inv_mass` must be > 0; static bodies never reach this function.
pub fn integrate(motion: &mut Motion, force: Vec2, inv_mass: f64, gravity: Vec2, dt: f64) {
    // --- Linear Motion --- //
    // a = F/m = F * inv_m
    let linear_acceleration = force * inv_mass;
    // v = v + (g + a) * dt
    motion.linear_velocity += (gravity + linear_acceleration) * dt;
    // p = p + v * dt, using the updated velocity
    motion.position += motion.linear_velocity * dt;

    // --- Angular Motion --- //
    motion.rotation += motion.angular_velocity * dt;
}
