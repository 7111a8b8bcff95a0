//! Defines physical material properties.

use super::error::{PhysicsError, Result};
use serde::{Deserialize, Serialize};

/// Physical properties shared by every body shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Mass per unit area. Always finite and > 0.
    pub density: f64,
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
}

impl Material {
    /// Creates a validated material.
    ///
    /// Restitution is clamped into [0, 1]; density must be finite and
    /// positive.
    pub fn new(density: f64, restitution: f64) -> Result<Self> {
        if !(density.is_finite() && density > 0.0) {
            return Err(PhysicsError::InvalidDensity(density));
        }
        if restitution.is_nan() {
            return Err(PhysicsError::InvalidRestitution(restitution));
        }
        Ok(Material {
            density,
            restitution: restitution.clamp(0.0, 1.0),
        })
    }

    /// Restitution used when two materials collide.
    pub fn combined_restitution(&self, other: &Material) -> f64 {
        self.restitution.min(other.restitution)
    }
}

impl Default for Material {
    /// Unit density with a little bounce.
    fn default() -> Self {
        Material {
            density: 1.0,
            restitution: 0.2,
        }
    }
}
