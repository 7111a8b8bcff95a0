//! World configuration.
//!
//! Owned by the host and usually loaded alongside its own settings; the
//! JSON helpers exist so it can be stored next to a save file.

use super::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// Tunables for a `PhysicsWorld`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Acceleration applied to every dynamic body (positive y is down).
    pub gravity: Vec2,
    /// Edge length of a broad-phase grid cell, in world units.
    pub cell_size: f64,
    /// Impulse passes over the tick's contacts.
    pub velocity_iterations: usize,
    /// Fraction of the penetration removed by positional correction (0..=1).
    pub correction_percent: f64,
    /// Penetration allowed before positional correction kicks in.
    pub correction_slop: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 981.0),
            cell_size: 64.0,
            velocity_iterations: 4,
            correction_percent: 0.2,
            correction_slop: 0.01,
        }
    }
}

impl WorldConfig {
    /// Checks every field is in range.
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "cell_size must be finite and > 0, got {}",
                self.cell_size
            )));
        }
        if self.velocity_iterations == 0 {
            return Err(PhysicsError::InvalidConfig(
                "velocity_iterations must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.correction_percent) {
            return Err(PhysicsError::InvalidConfig(format!(
                "correction_percent must be in [0, 1], got {}",
                self.correction_percent
            )));
        }
        if !(self.correction_slop.is_finite() && self.correction_slop >= 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "correction_slop must be finite and >= 0, got {}",
                self.correction_slop
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
