use super::rigid_body::RigidBody;
use crate::common::error::Result;
use crate::common::material::Material;
use crate::math::vec2::Vec2;
use crate::shapes::Shape;
use serde::{Deserialize, Serialize};

/// Serializable snapshot of a body, for save files and network sync.
///
/// `mass` is informational: it is re-derived from shape and density when
/// the body is rebuilt. `radius_margin` is only nonzero for boxes that were
/// recentered and defaults to zero when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Vec2,
    pub linear_velocity: Vec2,
    pub rotation: f64,
    pub angular_velocity: f64,
    pub mass: f64,
    pub restitution: f64,
    pub density: f64,
    pub is_static: bool,
    pub shape: Shape,
    pub local_vertices: Vec<Vec2>,
    #[serde(default)]
    pub radius_margin: f64,
}

impl RigidBody {
    pub fn state(&self) -> BodyState {
        BodyState {
            position: self.position(),
            linear_velocity: self.linear_velocity(),
            rotation: self.rotation(),
            angular_velocity: self.angular_velocity(),
            mass: self.mass(),
            restitution: self.restitution(),
            density: self.density(),
            is_static: self.is_static(),
            shape: *self.shape(),
            local_vertices: self.local_vertices().to_vec(),
            radius_margin: self.radius_margin(),
        }
    }

    /// Rebuilds a body from a stored state, running the same validation
    /// as the factories.
    pub fn from_state(state: &BodyState) -> Result<Self> {
        let material = Material::new(state.density, state.restitution)?;
        let mut body =
            RigidBody::from_shape(state.position, state.rotation, state.shape, material, state.is_static)?;
        if state.local_vertices != body.local_vertices() {
            body.set_local_vertices(state.local_vertices.clone())?;
        }
        if state.radius_margin != 0.0 {
            body.restore_radius_margin(state.radius_margin)?;
        }
        body.set_linear_velocity(state.linear_velocity);
        body.set_angular_velocity(state.angular_velocity);
        Ok(body)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.state())?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let state: BodyState = serde_json::from_str(json)?;
        Self::from_state(&state)
    }
}
