//! Error types for physics_core.

use crate::objects::BodyHandle;
use crate::shapes::ShapeKind;
use thiserror::Error;

/// Errors raised when building or reconfiguring bodies and worlds.
///
/// Nothing on the per-tick path (`RigidBody::step`, the SAT routines,
/// `PhysicsWorld::step`) produces these.
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// A size parameter was zero, negative or not finite.
    #[error("invalid {name}: {value} (must be finite and > 0)")]
    InvalidDimension {
        /// Parameter name (`radius`, `width`, `height`).
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Density was zero, negative or not finite.
    #[error("invalid density: {0} (must be finite and > 0)")]
    InvalidDensity(f64),

    /// Restitution was NaN.
    #[error("invalid restitution: {0}")]
    InvalidRestitution(f64),

    /// A position or rotation was NaN or infinite.
    #[error("non-finite {name}: {value}")]
    NonFiniteState {
        /// Field name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Local vertex list does not match the shape's fixed arity.
    #[error("{shape} expects {expected} local vertices, got {got}")]
    VertexCountMismatch {
        /// Shape of the body being updated.
        shape: ShapeKind,
        /// Arity of the shape.
        expected: usize,
        /// Number of vertices supplied.
        got: usize,
    },

    /// Operation is not defined for this shape.
    #[error("{operation} is not supported for {shape} bodies")]
    UnsupportedShape {
        /// Operation name.
        operation: &'static str,
        /// Shape of the body.
        shape: ShapeKind,
    },

    /// Handle does not refer to a live body.
    #[error("unknown body {0:?}")]
    UnknownBody(BodyHandle),

    /// Configuration value out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A config or body snapshot could not be (de)serialized.
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for fallible physics operations.
pub type Result<T> = std::result::Result<T, PhysicsError>;

/// Checks that a size parameter is finite and strictly positive.
pub(crate) fn check_dimension(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidDimension { name, value })
    }
}

/// Checks that a state value (coordinate, angle) is finite.
pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PhysicsError::NonFiniteState { name, value })
    }
}
