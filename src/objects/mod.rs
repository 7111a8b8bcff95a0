pub mod rigid_body;
pub mod state;

pub use rigid_body::RigidBody;
pub use state::BodyState;

use serde::{Deserialize, Serialize};

/// Stable, non-owning reference to a body slot in a `PhysicsWorld`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct BodyHandle(pub usize);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}
