use super::vec2::Vec2;

/// Rigid transform with the rotation's cosine/sine evaluated once.
///
/// Geometry rebuilds transform every vertex of a body with the same
/// rotation, so the trig is hoisted out of the per-vertex loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    position: Vec2,
    rotation: f64, // Angle in radians
    cos: f64,
    sin: f64,
}

impl Transform {
    /// Creates a new transform.
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self {
            position,
            rotation,
            cos: rotation.cos(),
            sin: rotation.sin(),
        }
    }

    /// Creates an identity transform (no translation, no rotation).
    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotates a local direction without translating it.
    pub fn rotate(&self, v: Vec2) -> Vec2 {
        v.rotate_cs(self.cos, self.sin)
    }

    /// Applies the transform (rotation then translation) to a point.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        self.rotate(point) + self.position
    }

    /// Maps a world point back into local space.
    pub fn apply_inverse(&self, point: Vec2) -> Vec2 {
        // cos(-a) = cos(a), sin(-a) = -sin(a)
        (point - self.position).rotate_cs(self.cos, -self.sin)
    }

    /// Unit vector along the transformed local x axis.
    pub fn axis_x(&self) -> Vec2 {
        Vec2::new(self.cos, self.sin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_transform_identity() {
        let t = Transform::identity();
        let p = Vec2::new(5.0, -3.0);
        let tp = t.apply(p);
        assert!((tp.x - p.x).abs() < EPSILON);
        assert!((tp.y - p.y).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_combined() {
        // Rotate (1,0) by 90 degrees -> (0,1), then translate by (10,5)
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 2.0);
        let tp = t.apply(Vec2::new(1.0, 0.0));
        assert!((tp.x - 10.0).abs() < EPSILON);
        assert!((tp.y - 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_inverse_roundtrip() {
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 4.0);
        let p_local = Vec2::new(1.0, 1.0);
        let back = t.apply_inverse(t.apply(p_local));
        assert!((back.x - p_local.x).abs() < EPSILON);
        assert!((back.y - p_local.y).abs() < EPSILON);
    }

    #[test]
    fn test_transform_axis_x() {
        let t = Transform::new(Vec2::ZERO, PI / 2.0);
        let axis = t.axis_x();
        assert!(axis.x.abs() < EPSILON);
        assert!((axis.y - 1.0).abs() < EPSILON);
    }
}
