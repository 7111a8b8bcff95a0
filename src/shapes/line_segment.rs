use crate::math::vec2::Vec2;

/// A world-space segment, used for Line bodies and closest-point queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Returns the direction vector of the segment (from a to b).
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    /// Closest point on the segment to `point`, with its parameter `t` in [0, 1].
    pub fn closest_point(&self, point: Vec2) -> (Vec2, f64) {
        let segment_vec = self.direction();
        let length_sq = segment_vec.magnitude_squared();
        if length_sq < 1e-12 {
            // Treat as a point
            return (self.a, 0.0);
        }
        let t = ((point - self.a).dot(segment_vec) / length_sq).clamp(0.0, 1.0);
        (self.a + segment_vec * t, t)
    }
}
