//! Helpers over convex vertex loops (Box/Polygon layouts and SAT input).

use crate::math::vec2::Vec2;

/// Signed area via the shoelace formula. Positive for counter-clockwise loops.
pub fn signed_area(vertices: &[Vec2]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        area += vertices[i].cross(vertices[(i + 1) % n]);
    }
    area / 2.0
}

/// Area-weighted centroid of the loop.
/// Falls back to the vertex average when the loop is degenerate.
pub fn centroid(vertices: &[Vec2]) -> Vec2 {
    let n = vertices.len();
    if n == 0 {
        return Vec2::ZERO;
    }
    if n < 3 {
        return vertex_average(vertices);
    }

    let mut weighted = Vec2::ZERO;
    let mut signed_area_sum = 0.0;
    let origin = vertices[0];

    // Fan triangulation from the first vertex
    for i in 1..(n - 1) {
        let v2 = vertices[i];
        let v3 = vertices[i + 1];
        let triangle_area = (v2 - origin).cross(v3 - origin) / 2.0;
        signed_area_sum += triangle_area;
        weighted += (origin + v2 + v3) / 3.0 * triangle_area;
    }

    if signed_area_sum.abs() < 1e-10 {
        vertex_average(vertices)
    } else {
        weighted / signed_area_sum
    }
}

/// Arithmetic mean of the vertices.
pub fn vertex_average(vertices: &[Vec2]) -> Vec2 {
    if vertices.is_empty() {
        return Vec2::ZERO;
    }
    let mut sum = Vec2::ZERO;
    for v in vertices {
        sum += *v;
    }
    sum / vertices.len() as f64
}

/// Unit normal of every edge `v[i] -> v[i+1]`.
/// Outward-facing for counter-clockwise loops. Zero-length edges yield a zero vector.
pub fn edge_normals(vertices: &[Vec2]) -> Vec<Vec2> {
    let n = vertices.len();
    let mut normals = Vec::with_capacity(n);
    for i in 0..n {
        let edge = vertices[(i + 1) % n] - vertices[i];
        normals.push(Vec2::new(edge.y, -edge.x).normalize());
    }
    normals
}

/// Largest distance from `center` to any vertex.
pub fn max_distance_from(center: Vec2, vertices: &[Vec2]) -> f64 {
    vertices
        .iter()
        .map(|v| v.distance(center))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    fn unit_square_at(offset: Vec2) -> Vec<Vec2> {
        vec![
            offset + Vec2::new(0.0, 0.0),
            offset + Vec2::new(1.0, 0.0),
            offset + Vec2::new(1.0, 1.0),
            offset + Vec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_signed_area() {
        let square = unit_square_at(Vec2::ZERO);
        assert!((signed_area(&square) - 1.0).abs() < EPSILON);
        let mut clockwise = square.clone();
        clockwise.reverse();
        assert!((signed_area(&clockwise) + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_centroid_square_offset() {
        let offset = Vec2::new(10.0, -5.0);
        let c = centroid(&unit_square_at(offset));
        assert!((c.x - 10.5).abs() < EPSILON);
        assert!((c.y - -4.5).abs() < EPSILON);
    }

    #[test]
    fn test_centroid_triangle() {
        let tri = vec![Vec2::new(0.0, 0.0), Vec2::new(3.0, 0.0), Vec2::new(0.0, 3.0)];
        let c = centroid(&tri);
        assert!((c.x - 1.0).abs() < EPSILON);
        assert!((c.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_centroid_degenerate_uses_average() {
        let collinear = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(5.0, 0.0)];
        let c = centroid(&collinear);
        assert!((c.x - 2.0).abs() < EPSILON);
        assert!(c.y.abs() < EPSILON);
    }

    #[test]
    fn test_edge_normals_point_outward() {
        let square = unit_square_at(Vec2::new(-0.5, -0.5));
        let normals = edge_normals(&square);
        assert_eq!(normals.len(), 4);
        // Bottom edge runs +x, outward normal is -y
        assert!((normals[0].y - -1.0).abs() < EPSILON);
        // Right edge runs +y, outward normal is +x
        assert!((normals[1].x - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_max_distance_from() {
        let square = unit_square_at(Vec2::new(-0.5, -0.5));
        let d = max_distance_from(Vec2::ZERO, &square);
        assert!((d - 0.5f64.sqrt()).abs() < EPSILON);
    }
}
