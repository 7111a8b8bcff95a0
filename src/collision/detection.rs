use super::manifold::{CollisionManifold, MAX_CONTACTS};
use crate::math::vec2::Vec2;
use crate::shapes::{polygon, Segment};

// Distances closer than this are treated as the same contact.
const CONTACT_TOLERANCE: f64 = 1e-6;

/// A closed 1-D interval, the projection of a shape onto an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Creates an interval, reordering the bounds if needed.
    pub fn new(a: f64, b: f64) -> Self {
        Interval {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// How far the two intervals overlap. Negative when they are apart.
    pub fn overlap(&self, other: &Interval) -> f64 {
        (self.max - other.min).min(other.max - self.min)
    }
}

/// True unless one interval starts past the other's end. Touching counts.
pub fn overlaps(a: Interval, b: Interval) -> bool {
    !(a.min > b.max || b.min > a.max)
}

/// Projects a vertex loop onto `axis`.
pub fn project(vertices: &[Vec2], axis: Vec2) -> Interval {
    let mut min_proj = f64::INFINITY;
    let mut max_proj = f64::NEG_INFINITY;
    for v in vertices {
        let projection = v.dot(axis);
        min_proj = min_proj.min(projection);
        max_proj = max_proj.max(projection);
    }
    Interval {
        min: min_proj,
        max: max_proj,
    }
}

fn project_circle(center: Vec2, radius: f64, axis: Vec2) -> Interval {
    let center_proj = center.dot(axis);
    Interval::new(center_proj - radius, center_proj + radius)
}

/// Circle-circle test.
///
/// Intersecting only when the center distance is strictly less than the
/// combined radius. The normal points from A to B; concentric circles
/// fall back to (0, 1).
pub fn intersects_circles(center_a: Vec2, radius_a: f64, center_b: Vec2, radius_b: f64) -> CollisionManifold {
    let dist_vec = center_b - center_a;
    let distance = dist_vec.magnitude();
    let radii_sum = radius_a + radius_b;

    if !(distance < radii_sum) {
        return CollisionManifold::NONE;
    }

    let normal = if distance > 1e-10 {
        dist_vec / distance
    } else {
        Vec2::UP
    };
    CollisionManifold::hit(normal, radii_sum - distance)
}

/// Circle against a convex vertex loop.
///
/// Axes are the polygon's edge normals plus the axis from the circle
/// center to the nearest vertex. The normal points from the circle
/// towards the polygon.
pub fn intersects_circle_polygon(center: Vec2, radius: f64, vertices: &[Vec2]) -> CollisionManifold {
    if vertices.is_empty() {
        return CollisionManifold::NONE;
    }

    let mut axes = polygon::edge_normals(vertices);

    let closest_vertex = vertices
        .iter()
        .copied()
        .fold((Vec2::ZERO, f64::INFINITY), |best, v| {
            let dist_sq = v.distance_squared(center);
            if dist_sq < best.1 {
                (v, dist_sq)
            } else {
                best
            }
        })
        .0;
    axes.push((closest_vertex - center).normalize());

    let mut min_overlap = f64::INFINITY;
    let mut mtv_axis = Vec2::ZERO;

    for axis in axes {
        // Zero-length edges normalize to zero
        if axis.magnitude_squared() < 1e-10 {
            continue;
        }

        let circle_interval = project_circle(center, radius, axis);
        let polygon_interval = project(vertices, axis);
        if !overlaps(circle_interval, polygon_interval) {
            return CollisionManifold::NONE;
        }

        let overlap = circle_interval.overlap(&polygon_interval);
        if overlap < min_overlap {
            min_overlap = overlap;
            mtv_axis = axis;
        }
    }

    if !min_overlap.is_finite() {
        return CollisionManifold::NONE;
    }

    let to_polygon = polygon::vertex_average(vertices) - center;
    let normal = if to_polygon.dot(mtv_axis) < 0.0 { -mtv_axis } else { mtv_axis };
    CollisionManifold::hit(normal, min_overlap)
}

/// Tests every edge normal of `reference` as a separating axis.
/// Returns the minimum overlap and its axis, or `None` if an axis separates.
fn sat_test_axes(reference: &[Vec2], other: &[Vec2]) -> Option<(f64, Vec2)> {
    let mut min_depth = f64::INFINITY;
    let mut best_axis = Vec2::ZERO;

    for axis in polygon::edge_normals(reference) {
        if axis.magnitude_squared() < 1e-10 {
            continue;
        }

        let interval_a = project(reference, axis);
        let interval_b = project(other, axis);
        if !overlaps(interval_a, interval_b) {
            return None;
        }

        let depth = interval_a.overlap(&interval_b);
        if depth < min_depth {
            min_depth = depth;
            best_axis = axis;
        }
    }

    Some((min_depth, best_axis))
}

/// Polygon-polygon SAT over both shapes' edge normals.
///
/// The axis of least overlap becomes the normal (oriented A to B) and
/// the overlap becomes the depth.
pub fn intersects_polygons(vertices_a: &[Vec2], vertices_b: &[Vec2]) -> CollisionManifold {
    if vertices_a.len() < 3 || vertices_b.len() < 3 {
        return CollisionManifold::NONE;
    }

    let (depth_a, axis_a) = match sat_test_axes(vertices_a, vertices_b) {
        Some(found) => found,
        None => return CollisionManifold::NONE,
    };
    let (depth_b, axis_b) = match sat_test_axes(vertices_b, vertices_a) {
        Some(found) => found,
        None => return CollisionManifold::NONE,
    };

    let (depth, axis) = if depth_b < depth_a { (depth_b, axis_b) } else { (depth_a, axis_a) };
    if !depth.is_finite() {
        return CollisionManifold::NONE;
    }

    let ab = polygon::vertex_average(vertices_b) - polygon::vertex_average(vertices_a);
    let normal = if ab.dot(axis) < 0.0 { -axis } else { axis };
    CollisionManifold::hit(normal, depth)
}

/// The four corners of a thick segment, counter-clockwise.
pub fn segment_hull(a: Vec2, b: Vec2, half_thickness: f64) -> [Vec2; 4] {
    let offset = (b - a).normalize().perpendicular() * half_thickness;
    [a - offset, b - offset, b + offset, a + offset]
}

/// Point on the polygon boundary closest to `point`.
pub fn closest_point_on_polygon(vertices: &[Vec2], point: Vec2) -> Vec2 {
    let n = vertices.len();
    let mut best = point;
    let mut best_dist_sq = f64::INFINITY;
    for i in 0..n {
        let (candidate, _) = Segment::new(vertices[i], vertices[(i + 1) % n]).closest_point(point);
        let dist_sq = candidate.distance_squared(point);
        if dist_sq < best_dist_sq {
            best_dist_sq = dist_sq;
            best = candidate;
        }
    }
    best
}

/// Up to two contact points between two overlapping polygons.
///
/// Picks the vertices (of either polygon) closest to the other polygon's
/// edges; a second point is kept when it ties with the first.
pub fn polygon_contact_points(vertices_a: &[Vec2], vertices_b: &[Vec2]) -> ([Vec2; MAX_CONTACTS], usize) {
    let mut contacts = [Vec2::ZERO; MAX_CONTACTS];
    let mut count = 0;
    let mut min_dist_sq = f64::INFINITY;

    for (points, edges) in [(vertices_a, vertices_b), (vertices_b, vertices_a)] {
        let n = edges.len();
        for &p in points {
            for i in 0..n {
                let (cp, _) = Segment::new(edges[i], edges[(i + 1) % n]).closest_point(p);
                let dist_sq = cp.distance_squared(p);

                if (dist_sq - min_dist_sq).abs() < CONTACT_TOLERANCE {
                    if count == 1 && p.distance_squared(contacts[0]) > CONTACT_TOLERANCE {
                        contacts[1] = p;
                        count = 2;
                    }
                } else if dist_sq < min_dist_sq {
                    min_dist_sq = dist_sq;
                    contacts[0] = p;
                    count = 1;
                }
            }
        }
    }

    (contacts, count)
}
