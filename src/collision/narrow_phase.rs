use super::detection::{
    closest_point_on_polygon, intersects_circle_polygon, intersects_circles, intersects_polygons,
    polygon_contact_points, segment_hull,
};
use super::manifold::ContactManifold;
use crate::math::vec2::Vec2;
use crate::objects::{BodyHandle, RigidBody};
use crate::shapes::Shape;

/// Exact shape-pair test run on broad-phase candidates.
pub trait NarrowPhase {
    /// Fills `out` and returns `true` when the bodies intersect. On a miss
    /// `out` is left untouched and `false` is returned, whatever `out` held.
    fn collide(
        &self,
        a: BodyHandle,
        body_a: &mut RigidBody,
        b: BodyHandle,
        body_b: &mut RigidBody,
        out: &mut ContactManifold,
    ) -> bool;
}

/// Separating-axis narrow phase covering every shape pair.
///
/// Lines are tested as their oriented width x thickness rectangle, so the
/// result agrees with their bounding box.
#[derive(Debug, Default, Clone, Copy)]
pub struct SatDetector;

/// World-space collision geometry of a body.
enum Solid {
    Round { center: Vec2, radius: f64 },
    Hull([Vec2; 4]),
}

fn solid_of(body: &mut RigidBody) -> Option<Solid> {
    let shape = *body.shape();
    let vertices = body.transformed_vertices();
    match shape {
        Shape::Circle { radius } => Some(Solid::Round {
            center: *vertices.first()?,
            radius,
        }),
        Shape::Line { height, .. } => match vertices {
            [start, end] => Some(Solid::Hull(segment_hull(*start, *end, height / 2.0))),
            _ => None,
        },
        Shape::Box { .. } | Shape::Polygon { .. } => <[Vec2; 4]>::try_from(vertices).ok().map(Solid::Hull),
    }
}

impl NarrowPhase for SatDetector {
    fn collide(
        &self,
        a: BodyHandle,
        body_a: &mut RigidBody,
        b: BodyHandle,
        body_b: &mut RigidBody,
        out: &mut ContactManifold,
    ) -> bool {
        let (solid_a, solid_b) = match (solid_of(body_a), solid_of(body_b)) {
            (Some(sa), Some(sb)) => (sa, sb),
            _ => return false,
        };

        let hit = match (&solid_a, &solid_b) {
            (
                Solid::Round { center: ca, radius: ra },
                Solid::Round { center: cb, radius: rb },
            ) => {
                let m = intersects_circles(*ca, *ra, *cb, *rb);
                if m.intersection {
                    let contact = *ca + m.normal * *ra;
                    out.initialize(a, b, m.normal, m.depth, &[contact]);
                }
                m.intersection
            }
            (Solid::Round { center, radius }, Solid::Hull(hull)) => {
                let m = intersects_circle_polygon(*center, *radius, hull);
                if m.intersection {
                    let contact = closest_point_on_polygon(hull, *center);
                    out.initialize(a, b, m.normal, m.depth, &[contact]);
                }
                m.intersection
            }
            (Solid::Hull(hull), Solid::Round { center, radius }) => {
                let m = intersects_circle_polygon(*center, *radius, hull);
                if m.intersection {
                    // Reported from the circle's side, so flip to A -> B
                    let contact = closest_point_on_polygon(hull, *center);
                    out.initialize(a, b, -m.normal, m.depth, &[contact]);
                }
                m.intersection
            }
            (Solid::Hull(hull_a), Solid::Hull(hull_b)) => {
                let m = intersects_polygons(hull_a, hull_b);
                if m.intersection {
                    let (points, count) = polygon_contact_points(hull_a, hull_b);
                    out.initialize(a, b, m.normal, m.depth, &points[..count]);
                }
                m.intersection
            }
        };

        hit
    }
}
