use physics_core::collision::detection::{intersects_circles, intersects_polygons, segment_hull};
use physics_core::{RigidBody, ShapeKind, Vec2};
use proptest::prelude::*;

const EPSILON: f64 = 1e-7;

fn point() -> impl Strategy<Value = Vec2> {
    (-20.0f64..20.0, -20.0f64..20.0).prop_map(|(x, y)| Vec2::new(x, y))
}

fn shape_kind() -> impl Strategy<Value = ShapeKind> {
    prop_oneof![
        Just(ShapeKind::Circle),
        Just(ShapeKind::Box),
        Just(ShapeKind::Polygon),
        Just(ShapeKind::Line),
    ]
}

#[allow(clippy::too_many_arguments)]
fn build(
    kind: ShapeKind,
    x: f64,
    y: f64,
    rotation: f64,
    width: f64,
    height: f64,
    density: f64,
    is_static: bool,
) -> RigidBody {
    let body = match kind {
        ShapeKind::Circle => RigidBody::new_circle(Vec2::new(x, y), rotation, width / 2.0, density, is_static, 0.5),
        ShapeKind::Box => RigidBody::new_box(Vec2::new(x, y), rotation, width, height, density, is_static, 0.5),
        ShapeKind::Polygon => {
            RigidBody::new_polygon(Vec2::new(x, y), rotation, width, height, density, is_static, 0.5)
        }
        ShapeKind::Line => RigidBody::new_line(Vec2::new(x, y), rotation, width, height, density, is_static, 0.5),
    };
    body.expect("valid parameters")
}

proptest! {
    #[test]
    fn inv_mass_matches_static_flag(
        kind in shape_kind(),
        width in 0.1f64..50.0,
        height in 0.1f64..50.0,
        density in 0.01f64..10.0,
        is_static in any::<bool>(),
    ) {
        let body = build(kind, 0.0, 0.0, 0.0, width, height, density, is_static);
        if is_static {
            prop_assert_eq!(body.inv_mass(), 0.0);
        } else {
            prop_assert!(body.inv_mass() > 0.0);
            prop_assert!((body.inv_mass() - 1.0 / body.mass()).abs() <= EPSILON * body.inv_mass());
        }
    }

    #[test]
    fn vertices_stay_inside_aabb_after_mutation(
        kind in shape_kind(),
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        rotation in -10.0f64..10.0,
        width in 0.1f64..50.0,
        height in 0.1f64..50.0,
        dx in -100.0f64..100.0,
        new_rotation in -10.0f64..10.0,
    ) {
        let mut body = build(kind, x, y, rotation, width, height, 1.0, false);
        body.aabb();
        body.translate(Vec2::new(dx, -dx));
        body.set_rotation(new_rotation);

        let aabb = body.aabb();
        let vertices = body.transformed_vertices().to_vec();
        for v in &vertices {
            prop_assert!(v.x >= aabb.min.x - EPSILON && v.x <= aabb.max.x + EPSILON);
            prop_assert!(v.y >= aabb.min.y - EPSILON && v.y <= aabb.max.y + EPSILON);
        }

        if kind == ShapeKind::Circle {
            let r = body.radius();
            let center = body.position();
            prop_assert!((vertices[0] - center).magnitude() < EPSILON);
            prop_assert!((aabb.min.x - (center.x - r)).abs() < EPSILON);
            prop_assert!((aabb.max.y - (center.y + r)).abs() < EPSILON);
            // Any boundary point sits exactly one radius from the center
            let boundary = center + Vec2::new(new_rotation.cos(), new_rotation.sin()) * r;
            prop_assert!((boundary.distance(center) - r).abs() < EPSILON);
            prop_assert!(aabb.contains(boundary));
        }
    }

    #[test]
    fn reshaped_line_hull_stays_inside_aabb(
        start in point(),
        end in point(),
        height in 0.01f64..10.0,
        rotation in -10.0f64..10.0,
        dx in -100.0f64..100.0,
    ) {
        let mut body = build(ShapeKind::Line, 3.0, -4.0, rotation, 4.0, height, 1.0, false);
        body.set_local_vertices(vec![start, end]).expect("finite endpoints");
        body.translate(Vec2::new(dx, dx / 2.0));

        let aabb = body.aabb();
        let ends = body.transformed_vertices().to_vec();
        for corner in segment_hull(ends[0], ends[1], height / 2.0) {
            prop_assert!(corner.x >= aabb.min.x - EPSILON && corner.x <= aabb.max.x + EPSILON);
            prop_assert!(corner.y >= aabb.min.y - EPSILON && corner.y <= aabb.max.y + EPSILON);
        }
    }

    #[test]
    fn reshaped_box_vertices_stay_inside_aabb(
        corners in proptest::collection::vec(point(), 4),
        rotation in -10.0f64..10.0,
        new_rotation in -10.0f64..10.0,
    ) {
        let mut body = build(ShapeKind::Box, -7.0, 2.0, rotation, 1.0, 1.0, 1.0, false);
        body.set_local_vertices(corners).expect("finite corners");
        body.set_rotation(new_rotation);

        let aabb = body.aabb();
        for v in body.transformed_vertices().to_vec() {
            prop_assert!(v.x >= aabb.min.x - EPSILON && v.x <= aabb.max.x + EPSILON);
            prop_assert!(v.y >= aabb.min.y - EPSILON && v.y <= aabb.max.y + EPSILON);
        }
    }

    #[test]
    fn geometry_reads_are_idempotent(
        kind in shape_kind(),
        rotation in -10.0f64..10.0,
        reads in 1usize..8,
    ) {
        let mut body = build(kind, 5.0, -3.0, rotation, 2.0, 1.0, 1.0, false);
        let first = body.transformed_vertices().to_vec();
        let first_aabb = body.aabb();
        for _ in 0..reads {
            prop_assert_eq!(body.transformed_vertices(), first.as_slice());
            prop_assert_eq!(body.aabb(), first_aabb);
        }
        prop_assert_eq!(body.rebuild_count(), 1);
    }

    #[test]
    fn circle_test_is_symmetric(
        ax in -10.0f64..10.0,
        ay in -10.0f64..10.0,
        bx in -10.0f64..10.0,
        by in -10.0f64..10.0,
        ra in 0.1f64..5.0,
        rb in 0.1f64..5.0,
    ) {
        let a = Vec2::new(ax, ay);
        let b = Vec2::new(bx, by);
        let ab = intersects_circles(a, ra, b, rb);
        let ba = intersects_circles(b, rb, a, ra);
        prop_assert_eq!(ab.intersection, a.distance(b) < ra + rb);
        prop_assert_eq!(ab.intersection, ba.intersection);
        if ab.intersection {
            prop_assert!((ab.depth - ba.depth).abs() < EPSILON);
            prop_assert!((ab.normal.magnitude() - 1.0).abs() < EPSILON);
            prop_assert!(ab.depth > 0.0);
        }
    }

    #[test]
    fn separating_polygons_never_reported(
        gap in 0.01f64..10.0,
        shift in -5.0f64..5.0,
    ) {
        let square = |c: Vec2| vec![
            c + Vec2::new(-1.0, -1.0),
            c + Vec2::new(1.0, -1.0),
            c + Vec2::new(1.0, 1.0),
            c + Vec2::new(-1.0, 1.0),
        ];
        let a = square(Vec2::ZERO);
        let b = square(Vec2::new(2.0 + gap, shift));
        prop_assert!(!intersects_polygons(&a, &b).intersection);
    }

    #[test]
    fn restitution_is_clamped(restitution in -100.0f64..100.0) {
        let body = RigidBody::new_circle(Vec2::ZERO, 0.0, 1.0, 1.0, false, restitution).unwrap();
        prop_assert!((0.0..=1.0).contains(&body.restitution()));
    }
}
