use physics_core::{
    BodyHandle, CellBounds, CellIndexer, ContactManifold, NarrowPhase, PhysicsWorld, RigidBody, SatDetector,
    SpatialIndex, TickPhase, Vec2, WorldConfig,
};
use std::cell::Cell;
use std::collections::BTreeSet;

/// Single-cell index: every body is a candidate for every other.
#[derive(Debug, Default)]
struct AllPairs {
    ids: BTreeSet<usize>,
}

impl CellIndexer for AllPairs {
    fn cell_index_x(&self, _world_x: f64) -> i32 {
        0
    }

    fn cell_index_y(&self, _world_y: f64) -> i32 {
        0
    }
}

impl SpatialIndex for AllPairs {
    fn insert(&mut self, id: usize, _bounds: CellBounds) {
        self.ids.insert(id);
    }

    fn remove(&mut self, id: usize, _bounds: CellBounds) {
        self.ids.remove(&id);
    }

    fn query(&self, _bounds: CellBounds, out: &mut Vec<usize>) {
        out.extend(self.ids.iter().copied());
    }

    fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Counts the pair tests it forwards.
#[derive(Debug, Default)]
struct CountingDetector {
    calls: Cell<usize>,
}

impl NarrowPhase for CountingDetector {
    fn collide(
        &self,
        a: BodyHandle,
        body_a: &mut RigidBody,
        b: BodyHandle,
        body_b: &mut RigidBody,
        out: &mut ContactManifold,
    ) -> bool {
        self.calls.set(self.calls.get() + 1);
        SatDetector.collide(a, body_a, b, body_b, out)
    }
}

fn gravity_config() -> WorldConfig {
    WorldConfig {
        gravity: Vec2::new(0.0, 10.0),
        cell_size: 4.0,
        ..WorldConfig::default()
    }
}

#[test]
fn mixed_shapes_settle_on_static_floor() {
    let mut world = PhysicsWorld::with_config(gravity_config()).unwrap();
    let floor = world.add_body(RigidBody::new_line(Vec2::new(0.0, 10.0), 0.0, 40.0, 1.0, 1.0, true, 0.1).unwrap());
    let ball = world.add_body(RigidBody::new_circle(Vec2::new(-5.0, 5.0), 0.0, 0.5, 1.0, false, 0.1).unwrap());
    let crate_box = world.add_body(RigidBody::new_box(Vec2::new(0.0, 5.0), 0.0, 1.0, 1.0, 1.0, false, 0.1).unwrap());
    let tile = world.add_body(RigidBody::new_polygon(Vec2::new(5.0, 5.0), 0.0, 2.0, 0.5, 1.0, false, 0.1).unwrap());

    let mut saw_contacts = false;
    for _ in 0..240 {
        let report = world.step(1.0 / 60.0);
        assert_eq!(report.bodies, 4);
        assert_eq!(report.skipped, 0);
        saw_contacts |= report.contacts > 0;
        assert_eq!(world.phase(), TickPhase::Idle);
    }
    assert!(saw_contacts);

    // Floor top is at y = 9.5
    let ball_y = world.body(ball).unwrap().position().y;
    assert!(ball_y > 8.8 && ball_y < 9.1, "ball at {}", ball_y);
    let box_y = world.body(crate_box).unwrap().position().y;
    assert!(box_y > 8.8 && box_y < 9.1, "box at {}", box_y);
    let tile_y = world.body(tile).unwrap().position().y;
    assert!(tile_y > 9.05 && tile_y < 9.35, "tile at {}", tile_y);
    assert_eq!(world.body(floor).unwrap().position(), Vec2::new(0.0, 10.0));

    for contact in world.contacts() {
        assert_ne!(contact.body_a, contact.body_b);
        assert!(contact.intersection());
        assert!((contact.normal.magnitude() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn custom_index_and_narrow_phase_plug_in() {
    let mut world =
        PhysicsWorld::with_parts(gravity_config(), AllPairs::default(), CountingDetector::default()).unwrap();
    for i in 0..4 {
        let x = i as f64 * 100.0;
        world.add_body(RigidBody::new_circle(Vec2::new(x, 0.0), 0.0, 1.0, 1.0, false, 0.5).unwrap());
    }
    assert_eq!(world.grid().ids.len(), 4);

    // Every pair shares the single cell but their boxes are far apart
    let report = world.step(1.0 / 60.0);
    assert_eq!(report.candidate_pairs, 0);

    // Overlapping pair makes it through to the narrow phase
    let extra = world.add_body(RigidBody::new_circle(Vec2::new(0.5, 0.0), 0.0, 1.0, 1.0, false, 0.5).unwrap());
    let report = world.step(1.0 / 60.0);
    assert_eq!(report.candidate_pairs, 1);
    assert_eq!(report.contacts, 1);

    world.remove_body(extra).unwrap();
    assert_eq!(world.grid().ids.len(), 4);
    assert!(world.contacts().is_empty());
}

#[test]
fn moving_body_crosses_cells_and_collides() {
    let mut world = PhysicsWorld::with_config(WorldConfig {
        gravity: Vec2::ZERO,
        cell_size: 2.0,
        ..WorldConfig::default()
    })
    .unwrap();
    let wall = world.add_body(RigidBody::new_box(Vec2::new(20.0, 0.0), 0.0, 1.0, 10.0, 1.0, true, 1.0).unwrap());
    let bullet = world.add_body(RigidBody::new_circle(Vec2::ZERO, 0.0, 0.5, 1.0, false, 1.0).unwrap());
    world.body_mut(bullet).unwrap().set_linear_velocity(Vec2::new(10.0, 0.0));

    let mut rebucketed = 0;
    let mut bounced = false;
    for _ in 0..300 {
        let report = world.step(1.0 / 60.0);
        rebucketed += report.rebucketed;
        if world.body(bullet).unwrap().linear_velocity().x < 0.0 {
            bounced = true;
            break;
        }
    }

    assert!(bounced);
    assert!(rebucketed > 0);
    // Elastic bounce off a static wall reverses the velocity
    let v = world.body(bullet).unwrap().linear_velocity();
    assert!((v.x - -10.0).abs() < 1e-9);
    assert_eq!(world.body(wall).unwrap().position(), Vec2::new(20.0, 0.0));
}
