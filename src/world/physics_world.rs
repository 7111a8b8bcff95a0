use crate::{
    collision::{
        ContactManifold, NarrowPhase, PhysicsEntity, SatDetector, SpatialHashGrid, SpatialIndex,
    },
    common::{PhysicsError, Result, WorldConfig},
    math::vec2::Vec2,
    objects::{BodyHandle, RigidBody},
};

/// Stage of the tick the world is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickPhase {
    #[default]
    Idle,
    Integrate,
    BroadPhase,
    NarrowPhase,
    Resolve,
}

/// Counters describing one `PhysicsWorld::step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// Live bodies visited by the integrator.
    pub bodies: usize,
    /// Bodies left out of collision because their state went non-finite.
    pub skipped: usize,
    /// Bodies moved to new grid cells.
    pub rebucketed: usize,
    /// Pairs handed to the narrow phase.
    pub candidate_pairs: usize,
    /// Pairs that produced a contact.
    pub contacts: usize,
}

/// Owns the bodies and runs the per-tick pipeline:
/// integrate, broad phase, narrow phase, resolve.
///
/// The spatial index and the shape-pair test are pluggable.
#[derive(Debug)]
pub struct PhysicsWorld<G: SpatialIndex = SpatialHashGrid, N: NarrowPhase = SatDetector> {
    config: WorldConfig,
    grid: G,
    narrow_phase: N,
    // Slot storage; a handle is the slot index
    entities: Vec<Option<PhysicsEntity>>,
    free_slots: Vec<usize>,
    // Contacts found by the last tick
    contacts: Vec<ContactManifold>,
    phase: TickPhase,

    // Per-tick scratch space, kept to avoid reallocating
    scratch: ContactManifold,
    active: Vec<usize>,
    neighbours: Vec<usize>,
    pairs: Vec<(usize, usize)>,
}

impl PhysicsWorld {
    /// Creates an empty world with the default configuration.
    pub fn new() -> Self {
        Self::assemble(WorldConfig::default(), SpatialHashGrid::default(), SatDetector)
    }

    /// Creates an empty world with a validated configuration.
    pub fn with_config(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        let grid = SpatialHashGrid::new(config.cell_size)?;
        Ok(Self::assemble(config, grid, SatDetector))
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: SpatialIndex, N: NarrowPhase> PhysicsWorld<G, N> {
    /// Builds a world around a caller-supplied spatial index and narrow
    /// phase. The grid's own cell size wins over `config.cell_size`.
    pub fn with_parts(config: WorldConfig, grid: G, narrow_phase: N) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, grid, narrow_phase))
    }

    fn assemble(config: WorldConfig, mut grid: G, narrow_phase: N) -> Self {
        grid.clear();
        log::debug!(
            "creating physics world: gravity={:?}, iterations={}",
            config.gravity,
            config.velocity_iterations
        );
        Self {
            config,
            grid,
            narrow_phase,
            entities: Vec::new(),
            free_slots: Vec::new(),
            contacts: Vec::new(),
            phase: TickPhase::Idle,
            scratch: ContactManifold::new(),
            active: Vec::new(),
            neighbours: Vec::new(),
            pairs: Vec::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// `Idle` between ticks.
    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.entities.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a body and files it in the spatial index. Freed slots are reused.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let mut entity = PhysicsEntity::new(body);
        let index = match self.free_slots.pop() {
            Some(index) => index,
            None => {
                self.entities.push(None);
                self.entities.len() - 1
            }
        };
        let bounds = entity.fill_entity_bounds(&self.grid);
        self.grid.insert(index, bounds);
        self.entities[index] = Some(entity);
        BodyHandle(index)
    }

    /// Removes a body, returning it. Contacts involving it are dropped.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody> {
        let index = handle.index();
        let mut entity = self
            .entities
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(PhysicsError::UnknownBody(handle))?;
        if let Some(old) = entity.take_bucket() {
            self.grid.remove(index, old);
        }
        self.free_slots.push(index);
        self.contacts
            .retain(|contact| contact.body_a != handle && contact.body_b != handle);
        Ok(entity.into_body())
    }

    pub fn body(&self, handle: BodyHandle) -> Result<&RigidBody> {
        self.entities
            .get(handle.index())
            .and_then(Option::as_ref)
            .map(PhysicsEntity::body)
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    /// Mutable access between ticks. Moves are picked up by the next
    /// broad phase.
    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        self.entities
            .get_mut(handle.index())
            .and_then(Option::as_mut)
            .map(PhysicsEntity::body_mut)
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    /// Every live body with its handle, in slot order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.entities
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|entity| (BodyHandle(index), entity.body())))
    }

    /// Contacts found during the last `step`.
    pub fn contacts(&self) -> &[ContactManifold] {
        &self.contacts
    }

    /// Advances the simulation by `dt`.
    ///
    /// Runs the four phases in order, each over every body, and never
    /// fails: a non-positive or non-finite `dt` is ignored and bodies with
    /// non-finite state sit out collision until they are fixed.
    pub fn step(&mut self, dt: f64) -> StepReport {
        let mut report = StepReport::default();
        if !(dt.is_finite() && dt > 0.0) {
            log::warn!("ignoring world step with dt = {}", dt);
            return report;
        }

        self.contacts.clear();
        self.active.clear();
        self.pairs.clear();

        // --- Phase 1: integrate --- //
        self.phase = TickPhase::Integrate;
        let gravity = self.config.gravity;
        for (index, slot) in self.entities.iter_mut().enumerate() {
            if let Some(entity) = slot {
                report.bodies += 1;
                entity.body_mut().step(dt, gravity);
                if entity.body().is_finite() {
                    self.active.push(index);
                } else {
                    report.skipped += 1;
                    log::warn!("body {} has non-finite state, skipping collision", index);
                    if let Some(old) = entity.take_bucket() {
                        self.grid.remove(index, old);
                    }
                }
            }
        }

        // --- Phase 2: broad phase --- //
        self.phase = TickPhase::BroadPhase;
        for &index in &self.active {
            if let Some(entity) = self.entities[index].as_mut() {
                if entity.is_grid_cache_old(&self.grid) {
                    if let Some(old) = entity.take_bucket() {
                        self.grid.remove(index, old);
                    }
                    let bounds = entity.fill_entity_bounds(&self.grid);
                    self.grid.insert(index, bounds);
                    report.rebucketed += 1;
                }
            }
        }

        for &index in &self.active {
            let (bounds, aabb, is_static) = match self.entities[index].as_mut() {
                Some(entity) => match entity.bucket_bounds() {
                    Some(bounds) => (bounds, entity.body_mut().aabb(), entity.body().is_static()),
                    None => continue,
                },
                None => continue,
            };

            self.neighbours.clear();
            self.grid.query(bounds, &mut self.neighbours);
            for &other in &self.neighbours {
                // Each pair once, lower slot first
                if other <= index {
                    continue;
                }
                let other_entity = match self.entities.get_mut(other).and_then(Option::as_mut) {
                    Some(entity) => entity,
                    None => continue,
                };
                let other_body = other_entity.body_mut();
                if is_static && other_body.is_static() {
                    continue;
                }
                if aabb.overlaps(&other_body.aabb()) {
                    self.pairs.push((index, other));
                }
            }
        }
        self.pairs.sort_unstable();
        self.pairs.dedup();
        report.candidate_pairs = self.pairs.len();

        // --- Phase 3: narrow phase --- //
        self.phase = TickPhase::NarrowPhase;
        for &(i, j) in &self.pairs {
            let (body_a, body_b) = match pair_mut(&mut self.entities, i, j) {
                Some(pair) => pair,
                None => continue,
            };
            self.scratch.reset();
            if self
                .narrow_phase
                .collide(BodyHandle(i), body_a, BodyHandle(j), body_b, &mut self.scratch)
            {
                self.contacts.push(self.scratch);
            }
        }
        report.contacts = self.contacts.len();

        // --- Phase 4: resolve --- //
        self.phase = TickPhase::Resolve;
        for _ in 0..self.config.velocity_iterations {
            for contact in &self.contacts {
                if let Some((body_a, body_b)) =
                    pair_mut(&mut self.entities, contact.body_a.index(), contact.body_b.index())
                {
                    apply_collision_impulse(body_a, body_b, contact);
                }
            }
        }
        for contact in &self.contacts {
            if let Some((body_a, body_b)) =
                pair_mut(&mut self.entities, contact.body_a.index(), contact.body_b.index())
            {
                apply_positional_correction(
                    body_a,
                    body_b,
                    contact,
                    self.config.correction_percent,
                    self.config.correction_slop,
                );
            }
        }

        self.phase = TickPhase::Idle;
        log::debug!(
            "step dt={}: bodies={}, skipped={}, rebucketed={}, pairs={}, contacts={}",
            dt,
            report.bodies,
            report.skipped,
            report.rebucketed,
            report.candidate_pairs,
            report.contacts
        );
        report
    }
}

/// Two distinct bodies borrowed mutably, returned in `(i, j)` order.
fn pair_mut(
    entities: &mut [Option<PhysicsEntity>],
    i: usize,
    j: usize,
) -> Option<(&mut RigidBody, &mut RigidBody)> {
    if i == j || i.max(j) >= entities.len() {
        return None;
    }
    if i < j {
        let (head, tail) = entities.split_at_mut(j);
        Some((head[i].as_mut()?.body_mut(), tail[0].as_mut()?.body_mut()))
    } else {
        let (head, tail) = entities.split_at_mut(i);
        Some((tail[0].as_mut()?.body_mut(), head[j].as_mut()?.body_mut()))
    }
}

/// Applies an impulse along the contact normal.
///
/// `j = -(1 + e) * vn / (inv_a + inv_b)` with `e` the smaller restitution.
/// Bodies already separating are left alone.
fn apply_collision_impulse(body_a: &mut RigidBody, body_b: &mut RigidBody, contact: &ContactManifold) {
    let relative_velocity = body_b.linear_velocity() - body_a.linear_velocity();
    let velocity_along_normal = relative_velocity.dot(contact.normal);
    if velocity_along_normal > 0.0 {
        return;
    }

    let total_inv_mass = body_a.inv_mass() + body_b.inv_mass();
    if total_inv_mass <= 0.0 {
        return;
    }

    let e = body_a.material().combined_restitution(body_b.material());
    let j = -(1.0 + e) * velocity_along_normal / total_inv_mass;
    let impulse = contact.normal * j;
    body_a.apply_impulse(-impulse);
    body_b.apply_impulse(impulse);

    log::trace!(
        "impulse {:?}-{:?}: vn={:.4}, e={:.2}, j={:.4}",
        contact.body_a,
        contact.body_b,
        velocity_along_normal,
        e,
        j
    );
}

/// Pushes the bodies apart by `percent` of the penetration beyond `slop`,
/// split by inverse mass.
fn apply_positional_correction(
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    contact: &ContactManifold,
    percent: f64,
    slop: f64,
) {
    let correction_magnitude = (contact.depth - slop).max(0.0);
    if correction_magnitude < 1e-9 {
        return;
    }
    let total_inv_mass = body_a.inv_mass() + body_b.inv_mass();
    if total_inv_mass <= 0.0 {
        return;
    }

    let correction = contact.normal * (correction_magnitude / total_inv_mass * percent);
    if body_a.inv_mass() > 0.0 {
        body_a.translate(-(correction * body_a.inv_mass()));
    }
    if body_b.inv_mass() > 0.0 {
        body_b.translate(correction * body_b.inv_mass());
    }

    log::trace!(
        "positional correction {:?}-{:?}: depth={:.4}, correction={:?}",
        contact.body_a,
        contact.body_b,
        contact.depth,
        correction
    );
}
