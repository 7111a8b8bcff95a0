use crate::math::vec2::Vec2;
use crate::objects::BodyHandle;

/// Result of a low-level pairwise test (e.g. circle-circle).
///
/// Returned by value from each test so results never alias between calls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionManifold {
    /// Unit normal pointing from the first shape towards the second.
    pub normal: Vec2,
    /// Penetration depth along `normal`.
    pub depth: f64,
    pub intersection: bool,
}

impl CollisionManifold {
    /// The "no intersection" result.
    pub const NONE: CollisionManifold = CollisionManifold {
        normal: Vec2::ZERO,
        depth: 0.0,
        intersection: false,
    };

    pub fn hit(normal: Vec2, depth: f64) -> Self {
        CollisionManifold {
            normal,
            depth,
            intersection: true,
        }
    }
}

/// Maximum number of contact points a manifold stores.
pub const MAX_CONTACTS: usize = 2;

/// Describes a discovered collision between two bodies.
///
/// Meant to be reused as scratch space: `initialize` fills it, `reset`
/// clears it. The bodies are referenced by handle and never owned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactManifold {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Unit normal pointing from body A towards body B.
    pub normal: Vec2,
    pub depth: f64,
    contacts: [Vec2; MAX_CONTACTS],
    contact_count: usize,
}

impl Default for ContactManifold {
    fn default() -> Self {
        ContactManifold {
            body_a: BodyHandle(0),
            body_b: BodyHandle(0),
            normal: Vec2::ZERO,
            depth: 0.0,
            contacts: [Vec2::ZERO; MAX_CONTACTS],
            contact_count: 0,
        }
    }
}

impl ContactManifold {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the manifold. Contact points beyond `MAX_CONTACTS` are dropped.
    pub fn initialize(
        &mut self,
        body_a: BodyHandle,
        body_b: BodyHandle,
        normal: Vec2,
        depth: f64,
        contacts: &[Vec2],
    ) {
        self.body_a = body_a;
        self.body_b = body_b;
        self.normal = normal;
        self.depth = depth;
        self.contact_count = contacts.len().min(MAX_CONTACTS);
        self.contacts = [Vec2::ZERO; MAX_CONTACTS];
        self.contacts[..self.contact_count].copy_from_slice(&contacts[..self.contact_count]);
    }

    /// Clears the manifold back to "no contact".
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn contact_count(&self) -> usize {
        self.contact_count
    }

    /// The live contact points.
    pub fn contact_points(&self) -> &[Vec2] {
        &self.contacts[..self.contact_count]
    }

    /// True when at least one contact point was recorded.
    pub fn intersection(&self) -> bool {
        self.contact_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_manifold_none() {
        let none = CollisionManifold::NONE;
        assert!(!none.intersection);
        assert_eq!(none, CollisionManifold::default());
        let hit = CollisionManifold::hit(Vec2::new(1.0, 0.0), 0.5);
        assert!(hit.intersection);
        assert_eq!(hit.depth, 0.5);
    }

    #[test]
    fn test_contact_manifold_initialize_and_reset() {
        let mut m = ContactManifold::new();
        assert!(!m.intersection());

        m.initialize(
            BodyHandle(1),
            BodyHandle(4),
            Vec2::new(0.0, 1.0),
            0.25,
            &[Vec2::new(1.0, 1.0), Vec2::new(2.0, 1.0)],
        );
        assert!(m.intersection());
        assert_eq!(m.contact_count(), 2);
        assert_eq!(m.contact_points()[1], Vec2::new(2.0, 1.0));
        assert_eq!(m.body_b, BodyHandle(4));

        m.reset();
        assert!(!m.intersection());
        assert_eq!(m.contact_points(), &[] as &[Vec2]);
        assert_eq!(m.depth, 0.0);
    }

    #[test]
    fn test_contact_manifold_caps_contacts() {
        let mut m = ContactManifold::new();
        let points = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
        m.initialize(BodyHandle(0), BodyHandle(1), Vec2::UP, 0.1, &points);
        assert_eq!(m.contact_count(), MAX_CONTACTS);
    }

    #[test]
    fn test_contact_manifold_without_points_is_not_intersection() {
        let mut m = ContactManifold::new();
        m.initialize(BodyHandle(0), BodyHandle(1), Vec2::UP, 0.1, &[]);
        assert!(!m.intersection());
    }
}
