use std::collections::HashSet;

use glam::Vec3;

use crate::utils::allocator::EntityId;

/// Result of a single scene ray query.
///
/// `point` is always meaningful: the struck surface point on a hit, the
/// ray's terminal point (`origin + direction`) on a miss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub object: Option<EntityId>,
    pub point: Vec3,
    pub normal: Vec3,
}

impl RayHit {
    pub fn miss(origin: Vec3, direction: Vec3) -> Self {
        Self {
            object: None,
            point: origin + direction,
            normal: Vec3::ZERO,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.object.is_some()
    }
}

/// World objects a query must treat as transparent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    objects: HashSet<EntityId>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, object: EntityId) -> bool {
        self.objects.contains(&object)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.objects.iter().copied()
    }
}

impl FromIterator<EntityId> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

/// Scene query service the projectile core delegates collision to.
///
/// Implementations must be re-entrant within a step: a penetrating projectile
/// issues up to three casts per step.
pub trait SceneQuery {
    /// Casts from `origin` along `direction`; the vector's magnitude is the query distance.
    fn cast(&self, origin: Vec3, direction: Vec3, ignore: &IgnoreSet) -> RayHit;

    /// Size magnitude of `object`, used to size the penetration exit probe.
    fn extent(&self, object: EntityId) -> Option<f32>;
}

impl<S: SceneQuery + ?Sized> SceneQuery for &S {
    fn cast(&self, origin: Vec3, direction: Vec3, ignore: &IgnoreSet) -> RayHit {
        (**self).cast(origin, direction, ignore)
    }

    fn extent(&self, object: EntityId) -> Option<f32> {
        (**self).extent(object)
    }
}

/// One-shot callback fired when an object leaves the world.
pub type DetachCallback = Box<dyn FnOnce(EntityId) + Send + Sync>;

/// Host capability: notify subscribers when an object is detached from the world.
pub trait DetachNotifier {
    /// Registers `callback` to run exactly once when `object` leaves the world.
    fn on_detach(&mut self, object: EntityId, callback: DetachCallback);
}
