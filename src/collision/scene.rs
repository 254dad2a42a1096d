use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec3;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    collision::queries::{DetachCallback, DetachNotifier, IgnoreSet, RayHit, SceneQuery},
    config::RAY_EPSILON,
    core::types::Transform,
    utils::allocator::{Arena, EntityId},
};

/// Geometry a scene object can take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
}

impl Shape {
    pub fn sphere(radius: f32) -> Self {
        Shape::Sphere { radius }
    }

    pub fn cuboid(half_extents: Vec3) -> Self {
        Shape::Box { half_extents }
    }

    /// Diagonal of the shape's bounding box.
    pub fn extent(&self) -> f32 {
        match self {
            Shape::Sphere { radius } => 2.0 * radius * 3f32.sqrt(),
            Shape::Box { half_extents } => 2.0 * half_extents.length(),
        }
    }
}

/// A piece of world geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub shape: Shape,
    pub transform: Transform,
}

impl SceneObject {
    pub fn new(shape: Shape, transform: Transform) -> Self {
        Self { shape, transform }
    }

    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self::new(Shape::sphere(radius), Transform::from_position(center))
    }

    pub fn cuboid(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(Shape::cuboid(half_extents), Transform::from_position(center))
    }
}

/// Reference scene query service: a flat collection of spheres and oriented boxes.
#[derive(Default)]
pub struct Scene {
    objects: Arena<EntityId, SceneObject>,
    detach_watchers: HashMap<EntityId, Vec<DetachCallback>>,
}

/// Scene shared between the frame driver and renderers that place objects in it.
pub type SharedScene = Arc<RwLock<Scene>>;

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedScene {
        Arc::new(RwLock::new(self))
    }

    pub fn insert(&mut self, object: SceneObject) -> EntityId {
        self.objects.insert(object)
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.objects.contains(id)
    }

    pub fn set_transform(&mut self, id: EntityId, transform: Transform) -> bool {
        match self.objects.get_mut(id) {
            Some(object) => {
                object.transform = transform;
                true
            }
            None => false,
        }
    }

    /// Detaches an object from the world and notifies its watchers.
    ///
    /// Watchers run while the scene is borrowed mutably and must not touch the scene.
    pub fn remove(&mut self, id: EntityId) -> Option<SceneObject> {
        let removed = self.objects.remove(id)?;
        if let Some(watchers) = self.detach_watchers.remove(&id) {
            for callback in watchers {
                callback(id);
            }
        }
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &SceneObject)> + '_ {
        self.objects.iter()
    }

    fn ray_object(
        origin: Vec3,
        dir: Vec3,
        max_distance: f32,
        object: &SceneObject,
    ) -> Option<(f32, Vec3)> {
        match &object.shape {
            Shape::Sphere { radius } => {
                Self::ray_sphere(origin, dir, max_distance, object.transform.position, *radius)
            }
            Shape::Box { half_extents } => {
                Self::ray_box(origin, dir, max_distance, &object.transform, *half_extents)
            }
        }
    }

    fn ray_sphere(
        origin: Vec3,
        dir: Vec3,
        max_distance: f32,
        center: Vec3,
        radius: f32,
    ) -> Option<(f32, Vec3)> {
        let oc = origin - center;
        let c = oc.length_squared() - radius * radius;
        if c < 0.0 {
            return None;
        }
        let b = oc.dot(dir);
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let t = -b - discriminant.sqrt();
        if t < 0.0 || t > max_distance {
            return None;
        }
        let normal = (origin + dir * t - center).normalize_or_zero();
        Some((t, normal))
    }

    fn ray_box(
        origin: Vec3,
        dir: Vec3,
        max_distance: f32,
        transform: &Transform,
        half_extents: Vec3,
    ) -> Option<(f32, Vec3)> {
        let local_origin = transform.inverse_transform_point(origin);
        let local_dir = transform.inverse_transform_vector(dir);
        let mut t_min = 0.0;
        let mut t_max = max_distance;
        let mut normal = Vec3::ZERO;

        for i in 0..3 {
            let o = local_origin[i];
            let d = local_dir[i];
            let min = -half_extents[i];
            let max = half_extents[i];

            if d.abs() < 1e-6 {
                if o < min || o > max {
                    return None;
                }
            } else {
                let inv_dir = 1.0 / d;
                let mut t1 = (min - o) * inv_dir;
                let mut t2 = (max - o) * inv_dir;
                if t1 > t2 {
                    std::mem::swap(&mut t1, &mut t2);
                }

                if t1 > t_min {
                    t_min = t1;
                    normal = Vec3::ZERO;
                    normal[i] = -d.signum();
                }

                t_max = t_max.min(t2);
                if t_min > t_max {
                    return None;
                }
            }
        }

        // No entering face: the ray starts inside or on the box.
        if normal == Vec3::ZERO {
            return None;
        }
        Some((t_min, transform.rotation * normal))
    }
}

impl SceneQuery for Scene {
    fn cast(&self, origin: Vec3, direction: Vec3, ignore: &IgnoreSet) -> RayHit {
        let max_distance = direction.length();
        if max_distance <= 0.0 || !max_distance.is_finite() {
            return RayHit::miss(origin, direction);
        }
        let dir = direction / max_distance;

        let mut nearest: Option<(EntityId, f32, Vec3)> = None;
        for (id, object) in self.objects.iter() {
            if ignore.contains(id) {
                continue;
            }
            let Some((t, normal)) = Self::ray_object(origin, dir, max_distance, object) else {
                continue;
            };
            if t < RAY_EPSILON {
                continue;
            }
            if nearest.map_or(true, |(_, best, _)| t < best) {
                nearest = Some((id, t, normal));
            }
        }

        match nearest {
            Some((id, t, normal)) => RayHit {
                object: Some(id),
                point: origin + dir * t,
                normal,
            },
            None => RayHit::miss(origin, direction),
        }
    }

    fn extent(&self, object: EntityId) -> Option<f32> {
        self.objects.get(object).map(|o| o.shape.extent())
    }
}

impl SceneQuery for RwLock<Scene> {
    fn cast(&self, origin: Vec3, direction: Vec3, ignore: &IgnoreSet) -> RayHit {
        self.read().cast(origin, direction, ignore)
    }

    fn extent(&self, object: EntityId) -> Option<f32> {
        self.read().extent(object)
    }
}

impl DetachNotifier for Scene {
    fn on_detach(&mut self, object: EntityId, callback: DetachCallback) {
        if !self.objects.contains(object) {
            // Already gone: deliver the single notification now.
            callback(object);
            return;
        }
        self.detach_watchers.entry(object).or_default().push(callback);
    }
}
