//! Projectile Tracer – ballistic projectile simulation for Rust.
//!
//! Projectiles advance under constant acceleration, cast one ray per frame
//! against a host-provided scene, and resolve bounce, penetration, or impact.
//! A pluggable renderer draws each projectile's path.

pub mod collision;
pub mod config;
pub mod core;
pub mod error;
pub mod render;
pub mod utils;
pub mod world;

pub use glam::{Quat, Vec3};

pub use crate::collision::{
    queries::{DetachNotifier, IgnoreSet, RayHit, SceneQuery},
    scene::{Scene, SceneObject, Shape, SharedScene},
};
pub use crate::core::{
    projectile::{
        Projectile, ProjectileBuilder, ProjectileConfig, ProjectileParams, RemovalReason, Touch,
    },
    types::{Color, Transform},
};
pub use error::ConfigError;
pub use render::{LinePool, LineRenderer, LineSegment, PartRenderer, TrajectoryRenderer};
pub use utils::allocator::{EntityId, ProjectileId};
pub use world::{IgnoreRegistry, ProjectileWorld};

/// High-level convenience wrapper that owns a [`ProjectileWorld`] and its scene.
pub struct ProjectileEngine<S: SceneQuery> {
    world: ProjectileWorld,
    scene: S,
}

impl<S: SceneQuery> ProjectileEngine<S> {
    pub fn new(scene: S) -> Self {
        Self {
            world: ProjectileWorld::new(),
            scene,
        }
    }

    /// Launches a projectile into the owned world.
    pub fn spawn(&mut self, config: ProjectileConfig) -> Result<ProjectileId, ConfigError> {
        self.world.spawn(config)
    }

    /// Runs one host frame.
    pub fn tick(&mut self, dt: f32) {
        self.world.step(dt, &self.scene);
    }

    pub fn world(&self) -> &ProjectileWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut ProjectileWorld {
        &mut self.world
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}
