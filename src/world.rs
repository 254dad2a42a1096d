mod ignore;

pub use ignore::IgnoreRegistry;

use crate::{
    collision::queries::{DetachNotifier, SceneQuery},
    core::{
        projectile::{Projectile, ProjectileConfig, RemovalReason},
        types::Color,
    },
    error::ConfigError,
    render::{LinePool, LineRenderer, TrajectoryRenderer},
    utils::{
        allocator::{Arena, EntityId, ProjectileId},
        logging::ScopedTimer,
    },
};

/// Frame driver owning every live projectile.
///
/// Single-threaded: the host calls [`ProjectileWorld::step`] once per tick and
/// nothing else mutates the live set meanwhile.
pub struct ProjectileWorld {
    projectiles: Arena<ProjectileId, Projectile>,
    /// Registration order; iteration order for each frame.
    live: Vec<ProjectileId>,
    elapsed: f64,
    ignore: IgnoreRegistry,
    lines: LinePool,
}

impl Default for ProjectileWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectileWorld {
    pub fn new() -> Self {
        Self::with_line_pool(LinePool::new())
    }

    /// Uses `lines` for default renderers, so several worlds can share primitives.
    pub fn with_line_pool(lines: LinePool) -> Self {
        Self {
            projectiles: Arena::new(),
            live: Vec::new(),
            elapsed: 0.0,
            ignore: IgnoreRegistry::new(),
            lines,
        }
    }

    /// Simulation clock, advanced once per [`ProjectileWorld::step`].
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn lines(&self) -> &LinePool {
        &self.lines
    }

    pub fn physics_ignore(&self) -> &IgnoreRegistry {
        &self.ignore
    }

    pub fn add_to_physics_ignore<N: DetachNotifier + ?Sized>(
        &self,
        object: EntityId,
        notifier: &mut N,
    ) -> bool {
        self.ignore.add(object, notifier)
    }

    pub fn remove_from_physics_ignore(&self, object: EntityId) -> bool {
        self.ignore.remove(object)
    }

    /// Launches a projectile; it is stepped from the next frame on.
    pub fn spawn(&mut self, mut config: ProjectileConfig) -> Result<ProjectileId, ConfigError> {
        if let Err(err) = config.validate() {
            log::warn!("rejected projectile config: {err}");
            if let Some(renderer) = config.renderer.take() {
                renderer.destroy();
            }
            return Err(err);
        }

        let renderer: Box<dyn TrajectoryRenderer> = match config.renderer.take() {
            Some(renderer) => renderer,
            None => Box::new(LineRenderer::new(&self.lines, Color::WHITE)),
        };
        let global = self.ignore.snapshot();
        let projectile = Projectile::launch(config, renderer, self.elapsed, &global);
        let deadline = projectile.deadline();

        let id = self.projectiles.insert(projectile);
        self.live.push(id);
        log::debug!("spawned projectile {id:?}, deadline {deadline:.3}");
        Ok(id)
    }

    /// Stops stepping `id`. Cleanup happens at the next frame boundary unless
    /// `instantly`, which destroys the renderer now.
    ///
    /// Returns `false` if the projectile was already removed or marked.
    pub fn remove(&mut self, id: ProjectileId, instantly: bool) -> bool {
        let Some(projectile) = self.projectiles.get_mut(id) else {
            return false;
        };
        let marked = projectile.mark(RemovalReason::External);
        if instantly {
            projectile.destroy_renderer();
        }
        marked
    }

    /// Advances the clock by `dt`, retires marked and expired projectiles,
    /// and steps the rest in registration order.
    pub fn step<S: SceneQuery + ?Sized>(&mut self, dt: f32, scene: &S) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("ignoring invalid frame delta {dt}");
            0.0
        };

        let _timer = ScopedTimer::new("projectiles::step");
        self.elapsed += f64::from(dt);

        let mut next = Vec::with_capacity(self.live.len());
        for id in std::mem::take(&mut self.live) {
            let Some(projectile) = self.projectiles.get_mut(id) else {
                continue;
            };
            if projectile.is_expired(self.elapsed) {
                projectile.mark(RemovalReason::Expired);
            }
            if projectile.is_marked() {
                self.retire(id);
                continue;
            }
            next.push(id);
            projectile.step(dt, scene);
        }
        self.live = next;
    }

    fn retire(&mut self, id: ProjectileId) {
        if let Some(mut projectile) = self.projectiles.remove(id) {
            projectile.destroy_renderer();
            log::debug!(
                "removed projectile {id:?} ({:?}) after {:.1} studs",
                projectile.removal(),
                projectile.traveled_distance()
            );
        }
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Whether `id` is still held by the world (possibly marked for removal).
    pub fn contains(&self, id: ProjectileId) -> bool {
        self.projectiles.contains(id)
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.get(id)
    }

    /// Live projectiles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ProjectileId, &Projectile)> + '_ {
        self.live
            .iter()
            .filter_map(|id| self.projectiles.get(*id).map(|p| (*id, p)))
    }

    /// Destroys every projectile and returns the world to its initial state.
    pub fn reset(&mut self) {
        for id in std::mem::take(&mut self.live) {
            self.retire(id);
        }
        self.elapsed = 0.0;
        self.ignore.clear();
    }
}
