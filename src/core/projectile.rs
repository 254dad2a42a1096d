use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    collision::queries::{IgnoreSet, SceneQuery},
    config::{
        DEFAULT_LIFE, DEFAULT_MAX_RANGE, DEFAULT_MIN_EXIT_VELOCITY, DEFAULT_RESISTANCE, RESTITUTION,
    },
    error::ConfigError,
    render::TrajectoryRenderer,
    utils::{
        allocator::EntityId,
        math::{length_and_direction, reflect},
    },
};

/// Behaviour parameters of a projectile, fixed once it is launched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileParams {
    /// Reflect off struck surfaces instead of stopping.
    pub bounce: bool,
    /// Query the scene for collisions at all.
    pub can_collide: bool,
    /// Seconds until forced removal.
    pub life: f32,
    /// Maximum path length before removal.
    pub max_range: f32,
    /// Speed floor an exit must keep for a penetration to succeed.
    pub min_exit_velocity: f32,
    /// Attempt to pass through struck objects.
    pub penetration: bool,
    /// Exponential attenuation coefficient per unit of penetrated distance.
    pub resistance: f32,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        Self {
            bounce: false,
            can_collide: true,
            life: DEFAULT_LIFE,
            max_range: DEFAULT_MAX_RANGE,
            min_exit_velocity: DEFAULT_MIN_EXIT_VELOCITY,
            penetration: false,
            resistance: DEFAULT_RESISTANCE,
        }
    }
}

impl ProjectileParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.life.is_finite() || self.life < 0.0 {
            return Err(ConfigError::InvalidLife(self.life));
        }
        if !self.max_range.is_finite() || self.max_range < 0.0 {
            return Err(ConfigError::InvalidMaxRange(self.max_range));
        }
        if !self.min_exit_velocity.is_finite() || self.min_exit_velocity <= 0.0 {
            return Err(ConfigError::InvalidMinExitVelocity(self.min_exit_velocity));
        }
        if !self.resistance.is_finite() || self.resistance <= 0.0 {
            return Err(ConfigError::InvalidResistance(self.resistance));
        }
        Ok(())
    }
}

/// A resolved hit reported to the `on_touch` callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub object: EntityId,
    pub point: Vec3,
    pub normal: Vec3,
    /// Unit velocity after the hit was resolved (zero when at rest).
    pub direction: Vec3,
}

/// Hit callback; returning `true` removes the projectile immediately.
pub type TouchCallback = Box<dyn FnMut(&Touch) -> bool + Send>;

/// Why a projectile left the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovalReason {
    Expired,
    OutOfRange,
    Impact,
    Touch,
    External,
}

/// Everything needed to launch a projectile.
pub struct ProjectileConfig {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub params: ProjectileParams,
    /// Extra objects this projectile never collides with.
    pub physics_ignore: Vec<EntityId>,
    /// `None` selects the world's default line renderer.
    pub renderer: Option<Box<dyn TrajectoryRenderer>>,
    pub on_touch: Option<TouchCallback>,
}

impl ProjectileConfig {
    pub fn new(position: Vec3, velocity: Vec3, acceleration: Vec3) -> Self {
        Self {
            position,
            velocity,
            acceleration,
            params: ProjectileParams::default(),
            physics_ignore: Vec::new(),
            renderer: None,
            on_touch: None,
        }
    }

    pub fn builder(position: Vec3, velocity: Vec3, acceleration: Vec3) -> ProjectileBuilder {
        ProjectileBuilder::new(position, velocity, acceleration)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, vector) in [
            ("position", self.position),
            ("velocity", self.velocity),
            ("acceleration", self.acceleration),
        ] {
            if !vector.is_finite() {
                return Err(ConfigError::NonFiniteVector(name));
            }
        }
        self.params.validate()
    }
}

pub struct ProjectileBuilder {
    config: ProjectileConfig,
}

impl ProjectileBuilder {
    pub fn new(position: Vec3, velocity: Vec3, acceleration: Vec3) -> Self {
        Self {
            config: ProjectileConfig::new(position, velocity, acceleration),
        }
    }

    pub fn params(mut self, params: ProjectileParams) -> Self {
        self.config.params = params;
        self
    }

    pub fn bounce(mut self, bounce: bool) -> Self {
        self.config.params.bounce = bounce;
        self
    }

    pub fn can_collide(mut self, can_collide: bool) -> Self {
        self.config.params.can_collide = can_collide;
        self
    }

    pub fn life(mut self, life: f32) -> Self {
        self.config.params.life = life;
        self
    }

    pub fn max_range(mut self, max_range: f32) -> Self {
        self.config.params.max_range = max_range;
        self
    }

    pub fn min_exit_velocity(mut self, min_exit_velocity: f32) -> Self {
        self.config.params.min_exit_velocity = min_exit_velocity;
        self
    }

    pub fn penetration(mut self, penetration: bool) -> Self {
        self.config.params.penetration = penetration;
        self
    }

    pub fn resistance(mut self, resistance: f32) -> Self {
        self.config.params.resistance = resistance;
        self
    }

    pub fn physics_ignore(mut self, objects: impl IntoIterator<Item = EntityId>) -> Self {
        self.config.physics_ignore.extend(objects);
        self
    }

    pub fn renderer<R: TrajectoryRenderer + 'static>(mut self, renderer: R) -> Self {
        self.config.renderer = Some(Box::new(renderer));
        self
    }

    pub fn on_touch<F>(mut self, on_touch: F) -> Self
    where
        F: FnMut(&Touch) -> bool + Send + 'static,
    {
        self.config.on_touch = Some(Box::new(on_touch));
        self
    }

    pub fn build(self) -> ProjectileConfig {
        self.config
    }
}

/// A single simulated body and its collision response.
pub struct Projectile {
    position: Vec3,
    velocity: Vec3,
    acceleration: Vec3,
    deadline: f64,
    traveled: f32,
    traveled_squared: f32,
    max_range_squared: f32,
    params: ProjectileParams,
    ignore: IgnoreSet,
    on_touch: Option<TouchCallback>,
    renderer: Option<Box<dyn TrajectoryRenderer>>,
    removal: Option<RemovalReason>,
}

impl Projectile {
    /// Builds the projectile state. The ignore set is frozen here: later
    /// changes to `global_ignore` do not reach this projectile.
    pub(crate) fn launch(
        config: ProjectileConfig,
        renderer: Box<dyn TrajectoryRenderer>,
        elapsed: f64,
        global_ignore: &[EntityId],
    ) -> Self {
        let ignore = global_ignore
            .iter()
            .chain(renderer.ignore_set())
            .chain(&config.physics_ignore)
            .copied()
            .collect();

        Self {
            position: config.position,
            velocity: config.velocity,
            acceleration: config.acceleration,
            deadline: elapsed + f64::from(config.params.life),
            traveled: 0.0,
            traveled_squared: 0.0,
            max_range_squared: config.params.max_range * config.params.max_range,
            params: config.params,
            ignore,
            on_touch: config.on_touch,
            renderer: Some(renderer),
            removal: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    /// Scheduler time at which the projectile is removed regardless of hits.
    pub fn deadline(&self) -> f64 {
        self.deadline
    }

    /// Accumulated path length.
    pub fn traveled_distance(&self) -> f32 {
        self.traveled
    }

    /// Sum of squared step lengths; the range cap compares this against `max_range²`.
    pub fn traveled_distance_squared(&self) -> f32 {
        self.traveled_squared
    }

    pub fn params(&self) -> &ProjectileParams {
        &self.params
    }

    pub fn ignore_set(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Set once the projectile is scheduled to leave the simulation.
    pub fn removal(&self) -> Option<RemovalReason> {
        self.removal
    }

    pub fn is_marked(&self) -> bool {
        self.removal.is_some()
    }

    pub(crate) fn is_expired(&self, elapsed: f64) -> bool {
        elapsed >= self.deadline
    }

    /// Marks the projectile for removal. The first reason wins.
    pub(crate) fn mark(&mut self, reason: RemovalReason) -> bool {
        if self.removal.is_some() {
            return false;
        }
        self.removal = Some(reason);
        true
    }

    pub(crate) fn destroy_renderer(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            renderer.destroy();
        }
    }

    /// Advances one frame: integrate, resolve collisions, enforce the range cap, render.
    pub(crate) fn step<S: SceneQuery + ?Sized>(&mut self, dt: f32, scene: &S) {
        let origin = self.position;
        let initial_velocity = self.velocity;

        self.velocity += self.acceleration * dt;
        // Trapezoidal displacement over the step.
        let predicted = (initial_velocity + self.velocity) * (dt * 0.5);

        if !self.params.can_collide || predicted == Vec3::ZERO {
            self.position += predicted;
        } else {
            let hit = scene.cast(origin, predicted, &self.ignore);
            match hit.object {
                None => self.position = hit.point,
                Some(object) => {
                    let penetrated = self.params.penetration
                        && self.try_penetrate(
                            scene,
                            object,
                            predicted,
                            hit.point,
                            initial_velocity.length(),
                        );

                    if !penetrated {
                        self.position = hit.point;
                        if self.params.bounce {
                            self.velocity = reflect(self.velocity, hit.normal) * RESTITUTION;
                            log::trace!("bounce off {object:?} at {}", hit.point);
                        } else {
                            self.mark(RemovalReason::Impact);
                        }
                    }

                    if let Some(on_touch) = self.on_touch.as_mut() {
                        let touch = Touch {
                            object,
                            point: hit.point,
                            normal: hit.normal,
                            direction: self.velocity.normalize_or_zero(),
                        };
                        if on_touch(&touch) {
                            self.mark(RemovalReason::Touch);
                            self.destroy_renderer();
                            return;
                        }
                    }
                }
            }
        }

        let delta = self.position - origin;
        let Some((length, direction)) = length_and_direction(delta) else {
            return;
        };

        self.traveled += length;
        self.traveled_squared += delta.length_squared();
        if self.traveled_squared > self.max_range_squared {
            self.mark(RemovalReason::OutOfRange);
            return;
        }

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(origin, direction);
        }
    }

    /// Probes for the far side of `object` and moves through it when the
    /// attenuated exit speed stays above `min_exit_velocity`.
    fn try_penetrate<S: SceneQuery + ?Sized>(
        &mut self,
        scene: &S,
        object: EntityId,
        predicted: Vec3,
        entry: Vec3,
        speed: f32,
    ) -> bool {
        let Some(extent) = scene.extent(object) else {
            return false;
        };
        let travel = predicted.normalize_or_zero();
        let probe = travel * extent;

        let candidate = scene.cast(entry, probe, &self.ignore).point;
        let exit = scene.cast(candidate, -probe, &self.ignore).point;
        let distance = travel.dot(exit - entry);
        if distance <= 0.0 {
            return false;
        }

        let max_distance = (speed / self.params.min_exit_velocity).ln() / self.params.resistance;
        if distance >= max_distance {
            return false;
        }

        self.position = exit;
        self.velocity *= (-self.params.resistance * distance).exp();
        log::trace!("penetrated {object:?} over {distance:.3}");
        true
    }
}
