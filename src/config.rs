//! Global configuration constants for the Projectile Tracer engine.

/// Default lifespan of a projectile (in seconds).
pub const DEFAULT_LIFE: f32 = 2.0;

/// Default maximum travel distance (in studs).
pub const DEFAULT_MAX_RANGE: f32 = 5000.0;

/// Default speed floor below which a penetration attempt fails.
pub const DEFAULT_MIN_EXIT_VELOCITY: f32 = 100.0;

/// Default exponential attenuation coefficient applied while penetrating.
pub const DEFAULT_RESISTANCE: f32 = 1.0;

/// Fraction of speed retained after a bounce.
pub const RESTITUTION: f32 = 0.9;

/// Default radius of the line primitive drawn by [`crate::render::LineRenderer`].
pub const DEFAULT_LINE_RADIUS: f32 = 0.05;

/// Ray hits closer than this to the ray origin are discarded.
///
/// Projectiles resume from the surface they just struck (bounce) or exited
/// (penetration); the next cast must not report that same surface again.
pub const RAY_EPSILON: f32 = 1e-4;

/// Default host tick (in seconds), used by demos and benchmarks.
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;
