//! Core types: transforms, colors, and the projectile itself.

pub mod projectile;
pub mod types;

pub use projectile::{
    Projectile, ProjectileBuilder, ProjectileConfig, ProjectileParams, RemovalReason, Touch,
    TouchCallback,
};
pub use types::{Color, Transform};
