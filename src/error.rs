//! Errors surfaced while configuring projectiles.

/// Rejected projectile configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Position, velocity, or acceleration contains NaN or infinity
    #[error("{0} must be finite")]
    NonFiniteVector(&'static str),

    /// Lifespan is negative or not finite
    #[error("life must be finite and non-negative, got {0}")]
    InvalidLife(f32),

    /// Travel cap is negative or not finite
    #[error("max_range must be finite and non-negative, got {0}")]
    InvalidMaxRange(f32),

    /// Exit speed floor is zero, negative, or not finite
    #[error("min_exit_velocity must be finite and positive, got {0}")]
    InvalidMinExitVelocity(f32),

    /// Attenuation coefficient is zero, negative, or not finite
    #[error("resistance must be finite and positive, got {0}")]
    InvalidResistance(f32),
}
