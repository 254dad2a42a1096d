//! Additional math helpers layered on top of `glam`.

use glam::Vec3;

/// Reflects `velocity` about the plane with unit `normal`: `v - 2(v·n)n`.
pub fn reflect(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Splits `delta` into its length and unit direction.
///
/// Returns `None` for zero-length or non-finite input instead of a NaN direction.
pub fn length_and_direction(delta: Vec3) -> Option<(f32, Vec3)> {
    let length = delta.length();
    if length > 0.0 && length.is_finite() {
        Some((length, delta / length))
    } else {
        None
    }
}
