//! Trajectory renderers: pluggable visuals for a projectile's path.

pub mod line;
pub mod part;

pub use line::{LineHandle, LinePool, LineRenderer, LineSegment};
pub use part::PartRenderer;

use glam::Vec3;

use crate::utils::allocator::EntityId;

/// Capability a projectile draws its trajectory through.
///
/// Each projectile owns exactly one renderer; it is destroyed together with
/// the projectile.
pub trait TrajectoryRenderer: Send {
    /// Draws the segment traveled this step, starting at `origin` along unit `direction`.
    fn render(&mut self, origin: Vec3, direction: Vec3);

    /// Releases or recycles the renderer's drawing resources.
    fn destroy(self: Box<Self>);

    /// Objects owned by this renderer that its projectile must never collide with.
    fn ignore_set(&self) -> &[EntityId] {
        &[]
    }
}
