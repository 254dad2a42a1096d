//! Utility helpers: generational allocator, math extensions, and logging timers.

pub mod allocator;
pub mod logging;
pub mod math;

pub use allocator::{Arena, ArenaKey, EntityId, GenerationalId, ProjectileId};
pub use math::*;
