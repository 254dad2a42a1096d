use std::sync::Arc;

use glam::{Quat, Vec3};
use parking_lot::Mutex;

use crate::{config::DEFAULT_LINE_RADIUS, core::types::Color, render::TrajectoryRenderer};

/// Drawable line primitive. Hosts read these each frame and draw the visible ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub origin: Vec3,
    pub direction: Vec3,
    pub length: f32,
    pub color: Color,
    pub radius: f32,
    pub visible: bool,
}

impl LineSegment {
    fn hidden(color: Color, radius: f32) -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            length: 0.0,
            color,
            radius,
            visible: false,
        }
    }

    /// Midpoint of the segment.
    pub fn center(&self) -> Vec3 {
        self.origin + self.direction * (self.length * 0.5)
    }

    pub fn end(&self) -> Vec3 {
        self.origin + self.direction * self.length
    }

    /// Rotation taking local `-Z` onto the segment direction.
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_arc(Vec3::NEG_Z, self.direction.normalize_or(Vec3::NEG_Z))
    }
}

/// Index of a slot in a [`LinePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineHandle(usize);

#[derive(Default)]
struct LineSlots {
    lines: Vec<LineSegment>,
    recycled: Vec<usize>,
}

/// Shared recycle pool of line primitives.
///
/// Slots are interchangeable; released slots are reused last-in first-out.
#[derive(Clone, Default)]
pub struct LinePool {
    slots: Arc<Mutex<LineSlots>>,
}

impl LinePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, color: Color, radius: f32) -> LineHandle {
        let mut slots = self.slots.lock();
        let segment = LineSegment::hidden(color, radius);
        match slots.recycled.pop() {
            Some(index) => {
                slots.lines[index] = segment;
                LineHandle(index)
            }
            None => {
                slots.lines.push(segment);
                LineHandle(slots.lines.len() - 1)
            }
        }
    }

    pub fn release(&self, handle: LineHandle) {
        let mut slots = self.slots.lock();
        if let Some(line) = slots.lines.get_mut(handle.0) {
            line.visible = false;
        }
        slots.recycled.push(handle.0);
    }

    pub fn update(&self, handle: LineHandle, f: impl FnOnce(&mut LineSegment)) {
        if let Some(line) = self.slots.lock().lines.get_mut(handle.0) {
            f(line);
        }
    }

    pub fn get(&self, handle: LineHandle) -> Option<LineSegment> {
        self.slots.lock().lines.get(handle.0).copied()
    }

    /// Snapshot of every line currently on screen.
    pub fn visible_segments(&self) -> Vec<LineSegment> {
        self.slots
            .lock()
            .lines
            .iter()
            .filter(|line| line.visible)
            .copied()
            .collect()
    }

    /// Total primitives ever created by this pool.
    pub fn allocated(&self) -> usize {
        self.slots.lock().lines.len()
    }

    /// Primitives waiting for reuse.
    pub fn available(&self) -> usize {
        self.slots.lock().recycled.len()
    }
}

/// Default renderer: one pooled line stretched over the latest step.
pub struct LineRenderer {
    pool: LinePool,
    handle: LineHandle,
    previous: Option<Vec3>,
}

impl LineRenderer {
    pub fn new(pool: &LinePool, color: Color) -> Self {
        Self::with_radius(pool, color, DEFAULT_LINE_RADIUS)
    }

    pub fn with_radius(pool: &LinePool, color: Color, radius: f32) -> Self {
        Self {
            pool: pool.clone(),
            handle: pool.acquire(color, radius),
            previous: None,
        }
    }

    pub fn handle(&self) -> LineHandle {
        self.handle
    }
}

impl TrajectoryRenderer for LineRenderer {
    fn render(&mut self, origin: Vec3, direction: Vec3) {
        if let Some(previous) = self.previous {
            let length = origin.distance(previous);
            self.pool.update(self.handle, |line| {
                line.origin = origin;
                line.direction = direction;
                line.length = length;
                line.visible = true;
            });
        }
        self.previous = Some(origin);
    }

    fn destroy(self: Box<Self>) {
        self.pool.release(self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_slots_are_reused_last_in_first_out() {
        let pool = LinePool::new();
        let a = pool.acquire(Color::WHITE, 0.1);
        let b = pool.acquire(Color::WHITE, 0.1);
        pool.release(a);
        pool.release(b);

        assert_eq!(pool.acquire(Color::RED, 0.1), b);
        assert_eq!(pool.acquire(Color::RED, 0.1), a);
        assert_eq!(pool.allocated(), 2);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn reacquired_slot_starts_hidden_with_new_color() {
        let pool = LinePool::new();
        let handle = pool.acquire(Color::WHITE, 0.1);
        pool.update(handle, |line| line.visible = true);
        pool.release(handle);

        let reused = pool.acquire(Color::YELLOW, 0.2);
        let line = pool.get(reused).unwrap();
        assert!(!line.visible);
        assert_eq!(line.color, Color::YELLOW);
        assert_eq!(line.radius, 0.2);
    }
}
