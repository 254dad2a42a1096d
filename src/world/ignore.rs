use std::sync::Arc;

use parking_lot::Mutex;

use crate::{collision::queries::DetachNotifier, utils::allocator::EntityId};

/// Objects excluded from every projectile's collision queries.
///
/// Projectiles copy the registry when they launch; later edits only affect
/// projectiles launched afterwards.
#[derive(Clone, Default)]
pub struct IgnoreRegistry {
    entries: Arc<Mutex<Vec<EntityId>>>,
}

impl IgnoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `object` once and drops it again when `notifier` reports it detached.
    ///
    /// Returns `false` if the object was already registered.
    pub fn add<N: DetachNotifier + ?Sized>(&self, object: EntityId, notifier: &mut N) -> bool {
        {
            let mut entries = self.entries.lock();
            if entries.contains(&object) {
                return false;
            }
            entries.push(object);
        }

        let entries = Arc::downgrade(&self.entries);
        notifier.on_detach(
            object,
            Box::new(move |detached| {
                if let Some(entries) = entries.upgrade() {
                    entries.lock().retain(|entry| *entry != detached);
                    log::debug!("global ignore dropped detached {detached:?}");
                }
            }),
        );
        log::debug!("global ignore added {object:?}");
        true
    }

    pub fn remove(&self, object: EntityId) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|entry| *entry != object);
        entries.len() != before
    }

    pub fn contains(&self, object: EntityId) -> bool {
        self.entries.lock().contains(&object)
    }

    pub fn snapshot(&self) -> Vec<EntityId> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
