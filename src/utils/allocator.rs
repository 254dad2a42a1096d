use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Slot index plus the generation it was handed out under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct GenerationalId {
    pub index: usize,
    pub generation: u32,
}

impl GenerationalId {
    pub fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Handle to an object living in the host world (scene geometry, rendered parts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EntityId(pub GenerationalId);

/// Handle to a projectile registered with a [`crate::world::ProjectileWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ProjectileId(pub GenerationalId);

/// Shared behaviour of the generational handle newtypes.
pub trait ArenaKey: Copy {
    fn from_raw(id: GenerationalId) -> Self;
    fn raw(&self) -> GenerationalId;
}

macro_rules! arena_key {
    ($name:ident) => {
        impl ArenaKey for $name {
            fn from_raw(id: GenerationalId) -> Self {
                Self(id)
            }

            fn raw(&self) -> GenerationalId {
                self.0
            }
        }

        impl $name {
            pub fn index(&self) -> usize {
                self.0.index
            }

            pub fn generation(&self) -> u32 {
                self.0.generation
            }
        }
    };
}

arena_key!(EntityId);
arena_key!(ProjectileId);

/// Generational arena that hands out stable IDs while preventing use-after-free.
///
/// Removing an item bumps its slot generation, so handles to removed items
/// stop resolving even after the slot is reused.
pub struct Arena<K, T> {
    items: Vec<Option<T>>,
    generations: Vec<u32>,
    free_list: VecDeque<usize>,
    _key: std::marker::PhantomData<K>,
}

impl<K: ArenaKey, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ArenaKey, T> Arena<K, T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            generations: Vec::new(),
            free_list: VecDeque::new(),
            _key: std::marker::PhantomData,
        }
    }

    pub fn insert(&mut self, item: T) -> K {
        if let Some(index) = self.free_list.pop_front() {
            let generation = self.generations[index];
            self.items[index] = Some(item);
            return K::from_raw(GenerationalId::new(index, generation));
        }

        let index = self.items.len();
        self.items.push(Some(item));
        self.generations.push(0);
        K::from_raw(GenerationalId::new(index, 0))
    }

    pub fn get(&self, id: K) -> Option<&T> {
        if self.is_valid(id) {
            self.items.get(id.raw().index).and_then(|slot| slot.as_ref())
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: K) -> Option<&mut T> {
        if self.is_valid(id) {
            self.items
                .get_mut(id.raw().index)
                .and_then(|slot| slot.as_mut())
        } else {
            None
        }
    }

    pub fn contains(&self, id: K) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: K) -> Option<T> {
        if !self.is_valid(id) {
            return None;
        }
        let index = id.raw().index;
        let slot = self.items.get_mut(index)?;
        if slot.is_some() {
            self.generations[index] = self.generations[index].wrapping_add(1);
            self.free_list.push_back(index);
        }
        slot.take()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.items.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref().map(|item| {
                (
                    K::from_raw(GenerationalId::new(index, self.generations[index])),
                    item,
                )
            })
        })
    }

    pub fn len(&self) -> usize {
        self.items.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_valid(&self, id: K) -> bool {
        let raw = id.raw();
        self.generations
            .get(raw.index)
            .copied()
            .map(|gen| gen == raw.generation)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_handles_stop_resolving_after_reuse() {
        let mut arena: Arena<ProjectileId, &str> = Arena::new();
        let first = arena.insert("first");
        assert_eq!(arena.remove(first), Some("first"));

        let second = arena.insert("second");
        assert_eq!(second.index(), first.index());
        assert_ne!(second.generation(), first.generation());
        assert!(arena.get(first).is_none());
        assert_eq!(arena.get(second), Some(&"second"));
    }

    #[test]
    fn double_remove_is_a_no_op() {
        let mut arena: Arena<EntityId, u32> = Arena::new();
        let id = arena.insert(7);
        let other = arena.insert(8);
        assert_eq!(arena.remove(id), Some(7));
        assert_eq!(arena.remove(id), None);
        assert_eq!(arena.len(), 1);
        assert!(arena.contains(other));
    }
}
