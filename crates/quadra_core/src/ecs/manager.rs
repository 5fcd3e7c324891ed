//! # Entity Manager
//!
//! Allocates entity IDs from a freelist and defers destruction.
//!
//! ## Lifecycle
//!
//! ```text
//! free ──add_entity──▶ active ──mark_entity──▶ pending ──remove_marked──▶ free
//! ```
//!
//! Marks land in one of N [`DestroyQueue`] shards, picked per calling
//! thread, each behind its own lock. `remove_marked` is the only place
//! where an entity actually dies. It runs once per tick, after every system
//! that might still look at the entity, and the caller then purges every
//! component pool for the returned IDs.

use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::bitset::EntitySet;
use super::entity::Entity;
use crate::error::{CoreError, CoreResult};

/// Source of per-thread shard indices.
static NEXT_SHARD: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static SHARD: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Stable shard index for the calling thread.
fn shard_index() -> usize {
    SHARD.with(|shard| {
        shard.get().unwrap_or_else(|| {
            let assigned = NEXT_SHARD.fetch_add(1, Ordering::Relaxed);
            shard.set(Some(assigned));
            assigned
        })
    })
}

/// Sharded queue of entities marked for destruction.
///
/// Shareable (`Arc`) so collision callbacks and other call sites can mark
/// entities without holding the [`EntityManager`].
pub struct DestroyQueue {
    buckets: Box<[Mutex<Vec<Entity>>]>,
}

impl DestroyQueue {
    /// Creates a queue with `bucket_count` shards (at least one).
    #[must_use]
    pub fn new(bucket_count: usize) -> Self {
        let buckets = (0..bucket_count.max(1))
            .map(|_| Mutex::new(Vec::new()))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self { buckets }
    }

    /// Number of shards.
    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Queues `entity` in the calling thread's shard.
    ///
    /// Marking twice queues twice; the drain tolerates duplicates.
    pub fn mark(&self, entity: Entity) {
        let shard = shard_index() % self.buckets.len();
        self.buckets[shard].lock().push(entity);
    }

    /// Total queued marks across all shards.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.lock().len()).sum()
    }

    /// Moves every queued mark into `out`, one shard lock at a time.
    pub fn drain_into(&self, out: &mut Vec<Entity>) {
        for bucket in self.buckets.iter() {
            let mut pending = bucket.lock();
            out.extend(pending.drain(..));
        }
    }
}

/// Freelist-based entity allocator with deferred destruction.
pub struct EntityManager {
    /// Free entity IDs. Popped from the front by swapping with the back.
    free: Vec<Entity>,
    /// Currently allocated (active or pending) entities.
    alive: EntitySet,
    /// Pending destructions.
    queue: Arc<DestroyQueue>,
}

impl EntityManager {
    /// Creates a manager owning IDs `0..capacity`.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or does not fit below [`Entity::NULL`].
    #[must_use]
    pub fn new(capacity: usize, bucket_count: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            capacity < u32::MAX as usize,
            "Capacity must leave room for the null entity"
        );

        Self {
            free: (0..capacity).map(Entity::from_index).collect(),
            alive: EntitySet::new(capacity),
            queue: Arc::new(DestroyQueue::new(bucket_count)),
        }
    }

    /// Maximum number of live entities.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.alive.capacity()
    }

    /// Number of allocated entities (active or pending).
    #[inline]
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }

    /// Whether `entity` is allocated.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(entity.index())
    }

    /// Allocates an entity.
    ///
    /// Recycled IDs are not handed out in release order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EntitiesExhausted`] when the freelist is empty.
    pub fn add_entity(&mut self) -> CoreResult<Entity> {
        if self.free.is_empty() {
            tracing::warn!(capacity = self.capacity(), "entity freelist exhausted");
            return Err(CoreError::EntitiesExhausted {
                capacity: self.capacity(),
            });
        }

        let entity = self.free.swap_remove(0);
        self.alive.insert(entity.index());
        tracing::trace!(%entity, "entity allocated");
        Ok(entity)
    }

    /// Marks `entity` for destruction at the next [`EntityManager::remove_marked`].
    #[inline]
    pub fn mark_entity(&self, entity: Entity) {
        self.queue.mark(entity);
    }

    /// Shared handle to the destroy queue.
    #[must_use]
    pub fn destroy_queue(&self) -> Arc<DestroyQueue> {
        Arc::clone(&self.queue)
    }

    /// Number of queued marks, duplicates included.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue.pending()
    }

    /// Destroys every marked entity and returns them.
    ///
    /// Each ID is returned (and freed) at most once, however many times it
    /// was marked. Marks for IDs that are not allocated are dropped.
    pub fn remove_marked(&mut self) -> Vec<Entity> {
        let mut marked = Vec::new();
        self.queue.drain_into(&mut marked);

        let mut destroyed = Vec::with_capacity(marked.len());
        for entity in marked {
            if !self.alive.remove(entity.index()) {
                tracing::trace!(%entity, "ignoring duplicate or stale destroy mark");
                continue;
            }
            self.free.push(entity);
            destroyed.push(entity);
        }

        if !destroyed.is_empty() {
            tracing::debug!(count = destroyed.len(), "destroyed marked entities");
        }
        destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_until_exhausted() {
        let mut manager = EntityManager::new(4, 2);
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(manager.add_entity().unwrap());
        }
        seen.sort();
        assert_eq!(seen, (0..4).map(Entity::new).collect::<Vec<_>>());
        assert_eq!(
            manager.add_entity(),
            Err(CoreError::EntitiesExhausted { capacity: 4 })
        );
    }

    #[test]
    fn test_pop_front_swaps_with_back() {
        let mut manager = EntityManager::new(4, 1);
        assert_eq!(manager.add_entity().unwrap(), Entity::new(0));
        // The back element took the front slot
        assert_eq!(manager.add_entity().unwrap(), Entity::new(3));
    }

    #[test]
    fn test_mark_and_remove() {
        let mut manager = EntityManager::new(8, 4);
        let entity = manager.add_entity().unwrap();

        manager.mark_entity(entity);
        assert!(manager.is_alive(entity));
        assert_eq!(manager.pending_count(), 1);

        assert_eq!(manager.remove_marked(), vec![entity]);
        assert!(!manager.is_alive(entity));
        assert_eq!(manager.pending_count(), 0);
        assert_eq!(manager.alive_count(), 0);
    }

    #[test]
    fn test_duplicate_marks_free_once() {
        let mut manager = EntityManager::new(2, 2);
        let a = manager.add_entity().unwrap();
        let b = manager.add_entity().unwrap();

        manager.mark_entity(a);
        manager.mark_entity(a);
        assert_eq!(manager.remove_marked(), vec![a]);

        // Only one slot came back: a single allocation succeeds, the next fails
        assert_eq!(manager.add_entity().unwrap(), a);
        assert!(manager.add_entity().is_err());
        assert!(manager.is_alive(b));
    }

    #[test]
    fn test_stale_mark_ignored() {
        let mut manager = EntityManager::new(4, 1);
        manager.mark_entity(Entity::new(2));
        manager.mark_entity(Entity::NULL);
        assert!(manager.remove_marked().is_empty());
    }

    #[test]
    fn test_marks_from_many_threads() {
        let mut manager = EntityManager::new(64, 4);
        let entities: Vec<Entity> = (0..64).map(|_| manager.add_entity().unwrap()).collect();
        let queue = manager.destroy_queue();

        std::thread::scope(|scope| {
            for chunk in entities.chunks(16) {
                let queue = Arc::clone(&queue);
                scope.spawn(move || {
                    for &entity in chunk {
                        queue.mark(entity);
                    }
                });
            }
        });

        let mut destroyed = manager.remove_marked();
        destroyed.sort();
        let mut expected = entities;
        expected.sort();
        assert_eq!(destroyed, expected);
        assert_eq!(manager.alive_count(), 0);
    }
}
