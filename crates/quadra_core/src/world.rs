//! # World
//!
//! The entity manager plus one pool per component type. All pools share the
//! manager's capacity, so an entity id is a valid index into every pool.

use std::sync::Arc;

use quadra_shared::EngineConfig;
use tracing::info;

use crate::collision::{CollisionComponent, CollisionSystem};
use crate::ecs::{ComponentPool, DestroyQueue, Entity, EntityManager, Velocity};
use crate::error::CoreResult;
use crate::geometry::DisplayComponent;

/// Container for all entities and components.
///
/// All memory is allocated at creation. Spawning, destroying and component
/// access never resize anything.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::with_capacity(128, 8);
///
/// let ship = world.spawn()?;
/// world.velocities.add(ship, Velocity::new(1.0, 0.0));
/// world.mark(ship);
/// world.purge_marked();
/// ```
pub struct World {
    entities: EntityManager,

    // =========================================================================
    // Component Pools - Add new component types here, then in purge_marked
    // =========================================================================
    /// Visual components.
    pub displays: ComponentPool<DisplayComponent>,
    /// Collision components.
    pub collisions: ComponentPool<CollisionComponent>,
    /// Velocity components.
    pub velocities: ComponentPool<Velocity>,

    pub(crate) collider: CollisionSystem,
}

impl World {
    /// Creates a world with `capacity` entity slots and `buckets` destroy-queue shards.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` or `buckets` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize, buckets: usize) -> Self {
        Self {
            entities: EntityManager::new(capacity, buckets),
            displays: ComponentPool::new(capacity),
            collisions: ComponentPool::new(capacity),
            velocities: ComponentPool::new(capacity),
            collider: CollisionSystem::new(),
        }
    }

    /// Creates a world sized by a validated configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        info!(
            max_entities = config.max_entities,
            destroy_buckets = config.destroy_buckets,
            "creating world"
        );
        Self::with_capacity(config.max_entities, config.destroy_buckets)
    }

    /// Entity slot count.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entities.capacity()
    }

    /// Live entity count.
    #[inline]
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.entities.alive_count()
    }

    /// Whether `entity` is currently allocated.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// The entity manager.
    #[must_use]
    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    /// Allocates an entity with no components.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EntitiesExhausted`](crate::CoreError::EntitiesExhausted)
    /// when every slot is in use.
    pub fn spawn(&mut self) -> CoreResult<Entity> {
        self.entities.add_entity()
    }

    /// Queues `entity` for destruction at the end of the tick.
    #[inline]
    pub fn mark(&self, entity: Entity) {
        self.entities.mark_entity(entity);
    }

    /// A handle for marking entities from callbacks that cannot borrow the world.
    #[must_use]
    pub fn destroy_queue(&self) -> Arc<DestroyQueue> {
        self.entities.destroy_queue()
    }

    /// Frees every marked entity and drops its components from all pools.
    ///
    /// Returns the freed ids, each at most once.
    pub fn purge_marked(&mut self) -> Vec<Entity> {
        let destroyed = self.entities.remove_marked();
        for &entity in &destroyed {
            self.displays.remove(entity);
            self.collisions.remove(entity);
            self.velocities.remove(entity);
        }
        destroyed
    }

    /// The display component of `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingComponent`](crate::CoreError::MissingComponent)
    /// if it has none.
    pub fn display(&self, entity: Entity) -> CoreResult<&DisplayComponent> {
        self.displays.get_checked(entity)
    }

    /// Mutable display component of `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingComponent`](crate::CoreError::MissingComponent)
    /// if it has none.
    pub fn display_mut(&mut self, entity: Entity) -> CoreResult<&mut DisplayComponent> {
        self.displays.get_checked_mut(entity)
    }

    /// The collision component of `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingComponent`](crate::CoreError::MissingComponent)
    /// if it has none.
    pub fn collision(&self, entity: Entity) -> CoreResult<&CollisionComponent> {
        self.collisions.get_checked(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::geometry::RenderLayer;
    use quadra_shared::Vec2;

    #[test]
    fn test_spawn_until_exhausted() {
        let mut world = World::with_capacity(2, 1);
        assert!(world.spawn().is_ok());
        assert!(world.spawn().is_ok());
        assert_eq!(world.spawn(), Err(CoreError::EntitiesExhausted { capacity: 2 }));
    }

    #[test]
    fn test_purge_clears_every_pool() {
        let mut world = World::with_capacity(8, 2);
        let e = world.spawn().unwrap();
        world.displays.add(e, DisplayComponent::quad(Vec2::ZERO, Vec2::ONE, RenderLayer::World, None));
        world.collisions.add(e, CollisionComponent::default());
        world.velocities.add(e, Velocity::new(1.0, 0.0));

        world.mark(e);
        assert!(world.display(e).is_ok());
        assert_eq!(world.purge_marked(), vec![e]);

        assert!(!world.is_alive(e));
        assert!(!world.displays.exists(e));
        assert!(!world.collisions.exists(e));
        assert!(!world.velocities.exists(e));
        assert_eq!(
            world.display(e).unwrap_err(),
            CoreError::MissingComponent { entity: e, component: "display" }
        );
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig::default();
        let world = World::from_config(&config);
        assert_eq!(world.capacity(), config.max_entities);
        assert_eq!(world.destroy_queue().bucket_count(), config.destroy_buckets);
    }

    #[test]
    fn test_collision_accessor_missing() {
        let mut world = World::with_capacity(4, 1);
        let e = world.spawn().unwrap();
        assert!(matches!(world.collision(e), Err(CoreError::MissingComponent { .. })));
        assert!(world.display_mut(e).is_err());
    }
}
