//! Collision component.

use std::fmt;
use std::sync::Arc;

use super::flags::{CollisionFlags, Teams, TileCollision};
use crate::ecs::{Component, Entity};

/// Collision notification, called as `(owner, other)`.
///
/// Runs inside the collision pass with the pools borrowed. Mark entities
/// through a cloned [`DestroyQueue`](crate::DestroyQueue) rather than
/// touching the world directly.
pub type CollideCallback = Arc<dyn Fn(Entity, Entity) + Send + Sync>;

/// Collision settings of one entity. Shapes come from its display component.
#[derive(Clone, Default)]
pub struct CollisionComponent {
    owner: Entity,
    /// Team and tilemap flags.
    pub flags: CollisionFlags,
    /// Subsprite indices excluded from every collision test.
    pub disabled_sprites: Vec<usize>,
    /// Called once per colliding pair per pass.
    pub on_collide: Option<CollideCallback>,
}

impl CollisionComponent {
    /// Creates a component with no callback and every subsprite enabled.
    #[must_use]
    pub fn new(flags: CollisionFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    /// Shorthand for [`CollisionFlags::new`] plus [`CollisionComponent::new`].
    #[must_use]
    pub fn with_teams(detect: Teams, signal: Teams, tile: TileCollision) -> Self {
        Self::new(CollisionFlags::new(detect, signal, tile))
    }

    /// Attaches a collision callback.
    #[must_use]
    pub fn on_collide<F>(mut self, callback: F) -> Self
    where
        F: Fn(Entity, Entity) + Send + Sync + 'static,
    {
        self.on_collide = Some(Arc::new(callback));
        self
    }

    /// Excludes a subsprite from collision tests.
    pub fn disable_sprite(&mut self, subsprite: usize) {
        if !self.disabled_sprites.contains(&subsprite) {
            self.disabled_sprites.push(subsprite);
        }
    }

    /// Includes a previously excluded subsprite again.
    pub fn enable_sprite(&mut self, subsprite: usize) {
        self.disabled_sprites.retain(|&s| s != subsprite);
    }

    /// Whether a subsprite takes part in collision tests.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self, subsprite: usize) -> bool {
        !self.disabled_sprites.contains(&subsprite)
    }

    /// Invokes the callback, if any, with `other`.
    pub fn notify(&self, other: Entity) {
        if let Some(callback) = &self.on_collide {
            callback(self.owner, other);
        }
    }
}

impl fmt::Debug for CollisionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionComponent")
            .field("owner", &self.owner)
            .field("flags", &self.flags)
            .field("disabled_sprites", &self.disabled_sprites)
            .field("on_collide", &self.on_collide.is_some())
            .finish()
    }
}

impl Component for CollisionComponent {
    const NAME: &'static str = "collision";

    fn owner(&self) -> Entity {
        self.owner
    }

    fn set_owner(&mut self, owner: Entity) {
        self.owner = owner;
    }
}
