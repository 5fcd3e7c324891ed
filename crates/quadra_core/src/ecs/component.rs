//! # Component System
//!
//! Components are data owned exclusively by their pool. Each one carries a
//! back-reference to its entity, written by [`ComponentPool::add`], so a
//! system holding only the component can still signal the entity (damage,
//! collisions) without a reverse lookup table.
//!
//! [`ComponentPool::add`]: super::ComponentPool::add

use bytemuck::{Pod, Zeroable};
use quadra_shared::Vec2;

use super::entity::Entity;

/// Trait for ECS components.
///
/// Components must be:
/// - `Default`: pools pre-fill every slot at creation
/// - `Send + Sync`: pools are handed to systems by reference
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Health { owner: Entity, hp: i32 }
///
/// impl Component for Health {
///     const NAME: &'static str = "health";
///     fn owner(&self) -> Entity { self.owner }
///     fn set_owner(&mut self, owner: Entity) { self.owner = owner; }
/// }
/// ```
pub trait Component: Default + Send + Sync + 'static {
    /// Human-readable type name used in error messages.
    const NAME: &'static str;

    /// The entity this component belongs to.
    fn owner(&self) -> Entity;

    /// Writes the owning entity. Called once, at add time.
    fn set_owner(&mut self, owner: Entity);
}

/// Velocity component, in world units per second.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Velocity {
    /// Linear velocity.
    pub linear: Vec2,
    /// Owning entity.
    pub owner: Entity,
    /// Padding for 16-byte alignment.
    pub _padding: u32,
}

impl Velocity {
    /// Creates a new velocity with no owner yet.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            linear: Vec2::new(x, y),
            owner: Entity::NULL,
            _padding: 0,
        }
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Component for Velocity {
    const NAME: &'static str = "velocity";

    fn owner(&self) -> Entity {
        self.owner
    }

    fn set_owner(&mut self, owner: Entity) {
        self.owner = owner;
    }
}
