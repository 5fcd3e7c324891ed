//! # QUADRA Core Engine
//!
//! Fixed-capacity Entity Component System, sprite geometry and collision
//! for a 2D sprite engine:
//! - 128 entity slots, one bitset-indexed pool per component type
//! - Deferred destruction through sharded, lock-protected buckets
//! - Quads grouped into subsprites, stored in one flat vertex buffer
//! - Team-filtered Separating Axis Theorem collision
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations in hot path** - Pools are allocated once
//! 2. **Systems are plain functions** - They borrow the pools they touch for one pass
//! 3. **Destruction is last** - Nothing observes a half-destroyed entity within a tick
//!
//! ## Example
//!
//! ```rust,ignore
//! use quadra_core::{World, DisplayComponent, RenderLayer};
//!
//! let mut world = World::with_capacity(128, 8);
//! let player = world.spawn()?;
//! let mut display = DisplayComponent::default();
//! display.add_subsprite(1, RenderLayer::World);
//! world.displays.add(player, display);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod collision;
pub mod ecs;
pub mod error;
pub mod geometry;
pub mod systems;
pub mod world;

pub use collision::{
    CollideCallback, CollisionComponent, CollisionFlags, CollisionSystem, Quadrant, Teams,
    TileCollision, TileData, TileTable, Tilemap,
};
pub use ecs::{Component, ComponentPool, DestroyQueue, Entity, EntityManager, EntitySet, Velocity};
pub use error::{CoreError, CoreResult};
pub use geometry::{DisplayComponent, RenderLayer, Subsprite, Vertex, ALL_SUBSPRITES};
pub use systems::TickPhase;
pub use world::World;

pub use quadra_shared::{AtlasGrid, Bounds, TextureId, Vec2};
