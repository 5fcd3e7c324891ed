//! # Entity Component System
//!
//! A fixed-capacity ECS built for a small, bounded entity count.
//!
//! ## Design Philosophy
//!
//! - Every pool is a plain array plus a parallel presence bitset
//! - Entity IDs are dense indices; there is no generation counter
//! - Components carry their owner, so systems never need a reverse map
//! - Destruction is deferred and flushed once per tick

mod bitset;
mod component;
mod entity;
mod manager;
mod pool;

pub use bitset::{EntitySet, EntitySetIter};
pub use component::{Component, Velocity};
pub use entity::Entity;
pub use manager::{DestroyQueue, EntityManager};
pub use pool::{ComponentPool, Iter, IterMut};
