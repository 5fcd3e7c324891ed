//! # Collision
//!
//! Two independent checks:
//! - Shape vs shape: team-bitmask prefilter, then a Separating Axis Theorem
//!   test over the quads of every enabled subsprite
//! - Shape vs map: per-vertex lookup in a tile occupancy table
//!
//! ## Pair Filtering
//!
//! ```text
//! test(A, B) = (A.signal & B.detect) != 0 || (B.signal & A.detect) != 0
//! ```
//!
//! Most pairs never reach geometry.

mod component;
mod flags;
pub mod sat;
mod system;
mod tilemap;

pub use component::{CollideCallback, CollisionComponent};
pub use flags::{CollisionFlags, Teams, TileCollision};
pub use system::CollisionSystem;
pub use tilemap::{Quadrant, TileData, TileTable, Tilemap};
