//! # QUADRA Shared
//!
//! Common types used by both the simulation core and the renderer.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a graphics API. If you need draw
//! types, put them in `quadra_rendering`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod atlas;
pub mod config;
pub mod constants;
pub mod math;

pub use atlas::{AtlasGrid, TextureId};
pub use config::{ConfigError, EngineConfig, PixelFormat, RenderConfig};
pub use constants::{COLLISION_DETECT_BITS, COLLISION_SIGNAL_BITS, COLLISION_TILE_BITS, MAX_ENTITIES, STAGING_QUADS};
pub use math::{Bounds, Vec2};
