//! # Engine Constants
//!
//! Sizing values that form an implicit contract between the core, the
//! renderer and gameplay code. The runtime [`EngineConfig`](crate::EngineConfig)
//! defaults to these.

/// Maximum number of live entities (and the capacity of every pool).
pub const MAX_ENTITIES: usize = 128;

/// Renderer staging buffer size, in quads.
pub const STAGING_QUADS: usize = 1024;

/// Vertices per quad.
pub const VERTICES_PER_QUAD: usize = 4;

/// Default number of destroy-queue shards.
pub const DESTROY_BUCKETS: usize = 8;

/// Tolerance when matching a blit scale against the cached 2x / 4x copies.
pub const UPSCALE_EPSILON: f32 = 0.01;

// =============================================================================
// COLLISION FLAG BYTE LAYOUT
// =============================================================================

/// Bits 0..3: teams this shape reacts to.
pub const COLLISION_DETECT_BITS: u8 = 0b0000_0111;

/// Bits 3..6: teams this shape broadcasts.
pub const COLLISION_SIGNAL_BITS: u8 = 0b0011_1000;

/// Bits 6..8: tilemap collision type.
pub const COLLISION_TILE_BITS: u8 = 0b1100_0000;
