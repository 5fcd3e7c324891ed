//! # QUADRA Rendering
//!
//! Texture-batched sprite renderer.
//!
//! ## Performance Targets
//!
//! - Draw calls: one per run of equal (texture, layer), times
//!   `ceil(quads / staging_quads)`
//! - Allocations: none once the pending pool and staging buffer are warm
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────┐   add_sprite    ┌──────────────────┐
//! │ DisplayComponents  │ ──────────────▶ │  BatchRenderer   │
//! └────────────────────┘                 │  sort + stream   │
//!                                        └────────┬─────────┘
//!                                                 │ draw_batch
//!                                        ┌────────▼─────────┐
//!                                        │   DrawBackend    │
//!                                        │ (SoftwareBackend)│
//!                                        └──────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod backend;
pub mod batch;
pub mod error;
pub mod software;
pub mod stats;
pub mod texture;

pub use backend::{Camera, DrawBackend};
pub use batch::BatchRenderer;
pub use error::{RenderError, RenderResult};
pub use software::{BlitStats, Framebuffer, SoftwareBackend, UpscaleCache};
pub use stats::RenderStats;
pub use texture::{Texture, TextureAtlas, TextureSource};
