//! # Sprite Geometry
//!
//! Every visual component owns one flat vertex buffer, cut into quads of
//! four vertices and grouped into subsprites. Quad corners are always stored
//! top-left, top-right, bottom-right, bottom-left; every operation here
//! relies on that order.

mod display;
mod vertex;

pub use display::{DisplayComponent, ALL_SUBSPRITES};
pub use vertex::{RenderLayer, Subsprite, Vertex, VERTICES_PER_QUAD};
