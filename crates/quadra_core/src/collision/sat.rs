//! Separating Axis Theorem over quad lists.
//!
//! Each enabled quad contributes its four edge normals as candidate axes.
//! A shape is the union of its enabled quads, projected as one point cloud.
//!
//! The test runs twice, once per shape's own axis set, and either pass
//! finding no separating axis is a collision. Axis sets are never merged.
//! Gameplay is tuned against this behavior, false positives included.
//!
//! Normals are not normalized. Overlap on an axis only compares intervals
//! from the same axis, so the scale cancels out.

use quadra_shared::Vec2;

use crate::geometry::{DisplayComponent, Vertex, VERTICES_PER_QUAD};

/// Vertices of every subsprite not listed in `disabled`.
pub fn enabled_vertices<'a>(
    display: &'a DisplayComponent,
    disabled: &'a [usize],
) -> impl Iterator<Item = &'a Vertex> + 'a {
    display
        .subsprites()
        .iter()
        .enumerate()
        .filter(move |(index, _)| !disabled.contains(index))
        .flat_map(move |(_, sub)| &display.vertices()[sub.range()])
}

/// Appends the edge normals of every enabled quad to `out`.
///
/// Edge `i` runs from corner `i` to corner `(i + 1) % 4`.
pub fn edge_normals(display: &DisplayComponent, disabled: &[usize], out: &mut Vec<Vec2>) {
    for (index, sub) in display.subsprites().iter().enumerate() {
        if disabled.contains(&index) {
            continue;
        }
        for quad in display.vertices()[sub.range()].chunks_exact(VERTICES_PER_QUAD) {
            for i in 0..VERTICES_PER_QUAD {
                let edge = quad[(i + 1) % VERTICES_PER_QUAD].pos - quad[i].pos;
                out.push(edge.perp());
            }
        }
    }
}

/// Projection interval `(min, max)` of the enabled vertices onto `axis`.
///
/// No vertices gives the inverted interval `(f32::MAX, f32::MIN)`, which
/// overlaps nothing.
#[must_use]
pub fn project(display: &DisplayComponent, disabled: &[usize], axis: Vec2) -> (f32, f32) {
    enabled_vertices(display, disabled).fold((f32::MAX, f32::MIN), |(min, max), vertex| {
        let d = vertex.pos.dot(axis);
        (min.min(d), max.max(d))
    })
}

/// True when no axis in `axes` separates the two shapes.
///
/// Intervals that only touch count as separated. An empty axis list is
/// vacuously true; callers skip shapes with no enabled geometry.
#[must_use]
pub fn no_separating_axis(
    axes: &[Vec2],
    a: &DisplayComponent,
    a_disabled: &[usize],
    b: &DisplayComponent,
    b_disabled: &[usize],
) -> bool {
    axes.iter().all(|&axis| {
        let (a_min, a_max) = project(a, a_disabled, axis);
        let (b_min, b_max) = project(b, b_disabled, axis);
        a_min < b_max && b_min < a_max
    })
}

/// Full double-pass test: `a`'s axes, then `b`'s axes. Either pass finding
/// no separating axis reports a collision.
#[must_use]
pub fn shapes_collide(
    a: &DisplayComponent,
    a_disabled: &[usize],
    b: &DisplayComponent,
    b_disabled: &[usize],
) -> bool {
    let mut axes = Vec::new();
    edge_normals(a, a_disabled, &mut axes);
    if no_separating_axis(&axes, a, a_disabled, b, b_disabled) {
        return true;
    }
    axes.clear();
    edge_normals(b, b_disabled, &mut axes);
    no_separating_axis(&axes, a, a_disabled, b, b_disabled)
}
