//! Collars and seams.
//!
//! Both stitch two circular loops of `V` vertices with `V` quads using the
//! same corner order, `[a+i, a+i+1, b+i+1, b+i]`, wrapping the last quad
//! back to vertex 0 of both loops. A collar creates loop `a` itself; a seam
//! only joins two loops that already exist.

use crate::error::{Result, ThreadMeshError};
use crate::region::RegionWriter;
use crate::thread::ring_vertex;

/// Writes `segments` quads joining the loop starting at `from` to the loop
/// starting at `to`.
fn stitch(writer: &mut RegionWriter<'_>, segments: u32, from: u32, to: u32) -> Result<()> {
    for i in 0..segments - 1 {
        writer.push_quad([from + i, from + i + 1, to + i + 1, to + i])?;
    }
    let last = segments - 1;
    writer.push_quad([from + last, from, to, to + last])
}

/// Writes a new ring at (`radius`, `height`) and joins it to `join`.
pub(crate) fn build_collar(
    writer: &mut RegionWriter<'_>,
    segments: u32,
    radius: f64,
    height: f64,
    join: u32,
) -> Result<()> {
    if !radius.is_finite() || !height.is_finite() {
        return Err(ThreadMeshError::contract(format!(
            "collar radius and height must be finite: ({radius}, {height})"
        )));
    }
    if radius <= 0.0 {
        return Err(ThreadMeshError::degenerate(format!(
            "collar radius must be positive: {radius}"
        )));
    }
    let ring = writer.vertex_base();
    for i in 0..segments as usize {
        writer.push_vertex(ring_vertex(radius, height, i, segments))?;
    }
    stitch(writer, segments, ring, join)
}

/// Joins two existing loops without adding vertices.
pub(crate) fn join_loops(
    writer: &mut RegionWriter<'_>,
    segments: u32,
    from: u32,
    to: u32,
) -> Result<()> {
    stitch(writer, segments, from, to)
}
