//! # Regions
//!
//! A region is a contiguous vertex range and face range inside a part's
//! shared buffers, owned by exactly one primitive (thread, collar or seam).
//! Regions never overlap; a part's buffer sizes are the sum of its regions.
//!
//! [`RegionWriter`] is the only way primitives touch the buffers. It hands
//! out global vertex indices for the slots it fills and refuses to write past
//! the reserved range, and [`RegionWriter::finish`] refuses to accept a
//! region that left reserved slots unwritten.

use std::ops::Range;

use glam::DVec3;

use crate::error::{BufferKind, Result, ThreadMeshError};
use crate::mesh::Face;

/// Geometric primitive that owns a region, with the boundary loops it
/// exposes (as global index of each loop's first vertex).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Helically swept thread with its bottom and top rings.
    Thread {
        /// First vertex of the bottom ring.
        bottom: u32,
        /// First vertex of the top ring.
        top: u32,
    },
    /// New circular ring joined to an existing loop.
    Collar {
        /// First vertex of the ring this collar creates.
        ring: u32,
        /// First vertex of the loop it is stitched to.
        join: u32,
    },
    /// Face band between two existing loops; owns no vertices.
    Seam {
        /// First vertex of the loop the band starts from.
        from: u32,
        /// First vertex of the loop the band is stitched to.
        to: u32,
    },
}

/// Placement of one primitive inside a part's buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Human readable role inside the part, e.g. `"bore"`.
    pub label: &'static str,
    /// Primitive kind and resolved boundary loops.
    pub kind: RegionKind,
    /// Owned vertex slots.
    pub vertices: Range<usize>,
    /// Owned face slots.
    pub faces: Range<usize>,
}

impl Region {
    /// Number of vertex slots owned by this region.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of face slots owned by this region.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Short primitive name used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            RegionKind::Thread { .. } => "thread",
            RegionKind::Collar { .. } => "collar",
            RegionKind::Seam { .. } => "seam",
        }
    }
}

/// Write cursor over one region's slices of the shared buffers.
pub(crate) struct RegionWriter<'a> {
    label: &'a str,
    vertex_base: u32,
    vertices: &'a mut [DVec3],
    faces: &'a mut [Face],
    vertex_cursor: usize,
    face_cursor: usize,
}

impl<'a> RegionWriter<'a> {
    /// Wraps the slices reserved for a region whose first vertex has global
    /// index `vertex_base`.
    pub(crate) fn new(
        label: &'a str,
        vertex_base: u32,
        vertices: &'a mut [DVec3],
        faces: &'a mut [Face],
    ) -> Self {
        Self {
            label,
            vertex_base,
            vertices,
            faces,
            vertex_cursor: 0,
            face_cursor: 0,
        }
    }

    /// Global index of the region's first vertex slot.
    #[inline]
    pub(crate) fn vertex_base(&self) -> u32 {
        self.vertex_base
    }

    /// Writes the next vertex slot and returns its global index.
    pub(crate) fn push_vertex(&mut self, position: DVec3) -> Result<u32> {
        let reserved = self.vertices.len();
        let Some(slot) = self.vertices.get_mut(self.vertex_cursor) else {
            return Err(ThreadMeshError::size_mismatch(
                self.label,
                BufferKind::Vertices,
                reserved,
                self.vertex_cursor + 1,
            ));
        };
        *slot = position;
        let index = self.vertex_base + self.vertex_cursor as u32;
        self.vertex_cursor += 1;
        Ok(index)
    }

    /// Writes the next face slot.
    pub(crate) fn push_face(&mut self, face: Face) -> Result<()> {
        let reserved = self.faces.len();
        let Some(slot) = self.faces.get_mut(self.face_cursor) else {
            return Err(ThreadMeshError::size_mismatch(
                self.label,
                BufferKind::Faces,
                reserved,
                self.face_cursor + 1,
            ));
        };
        *slot = face;
        self.face_cursor += 1;
        Ok(())
    }

    /// Writes the next face slot as a quad.
    #[inline]
    pub(crate) fn push_quad(&mut self, quad: [u32; 4]) -> Result<()> {
        self.push_face(Face::Quad(quad))
    }

    /// Checks that every reserved slot was written exactly once.
    pub(crate) fn finish(self) -> Result<()> {
        if self.vertex_cursor != self.vertices.len() {
            return Err(ThreadMeshError::size_mismatch(
                self.label,
                BufferKind::Vertices,
                self.vertices.len(),
                self.vertex_cursor,
            ));
        }
        if self.face_cursor != self.faces.len() {
            return Err(ThreadMeshError::size_mismatch(
                self.label,
                BufferKind::Faces,
                self.faces.len(),
                self.face_cursor,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_returns_global_indices() {
        let mut vertices = vec![DVec3::ZERO; 2];
        let mut faces = vec![Face::default(); 1];
        let mut writer = RegionWriter::new("test", 40, &mut vertices, &mut faces);
        assert_eq!(writer.push_vertex(DVec3::X).unwrap(), 40);
        assert_eq!(writer.push_vertex(DVec3::Y).unwrap(), 41);
        writer.push_quad([40, 41, 1, 0]).unwrap();
        writer.finish().unwrap();
        assert_eq!(vertices, vec![DVec3::X, DVec3::Y]);
        assert_eq!(faces[0], Face::Quad([40, 41, 1, 0]));
    }

    #[test]
    fn writer_rejects_overflow() {
        let mut vertices = vec![DVec3::ZERO; 1];
        let mut faces = Vec::new();
        let mut writer = RegionWriter::new("tiny", 0, &mut vertices, &mut faces);
        writer.push_vertex(DVec3::X).unwrap();
        let err = writer.push_vertex(DVec3::Y).unwrap_err();
        assert!(matches!(
            err,
            ThreadMeshError::SizeMismatch {
                buffer: BufferKind::Vertices,
                expected: 1,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn writer_rejects_unfilled_region() {
        let mut vertices = vec![DVec3::ZERO; 3];
        let mut faces = vec![Face::default(); 2];
        let mut writer = RegionWriter::new("short", 0, &mut vertices, &mut faces);
        writer.push_vertex(DVec3::X).unwrap();
        writer.push_vertex(DVec3::Y).unwrap();
        writer.push_vertex(DVec3::Z).unwrap();
        writer.push_quad([0, 1, 2, 0]).unwrap();
        let err = writer.finish().unwrap_err();
        assert!(matches!(
            err,
            ThreadMeshError::SizeMismatch {
                buffer: BufferKind::Faces,
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn region_counts_follow_ranges() {
        let region = Region {
            label: "bore",
            kind: RegionKind::Collar { ring: 10, join: 0 },
            vertices: 10..18,
            faces: 4..12,
        };
        assert_eq!(region.vertex_count(), 8);
        assert_eq!(region.face_count(), 8);
        assert_eq!(region.kind_name(), "collar");
    }
}
