//! # Part Mesh
//!
//! Finished vertex and polygon buffers for one hardware part.
//!
//! Faces are mostly quads; each thread region also contributes two fan
//! faces with `N + 2` indices that close the ends of its root disk.
//! Winding is consistent inside quads but outward orientation is left to the
//! mesh backend.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThreadMeshError};
use crate::region::Region;
use crate::sink::MeshSink;

/// A polygon of the part mesh, as indices into the vertex buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Face {
    /// Regular four-sided face.
    Quad([u32; 4]),
    /// Fan face closing a thread end; `N + 2` indices.
    Fan(Vec<u32>),
}

impl Default for Face {
    fn default() -> Self {
        Face::Quad([0; 4])
    }
}

impl Face {
    /// Vertex indices in winding order.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        match self {
            Face::Quad(quad) => quad,
            Face::Fan(fan) => fan,
        }
    }

    /// Number of corners.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices().len()
    }

    /// True when the face has no corners.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices().is_empty()
    }
}

impl AsRef<[u32]> for Face {
    fn as_ref(&self) -> &[u32] {
        self.indices()
    }
}

/// Vertex and face buffers of one generated part.
///
/// # Example
///
/// ```rust
/// use thread_mesh::{GenerationConfig, PartConfig, PartKind};
///
/// let mut config = PartConfig::default_for(PartKind::Pommel);
/// config.set_segments(16);
/// let mesh = config.generate(&GenerationConfig::default()).unwrap();
/// assert_eq!(mesh.name(), "Pommel");
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartMesh {
    name: String,
    origin: DVec3,
    vertices: Vec<DVec3>,
    faces: Vec<Face>,
    #[serde(skip)]
    regions: Vec<Region>,
}

impl PartMesh {
    pub(crate) fn new(
        name: impl Into<String>,
        vertices: Vec<DVec3>,
        faces: Vec<Face>,
        regions: Vec<Region>,
    ) -> Self {
        Self {
            name: name.into(),
            origin: DVec3::ZERO,
            vertices,
            faces,
            regions,
        }
    }

    /// Object name handed to the mesh sink.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Regions in the order they were written.
    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.vertices.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        self.vertices[1..]
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Checks index consistency.
    ///
    /// Checks:
    /// - Every face has at least 3 corners
    /// - All face indices address an existing vertex
    /// - No index repeats within one face
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        for (face_index, face) in self.faces.iter().enumerate() {
            let indices = face.indices();
            if indices.len() < 3 {
                return Err(ThreadMeshError::contract(format!(
                    "{}: face {face_index} has {} corners",
                    self.name,
                    indices.len()
                )));
            }
            for (k, &index) in indices.iter().enumerate() {
                if index as usize >= vertex_count {
                    return Err(ThreadMeshError::contract(format!(
                        "{}: face {face_index} references vertex {index} of {vertex_count}",
                        self.name
                    )));
                }
                if indices[..k].contains(&index) {
                    return Err(ThreadMeshError::contract(format!(
                        "{}: face {face_index} repeats vertex {index}",
                        self.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Counts faces whose corners span fewer than three distinct positions.
    ///
    /// Such faces are expected where female threads clamp into their end
    /// ring; a welding backend removes them.
    pub fn collapsed_face_count(&self, tolerance: f64) -> usize {
        let tolerance_sq = tolerance * tolerance;
        self.faces
            .iter()
            .filter(|face| {
                let mut distinct: Vec<DVec3> = Vec::with_capacity(face.len());
                for &index in face.indices() {
                    let p = self.vertices[index as usize];
                    if !distinct.iter().any(|q| q.distance_squared(p) <= tolerance_sq) {
                        distinct.push(p);
                    }
                }
                distinct.len() < 3
            })
            .count()
    }

    /// Fan-triangulates every face, for consumers that only accept triangles.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        fan_triangles(&self.faces)
    }

    /// Hands the buffers to a mesh backend. Edges are always empty; faces
    /// alone define connectivity.
    pub fn materialize<S: MeshSink>(&self, sink: &mut S) -> Result<S::Solid> {
        sink.materialize(&self.name, self.origin, &self.vertices, &[], &self.faces)
    }
}

/// Splits every polygon into a fan of triangles around its first corner.
pub fn fan_triangles<F: AsRef<[u32]>>(faces: &[F]) -> Vec<[u32; 3]> {
    let mut triangles = Vec::with_capacity(faces.len() * 2);
    for face in faces {
        let indices = face.as_ref();
        for k in 1..indices.len().saturating_sub(1) {
            triangles.push([indices[0], indices[k], indices[k + 1]]);
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> PartMesh {
        PartMesh::new(
            "square",
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
            ],
            vec![Face::Quad([0, 1, 2, 3])],
            Vec::new(),
        )
    }

    #[test]
    fn test_face_indices() {
        assert_eq!(Face::Quad([1, 2, 3, 4]).len(), 4);
        assert_eq!(Face::Fan(vec![1, 2, 3, 4, 5]).indices(), &[1, 2, 3, 4, 5]);
        assert_eq!(Face::default(), Face::Quad([0, 0, 0, 0]));
    }

    #[test]
    fn test_validate_accepts_square() {
        assert!(square().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut mesh = square();
        mesh.faces.push(Face::Quad([0, 1, 2, 4]));
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_repeated_index() {
        let mut mesh = square();
        mesh.faces.push(Face::Quad([0, 1, 1, 2]));
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_collapsed_faces() {
        let mut mesh = square();
        mesh.vertices.push(DVec3::new(1.0, 1.0, 0.0));
        mesh.vertices.push(DVec3::new(1.0, 0.0, 0.0));
        mesh.faces.push(Face::Quad([1, 2, 4, 5]));
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.collapsed_face_count(1e-9), 1);
    }

    #[test]
    fn test_triangles_fan() {
        let mut mesh = square();
        mesh.faces.push(Face::Fan(vec![0, 1, 2, 3, 0]));
        let tris = mesh.triangles();
        assert_eq!(tris.len(), 2 + 3);
        assert_eq!(tris[0], [0, 1, 2]);
        assert_eq!(tris[1], [0, 2, 3]);
    }

    #[test]
    fn test_bounding_box() {
        let (min, max) = square().bounding_box();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::new(1.0, 1.0, 0.0));
    }
}
