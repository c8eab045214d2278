//! Mesh backends.
//!
//! A [`MeshSink`] turns finished part buffers into whatever solid type a
//! host application uses. [`WeldingSink`] is the in-crate backend: it merges
//! the coincident vertices regions share along their seams and drops the
//! faces that merging collapses.

use std::collections::HashMap;

use glam::DVec3;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ThreadMeshError};
use crate::mesh::Face;

/// Consumer of finished part buffers.
pub trait MeshSink {
    /// Solid produced for one part.
    type Solid;

    /// Materializes one part. `edges` is empty for every generated part.
    fn materialize(
        &mut self,
        name: &str,
        origin: DVec3,
        vertices: &[DVec3],
        edges: &[[u32; 2]],
        faces: &[Face],
    ) -> Result<Self::Solid>;
}

/// Welded polygon mesh of one part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solid {
    /// Object name.
    pub name: String,
    /// Object placement.
    pub origin: DVec3,
    /// Unique vertex positions.
    pub vertices: Vec<DVec3>,
    /// Loose edges, passed through.
    pub edges: Vec<[u32; 2]>,
    /// Polygons with at least three distinct corners.
    pub faces: Vec<Vec<u32>>,
}

/// Sink that merges vertices closer than `weld_distance`.
///
/// # Example
///
/// ```rust
/// use thread_mesh::{GenerationConfig, PartConfig, PartKind, WeldingSink};
///
/// let mut config = PartConfig::default_for(PartKind::BladeHolder);
/// config.set_segments(12);
/// let mesh = config.generate(&GenerationConfig::default()).unwrap();
/// let solid = mesh.materialize(&mut WeldingSink::default()).unwrap();
/// assert!(solid.vertices.len() <= mesh.vertex_count());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeldingSink {
    /// Merge distance.
    pub weld_distance: f64,
}

impl Default for WeldingSink {
    fn default() -> Self {
        Self {
            weld_distance: config::constants::WELD_DISTANCE,
        }
    }
}

impl WeldingSink {
    /// Creates a sink with the given merge distance.
    pub fn new(weld_distance: f64) -> Self {
        Self { weld_distance }
    }

    /// Maps every vertex to the index of its representative in the welded
    /// vertex list, and returns that list.
    fn weld(&self, vertices: &[DVec3]) -> (Vec<u32>, Vec<DVec3>) {
        let cell_size = self.weld_distance * 2.0;
        let cell_of = |p: DVec3| {
            let c = (p / cell_size).floor();
            (c.x as i64, c.y as i64, c.z as i64)
        };

        let mut grid: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
        let mut remap: Vec<u32> = Vec::with_capacity(vertices.len());
        let mut welded: Vec<DVec3> = Vec::new();

        for &position in vertices {
            let cell = cell_of(position);
            let mut found = None;
            'search: for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let Some(candidates) = grid.get(&(cell.0 + dx, cell.1 + dy, cell.2 + dz))
                        else {
                            continue;
                        };
                        for &candidate in candidates {
                            if welded[candidate as usize].distance(position) < self.weld_distance {
                                found = Some(candidate);
                                break 'search;
                            }
                        }
                    }
                }
            }
            let index = match found {
                Some(index) => index,
                None => {
                    let index = welded.len() as u32;
                    welded.push(position);
                    grid.entry(cell).or_default().push(index);
                    index
                }
            };
            remap.push(index);
        }
        (remap, welded)
    }
}

impl MeshSink for WeldingSink {
    type Solid = Solid;

    fn materialize(
        &mut self,
        name: &str,
        origin: DVec3,
        vertices: &[DVec3],
        edges: &[[u32; 2]],
        faces: &[Face],
    ) -> Result<Solid> {
        if self.weld_distance.is_nan() || self.weld_distance <= 0.0 {
            return Err(ThreadMeshError::Sink {
                name: name.to_string(),
                message: format!("weld distance must be positive: {}", self.weld_distance),
            });
        }
        let lookup = |index: u32, remap: &[u32]| {
            remap.get(index as usize).copied().ok_or_else(|| ThreadMeshError::Sink {
                name: name.to_string(),
                message: format!("index {index} out of range for {} vertices", vertices.len()),
            })
        };

        let (remap, welded) = self.weld(vertices);

        let mut out_faces = Vec::with_capacity(faces.len());
        for face in faces {
            let mut polygon: Vec<u32> = Vec::with_capacity(face.len());
            for &index in face.indices() {
                let mapped = lookup(index, &remap)?;
                if polygon.last() != Some(&mapped) {
                    polygon.push(mapped);
                }
            }
            while polygon.len() > 1 && polygon.first() == polygon.last() {
                polygon.pop();
            }
            split_pinched(&polygon, &mut out_faces);
        }

        let mut out_edges = Vec::with_capacity(edges.len());
        for &[a, b] in edges {
            out_edges.push([lookup(a, &remap)?, lookup(b, &remap)?]);
        }

        debug!(
            part = name,
            merged = vertices.len() - welded.len(),
            dropped_faces = faces.len() - out_faces.len(),
            "welded part"
        );

        Ok(Solid {
            name: name.to_string(),
            origin,
            vertices: welded,
            edges: out_edges,
            faces: out_faces,
        })
    }
}

/// Splits a welded polygon at every corner that repeats, keeping the simple
/// loops with at least three corners.
///
/// `[a, b, c, a, d, e]` becomes `[a, b, c]` and `[a, d, e]`; `[a, b, a, c]`
/// encloses no area and yields nothing.
fn split_pinched(polygon: &[u32], out: &mut Vec<Vec<u32>>) {
    let mut open: Vec<u32> = Vec::with_capacity(polygon.len());
    for &index in polygon {
        if let Some(start) = open.iter().position(|&i| i == index) {
            let closed = open.split_off(start + 1);
            if closed.len() >= 2 {
                let mut simple = Vec::with_capacity(closed.len() + 1);
                simple.push(index);
                simple.extend(closed);
                out.push(simple);
            }
        } else {
            open.push(index);
        }
    }
    if open.len() >= 3 {
        out.push(open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welds_coincident_vertices() {
        let vertices = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(1.0 + 1e-6, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![Face::Quad([0, 1, 2, 4]), Face::Quad([0, 3, 2, 4])];
        let solid = WeldingSink::default()
            .materialize("welded", DVec3::ZERO, &vertices, &[], &faces)
            .unwrap();
        assert_eq!(solid.vertices.len(), 4);
        assert_eq!(solid.faces, vec![vec![0, 1, 2, 3], vec![0, 1, 2, 3]]);
    }

    #[test]
    fn drops_collapsed_faces() {
        let vertices = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 0.0),
        ];
        let faces = vec![Face::Quad([0, 1, 2, 3])];
        let solid = WeldingSink::default()
            .materialize("flat", DVec3::ZERO, &vertices, &[], &faces)
            .unwrap();
        assert_eq!(solid.vertices.len(), 2);
        assert!(solid.faces.is_empty());
    }

    #[test]
    fn pinched_polygons_split_into_simple_loops() {
        // corner 3 welds onto corner 0, pinching the hexagon into two triangles
        let vertices = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1e-6),
            DVec3::new(-1.0, 0.0, 0.0),
            DVec3::new(-1.0, -1.0, 0.0),
        ];
        let faces = vec![Face::Fan(vec![0, 1, 2, 3, 4, 5])];
        let solid = WeldingSink::default()
            .materialize("pinched", DVec3::ZERO, &vertices, &[], &faces)
            .unwrap();
        assert_eq!(solid.vertices.len(), 5);
        assert_eq!(solid.faces, vec![vec![0, 1, 2], vec![0, 3, 4]]);
    }

    #[test]
    fn welded_faces_never_repeat_a_corner() {
        // [a, b, a, c] after welding: no simple loop survives
        let vertices = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1e-6, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![Face::Quad([0, 1, 2, 3])];
        let solid = WeldingSink::default()
            .materialize("bowtie", DVec3::ZERO, &vertices, &[], &faces)
            .unwrap();
        assert_eq!(solid.vertices.len(), 3);
        assert!(solid.faces.is_empty());
    }

    #[test]
    fn out_of_range_index_is_a_sink_error() {
        let vertices = vec![DVec3::ZERO; 3];
        let faces = vec![Face::Quad([0, 1, 2, 7])];
        let err = WeldingSink::default()
            .materialize("broken", DVec3::ZERO, &vertices, &[], &faces)
            .unwrap_err();
        assert!(matches!(err, ThreadMeshError::Sink { .. }));
    }
}
