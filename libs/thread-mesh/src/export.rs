//! Wavefront OBJ export.

use std::io::Write;

use glam::DVec3;

use crate::error::Result;

/// Writes one object as OBJ text with polygonal, 1-based faces.
///
/// Accepts both generated faces and welded polygons.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use thread_mesh::{export::write_obj, Face};
///
/// let vertices = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(1.0, 1.0, 0.0)];
/// let mut out = Vec::new();
/// write_obj(&mut out, "quad", &vertices, &[Face::Quad([0, 1, 3, 2])]).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("f 1 2 4 3"));
/// ```
pub fn write_obj<W, F>(out: &mut W, name: &str, vertices: &[DVec3], faces: &[F]) -> Result<()>
where
    W: Write,
    F: AsRef<[u32]>,
{
    writeln!(out, "# saber-parts")?;
    writeln!(out, "o {name}")?;
    for v in vertices {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for face in faces {
        write!(out, "f")?;
        for &index in face.as_ref() {
            write!(out, " {}", index + 1)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
