//! # Helical Thread Sweep
//!
//! Sweeps a [`ThreadProfile`] helically around the Z axis.
//!
//! A thread region owns three vertex blocks, laid out from its vertex base
//! `b` as:
//!
//! ```text
//! b                       bottom ring      V vertices at (r, z_offset)
//! b + V + N*i + j         helix            sweep step i in 0..=V*L, profile point j
//! b + V + N*(V*L + 1)     top ring         V vertices at (r, top height)
//! ```
//!
//! and writes `V` bottom band faces, `(N-1)*V*L` body quads and `V` top band
//! faces. Each band contains one fan face with `N + 2` corners that closes
//! the root disk at that end.

use std::f64::consts::TAU;

use config::constants::{DEFAULT_SEGMENTS, MIN_SEGMENTS};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThreadMeshError};
use crate::mesh::Face;
use crate::profile::{PointKind, ThreadProfile};
use crate::region::RegionWriter;

/// External (male) or internal (female) thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Inserted thread; the helix runs a full pitch past its last loop.
    #[default]
    Male,
    /// Receiving thread; helix heights are clamped one pitch short so a
    /// mating male thread can be driven further in.
    Female,
}

/// Parameters of one helical thread region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreadSpec {
    /// Vertices per revolution (`V`).
    pub segments: u32,
    /// Number of full revolutions (`L`).
    pub loops: u32,
    /// Major radius `R`.
    pub crest_radius: f64,
    /// Minor radius `r`.
    pub root_radius: f64,
    /// Axial cross-section.
    pub profile: ThreadProfile,
    /// Sharpness of the crest taper near both ends of the sweep.
    pub falloff_rate: f64,
    /// Height of the bottom ring.
    pub z_offset: f64,
    /// Male or female thread.
    pub polarity: Polarity,
}

impl ThreadSpec {
    /// Creates a one-loop thread at the default resolution, starting at z = 0.
    pub fn new(
        crest_radius: f64,
        root_radius: f64,
        profile: ThreadProfile,
        polarity: Polarity,
    ) -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            loops: 1,
            crest_radius,
            root_radius,
            profile,
            falloff_rate: 1.0,
            z_offset: 0.0,
            polarity,
        }
    }

    /// Checks the parameters before anything is written.
    pub fn validate(&self) -> Result<()> {
        if self.segments < MIN_SEGMENTS {
            return Err(ThreadMeshError::contract(format!(
                "thread segments must be >= {MIN_SEGMENTS}, got {}",
                self.segments
            )));
        }
        if self.loops < 1 {
            return Err(ThreadMeshError::contract("thread loops must be >= 1, got 0"));
        }
        self.profile.validate()?;
        for (name, value) in [
            ("crest_radius", self.crest_radius),
            ("root_radius", self.root_radius),
            ("falloff_rate", self.falloff_rate),
            ("z_offset", self.z_offset),
        ] {
            if !value.is_finite() {
                return Err(ThreadMeshError::contract(format!(
                    "thread {name} must be finite: {value}"
                )));
            }
        }
        if self.root_radius <= 0.0 {
            return Err(ThreadMeshError::degenerate(format!(
                "thread root radius must be positive: {}",
                self.root_radius
            )));
        }
        if self.crest_radius < self.root_radius {
            return Err(ThreadMeshError::contract(format!(
                "thread crest radius {} is inside root radius {}",
                self.crest_radius, self.root_radius
            )));
        }
        if self.falloff_rate <= 0.0 {
            return Err(ThreadMeshError::contract(format!(
                "thread falloff_rate must be positive: {}",
                self.falloff_rate
            )));
        }
        Ok(())
    }

    /// Pitch `H`.
    #[inline]
    pub fn pitch(&self) -> f64 {
        self.profile.pitch()
    }

    /// Sweep steps `V * L`.
    #[inline]
    fn steps(&self) -> usize {
        self.segments as usize * self.loops as usize
    }

    /// `N * (V*L + 1) + 2*V`
    pub fn vertex_count(&self) -> usize {
        let n = self.profile.point_count();
        n * (self.steps() + 1) + 2 * self.segments as usize
    }

    /// `(N - 1) * V*L + 2*V`
    pub fn face_count(&self) -> usize {
        let n = self.profile.point_count();
        (n - 1) * self.steps() + 2 * self.segments as usize
    }

    /// Crest radius after the end taper, at normalized sweep position `u`.
    pub fn crest_radius_at(&self, u: f64) -> f64 {
        self.root_radius + (self.crest_radius - self.root_radius) * crest_taper(u, self.falloff_rate)
    }

    /// Height female helix vertices are clamped to: the last profile point
    /// of the final loop, `L * H + z_offset`.
    pub fn z_max(&self) -> f64 {
        f64::from(self.loops) * self.pitch() + self.z_offset
    }

    /// Height of the top ring.
    pub fn top_ring_height(&self) -> f64 {
        let loops = match self.polarity {
            Polarity::Male => self.loops + 1,
            Polarity::Female => self.loops,
        };
        f64::from(loops) * self.pitch() + self.z_offset
    }
}

/// Crest taper factor in `[0, 1]` at normalized sweep position `u`.
///
/// `1 - 6 * (|w|^(4k) / 2 - |w|^(6k) / 3)` with `w = 2u - 1`: zero at both
/// ends of the sweep, one at its middle. Larger `k` keeps the crest at full
/// height for longer before dropping it near the ends.
///
/// # Examples
/// ```
/// use thread_mesh::crest_taper;
///
/// assert!(crest_taper(0.0, 1.0).abs() < 1e-12);
/// assert!((crest_taper(0.5, 1.0) - 1.0).abs() < 1e-12);
/// assert!(crest_taper(1.0, 1.0).abs() < 1e-12);
/// ```
pub fn crest_taper(u: f64, falloff_rate: f64) -> f64 {
    let w = (2.0 * u - 1.0).abs();
    1.0 - 6.0 * (w.powf(falloff_rate * 4.0) / 2.0 - w.powf(falloff_rate * 6.0) / 3.0)
}

/// Point on a circle of `radius` at `height`, `i` steps of `TAU / segments`
/// around the axis.
#[inline]
pub(crate) fn ring_vertex(radius: f64, height: f64, i: usize, segments: u32) -> DVec3 {
    let angle = i as f64 * TAU / f64::from(segments);
    DVec3::new(radius * angle.cos(), radius * angle.sin(), height)
}

/// Writes one thread region: bottom ring, helix and top ring, then the
/// bottom band, body quads and top band.
pub(crate) fn sweep_thread(spec: &ThreadSpec, writer: &mut RegionWriter<'_>) -> Result<()> {
    spec.validate()?;

    let v = spec.segments as usize;
    let steps = spec.steps();
    let points = spec.profile.points(spec.crest_radius, spec.root_radius);
    let n = points.len();
    let pitch = spec.pitch();
    let z_max = spec.z_max();
    let female = spec.polarity == Polarity::Female;

    let base = writer.vertex_base();
    let bottom = |i: usize| base + i as u32;
    let helix = |i: usize, j: usize| base + (v + n * i + j) as u32;
    let top = |i: usize| base + (v + n * (steps + 1) + i) as u32;

    // Vertices
    for i in 0..v {
        writer.push_vertex(ring_vertex(spec.root_radius, spec.z_offset, i, spec.segments))?;
    }
    for i in 0..=steps {
        let u = i as f64 / steps as f64;
        let crest = spec.crest_radius_at(u);
        let turns = i as f64 / v as f64;
        for point in &points {
            let radius = match point.kind {
                PointKind::Crest => crest,
                PointKind::Root => spec.root_radius,
            };
            let mut z = point.axial + turns * pitch + spec.z_offset;
            if female && z > z_max {
                z = z_max;
            }
            writer.push_vertex(ring_vertex(radius, z, i, spec.segments))?;
        }
    }
    let top_height = spec.top_ring_height();
    for i in 0..v {
        writer.push_vertex(ring_vertex(spec.root_radius, top_height, i, spec.segments))?;
    }

    // Bottom band
    for i in 0..v - 1 {
        writer.push_quad([bottom(i), helix(i, 0), helix(i + 1, 0), bottom(i + 1)])?;
    }
    let mut fan = Vec::with_capacity(n + 2);
    fan.push(bottom(v - 1));
    fan.push(helix(v - 1, 0));
    fan.extend((0..n).rev().map(|j| helix(0, j)));
    writer.push_face(Face::Fan(fan))?;

    // Body
    for i in 0..steps {
        for j in 0..n - 1 {
            writer.push_quad([helix(i, j), helix(i, j + 1), helix(i + 1, j + 1), helix(i + 1, j)])?;
        }
    }

    // Top band
    let last = steps - v;
    let mut fan = Vec::with_capacity(n + 2);
    fan.push(helix(last, n - 1));
    fan.push(helix(last + 1, n - 1));
    fan.push(top(1));
    fan.extend((1..n).rev().map(|j| helix(steps, j)));
    writer.push_face(Face::Fan(fan))?;
    for i in 1..v - 1 {
        writer.push_quad([helix(last + i, n - 1), helix(last + i + 1, n - 1), top(i + 1), top(i)])?;
    }
    writer.push_quad([helix(steps - 1, n - 1), top(v - 1), top(0), helix(steps, n - 1)])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pointed(segments: u32, loops: u32, polarity: Polarity) -> ThreadSpec {
        ThreadSpec {
            segments,
            loops,
            ..ThreadSpec::new(2.0, 1.5, ThreadProfile::new(1.0, 0.0, 1.0, 0.0), polarity)
        }
    }

    fn sweep(spec: &ThreadSpec, base: u32) -> (Vec<DVec3>, Vec<Face>) {
        let mut vertices = vec![DVec3::ZERO; spec.vertex_count()];
        let mut faces = vec![Face::default(); spec.face_count()];
        let mut writer = RegionWriter::new("thread", base, &mut vertices, &mut faces);
        sweep_thread(spec, &mut writer).unwrap();
        writer.finish().unwrap();
        (vertices, faces)
    }

    #[test]
    fn test_counts_for_small_pointed_thread() {
        let spec = pointed(8, 2, Polarity::Male);
        assert_eq!(spec.vertex_count(), 67);
        assert_eq!(spec.face_count(), 2 * 16 + 16);
        let (vertices, faces) = sweep(&spec, 0);
        assert_eq!(vertices.len(), 67);
        assert_eq!(faces.len(), 48);
    }

    #[test]
    fn test_fan_faces_have_n_plus_two_corners() {
        let spec = ThreadSpec {
            segments: 6,
            loops: 2,
            ..ThreadSpec::new(18.5, 17.2, ThreadProfile::default(), Polarity::Male)
        };
        let (_, faces) = sweep(&spec, 0);
        let fans: Vec<usize> = faces
            .iter()
            .enumerate()
            .filter(|(_, f)| matches!(f, Face::Fan(_)))
            .map(|(k, _)| k)
            .collect();
        assert_eq!(fans, vec![5, 6 + 4 * 12]);
        for k in fans {
            assert_eq!(faces[k].len(), 7);
        }
    }

    #[test]
    fn test_bottom_fan_indices() {
        let spec = pointed(4, 1, Polarity::Male);
        let (_, faces) = sweep(&spec, 100);
        // bottom(3), helix(3,0), helix(0,2), helix(0,1), helix(0,0)
        assert_eq!(faces[3], Face::Fan(vec![103, 104 + 9, 106, 105, 104]));
    }

    #[test]
    fn test_indices_stay_in_region() {
        let spec = pointed(5, 3, Polarity::Female);
        let base = 17;
        let (vertices, faces) = sweep(&spec, base);
        let end = base as usize + vertices.len();
        for face in &faces {
            for &index in face.indices() {
                assert!((base as usize..end).contains(&(index as usize)));
            }
        }
    }

    #[test]
    fn test_taper_values() {
        assert_relative_eq!(crest_taper(0.0, 1.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(crest_taper(0.5, 1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(crest_taper(1.0, 1.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(crest_taper(0.5, 1000.0), 1.0, epsilon = 1e-12);
        // sharper falloff keeps the crest up for longer
        assert!(crest_taper(0.9, 1000.0) > crest_taper(0.9, 1.0));
    }

    #[test]
    fn test_crest_reaches_full_radius_mid_sweep() {
        let spec = pointed(8, 2, Polarity::Male);
        let (vertices, _) = sweep(&spec, 0);
        // step 8 of 16, crest point j = 1
        let mid = vertices[8 + 3 * 8 + 1];
        assert_relative_eq!(mid.truncate().length(), 2.0, epsilon = 1e-12);
        let start = vertices[8 + 1];
        assert_relative_eq!(start.truncate().length(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_female_clamps_to_z_max() {
        let female = pointed(8, 2, Polarity::Female);
        let male = pointed(8, 2, Polarity::Male);
        let z_max = female.z_max();
        assert_relative_eq!(z_max, 2.0 + 2.0);

        let (female_vertices, _) = sweep(&female, 0);
        let (male_vertices, _) = sweep(&male, 0);
        let helix = 8..8 + 3 * 17;
        assert!(female_vertices[helix.clone()].iter().all(|p| p.z <= z_max + 1e-12));
        assert!(male_vertices[helix].iter().any(|p| p.z > z_max + 1e-6));
    }

    #[test]
    fn test_top_ring_height_by_polarity() {
        let male = pointed(8, 2, Polarity::Male);
        let female = pointed(8, 2, Polarity::Female);
        assert_relative_eq!(male.top_ring_height(), 6.0);
        assert_relative_eq!(female.top_ring_height(), 4.0);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let good = pointed(8, 1, Polarity::Male);
        assert!(good.validate().is_ok());
        assert!(ThreadSpec { loops: 0, ..good }.validate().is_err());
        assert!(ThreadSpec { segments: 2, ..good }.validate().is_err());
        assert!(ThreadSpec { crest_radius: 1.0, ..good }.validate().is_err());
        assert!(ThreadSpec { falloff_rate: 0.0, ..good }.validate().is_err());
        assert!(matches!(
            ThreadSpec { root_radius: 0.0, crest_radius: 1.0, ..good }.validate(),
            Err(ThreadMeshError::DegenerateGeometry { .. })
        ));
    }
}
