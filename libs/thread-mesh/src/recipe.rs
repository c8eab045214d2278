//! # Recipes
//!
//! A recipe is an ordered list of thread, collar and seam steps. Steps refer
//! to the boundary loops of earlier steps through [`LoopId`]s rather than
//! through raw buffer offsets.
//!
//! Generation runs in two phases:
//!
//! 1. [`Recipe::plan`] resolves every loop reference, validates every step
//!    and lays the regions out back to back, producing exact buffer sizes.
//!    Nothing is allocated until the plan succeeds.
//! 2. [`Recipe::build`] allocates both buffers once, hands each region its
//!    own disjoint slices and checks that every slot was written.
//!
//! ## Example
//!
//! ```rust
//! use thread_mesh::{GenerationConfig, Polarity, Recipe, ThreadProfile, ThreadSpec};
//!
//! let mut recipe = Recipe::new("Stub", 8);
//! let thread = recipe.thread("thread", ThreadSpec {
//!     segments: 8,
//!     ..ThreadSpec::new(2.0, 1.5, ThreadProfile::default(), Polarity::Male)
//! });
//! let cap = recipe.collar("cap", 1.0, 0.0, thread.bottom);
//! recipe.collar("rim", 1.0, 5.0, cap);
//!
//! let layout = recipe.plan().unwrap();
//! assert_eq!(layout.regions().len(), 3);
//! let mesh = recipe.build(&layout, &GenerationConfig::default()).unwrap();
//! assert_eq!(mesh.vertex_count(), layout.counts().vertices);
//! ```

use std::fmt;

use config::constants::{MAX_FACES, MAX_VERTICES, MIN_SEGMENTS};
use glam::DVec3;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::collar::{build_collar, join_loops};
use crate::config::GenerationConfig;
use crate::error::{BufferKind, Result, ThreadMeshError};
use crate::mesh::{Face, PartMesh};
use crate::region::{Region, RegionKind, RegionWriter};
use crate::thread::{sweep_thread, ThreadSpec};

/// Index of a step inside its recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepId(usize);

/// A boundary loop exposed by an earlier step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopId {
    /// Bottom ring of a thread step.
    ThreadBottom(StepId),
    /// Top ring of a thread step.
    ThreadTop(StepId),
    /// Ring created by a collar step.
    Ring(StepId),
}

impl LoopId {
    fn step(self) -> StepId {
        match self {
            LoopId::ThreadBottom(step) | LoopId::ThreadTop(step) | LoopId::Ring(step) => step,
        }
    }
}

impl fmt::Display for LoopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopId::ThreadBottom(step) => write!(f, "bottom ring of step {}", step.0),
            LoopId::ThreadTop(step) => write!(f, "top ring of step {}", step.0),
            LoopId::Ring(step) => write!(f, "ring of step {}", step.0),
        }
    }
}

/// Both end rings of a thread step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadLoops {
    /// Ring at the thread's z offset.
    pub bottom: LoopId,
    /// Ring above the helix.
    pub top: LoopId,
}

/// One operation of a recipe.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Helical thread region.
    Thread {
        /// Role inside the part.
        label: &'static str,
        /// Thread parameters; `segments` must match the recipe.
        spec: ThreadSpec,
    },
    /// New ring at (`radius`, `height`) joined to an existing loop.
    Collar {
        /// Role inside the part.
        label: &'static str,
        /// Ring radius.
        radius: f64,
        /// Ring height.
        height: f64,
        /// Loop the new ring is stitched to.
        join: LoopId,
    },
    /// Face band between two existing loops.
    Seam {
        /// Role inside the part.
        label: &'static str,
        /// First loop.
        from: LoopId,
        /// Second loop.
        to: LoopId,
    },
}

impl Step {
    /// Role inside the part.
    pub fn label(&self) -> &'static str {
        match self {
            Step::Thread { label, .. } | Step::Collar { label, .. } | Step::Seam { label, .. } => {
                label
            }
        }
    }
}

/// Exact buffer sizes of a part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferCounts {
    /// Vertex slots.
    pub vertices: usize,
    /// Face slots.
    pub faces: usize,
}

impl fmt::Display for BufferCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vertices, {} faces", self.vertices, self.faces)
    }
}

/// Region placement produced by [`Recipe::plan`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    regions: Vec<Region>,
    counts: BufferCounts,
}

impl Layout {
    /// Regions in step order.
    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Total buffer sizes, the sum of all region sizes.
    #[inline]
    pub fn counts(&self) -> BufferCounts {
        self.counts
    }
}

/// Ordered list of steps that builds one part.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    name: &'static str,
    segments: u32,
    steps: Vec<Step>,
}

impl Recipe {
    /// Creates an empty recipe whose collars and seams use `segments`
    /// vertices per loop.
    pub fn new(name: &'static str, segments: u32) -> Self {
        Self {
            name,
            segments,
            steps: Vec::new(),
        }
    }

    /// Part name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Vertices per loop.
    #[inline]
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Steps in order.
    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    fn push(&mut self, step: Step) -> StepId {
        self.steps.push(step);
        StepId(self.steps.len() - 1)
    }

    /// Appends a thread step.
    pub fn thread(&mut self, label: &'static str, spec: ThreadSpec) -> ThreadLoops {
        let id = self.push(Step::Thread { label, spec });
        ThreadLoops {
            bottom: LoopId::ThreadBottom(id),
            top: LoopId::ThreadTop(id),
        }
    }

    /// Appends a collar step and returns the ring it creates.
    pub fn collar(&mut self, label: &'static str, radius: f64, height: f64, join: LoopId) -> LoopId {
        LoopId::Ring(self.push(Step::Collar {
            label,
            radius,
            height,
            join,
        }))
    }

    /// Appends a seam step.
    pub fn seam(&mut self, label: &'static str, from: LoopId, to: LoopId) -> StepId {
        self.push(Step::Seam { label, from, to })
    }

    /// Validates every step and lays the regions out back to back.
    pub fn plan(&self) -> Result<Layout> {
        if self.segments < MIN_SEGMENTS {
            return Err(ThreadMeshError::contract(format!(
                "{}: segments must be >= {MIN_SEGMENTS}, got {}",
                self.name, self.segments
            )));
        }
        let v = self.segments as usize;
        let mut regions: Vec<Region> = Vec::with_capacity(self.steps.len());
        let mut counts = BufferCounts::default();

        for (index, step) in self.steps.iter().enumerate() {
            let base = counts.vertices as u32;
            let (kind, vertex_count, face_count) = match step {
                Step::Thread { label, spec } => {
                    spec.validate()?;
                    if spec.segments != self.segments {
                        return Err(ThreadMeshError::contract(format!(
                            "{}: thread '{label}' has {} segments, recipe uses {}",
                            self.name, spec.segments, self.segments
                        )));
                    }
                    if v
                        .checked_mul(spec.loops as usize)
                        .map_or(true, |sweep| sweep > MAX_VERTICES)
                    {
                        return Err(self.limit_error(BufferKind::Vertices));
                    }
                    let vertex_count = spec.vertex_count();
                    // top ring is the last V vertices of the region
                    let top = base + (vertex_count - v) as u32;
                    (
                        RegionKind::Thread { bottom: base, top },
                        vertex_count,
                        spec.face_count(),
                    )
                }
                Step::Collar {
                    label,
                    radius,
                    height,
                    join,
                } => {
                    if !radius.is_finite() || !height.is_finite() {
                        return Err(ThreadMeshError::contract(format!(
                            "{}: collar '{label}' must have finite radius and height",
                            self.name
                        )));
                    }
                    if *radius <= 0.0 {
                        return Err(ThreadMeshError::degenerate(format!(
                            "{}: collar '{label}' has non-positive radius {radius}",
                            self.name
                        )));
                    }
                    let join = self.resolve(&regions, index, *join)?;
                    (RegionKind::Collar { ring: base, join }, v, v)
                }
                Step::Seam { label, from, to } => {
                    let from = self.resolve(&regions, index, *from)?;
                    let to = self.resolve(&regions, index, *to)?;
                    if from == to {
                        return Err(ThreadMeshError::contract(format!(
                            "{}: seam '{label}' joins a loop to itself",
                            self.name
                        )));
                    }
                    (RegionKind::Seam { from, to }, 0, v)
                }
            };

            let vertices = counts.vertices..counts.vertices + vertex_count;
            let faces = counts.faces..counts.faces + face_count;
            counts.vertices = vertices.end;
            counts.faces = faces.end;
            if counts.vertices > MAX_VERTICES {
                return Err(self.limit_error(BufferKind::Vertices));
            }
            if counts.faces > MAX_FACES {
                return Err(self.limit_error(BufferKind::Faces));
            }
            regions.push(Region {
                label: step.label(),
                kind,
                vertices,
                faces,
            });
        }

        Ok(Layout { regions, counts })
    }

    /// Writes every region of `layout` into freshly allocated buffers.
    pub fn build(&self, layout: &Layout, config: &GenerationConfig) -> Result<PartMesh> {
        if layout.regions.len() != self.steps.len() {
            return Err(ThreadMeshError::contract(format!(
                "{}: layout has {} regions for {} steps",
                self.name,
                layout.regions.len(),
                self.steps.len()
            )));
        }

        let mut vertices = vec![DVec3::ZERO; layout.counts.vertices];
        let mut faces = vec![Face::default(); layout.counts.faces];

        let mut tasks = Vec::with_capacity(self.steps.len());
        let mut rest_vertices: &mut [DVec3] = &mut vertices;
        let mut rest_faces: &mut [Face] = &mut faces;
        for (step, region) in self.steps.iter().zip(&layout.regions) {
            if region.vertex_count() > rest_vertices.len() {
                return Err(ThreadMeshError::size_mismatch(
                    self.name,
                    BufferKind::Vertices,
                    layout.counts.vertices,
                    region.vertices.end,
                ));
            }
            if region.face_count() > rest_faces.len() {
                return Err(ThreadMeshError::size_mismatch(
                    self.name,
                    BufferKind::Faces,
                    layout.counts.faces,
                    region.faces.end,
                ));
            }
            let (region_vertices, tail) =
                std::mem::take(&mut rest_vertices).split_at_mut(region.vertex_count());
            rest_vertices = tail;
            let (region_faces, tail) =
                std::mem::take(&mut rest_faces).split_at_mut(region.face_count());
            rest_faces = tail;
            tasks.push((step, region, region_vertices, region_faces));
        }
        if !rest_vertices.is_empty() {
            return Err(ThreadMeshError::size_mismatch(
                self.name,
                BufferKind::Vertices,
                layout.counts.vertices,
                layout.counts.vertices - rest_vertices.len(),
            ));
        }
        if !rest_faces.is_empty() {
            return Err(ThreadMeshError::size_mismatch(
                self.name,
                BufferKind::Faces,
                layout.counts.faces,
                layout.counts.faces - rest_faces.len(),
            ));
        }

        let segments = self.segments;
        if config.parallel {
            tasks.into_par_iter().try_for_each(|(step, region, v, f)| {
                write_region(step, region, segments, v, f)
            })?;
        } else {
            tasks.into_iter().try_for_each(|(step, region, v, f)| {
                write_region(step, region, segments, v, f)
            })?;
        }

        let mesh = PartMesh::new(self.name, vertices, faces, layout.regions.clone());
        mesh.validate()?;

        let collapsed = mesh.collapsed_face_count(config.tolerance);
        if collapsed > 0 {
            if config.strict_degeneracy {
                return Err(ThreadMeshError::degenerate(format!(
                    "{}: {collapsed} faces collapse to fewer than 3 distinct positions",
                    self.name
                )));
            }
            warn!(
                part = self.name,
                collapsed, "faces collapse to fewer than 3 distinct positions"
            );
        }

        info!(
            part = self.name,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            regions = layout.regions.len(),
            "generated part"
        );
        Ok(mesh)
    }

    /// Plans and builds in one call.
    pub fn assemble(&self, config: &GenerationConfig) -> Result<PartMesh> {
        let layout = self.plan()?;
        self.build(&layout, config)
    }

    /// Finds the first vertex of `id`, which must belong to a step before
    /// `current`.
    fn resolve(&self, regions: &[Region], current: usize, id: LoopId) -> Result<u32> {
        let step = id.step().0;
        if step >= current {
            return Err(ThreadMeshError::contract(format!(
                "{}: step {current} refers to {id}, which is not built yet",
                self.name
            )));
        }
        let kind = regions.get(step).map(|region| region.kind);
        match (id, kind) {
            (LoopId::ThreadBottom(_), Some(RegionKind::Thread { bottom, .. })) => Ok(bottom),
            (LoopId::ThreadTop(_), Some(RegionKind::Thread { top, .. })) => Ok(top),
            (LoopId::Ring(_), Some(RegionKind::Collar { ring, .. })) => Ok(ring),
            _ => Err(ThreadMeshError::contract(format!(
                "{}: step {current} refers to {id}, which does not exist",
                self.name
            ))),
        }
    }

    fn limit_error(&self, buffer: BufferKind) -> ThreadMeshError {
        let limit = match buffer {
            BufferKind::Vertices => MAX_VERTICES,
            BufferKind::Faces => MAX_FACES,
        };
        ThreadMeshError::contract(format!("{}: part exceeds {limit} {buffer}", self.name))
    }
}

/// Writes one region through its own writer.
fn write_region(
    step: &Step,
    region: &Region,
    segments: u32,
    vertices: &mut [DVec3],
    faces: &mut [Face],
) -> Result<()> {
    let mut writer = RegionWriter::new(region.label, region.vertices.start as u32, vertices, faces);
    match (step, region.kind) {
        (Step::Thread { spec, .. }, RegionKind::Thread { .. }) => sweep_thread(spec, &mut writer)?,
        (Step::Collar { radius, height, .. }, RegionKind::Collar { join, .. }) => {
            build_collar(&mut writer, segments, *radius, *height, join)?
        }
        (Step::Seam { .. }, RegionKind::Seam { from, to }) => {
            join_loops(&mut writer, segments, from, to)?
        }
        _ => {
            return Err(ThreadMeshError::contract(format!(
                "region '{}' does not match its step",
                region.label
            )))
        }
    }
    writer.finish()?;
    debug!(
        kind = region.kind_name(),
        label = region.label,
        vertices = ?region.vertices,
        faces = ?region.faces,
        "wrote region"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ThreadProfile;
    use crate::thread::Polarity;

    fn small_thread(polarity: Polarity) -> ThreadSpec {
        ThreadSpec {
            segments: 8,
            loops: 2,
            ..ThreadSpec::new(2.0, 1.5, ThreadProfile::new(1.0, 0.0, 1.0, 0.0), polarity)
        }
    }

    fn capped_thread() -> Recipe {
        let mut recipe = Recipe::new("Capped", 8);
        let thread = recipe.thread("thread", small_thread(Polarity::Male));
        let bore = recipe.collar("bore", 1.0, 0.0, thread.bottom);
        let lid = recipe.collar("lid", 1.0, 6.0, thread.top);
        recipe.seam("inner wall", bore, lid);
        recipe
    }

    #[test]
    fn plan_sums_region_sizes() {
        let layout = capped_thread().plan().unwrap();
        assert_eq!(layout.counts(), BufferCounts { vertices: 67 + 16, faces: 48 + 24 });
        let regions = layout.regions();
        assert_eq!(regions[0].kind, RegionKind::Thread { bottom: 0, top: 59 });
        assert_eq!(regions[1].kind, RegionKind::Collar { ring: 67, join: 0 });
        assert_eq!(regions[2].kind, RegionKind::Collar { ring: 75, join: 59 });
        assert_eq!(regions[3].kind, RegionKind::Seam { from: 67, to: 75 });
        assert_eq!(regions[3].vertices, 83..83);
    }

    #[test]
    fn forward_reference_is_rejected() {
        let mut recipe = Recipe::new("Forward", 8);
        recipe.collar("dangling", 1.0, 0.0, LoopId::Ring(StepId(3)));
        assert!(matches!(recipe.plan(), Err(ThreadMeshError::ContractViolation { .. })));
    }

    #[test]
    fn wrong_loop_kind_is_rejected() {
        let mut recipe = Recipe::new("Kinds", 8);
        let thread = recipe.thread("thread", small_thread(Polarity::Male));
        recipe.collar("bad", 1.0, 0.0, LoopId::Ring(thread.bottom.step()));
        assert!(recipe.plan().is_err());
    }

    #[test]
    fn seam_to_itself_is_rejected() {
        let mut recipe = Recipe::new("Self", 8);
        let thread = recipe.thread("thread", small_thread(Polarity::Male));
        let ring = recipe.collar("ring", 1.0, 0.0, thread.bottom);
        recipe.seam("loop", ring, ring);
        assert!(recipe.plan().is_err());
    }

    #[test]
    fn segment_mismatch_is_rejected() {
        let mut recipe = Recipe::new("Mismatch", 12);
        recipe.thread("thread", small_thread(Polarity::Male));
        assert!(recipe.plan().is_err());
    }

    #[test]
    fn non_positive_collar_is_degenerate() {
        let mut recipe = Recipe::new("Flat", 8);
        let thread = recipe.thread("thread", small_thread(Polarity::Male));
        recipe.collar("point", 0.0, 0.0, thread.bottom);
        assert!(matches!(recipe.plan(), Err(ThreadMeshError::DegenerateGeometry { .. })));
    }

    #[test]
    fn build_fills_every_slot() {
        let recipe = capped_thread();
        let mesh = recipe.assemble(&GenerationConfig::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 83);
        assert_eq!(mesh.face_count(), 72);
        assert!(mesh.validate().is_ok());
        // last seam quad wraps to the first vertex of both rings
        assert_eq!(mesh.faces()[71], Face::Quad([74, 67, 75, 82]));
    }

    #[test]
    fn foreign_layout_is_rejected() {
        let recipe = capped_thread();
        let mut other = Recipe::new("Other", 8);
        other.thread("thread", small_thread(Polarity::Male));
        let layout = other.plan().unwrap();
        assert!(recipe.build(&layout, &GenerationConfig::default()).is_err());
    }

    #[test]
    fn parallel_build_matches_sequential() {
        let recipe = capped_thread();
        let sequential = recipe.assemble(&GenerationConfig::default()).unwrap();
        let parallel = recipe
            .assemble(&GenerationConfig::default().with_parallel(true))
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn strict_mode_rejects_collapsed_faces() {
        let mut recipe = Recipe::new("Female", 8);
        recipe.thread("thread", small_thread(Polarity::Female));
        let config = GenerationConfig::default();
        assert!(recipe.assemble(&config).is_ok());
        let strict = config.with_strict_degeneracy(true);
        assert!(matches!(
            recipe.assemble(&strict),
            Err(ThreadMeshError::DegenerateGeometry { .. })
        ));
    }
}
