//! # Thread Mesh
//!
//! Parametric mesh generation for screw-threaded hardware parts: a blade
//! holder, two couplers, a hilt and a pommel. Each part is a solid of
//! revolution made of one or two helical thread regions joined by circular
//! collars and seams.
//!
//! ## Architecture
//!
//! ```text
//! part config (radii, loops, offsets)
//!     → Recipe (Thread / Collar / Seam steps)
//!     → Layout (disjoint vertex and face ranges per region)
//!     → PartMesh (vertices, polygon faces)
//!     → MeshSink (welding, host solid)
//! ```
//!
//! Every region's vertex and face counts are known before anything is
//! written. Both buffers are allocated once per part and each region fills
//! exactly its own range; a count mismatch is an error, never a truncated
//! or partly zeroed mesh.
//!
//! ## Usage
//!
//! ```rust
//! use thread_mesh::{GenerationConfig, PartConfig, PartKind, WeldingSink};
//!
//! let mut config = PartConfig::default_for(PartKind::Hilt);
//! config.set_segments(16);
//! let mesh = config.generate(&GenerationConfig::default()).unwrap();
//! assert_eq!(mesh.vertex_count(), config.expected_counts().vertices);
//!
//! let solid = mesh.materialize(&mut WeldingSink::default()).unwrap();
//! assert_eq!(solid.name, "Hilt");
//! ```

pub mod collar;
pub mod config;
pub mod error;
pub mod export;
pub mod mesh;
pub mod parts;
pub mod profile;
pub mod recipe;
pub mod region;
pub mod sink;
pub mod thread;

pub use crate::config::GenerationConfig;
pub use error::{BufferKind, Result, ThreadMeshError};
pub use mesh::{fan_triangles, Face, PartMesh};
pub use parts::{
    BladeHolderConfig, CouplerFemaleConfig, CouplerMaleConfig, HiltConfig, PartConfig, PartKind,
    PartRecipe, PommelConfig,
};
pub use profile::{PointKind, ProfilePoint, ThreadProfile};
pub use recipe::{BufferCounts, Layout, LoopId, Recipe, Step, StepId, ThreadLoops};
pub use region::{Region, RegionKind};
pub use sink::{MeshSink, Solid, WeldingSink};
pub use thread::{crest_taper, Polarity, ThreadSpec};
