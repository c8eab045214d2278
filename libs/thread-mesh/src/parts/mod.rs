//! # Hardware Parts
//!
//! One parameter struct per part, each turning its fields into a [`Recipe`]
//! and declaring the closed-form buffer sizes that recipe must produce.
//! [`PartRecipe::generate`] cross-checks the two before building anything.
//!
//! | Part             | Threads               | Extra vertices | Extra faces |
//! |------------------|-----------------------|----------------|-------------|
//! | `BladeHolder`    | male                  | 9V             | 10V         |
//! | `CPFemaleHolder` | female top and bottom | 15V            | 17V         |
//! | `CPMaleHolder`   | male top and bottom   | 13V            | 15V         |
//! | `Hilt`           | male and female       | 12V            | 14V         |
//! | `Pommel`         | female                | 7V             | 7V          |
//!
//! "Extra" counts come on top of `N(VL+1)` vertices and `(N-1)VL` faces per
//! thread.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::error::{BufferKind, Result, ThreadMeshError};
use crate::mesh::PartMesh;
use crate::profile::ThreadProfile;
use crate::recipe::{BufferCounts, Recipe};

mod blade_holder;
mod coupler;
mod hilt;
mod pommel;

pub use blade_holder::BladeHolderConfig;
pub use coupler::{CouplerFemaleConfig, CouplerMaleConfig};
pub use hilt::HiltConfig;
pub use pommel::PommelConfig;

/// The five hardware parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartKind {
    /// Holder the blade screws into.
    BladeHolder,
    /// Sleeve with a female thread at both ends.
    CouplerFemale,
    /// Sleeve with a male thread at both ends.
    CouplerMale,
    /// Grip section with one male and one female thread.
    Hilt,
    /// Female end cap.
    Pommel,
}

impl PartKind {
    /// Every part, in generation order.
    pub const ALL: [PartKind; 5] = [
        PartKind::BladeHolder,
        PartKind::CouplerFemale,
        PartKind::CouplerMale,
        PartKind::Hilt,
        PartKind::Pommel,
    ];

    /// Object name handed to mesh sinks.
    pub fn mesh_name(self) -> &'static str {
        match self {
            PartKind::BladeHolder => "BladeHolder",
            PartKind::CouplerFemale => "CPFemaleHolder",
            PartKind::CouplerMale => "CPMaleHolder",
            PartKind::Hilt => "Hilt",
            PartKind::Pommel => "Pommel",
        }
    }

    /// Kebab-case identifier used in parameter files and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            PartKind::BladeHolder => "blade-holder",
            PartKind::CouplerFemale => "coupler-female",
            PartKind::CouplerMale => "coupler-male",
            PartKind::Hilt => "hilt",
            PartKind::Pommel => "pommel",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PartKind {
    type Err = ThreadMeshError;

    /// Accepts either the kebab-case id or the mesh name, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        PartKind::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(s) || kind.mesh_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ThreadMeshError::contract(format!("unknown part '{s}'")))
    }
}

/// Parameter struct that can build one part.
pub trait PartRecipe {
    /// Which part these parameters describe.
    fn kind(&self) -> PartKind;

    /// Vertices per loop.
    fn segments(&self) -> u32;

    /// Overrides the vertices per loop.
    fn set_segments(&mut self, segments: u32);

    /// Step list for the current parameters.
    fn recipe(&self) -> Recipe;

    /// Closed-form buffer sizes of the part.
    fn expected_counts(&self) -> BufferCounts;

    /// Plans the recipe, checks the planned sizes against
    /// [`PartRecipe::expected_counts`] and builds the mesh.
    fn generate(&self, config: &GenerationConfig) -> Result<PartMesh> {
        let recipe = self.recipe();
        let layout = recipe.plan()?;
        let planned = layout.counts();
        let expected = self.expected_counts();
        if planned.vertices != expected.vertices {
            return Err(ThreadMeshError::size_mismatch(
                recipe.name(),
                BufferKind::Vertices,
                expected.vertices,
                planned.vertices,
            ));
        }
        if planned.faces != expected.faces {
            return Err(ThreadMeshError::size_mismatch(
                recipe.name(),
                BufferKind::Faces,
                expected.faces,
                planned.faces,
            ));
        }
        recipe.build(&layout, config)
    }
}

/// Buffer sizes of a part: `N(VL+1)` vertices and `(N-1)VL` faces per
/// thread `(loops, profile)`, plus `extra_vertices * V` and `extra_faces * V`.
pub(crate) fn closed_form_counts(
    segments: u32,
    threads: &[(u32, ThreadProfile)],
    extra_vertices: usize,
    extra_faces: usize,
) -> BufferCounts {
    let v = segments as usize;
    threads.iter().fold(
        BufferCounts {
            vertices: extra_vertices * v,
            faces: extra_faces * v,
        },
        |counts, (loops, profile)| {
            let n = profile.point_count();
            let sweep = v * *loops as usize;
            BufferCounts {
                vertices: counts.vertices + n * (sweep + 1),
                faces: counts.faces + (n - 1) * sweep,
            }
        },
    )
}

/// Parameters of any part, tagged by `"part"` in parameter files.
///
/// # Example
///
/// ```rust
/// use thread_mesh::{PartConfig, PartKind};
///
/// let config: PartConfig = serde_json::from_str(r#"{"part": "hilt", "locking": true}"#).unwrap();
/// assert_eq!(config.kind(), PartKind::Hilt);
/// assert_eq!(config.segments(), 256);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "part", rename_all = "kebab-case")]
pub enum PartConfig {
    /// See [`BladeHolderConfig`].
    BladeHolder(BladeHolderConfig),
    /// See [`CouplerFemaleConfig`].
    CouplerFemale(CouplerFemaleConfig),
    /// See [`CouplerMaleConfig`].
    CouplerMale(CouplerMaleConfig),
    /// See [`HiltConfig`].
    Hilt(HiltConfig),
    /// See [`PommelConfig`].
    Pommel(PommelConfig),
}

impl PartConfig {
    /// Default parameters for `kind`.
    pub fn default_for(kind: PartKind) -> Self {
        match kind {
            PartKind::BladeHolder => PartConfig::BladeHolder(BladeHolderConfig::default()),
            PartKind::CouplerFemale => PartConfig::CouplerFemale(CouplerFemaleConfig::default()),
            PartKind::CouplerMale => PartConfig::CouplerMale(CouplerMaleConfig::default()),
            PartKind::Hilt => PartConfig::Hilt(HiltConfig::default()),
            PartKind::Pommel => PartConfig::Pommel(PommelConfig::default()),
        }
    }

    fn inner(&self) -> &dyn PartRecipe {
        match self {
            PartConfig::BladeHolder(c) => c,
            PartConfig::CouplerFemale(c) => c,
            PartConfig::CouplerMale(c) => c,
            PartConfig::Hilt(c) => c,
            PartConfig::Pommel(c) => c,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn PartRecipe {
        match self {
            PartConfig::BladeHolder(c) => c,
            PartConfig::CouplerFemale(c) => c,
            PartConfig::CouplerMale(c) => c,
            PartConfig::Hilt(c) => c,
            PartConfig::Pommel(c) => c,
        }
    }

    /// Which part these parameters describe.
    pub fn kind(&self) -> PartKind {
        self.inner().kind()
    }

    /// Vertices per loop.
    pub fn segments(&self) -> u32 {
        self.inner().segments()
    }

    /// Overrides the vertices per loop.
    pub fn set_segments(&mut self, segments: u32) {
        self.inner_mut().set_segments(segments);
    }

    /// Step list for the current parameters.
    pub fn recipe(&self) -> Recipe {
        self.inner().recipe()
    }

    /// Closed-form buffer sizes of the part.
    pub fn expected_counts(&self) -> BufferCounts {
        self.inner().expected_counts()
    }

    /// Builds the part; see [`PartRecipe::generate`].
    pub fn generate(&self, config: &GenerationConfig) -> Result<PartMesh> {
        self.inner().generate(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_ids_and_mesh_names() {
        assert_eq!("hilt".parse::<PartKind>().unwrap(), PartKind::Hilt);
        assert_eq!("CPFemaleHolder".parse::<PartKind>().unwrap(), PartKind::CouplerFemale);
        assert_eq!("coupler-male".parse::<PartKind>().unwrap(), PartKind::CouplerMale);
        assert!("saber".parse::<PartKind>().is_err());
    }

    #[test]
    fn default_configs_report_their_kind() {
        for kind in PartKind::ALL {
            assert_eq!(PartConfig::default_for(kind).kind(), kind);
        }
    }

    #[test]
    fn set_segments_reaches_inner_config() {
        let mut config = PartConfig::default_for(PartKind::Pommel);
        config.set_segments(24);
        assert_eq!(config.segments(), 24);
        assert_eq!(config.recipe().segments(), 24);
    }

    #[test]
    fn closed_form_counts_single_thread() {
        let profile = ThreadProfile::new(1.0, 0.0, 1.0, 0.0);
        let counts = closed_form_counts(8, &[(2, profile)], 2, 2);
        assert_eq!(counts, BufferCounts { vertices: 67, faces: 48 });
    }
}
