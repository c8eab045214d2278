//! saber-parts generate - build part meshes and write them to disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde::Deserialize;
use thread_mesh::export::write_obj;
use thread_mesh::mesh::fan_triangles;
use thread_mesh::{GenerationConfig, PartConfig, PartKind, PartMesh, ThreadMeshError, WeldingSink};
use tracing::info;

use crate::MeshFormat;

/// Which parts to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    All,
    One(PartKind),
}

impl Selection {
    fn kinds(self) -> Vec<PartKind> {
        match self {
            Selection::All => PartKind::ALL.to_vec(),
            Selection::One(kind) => vec![kind],
        }
    }
}

impl FromStr for Selection {
    type Err = ThreadMeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::One)
        }
    }
}

/// A parameter file holds a single part configuration or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum ParamsFile {
    Many(Vec<PartConfig>),
    One(PartConfig),
}

impl ParamsFile {
    fn into_vec(self) -> Vec<PartConfig> {
        match self {
            ParamsFile::Many(configs) => configs,
            ParamsFile::One(config) => vec![config],
        }
    }
}

pub struct Options<'a> {
    pub selection: Selection,
    pub params: Option<&'a Path>,
    pub segments: Option<u32>,
    pub out: &'a Path,
    pub format: MeshFormat,
    pub weld: bool,
    pub triangulate: bool,
    pub parallel: bool,
    pub strict: bool,
}

pub fn run(options: &Options<'_>, quiet: bool) -> Result<()> {
    if options.triangulate && options.format != MeshFormat::Obj {
        bail!("--triangulate only applies to OBJ output");
    }
    let overrides = match options.params {
        Some(path) => load_params(path)?,
        None => Vec::new(),
    };
    let configs = resolve_configs(options.selection, &overrides, options.segments)?;

    let generation = GenerationConfig::default()
        .with_parallel(options.parallel)
        .with_strict_degeneracy(options.strict);

    fs::create_dir_all(options.out)
        .with_context(|| format!("Failed to create output directory {:?}", options.out))?;

    for config in &configs {
        let mesh = config
            .generate(&generation)
            .with_context(|| format!("Failed to generate {}", config.kind()))?;
        let path = options
            .out
            .join(format!("{}.{}", mesh.name(), options.format.extension()));
        write_part(
            &mesh,
            &path,
            options.format,
            options.weld.then_some(generation.weld_distance),
            options.triangulate,
        )?;

        info!(
            part = %config.kind(),
            path = %path.display(),
            "Part written"
        );
        if !quiet {
            println!(
                "{} {} ({} vertices, {} faces) -> {}",
                "Generated".green().bold(),
                mesh.name(),
                mesh.vertex_count(),
                mesh.face_count(),
                path.display()
            );
        }
    }
    Ok(())
}

fn load_params(path: &Path) -> Result<Vec<PartConfig>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read parameters from {:?}", path))?;
    let file: ParamsFile = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse parameters in {:?}", path))?;
    Ok(file.into_vec())
}

/// Picks the configuration for every selected part: the file's entry when
/// it has one, the defaults otherwise.
fn resolve_configs(
    selection: Selection,
    overrides: &[PartConfig],
    segments: Option<u32>,
) -> Result<Vec<PartConfig>> {
    if let Selection::One(kind) = selection {
        if let Some(other) = overrides.iter().find(|c| c.kind() != kind) {
            bail!("parameter file describes {}, not {}", other.kind(), kind);
        }
    }

    let mut configs = Vec::new();
    for kind in selection.kinds() {
        let mut matching = overrides.iter().filter(|c| c.kind() == kind);
        let mut config = matching
            .next()
            .cloned()
            .unwrap_or_else(|| PartConfig::default_for(kind));
        if matching.next().is_some() {
            bail!("parameter file lists {} more than once", kind);
        }
        if let Some(segments) = segments {
            config.set_segments(segments);
        }
        configs.push(config);
    }
    Ok(configs)
}

fn write_part(
    mesh: &PartMesh,
    path: &Path,
    format: MeshFormat,
    weld: Option<f64>,
    triangulate: bool,
) -> Result<()> {
    // weld first: a failing sink must not leave an empty file behind
    let solid = weld
        .map(|distance| mesh.materialize(&mut WeldingSink::new(distance)))
        .transpose()
        .with_context(|| format!("Failed to weld {}", mesh.name()))?;

    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut out = BufWriter::new(file);

    match (&solid, format) {
        (Some(solid), MeshFormat::Obj) if triangulate => write_obj(
            &mut out,
            &solid.name,
            &solid.vertices,
            &fan_triangles(&solid.faces),
        )?,
        (Some(solid), MeshFormat::Obj) => {
            write_obj(&mut out, &solid.name, &solid.vertices, &solid.faces)?
        }
        (Some(solid), MeshFormat::Json) => serde_json::to_writer(&mut out, solid)?,
        (None, MeshFormat::Obj) if triangulate => {
            write_obj(&mut out, mesh.name(), mesh.vertices(), &mesh.triangles())?
        }
        (None, MeshFormat::Obj) => write_obj(&mut out, mesh.name(), mesh.vertices(), mesh.faces())?,
        (None, MeshFormat::Json) => serde_json::to_writer(&mut out, mesh)?,
    }

    out.flush()
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
