//! saber-parts info - print a part's region layout.

use anyhow::{Context, Result};
use colored::Colorize;
use thread_mesh::{PartConfig, PartKind, RegionKind};

pub fn run(part: PartKind, segments: Option<u32>, quiet: bool) -> Result<()> {
    let mut config = PartConfig::default_for(part);
    if let Some(segments) = segments {
        config.set_segments(segments);
    }
    let recipe = config.recipe();
    let layout = recipe
        .plan()
        .with_context(|| format!("Failed to plan {}", part))?;

    if quiet {
        return Ok(());
    }

    println!("{}", format!("{} ({})", recipe.name(), part).bold().underline());
    println!("  {}: {}", "Segments".cyan(), recipe.segments());
    println!("  {}: {}", "Regions".cyan(), layout.regions().len());
    println!("  {}: {}", "Buffers".cyan(), layout.counts());
    println!();

    for (index, region) in layout.regions().iter().enumerate() {
        let joins = match region.kind {
            RegionKind::Thread { bottom, top } => format!("loops {bottom}/{top}"),
            RegionKind::Collar { ring, join } => format!("ring {ring} -> {join}"),
            RegionKind::Seam { from, to } => format!("{from} -> {to}"),
        };
        println!(
            "  {:>2} {:<7} {:<18} v {:>6}..{:<6} f {:>6}..{:<6} {}",
            index,
            region.kind_name(),
            region.label,
            region.vertices.start,
            region.vertices.end,
            region.faces.start,
            region.faces.end,
            joins.dimmed()
        );
    }
    Ok(())
}
