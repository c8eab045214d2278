//! saber-parts defaults - print a part's default parameters.

use anyhow::Result;
use thread_mesh::{PartConfig, PartKind};

pub fn run(part: PartKind) -> Result<()> {
    let config = PartConfig::default_for(part);
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
