//! saber-parts: generate threaded hardware part meshes from the command line.
//!
//! # Logging
//!
//! Set `RUST_LOG` to control log output, or use `-v`/`-vv`:
//! - `RUST_LOG=thread_mesh=info` - one line per generated part
//! - `RUST_LOG=thread_mesh=debug` - one line per written region
//!
//! # Example
//!
//! ```bash
//! # All five parts at default resolution, welded, as OBJ
//! saber-parts generate all --weld --out parts/
//!
//! # A coarse hilt with overridden parameters
//! saber-parts defaults hilt > hilt.json
//! saber-parts generate hilt --params hilt.json --segments 64
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use thread_mesh::PartKind;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{defaults, generate, info};

/// saber-parts - parametric thread and collar meshes for lightsaber parts.
#[derive(Parser)]
#[command(name = "saber-parts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File format of generated meshes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MeshFormat {
    /// Wavefront OBJ with polygonal faces
    Obj,
    /// JSON dump of vertices and faces
    Json,
}

impl MeshFormat {
    fn extension(self) -> &'static str {
        match self {
            MeshFormat::Obj => "obj",
            MeshFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one part, or `all` five
    Generate {
        /// Part id (`blade-holder`, `coupler-female`, `coupler-male`, `hilt`, `pommel`) or `all`
        part: generate::Selection,

        /// JSON file holding one part configuration or an array of them
        #[arg(long)]
        params: Option<PathBuf>,

        /// Override vertices per loop
        #[arg(long)]
        segments: Option<u32>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Output file format
        #[arg(long, default_value = "obj")]
        format: MeshFormat,

        /// Merge coincident vertices before writing
        #[arg(long)]
        weld: bool,

        /// Write triangles instead of quads and fans (OBJ only)
        #[arg(long)]
        triangulate: bool,

        /// Write regions concurrently
        #[arg(long)]
        parallel: bool,

        /// Fail on collapsed faces instead of warning
        #[arg(long)]
        strict: bool,
    },

    /// Print the default parameters of a part as JSON
    Defaults {
        /// Part id
        part: PartKind,
    },

    /// Print a part's region layout and buffer counts
    Info {
        /// Part id
        part: PartKind,

        /// Override vertices per loop
        #[arg(long)]
        segments: Option<u32>,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "thread_mesh=info,saber_parts=info",
            2 => "thread_mesh=debug,saber_parts=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Generate {
            part,
            params,
            segments,
            out,
            format,
            weld,
            triangulate,
            parallel,
            strict,
        } => generate::run(
            &generate::Options {
                selection: *part,
                params: params.as_deref(),
                segments: *segments,
                out,
                format: *format,
                weld: *weld,
                triangulate: *triangulate,
                parallel: *parallel,
                strict: *strict,
            },
            cli.quiet,
        ),
        Commands::Defaults { part } => defaults::run(*part),
        Commands::Info { part, segments } => info::run(*part, *segments, cli.quiet),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            eprintln!("{}: {}", "Error".red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {}", "Caused by".yellow(), cause);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
