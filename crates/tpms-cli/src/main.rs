//! tpms CLI - TPMS mesh generation from a configuration file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tpms_cli::config::Config;
use tpms_cli::pipeline;
use tpms_core::export::MeshExport;

#[derive(Parser)]
#[command(name = "tpms")]
#[command(about = "Triply-periodic minimal surface mesh generation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a mesh from a configuration file
    Generate {
        /// Configuration file (JSON)
        #[arg(short, long)]
        conf: PathBuf,

        /// Save the mesh as binary STL. Will overwrite if it exists.
        #[arg(long)]
        stl: bool,

        /// Save a JSON run report next to the STL. Will overwrite if it exists.
        #[arg(long)]
        report: bool,

        /// Directory for output files (defaults to the current directory)
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            conf,
            stl,
            report,
            out_dir,
        } => run_generate(&conf, stl, report, &out_dir),
    }
}

fn run_generate(conf: &Path, stl: bool, report: bool, out_dir: &Path) -> Result<()> {
    let config = Config::load(conf).with_context(|| format!("loading {}", conf.display()))?;
    let plan = config.validate()?;

    let (mesh, summary) = pipeline::run(&plan)?;

    println!(
        "{}: {} vertices, {} triangles",
        config.metadata.filename, summary.vertices, summary.faces
    );

    if stl {
        let path = out_dir.join(format!("{}.stl", config.metadata.filename));
        mesh.export_stl(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("wrote {}", path.display());
    }

    if report {
        let path = out_dir.join(format!("{}.json", config.metadata.filename));
        let file = std::fs::File::create(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &summary)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
