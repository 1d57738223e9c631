//! o2w-export - O2W scene export tool
//!
//! Converts a JSON scene description into an O2W binary block stream.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use o2w_export::{ExportConfig, export_scene, load_config};

#[derive(Parser)]
#[command(name = "o2w-export")]
#[command(about = "O2W scene export tool")]
#[command(version)]
struct Cli {
    /// Input scene file (JSON)
    input: PathBuf,

    /// Output O2W binary file
    output: PathBuf,

    /// Export config (TOML); defaults to buildings only, no terrain
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Synthesize a terrain surface under the scene
    #[arg(long)]
    create_terrain: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ExportConfig::default(),
    };
    if cli.create_terrain {
        config.create_terrain = true;
    }

    tracing::info!("Converting {:?} -> {:?}", cli.input, cli.output);
    export_scene(&cli.input, &cli.output, &config)?;
    tracing::info!("Done!");

    Ok(())
}
