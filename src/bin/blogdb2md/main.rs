use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use spdlog::{info, warn};

use blogdb2md::converter::Converter;
use blogdb2md::logger::configure_logger;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "blogdb2md.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path. Without it blogdb2md.toml is looked up, then built-in defaults are used
    #[arg(short, long)]
    config_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = open_config(args.config_path)?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Converting {} into {}", config.paths.source_db.display(), config.paths.output_dir.display());

    let converter = Converter::new(&config);
    let count = converter.run().context("Conversion aborted")?;

    info!("Done. {} posts converted", count);
    Ok(())
}
