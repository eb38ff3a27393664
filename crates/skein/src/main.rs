use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use skein::{config::Config, orchestrator::BundleOrchestrator};

#[derive(Debug, Parser)]
#[command(
    name = "skein",
    version,
    about = "Bundle a multi-package Scala project into a single source file"
)]
struct Cli {
    /// Entry source file; its transitive dependencies define the bundle
    entry: PathBuf,

    /// Source roots to scan (defaults to the entry file's directory)
    #[arg(short, long)]
    src: Vec<PathBuf>,

    /// Write the bundle here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a skein.toml configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if !cli.src.is_empty() {
        config.src = cli.src;
    }
    if cli.output.is_some() {
        config.output = cli.output;
    }

    let result = BundleOrchestrator::new(config.clone()).bundle(&cli.entry)?;

    match &config.output {
        Some(path) => fs::write(path, &result.code)
            .with_context(|| format!("failed to write bundle to {}", path.display()))?,
        None => io::stdout()
            .write_all(result.code.as_bytes())
            .context("failed to write bundle to stdout")?,
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
