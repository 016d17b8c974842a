//! CLI for urlconv: URL -> JSON record (default) or JSON record -> URL (`-r`).

mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use urlconv_core::config::{self, UrlconvConfig};
use urlconv_core::{Converter, Direction};

use commands::{run_args, run_stdin};

/// Top-level CLI for urlconv.
#[derive(Debug, Parser)]
#[command(name = "urlconv")]
#[command(about = "Convert URLs to JSON records and back", long_about = None)]
pub struct Cli {
    /// Reverse mode: read JSON records and print URLs (json -> url).
    #[arg(short, long)]
    pub reverse: bool,

    /// Load configuration from this TOML file instead of ~/.config/urlconv/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Inputs to convert, one unit each. Reads standard input when none are given.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,
}

impl Cli {
    pub fn direction(&self) -> Direction {
        if self.reverse {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    pub fn load_config(&self) -> Result<UrlconvConfig> {
        match &self.config {
            Some(path) => config::load_from_path(path),
            None => config::load_or_default(),
        }
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let converter = Converter::new(&cfg);
        let direction = cli.direction();

        if cli.inputs.is_empty() {
            run_stdin(&converter, direction)?;
        } else {
            run_args(&converter, direction, &cli.inputs)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
