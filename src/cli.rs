//! Command-line interface for gofont.
//!
//! This module handles CLI argument parsing and the `init-config` subcommand.

use clap::{Parser, Subcommand};
use gofont_catalog::{FontCategory, FontSort, FontStyle, FontWeight, SelectedFont};
use gofont_config::{Config, LogLevel};
use std::path::{Path, PathBuf};

/// gofont - Browse the Google Fonts catalog and download font files
#[derive(Parser)]
#[command(name = "gofont")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Search text (case-insensitive substring of the family name)
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Result ordering
    #[arg(long, value_name = "alpha|newest|popularity|trending")]
    pub sort: Option<FontSort>,

    /// Only show families in this category (repeatable)
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<FontCategory>,

    /// Only show variants with this weight, e.g. 700 or bold (repeatable)
    #[arg(long = "weight", value_name = "WEIGHT")]
    pub weights: Vec<FontWeight>,

    /// Only show variants with this style: normal or italic (repeatable)
    #[arg(long = "style", value_name = "STYLE")]
    pub styles: Vec<FontStyle>,

    /// Results page to render (1-indexed)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Custom sample text
    #[arg(long, value_name = "TEXT")]
    pub sample: Option<String>,

    /// Sample size, e.g. 18pt
    #[arg(long, value_name = "SIZE")]
    pub size: Option<String>,

    /// Select a variant as "Family|variant" (repeatable)
    #[arg(long = "select", value_name = "FONT_ID", value_parser = parse_font_id)]
    pub selections: Vec<SelectedFont>,

    /// Write the rendered HTML page to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Download the selected variants into this directory
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = "")]
    pub download: Option<PathBuf>,

    /// Google Fonts API key (overrides the config file)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Configuration file to use instead of ~/.config/gofont/config.yaml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default configuration file and exit
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    pub search: Option<String>,
    pub sort: Option<FontSort>,
    pub categories: Vec<FontCategory>,
    pub weights: Vec<FontWeight>,
    pub styles: Vec<FontStyle>,
    pub page: Option<usize>,
    pub sample: Option<String>,
    pub size: Option<String>,
    pub selections: Vec<SelectedFont>,
    pub output: Option<PathBuf>,
    /// Download destination (Some(empty path) = configured directory)
    pub download: Option<PathBuf>,
    pub api_key: Option<String>,
    pub config: Option<PathBuf>,
    /// Log level from the command line; wins over RUST_LOG and the config
    pub log_level: Option<log::LevelFilter>,
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal application startup
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

fn parse_font_id(id: &str) -> Result<SelectedFont, String> {
    SelectedFont::parse_id(id).map_err(|e| e.to_string())
}

/// Process CLI arguments and handle subcommands
pub fn process_cli() -> CliResult {
    from_cli(Cli::parse())
}

/// Turn parsed arguments into runtime options, running any subcommand.
pub fn from_cli(cli: Cli) -> CliResult {
    match cli.command {
        Some(Commands::InitConfig { force }) => {
            let path = cli.config.unwrap_or_else(Config::config_path);
            match init_config(&path, force) {
                Ok(()) => CliResult::Exit(0),
                Err(e) => {
                    eprintln!("gofont: error: {e:#}");
                    CliResult::Exit(1)
                }
            }
        }
        None => CliResult::Continue(RuntimeOptions {
            search: cli.search,
            sort: cli.sort,
            categories: cli.categories,
            weights: cli.weights,
            styles: cli.styles,
            page: cli.page.map(|p| p as usize),
            sample: cli.sample,
            size: cli.size,
            selections: cli.selections,
            output: cli.output,
            download: cli.download,
            api_key: cli.api_key,
            config: cli.config,
            log_level: cli.log_level.map(|l| l.to_level_filter()),
        }),
    }
}

/// Write the default configuration to `path`.
fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save_to(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
