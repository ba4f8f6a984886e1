mod args;
mod commands;
mod remote;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "redraw", about = "Manga text removal with masked inpainting")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (defaults to ~/.config/manga-redraw/settings.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show page metadata and, optionally, mask statistics
    Info(commands::info::InfoArgs),
    /// List redraw presets or dump one as TOML
    Presets(commands::presets::PresetsArgs),
    /// Show or update the saved API key, model and endpoint
    Config(commands::config::ConfigArgs),
    /// Replay an edit script and write the resulting mask
    Mask(commands::mask::MaskArgs),
    /// Replay an edit script and render an overlay preview
    Preview(commands::preview::PreviewArgs),
    /// Send a page and its mask for inpainting
    Process(commands::process::ProcessArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(commands::config::default_settings_path);

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Config(args) => commands::config::run(args, &settings_path),
        Commands::Mask(args) => commands::mask::run(args),
        Commands::Preview(args) => commands::preview::run(args),
        Commands::Process(args) => commands::process::run(args, &settings_path),
    }
}
