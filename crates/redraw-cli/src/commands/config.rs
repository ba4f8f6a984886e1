use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use redraw_core::settings::Settings;

use crate::args::{ModeArg, ModelArg};
use crate::summary::print_settings;

#[derive(Args)]
pub struct ConfigArgs {
    /// Save a Gemini API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Forget the saved API key
    #[arg(long, conflicts_with = "api_key")]
    pub clear_api_key: bool,

    /// Default model
    #[arg(long, value_enum)]
    pub model: Option<ModelArg>,

    /// API root URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Default redraw mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Undo snapshots kept per editing mode
    #[arg(long)]
    pub history_limit: Option<usize>,
}

/// `~/.config/manga-redraw/settings.toml`, or a relative path when there is
/// no home directory.
pub fn default_settings_path() -> PathBuf {
    dirs_next::home_dir()
        .map(|home| home.join(".config"))
        .unwrap_or_default()
        .join("manga-redraw")
        .join("settings.toml")
}

pub fn run(args: &ConfigArgs, path: &Path) -> Result<()> {
    let mut settings = Settings::load(path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;

    let mut changed = false;
    if let Some(ref key) = args.api_key {
        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("API key must not be empty (use --clear-api-key to remove it)");
        }
        settings.api_key = key.to_string();
        changed = true;
    }
    if args.clear_api_key {
        settings.api_key.clear();
        changed = true;
    }
    if let Some(model) = args.model {
        settings.model = model.into();
        changed = true;
    }
    if let Some(ref endpoint) = args.endpoint {
        settings.endpoint = endpoint.trim_end_matches('/').to_string();
        changed = true;
    }
    if let Some(timeout) = args.timeout {
        settings.timeout_secs = timeout.max(1);
        changed = true;
    }
    if let Some(mode) = args.mode {
        settings.default_mode = mode.into();
        changed = true;
    }
    if let Some(limit) = args.history_limit {
        settings.history_limit = limit.max(1);
        changed = true;
    }

    if changed {
        settings
            .save(path)
            .with_context(|| format!("Failed to write settings {}", path.display()))?;
        println!("Settings saved to {}", path.display());
    }
    print_settings(&settings, path);

    Ok(())
}
