use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use redraw_core::inpaint::{user_message, InpaintingService, ValidatingService};
use redraw_core::params::ParamsOverride;
use redraw_core::session::Session;
use redraw_core::settings::Settings;

use crate::args::{EncodingArg, InpaintAreaArg, MaskContentArg, ModeArg, ModelArg, ToolArg};
use crate::remote::GeminiService;
use crate::summary::print_request_summary;

#[derive(Args)]
pub struct ProcessArgs {
    /// Manga page (PNG, JPEG or WebP)
    pub file: PathBuf,

    /// Edit script that draws the mask
    #[arg(short, long, required_unless_present = "mask", conflicts_with = "mask")]
    pub script: Option<PathBuf>,

    /// Existing mask image instead of a script
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Colour convention of --mask
    #[arg(long, value_enum, default_value = "black")]
    pub mask_encoding: EncodingArg,

    /// Tool active before the first script step
    #[arg(long, value_enum)]
    pub tool: Option<ToolArg>,

    /// Redraw preset (defaults to the saved one)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Model (defaults to the saved one)
    #[arg(long, value_enum)]
    pub model: Option<ModelArg>,

    /// API key for this run only
    #[arg(long)]
    pub api_key: Option<String>,

    /// Override the preset prompt
    #[arg(long)]
    pub prompt: Option<String>,

    /// Override the preset negative prompt
    #[arg(long)]
    pub negative_prompt: Option<String>,

    /// Denoising strength (0.0-1.0)
    #[arg(long)]
    pub denoise: Option<f32>,

    /// Mask edge blur in pixels
    #[arg(long)]
    pub blur: Option<u32>,

    /// Context padding in pixels
    #[arg(long)]
    pub padding: Option<u32>,

    #[arg(long, value_enum)]
    pub mask_content: Option<MaskContentArg>,

    #[arg(long, value_enum)]
    pub inpaint_area: Option<InpaintAreaArg>,

    /// Print the request (API key redacted) instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Output file path
    #[arg(short, long, default_value = "redrawn.png")]
    pub output: PathBuf,
}

impl ProcessArgs {
    fn overrides(&self) -> ParamsOverride {
        ParamsOverride {
            prompt: self.prompt.clone(),
            negative_prompt: self.negative_prompt.clone(),
            denoising_strength: self.denoise,
            mask_blur: self.blur,
            padding: self.padding,
            mask_content: self.mask_content.map(Into::into),
            inpaint_area: self.inpaint_area.map(Into::into),
        }
    }
}

pub fn run(args: &ProcessArgs, settings_path: &Path) -> Result<()> {
    let settings = Settings::load(settings_path)
        .with_context(|| format!("Failed to read settings {}", settings_path.display()))?;

    let mut session = Session::from_settings(&settings);
    if let Some(mode) = args.mode {
        session.set_mode(mode.into());
    }
    if let Some(model) = args.model {
        session.set_model(model.into());
    }
    if let Some(ref key) = args.api_key {
        session.set_credential(key.as_str());
    }
    session
        .update_params(&args.overrides())
        .context("Invalid processing parameters")?;

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read page {}", args.file.display()))?;
    session
        .load_image(bytes, None)
        .with_context(|| format!("Failed to load page {}", args.file.display()))?;

    if let Some(ref mask_path) = args.mask {
        let mask_bytes = std::fs::read(mask_path)
            .with_context(|| format!("Failed to read mask {}", mask_path.display()))?;
        session.import_mask(&mask_bytes, args.mask_encoding.into())?;
    } else if let Some(ref script_path) = args.script {
        let script = redraw_core::script::EditScript::load(script_path)
            .with_context(|| format!("Failed to read edit script {}", script_path.display()))?;
        let editor = session.editor_mut()?;
        if let Some(tool) = args.tool {
            editor.select_tool(tool.into());
        }
        script.apply(editor)?;
    }

    print_request_summary(&session, &args.file, &args.output);

    let request = session.begin_submit()?;
    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&request.redacted())?);
        return Ok(());
    }

    let service = ValidatingService::new(GeminiService::new(
        &settings.endpoint,
        Duration::from_secs(settings.timeout_secs),
    )?);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]")?);
    pb.set_message(format!("Processing with {}", service.name()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let outcome = service.inpaint(&request);
    let finished = session.finish_submit(outcome);
    pb.finish_and_clear();

    if let Err(e) = finished {
        anyhow::bail!("{}", user_message(&e));
    }

    session
        .save_result(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Output saved to {}", args.output.display());

    Ok(())
}
