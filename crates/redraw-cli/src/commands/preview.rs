use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use redraw_core::editor::EditorMode;
use redraw_core::io::image_io::save_png;
use redraw_core::overlay::{render_coverage_overlay, render_polygon_overlay};

use crate::args::ToolArg;

#[derive(Args)]
pub struct PreviewArgs {
    /// Manga page to draw over
    pub file: PathBuf,

    /// Edit script (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    pub script: PathBuf,

    /// Tool active before the first step
    #[arg(long, value_enum)]
    pub tool: Option<ToolArg>,

    /// Output preview path
    #[arg(short, long, default_value = "preview.png")]
    pub output: PathBuf,
}

pub fn run(args: &PreviewArgs) -> Result<()> {
    let (page, editor, _) = super::edit_page(&args.file, &args.script, args.tool.map(Into::into))?;

    let preview = match editor.mode() {
        EditorMode::Brush => {
            render_coverage_overlay(page.pixels(), editor.brush().surface().coverage())
        }
        EditorMode::Polygon => render_polygon_overlay(page.pixels(), editor.polygon().editor()),
    };
    save_png(&preview, &args.output)
        .with_context(|| format!("Failed to write preview {}", args.output.display()))?;

    println!("Preview saved to {}", args.output.display());
    Ok(())
}
