use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use redraw_core::io::image_io::save_png;

use crate::args::ToolArg;

#[derive(Args)]
pub struct MaskArgs {
    /// Manga page the mask is drawn over
    pub file: PathBuf,

    /// Edit script (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    pub script: PathBuf,

    /// Tool active before the first step
    #[arg(long, value_enum)]
    pub tool: Option<ToolArg>,

    /// Keep the active modality's own colours instead of black = edit
    #[arg(long)]
    pub native: bool,

    /// Also print the mask as base64
    #[arg(long)]
    pub base64: bool,

    /// Output mask path
    #[arg(short, long, default_value = "mask.png")]
    pub output: PathBuf,
}

pub fn run(args: &MaskArgs) -> Result<()> {
    let (page, editor, report) =
        super::edit_page(&args.file, &args.script, args.tool.map(Into::into))?;

    let mask = if args.native {
        editor.mask().clone()
    } else {
        editor.canonical_mask()
    };
    save_png(mask.pixels(), &args.output)
        .with_context(|| format!("Failed to write mask {}", args.output.display()))?;

    let stats = mask.stats(0);
    println!("Page:      {}x{}", page.width(), page.height());
    println!("Steps:     {} ({} commits)", report.steps, report.commits);
    if report.unbound_keys > 0 {
        println!("Unbound:   {} key(s)", report.unbound_keys);
    }
    println!("Encoding:  {}", mask.encoding());
    println!(
        "Masked:    {} px ({:.2}%)",
        stats.masked_pixels,
        stats.fraction() * 100.0
    );
    if args.base64 {
        println!("{}", mask.to_base64()?);
    }
    println!("\nMask saved to {}", args.output.display());

    Ok(())
}
