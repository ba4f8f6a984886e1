use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use redraw_core::export::MaskImage;
use redraw_core::page::Page;

use crate::args::EncodingArg;

#[derive(Args)]
pub struct InfoArgs {
    /// Manga page (PNG, JPEG or WebP)
    pub file: PathBuf,

    /// Mask to summarise against the page
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Colour convention of --mask
    #[arg(long, value_enum, default_value = "black")]
    pub mask_encoding: EncodingArg,

    /// Context padding used for the inpaint region
    #[arg(long, default_value = "32")]
    pub padding: u32,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let page = Page::open(&args.file)
        .with_context(|| format!("Failed to load page {}", args.file.display()))?;

    println!("File:        {}", args.file.display());
    println!("Type:        {}", page.mime());
    println!("Dimensions:  {}x{}", page.width(), page.height());
    println!(
        "Data size:   {:.1} KB",
        page.encoded_bytes().len() as f64 / 1024.0
    );

    if let Some(ref mask_path) = args.mask {
        let bytes = std::fs::read(mask_path)
            .with_context(|| format!("Failed to read mask {}", mask_path.display()))?;
        let mask = MaskImage::decode(&bytes, args.mask_encoding.into())?;
        if mask.width() != page.width() || mask.height() != page.height() {
            anyhow::bail!(
                "Mask is {}x{} but the page is {}x{}",
                mask.width(),
                mask.height(),
                page.width(),
                page.height()
            );
        }
        let stats = mask.stats(args.padding);
        println!("Masked:      {} px ({:.2}%)", stats.masked_pixels, stats.fraction() * 100.0);
        match (stats.bounds, stats.padded_bounds) {
            (Some(b), Some(p)) => {
                println!("Bounds:      {}x{} at ({}, {})", b.width, b.height, b.x, b.y);
                println!("Inpaint:     {}x{} at ({}, {})", p.width, p.height, p.x, p.y);
            }
            _ => println!("Bounds:      (empty mask)"),
        }
    }

    Ok(())
}
