//! Canonical mask export.
//!
//! Editor state (raster coverage or a polygon list) is turned into a
//! fixed-format RGBA mask with the same dimensions as the source page, then
//! into PNG bytes and a base64 string for transport. Export is a pure
//! function of editor state, so exporting unchanged state twice yields
//! byte-identical output.

use std::fmt;

use image::{Rgba, RgbaImage};
use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::consts::{EDIT_PIXEL, PARALLEL_PIXEL_THRESHOLD, PRESERVE_PIXEL};
use crate::error::Result;
use crate::geometry::{PixelRect, Point};
use crate::io::image_io::{encode_base64, encode_png, ImageMime};
use crate::polygon::fill::fill_polygon;

/// Which colour marks the region to repaint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskEncoding {
    /// Edit = opaque black, preserve = opaque white. The canonical encoding
    /// sent to the inpainting service.
    #[default]
    BlackEdit,
    /// Edit = opaque white on a black background, as produced by polygon
    /// rasterisation.
    WhiteEdit,
}

impl MaskEncoding {
    pub fn edit_pixel(self) -> [u8; 4] {
        match self {
            Self::BlackEdit => EDIT_PIXEL,
            Self::WhiteEdit => PRESERVE_PIXEL,
        }
    }

    pub fn preserve_pixel(self) -> [u8; 4] {
        match self {
            Self::BlackEdit => PRESERVE_PIXEL,
            Self::WhiteEdit => EDIT_PIXEL,
        }
    }
}

impl fmt::Display for MaskEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlackEdit => write!(f, "black = edit"),
            Self::WhiteEdit => write!(f, "white = edit"),
        }
    }
}

/// A binary edit/preserve mask.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskImage {
    pixels: RgbaImage,
    encoding: MaskEncoding,
}

/// Summary of a mask's edit region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskStats {
    pub masked_pixels: u64,
    pub total_pixels: u64,
    /// Tight bounds of the edit region.
    pub bounds: Option<PixelRect>,
    /// `bounds` grown by the inpaint padding and clamped to the page.
    pub padded_bounds: Option<PixelRect>,
}

impl MaskStats {
    pub fn fraction(&self) -> f64 {
        if self.total_pixels == 0 {
            0.0
        } else {
            self.masked_pixels as f64 / self.total_pixels as f64
        }
    }
}

impl MaskImage {
    /// A mask with nothing selected.
    pub fn empty(width: u32, height: u32, encoding: MaskEncoding) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba(encoding.preserve_pixel())),
            encoding,
        }
    }

    /// Classify an arbitrary decoded image as a mask in `encoding`: for
    /// black-edit masks dark pixels are edits, for white-edit masks bright ones.
    pub fn decode(bytes: &[u8], encoding: MaskEncoding) -> Result<Self> {
        let luma = image::load_from_memory(bytes)?.to_luma8();
        let (w, h) = luma.dimensions();
        let mut pixels = RgbaImage::from_pixel(w, h, Rgba(encoding.preserve_pixel()));
        for (x, y, p) in luma.enumerate_pixels() {
            let dark = p.0[0] < 128;
            let edit = match encoding {
                MaskEncoding::BlackEdit => dark,
                MaskEncoding::WhiteEdit => !dark,
            };
            if edit {
                pixels.put_pixel(x, y, Rgba(encoding.edit_pixel()));
            }
        }
        Ok(Self { pixels, encoding })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn encoding(&self) -> MaskEncoding {
        self.encoding
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn is_edit(&self, x: u32, y: u32) -> bool {
        self.pixels.get_pixel(x, y).0 == self.encoding.edit_pixel()
    }

    pub fn edit_pixel_count(&self) -> u64 {
        let edit = self.encoding.edit_pixel();
        self.pixels.pixels().filter(|p| p.0 == edit).count() as u64
    }

    pub fn is_empty_selection(&self) -> bool {
        let edit = self.encoding.edit_pixel();
        !self.pixels.pixels().any(|p| p.0 == edit)
    }

    /// Same selection expressed in another encoding.
    pub fn to_encoding(&self, encoding: MaskEncoding) -> MaskImage {
        if encoding == self.encoding {
            return self.clone();
        }
        let from_edit = self.encoding.edit_pixel();
        let mut pixels = self.pixels.clone();
        for p in pixels.pixels_mut() {
            p.0 = if p.0 == from_edit {
                encoding.edit_pixel()
            } else {
                encoding.preserve_pixel()
            };
        }
        MaskImage { pixels, encoding }
    }

    /// The black = edit form sent over the wire.
    pub fn canonical(&self) -> MaskImage {
        self.to_encoding(MaskEncoding::BlackEdit)
    }

    /// 255 where the mask selects, 0 elsewhere.
    pub fn edit_coverage(&self) -> Array2<u8> {
        let (w, h) = self.pixels.dimensions();
        let edit = self.encoding.edit_pixel();
        Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
            if self.pixels.get_pixel(col as u32, row as u32).0 == edit {
                u8::MAX
            } else {
                0
            }
        })
    }

    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.pixels)
    }

    pub fn to_base64(&self) -> Result<String> {
        Ok(encode_base64(&self.to_png()?))
    }

    pub fn to_data_url(&self) -> Result<String> {
        Ok(format!(
            "data:{};base64,{}",
            ImageMime::Png.as_str(),
            self.to_base64()?
        ))
    }

    pub fn stats(&self, padding: u32) -> MaskStats {
        let (w, h) = self.pixels.dimensions();
        let edit = self.encoding.edit_pixel();

        let mut masked = 0u64;
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        for (x, y, p) in self.pixels.enumerate_pixels() {
            if p.0 == edit {
                masked += 1;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }

        let bounds = (masked > 0).then(|| PixelRect {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        });

        MaskStats {
            masked_pixels: masked,
            total_pixels: w as u64 * h as u64,
            bounds,
            padded_bounds: bounds.map(|b| b.expanded(padding, w, h)),
        }
    }
}

/// Binarise raster coverage: any coverage above zero becomes an edit pixel.
pub fn export_raster(coverage: &Array2<u8>) -> MaskImage {
    let (h, w) = coverage.dim();

    let raw: Vec<u8> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<u8>> = (0..h)
            .into_par_iter()
            .map(|row| binarize_row(coverage, row))
            .collect();
        rows.concat()
    } else {
        (0..h).flat_map(|row| binarize_row(coverage, row)).collect()
    };

    let pixels = RgbaImage::from_raw(w as u32, h as u32, raw)
        .expect("buffer size matches dimensions");
    MaskImage {
        pixels,
        encoding: MaskEncoding::BlackEdit,
    }
}

fn binarize_row(coverage: &Array2<u8>, row: usize) -> Vec<u8> {
    coverage
        .row(row)
        .iter()
        .flat_map(|&a| if a > 0 { EDIT_PIXEL } else { PRESERVE_PIXEL })
        .collect()
}

/// Fill every polygon with at least three vertices white on a black
/// background (even-odd rule per polygon, union across polygons).
pub fn export_polygons(polygons: &[Vec<Point>], width: u32, height: u32) -> MaskImage {
    let encoding = MaskEncoding::WhiteEdit;
    let mut pixels = RgbaImage::from_pixel(width, height, Rgba(encoding.preserve_pixel()));
    let edit = Rgba(encoding.edit_pixel());
    for polygon in polygons {
        fill_polygon(polygon, width, height, |col, row| {
            pixels.put_pixel(col as u32, row as u32, edit);
        });
    }
    MaskImage { pixels, encoding }
}
