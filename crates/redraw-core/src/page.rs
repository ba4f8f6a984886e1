use std::path::Path;

use image::RgbaImage;
use tracing::info;

use crate::error::{RedrawError, Result};
use crate::io::image_io::{encode_base64, ImageMime};

/// A decoded source page. Immutable once loaded; replaced wholesale when a
/// new page is uploaded.
#[derive(Clone, Debug)]
pub struct Page {
    pixels: RgbaImage,
    mime: ImageMime,
    /// Original upload bytes, forwarded to the inpainting service unchanged.
    encoded: Vec<u8>,
}

impl Page {
    /// Decode uploaded bytes. A declared MIME type is checked against the
    /// accepted set; without one the format is sniffed from the bytes.
    pub fn decode(bytes: Vec<u8>, declared_mime: Option<&str>) -> Result<Self> {
        let mime = match declared_mime {
            Some(m) => ImageMime::from_mime(m)?,
            None => ImageMime::sniff(&bytes)?,
        };
        let pixels = image::load_from_memory_with_format(&bytes, mime.format())?.to_rgba8();
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(RedrawError::InvalidDimensions { width, height });
        }
        info!(width, height, mime = %mime, bytes = bytes.len(), "Page decoded");
        Ok(Self {
            pixels,
            mime,
            encoded: bytes,
        })
    }

    /// Load a page from disk, taking the MIME type from the extension when it
    /// is recognised and sniffing otherwise.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let declared = ImageMime::from_path(path).map(ImageMime::as_str);
        Self::decode(bytes, declared)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    pub fn encoded_bytes(&self) -> &[u8] {
        &self.encoded
    }

    pub fn to_base64(&self) -> String {
        encode_base64(&self.encoded)
    }
}
