use std::fmt;

use crate::io::image_io::ImageMime;

/// Resting states of a [`Session`](super::Session).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No page loaded.
    #[default]
    Idle,
    /// Page loaded, mask editable.
    Masking,
    /// A request is out; waiting for the service.
    Submitting,
    /// An inpainted page is available.
    Result,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "no image is loaded"),
            Self::Masking => write!(f, "editing the mask"),
            Self::Submitting => write!(f, "processing"),
            Self::Result => write!(f, "showing a result"),
        }
    }
}

/// The image returned by the inpainting service.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedResult {
    pub bytes: Vec<u8>,
    pub mime: ImageMime,
}
