use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedrawError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid base64 data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Unsupported image type: {0} (expected image/png, image/jpeg or image/webp)")]
    UnsupportedMimeType(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error(
        "Dimension mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}"
    )]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Upload a manga page before processing")]
    MissingImage,

    #[error("Please draw a mask over the text areas to remove")]
    MissingMask,

    #[error("API key is required")]
    MissingCredential,

    #[error("An image is already being processed")]
    SubmitInFlight,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid processing parameters: {0}")]
    InvalidParams(String),

    #[error("Cannot {action} while {state}")]
    InvalidState { state: String, action: &'static str },

    #[error("{0}")]
    Collaborator(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Edit script error: {0}")]
    Script(String),
}

pub type Result<T> = std::result::Result<T, RedrawError>;
