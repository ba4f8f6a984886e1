//! Boundary to the external inpainting model.
//!
//! The core builds an [`InpaintRequest`] (page + canonical mask + params),
//! validates it, and hands it to an [`InpaintingService`]. Whatever the
//! service reports back is normalised into either a processed image or a
//! user-facing [`RedrawError::Collaborator`](crate::error::RedrawError)
//! message.

pub(crate) mod request;
mod service;

pub use request::{InpaintRequest, InpaintResponse};
pub use service::{normalize_remote_error, user_message, InpaintingService, ValidatingService};
