use tracing::warn;

use crate::error::{RedrawError, Result};

use super::request::{InpaintRequest, InpaintResponse};

/// Anything that can turn a page + mask into an inpainted page.
///
/// Implementations may block; callers that need to stay responsive run them
/// between `Session::begin_submit` and `Session::finish_submit`.
pub trait InpaintingService: Send + Sync {
    fn name(&self) -> &str;

    fn inpaint(&self, request: &InpaintRequest) -> Result<InpaintResponse>;
}

impl<S: InpaintingService + ?Sized> InpaintingService for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn inpaint(&self, request: &InpaintRequest) -> Result<InpaintResponse> {
        (**self).inpaint(request)
    }
}

/// Validates every request before the inner service sees it.
#[derive(Clone, Debug)]
pub struct ValidatingService<S> {
    inner: S,
}

impl<S: InpaintingService> ValidatingService<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: InpaintingService> InpaintingService for ValidatingService<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn inpaint(&self, request: &InpaintRequest) -> Result<InpaintResponse> {
        if let Err(e) = request.validate() {
            warn!(service = self.inner.name(), error = %e, "Rejected request");
            return Err(e);
        }
        self.inner.inpaint(request)
    }
}

/// Map a raw remote failure onto the message shown to the user.
pub fn normalize_remote_error(raw: &str) -> RedrawError {
    let lower = raw.to_lowercase();
    let message = if lower.contains("api key") || lower.contains("api_key") {
        "Invalid API key. Please check your Gemini API key.".to_string()
    } else if lower.contains("quota") {
        "API quota exceeded. Please check your Gemini API usage.".to_string()
    } else if raw.trim().is_empty() {
        "Failed to process image".to_string()
    } else {
        format!("Gemini API error: {}", raw.trim())
    };
    RedrawError::Collaborator(message)
}

/// The message a user sees for `error`.
pub fn user_message(error: &RedrawError) -> String {
    match error {
        RedrawError::Collaborator(message) => message.clone(),
        RedrawError::Io(e) => format!("Failed to process image: {e}"),
        other => other.to_string(),
    }
}
