use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RedrawError, Result};
use crate::io::image_io::{decode_base64, is_well_formed_base64, ImageMime};
use crate::params::ProcessingParams;

/// One page + mask sent for inpainting. Serialises to the JSON body the
/// processing endpoint accepts.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InpaintRequest {
    #[serde(rename = "apiKey")]
    pub credential: String,
    /// Base64 of the page exactly as uploaded.
    #[serde(rename = "image")]
    pub image_base64: String,
    /// Base64 PNG of the canonical (black = edit) mask.
    #[serde(rename = "mask", default, skip_serializing_if = "Option::is_none")]
    pub mask_base64: Option<String>,
    pub mime_type: String,
    #[serde(rename = "model", default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ProcessingParams>,
}

impl fmt::Debug for InpaintRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InpaintRequest")
            .field("credential", &"<redacted>")
            .field("image_base64", &format!("<{} chars>", self.image_base64.len()))
            .field(
                "mask_base64",
                &self.mask_base64.as_ref().map(|m| format!("<{} chars>", m.len())),
            )
            .field("mime_type", &self.mime_type)
            .field("model_id", &self.model_id)
            .field("params", &self.params)
            .finish()
    }
}

impl InpaintRequest {
    /// Reject requests the remote side would refuse, each with its own
    /// message.
    pub fn validate(&self) -> Result<()> {
        if self.credential.trim().is_empty() {
            return Err(RedrawError::MissingCredential);
        }
        if self.image_base64.trim().is_empty() {
            return Err(RedrawError::InvalidRequest("image data is empty".into()));
        }
        if let Some(ref mask) = self.mask_base64 {
            if !is_well_formed_base64(mask) {
                return Err(RedrawError::InvalidRequest(
                    "mask is not valid base64".into(),
                ));
            }
        }
        ImageMime::from_mime(&self.mime_type)?;
        if let Some(ref params) = self.params {
            params.validate()?;
        }
        Ok(())
    }

    pub fn image_mime(&self) -> Result<ImageMime> {
        ImageMime::from_mime(&self.mime_type)
    }

    pub fn image_bytes(&self) -> Result<Vec<u8>> {
        decode_base64(&self.image_base64)
    }

    pub fn mask_bytes(&self) -> Result<Option<Vec<u8>>> {
        self.mask_base64.as_deref().map(decode_base64).transpose()
    }

    /// Copy of the request that is safe to print or log.
    pub fn redacted(&self) -> InpaintRequest {
        InpaintRequest {
            credential: mask_secret(&self.credential),
            ..self.clone()
        }
    }
}

/// `abcd…wxyz` style rendering of a secret.
pub(crate) fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// What a service reports back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InpaintResponse {
    pub success: bool,
    /// Base64 of the processed image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InpaintResponse {
    pub fn success(processed_image: impl Into<String>) -> Self {
        Self {
            success: true,
            processed_image: Some(processed_image.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            processed_image: None,
            error: Some(error.into()),
        }
    }

    /// The processed image's base64, or the failure as a collaborator error.
    pub fn into_result(self) -> Result<String> {
        if !self.success {
            let message = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "Failed to process image".to_string());
            return Err(RedrawError::Collaborator(message));
        }
        match self.processed_image {
            Some(image) if !image.trim().is_empty() => Ok(image),
            _ => Err(RedrawError::Collaborator(
                "No image data found in response".into(),
            )),
        }
    }
}
