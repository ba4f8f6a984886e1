//! Gemini `generateContent` client for the inpainting boundary.

use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use redraw_core::error::{RedrawError, Result};
use redraw_core::inpaint::{
    normalize_remote_error, user_message, InpaintRequest, InpaintResponse, InpaintingService,
};
use redraw_core::params::{ModelChoice, ProcessingParams};

pub struct GeminiService {
    client: Client,
    endpoint: String,
}

impl GeminiService {
    pub fn new(endpoint: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent("manga-redraw")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn generate(&self, request: &InpaintRequest) -> Result<String> {
        let model = request
            .model_id
            .as_deref()
            .unwrap_or(ModelChoice::default().remote_model_id());
        let url = format!("{}/models/{}:generateContent", self.endpoint, model);
        let prompt = request
            .params
            .as_ref()
            .map(ProcessingParams::compose_prompt)
            .unwrap_or_else(|| ProcessingParams::default().compose_prompt());

        let mut parts = vec![json!({
            "inlineData": { "mimeType": request.mime_type, "data": request.image_base64 }
        })];
        if let Some(ref mask) = request.mask_base64 {
            parts.push(json!({ "inlineData": { "mimeType": "image/png", "data": mask } }));
        }
        parts.push(json!({ "text": prompt }));
        let body = json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": { "responseModalities": ["IMAGE", "TEXT"] },
        });

        info!(model, "Calling generateContent");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &request.credential)
            .json(&body)
            .send()
            .map_err(|e| normalize_remote_error(&e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| normalize_remote_error(&e.to_string()))?;
        debug!(%status, bytes = text.len(), "Response received");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(normalize_remote_error(&message));
        }

        extract_image(&text)
    }
}

impl InpaintingService for GeminiService {
    fn name(&self) -> &str {
        "Gemini"
    }

    fn inpaint(&self, request: &InpaintRequest) -> Result<InpaintResponse> {
        match self.generate(request) {
            Ok(image) => Ok(InpaintResponse::success(image)),
            Err(e) => Ok(InpaintResponse::failure(user_message(&e))),
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
struct InlineData {
    data: String,
}

/// Base64 of the first inline image in a `generateContent` response.
fn extract_image(body: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(body).map_err(|_| {
        RedrawError::Collaborator("Invalid response structure from Gemini".into())
    })?;
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| RedrawError::Collaborator("No response generated from Gemini".into()))?;
    let content = candidate
        .content
        .filter(|c| !c.parts.is_empty())
        .ok_or_else(|| RedrawError::Collaborator("Invalid response structure from Gemini".into()))?;
    content
        .parts
        .into_iter()
        .find_map(|p| p.inline_data.map(|d| d.data))
        .ok_or_else(|| {
            RedrawError::Collaborator("No image data found in Gemini response".into())
        })
}
