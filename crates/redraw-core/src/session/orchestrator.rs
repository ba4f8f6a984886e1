use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use crate::consts::DEFAULT_HISTORY_LIMIT;

use crate::editor::MaskEditor;
use crate::error::{RedrawError, Result};
use crate::export::{MaskEncoding, MaskImage, MaskStats};
use crate::inpaint::{user_message, InpaintRequest, InpaintResponse, InpaintingService};
use crate::io::image_io::{decode_base64, split_data_url, ImageMime};
use crate::page::Page;
use crate::params::{ModelChoice, ParamsOverride, ProcessingParams, RedrawMode};
use crate::settings::Settings;

use super::state::{ProcessedResult, SessionState};

/// Owns everything one editing session needs. All mutation goes through
/// `&mut self`; the only long operation (the remote call) is split into
/// [`begin_submit`](Self::begin_submit) and [`finish_submit`](Self::finish_submit)
/// so it can run elsewhere while the session stays usable.
pub struct Session {
    state: SessionState,
    page: Option<Page>,
    editor: Option<MaskEditor>,
    result: Option<ProcessedResult>,
    in_flight: bool,
    /// Where a failed submit returns to.
    resume_state: SessionState,
    last_error: Option<String>,
    mode: RedrawMode,
    params: ProcessingParams,
    model: ModelChoice,
    credential: String,
    /// Undo snapshots each editor modality keeps.
    history_limit: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: SessionState::default(),
            page: None,
            editor: None,
            result: None,
            in_flight: false,
            resume_state: SessionState::default(),
            last_error: None,
            mode: RedrawMode::default(),
            params: ProcessingParams::default(),
            model: ModelChoice::default(),
            credential: String::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            mode: settings.default_mode,
            params: ProcessingParams::for_mode(settings.default_mode),
            model: settings.model,
            credential: settings.api_key.trim().to_string(),
            history_limit: settings.history_limit,
            ..Self::default()
        }
    }

    // ---- accessors ----

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn editor(&self) -> Option<&MaskEditor> {
        self.editor.as_ref()
    }

    /// Mutable editor access. Not available while a result is shown; call
    /// [`edit_mask`](Self::edit_mask) first.
    pub fn editor_mut(&mut self) -> Result<&mut MaskEditor> {
        if self.state == SessionState::Result {
            return Err(self.invalid_state("edit the mask"));
        }
        self.editor.as_mut().ok_or(RedrawError::NoImageLoaded)
    }

    /// The mask exported at the editor's last commit.
    pub fn mask(&self) -> Option<&MaskImage> {
        self.editor.as_ref().map(MaskEditor::mask)
    }

    pub fn mask_stats(&self) -> Option<MaskStats> {
        self.editor
            .as_ref()
            .map(|e| e.canonical_mask().stats(self.params.padding))
    }

    pub fn result(&self) -> Option<&ProcessedResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn mode(&self) -> RedrawMode {
        self.mode
    }

    pub fn params(&self) -> &ProcessingParams {
        &self.params
    }

    pub fn model(&self) -> ModelChoice {
        self.model
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.is_empty()
    }

    // ---- configuration ----

    /// Switch preset; parameters are re-initialised from it.
    pub fn set_mode(&mut self, mode: RedrawMode) {
        self.mode = mode;
        self.params = ProcessingParams::for_mode(mode);
        info!(mode = mode.key(), "Redraw mode selected");
    }

    /// Merge `overrides` into the current parameters. Invalid results are
    /// rejected and leave the parameters unchanged.
    pub fn update_params(&mut self, overrides: &ParamsOverride) -> Result<()> {
        let mut params = self.params.clone();
        params.apply(overrides);
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.credential = credential.into().trim().to_string();
    }

    pub fn set_model(&mut self, model: ModelChoice) {
        self.model = model;
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Cap undo history, for the current editor and every later page.
    pub fn set_history_limit(&mut self, limit: usize) {
        self.history_limit = limit;
        if let Some(editor) = self.editor.as_mut() {
            editor.set_history_limit(limit);
        }
    }

    // ---- page lifecycle ----

    /// Decode and install a new page. On failure nothing changes.
    pub fn load_image(&mut self, bytes: Vec<u8>, mime: Option<&str>) -> Result<()> {
        if self.in_flight {
            return Err(self.invalid_state("load an image"));
        }
        let page = Page::decode(bytes, mime)?;
        self.load_page(page)
    }

    pub fn load_page(&mut self, page: Page) -> Result<()> {
        if self.in_flight {
            return Err(self.invalid_state("load an image"));
        }
        let editor =
            MaskEditor::new(page.width(), page.height())?.with_history_limit(self.history_limit);
        info!(
            width = page.width(),
            height = page.height(),
            mime = %page.mime(),
            "Page loaded"
        );
        self.page = Some(page);
        self.editor = Some(editor);
        self.result = None;
        self.last_error = None;
        self.state = SessionState::Masking;
        Ok(())
    }

    /// Replace the brush layer with a mask decoded from `bytes`.
    pub fn import_mask(&mut self, bytes: &[u8], encoding: MaskEncoding) -> Result<()> {
        let mask = MaskImage::decode(bytes, encoding)?;
        self.editor_mut()?.load_mask(&mask)
    }

    /// Drop the page, mask and result. Mode, parameters, model and
    /// credential are kept.
    pub fn reset(&mut self) {
        self.page = None;
        self.editor = None;
        self.result = None;
        self.in_flight = false;
        self.last_error = None;
        self.state = SessionState::Idle;
        self.resume_state = SessionState::Idle;
    }

    // ---- processing ----

    /// Gate and build a request for the current page and mask, then mark the
    /// session as in flight. From the result view this resubmits like
    /// [`begin_regenerate`](Self::begin_regenerate), so a failure keeps the
    /// shown result.
    pub fn begin_submit(&mut self) -> Result<InpaintRequest> {
        if self.in_flight {
            return Err(RedrawError::SubmitInFlight);
        }
        if self.page.is_none() {
            return Err(RedrawError::MissingImage);
        }
        self.dispatch_request()
    }

    /// Resubmit the same page, mask and parameters from the result view.
    pub fn begin_regenerate(&mut self) -> Result<InpaintRequest> {
        if self.in_flight {
            return Err(RedrawError::SubmitInFlight);
        }
        if self.state != SessionState::Result {
            return Err(self.invalid_state("regenerate"));
        }
        self.dispatch_request()
    }

    /// Apply the service outcome for the request handed out by
    /// [`begin_submit`](Self::begin_submit) or
    /// [`begin_regenerate`](Self::begin_regenerate). Page, mask and history
    /// are never touched.
    pub fn finish_submit(&mut self, outcome: Result<InpaintResponse>) -> Result<()> {
        if !self.in_flight {
            return Err(self.invalid_state("finish processing"));
        }
        self.in_flight = false;

        match outcome.and_then(decode_response) {
            Ok(result) => {
                info!(bytes = result.bytes.len(), mime = %result.mime, "Result received");
                self.result = Some(result);
                self.last_error = None;
                self.state = SessionState::Result;
                Ok(())
            }
            Err(e) => {
                let message = user_message(&e);
                warn!(error = %message, "Processing failed");
                self.last_error = Some(message);
                self.state = self.resume_state;
                Err(e)
            }
        }
    }

    /// `begin_submit`, call `service`, `finish_submit`.
    pub fn submit(&mut self, service: &dyn InpaintingService) -> Result<()> {
        let request = self.begin_submit()?;
        let outcome = service.inpaint(&request);
        self.finish_submit(outcome)
    }

    pub fn regenerate(&mut self, service: &dyn InpaintingService) -> Result<()> {
        let request = self.begin_regenerate()?;
        let outcome = service.inpaint(&request);
        self.finish_submit(outcome)
    }

    /// Leave the result view, discarding only the result.
    pub fn edit_mask(&mut self) -> Result<()> {
        if self.state != SessionState::Result {
            return Err(self.invalid_state("return to mask editing"));
        }
        self.result = None;
        self.state = SessionState::Masking;
        Ok(())
    }

    // ---- results ----

    /// Decode the processed image for side-by-side comparison.
    pub fn result_image(&self) -> Result<Page> {
        let result = self
            .result
            .as_ref()
            .ok_or_else(|| self.invalid_state("read a result"))?;
        Page::decode(result.bytes.clone(), Some(result.mime.as_str()))
    }

    /// Write the processed image to `path`. The returned bytes are written
    /// as-is when the extension matches their format, otherwise the image is
    /// re-encoded to the extension's format.
    pub fn save_result(&self, path: &Path) -> Result<()> {
        let result = self
            .result
            .as_ref()
            .ok_or_else(|| self.invalid_state("save a result"))?;
        match ImageMime::from_path(path) {
            Some(target) if target != result.mime => {
                let decoded =
                    image::load_from_memory_with_format(&result.bytes, result.mime.format())?;
                // JPEG has no alpha channel.
                let decoded = match target {
                    ImageMime::Jpeg => image::DynamicImage::ImageRgb8(decoded.to_rgb8()),
                    _ => decoded,
                };
                decoded.save_with_format(path, target.format())?;
            }
            _ => std::fs::write(path, &result.bytes)?,
        }
        info!(path = %path.display(), "Result saved");
        Ok(())
    }

    fn dispatch_request(&mut self) -> Result<InpaintRequest> {
        let (Some(page), Some(editor)) = (self.page.as_ref(), self.editor.as_ref()) else {
            return Err(RedrawError::MissingImage);
        };
        let mask = editor.canonical_mask();
        if mask.is_empty_selection() {
            return Err(RedrawError::MissingMask);
        }
        if self.credential.is_empty() {
            return Err(RedrawError::MissingCredential);
        }
        self.params.validate()?;

        let request = InpaintRequest {
            credential: self.credential.clone(),
            image_base64: page.to_base64(),
            mask_base64: Some(mask.to_base64()?),
            mime_type: page.mime().as_str().to_string(),
            model_id: Some(self.model.remote_model_id().to_string()),
            params: Some(self.params.clone()),
        };
        request.validate()?;

        info!(
            model = %self.model,
            mode = self.mode.key(),
            masked = mask.edit_pixel_count(),
            "Submitting page"
        );
        self.resume_state = self.state;
        self.state = SessionState::Submitting;
        self.in_flight = true;
        self.last_error = None;
        Ok(request)
    }

    fn invalid_state(&self, action: &'static str) -> RedrawError {
        RedrawError::InvalidState {
            state: self.state.to_string(),
            action,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("page", &self.page.as_ref().map(|p| (p.width(), p.height(), p.mime())))
            .field("result", &self.result.as_ref().map(|r| r.mime))
            .field("in_flight", &self.in_flight)
            .field("last_error", &self.last_error)
            .field("mode", &self.mode)
            .field("model", &self.model)
            .field("has_credential", &self.has_credential())
            .finish_non_exhaustive()
    }
}

fn decode_response(response: InpaintResponse) -> Result<ProcessedResult> {
    let encoded = response.into_result()?;
    let payload = split_data_url(&encoded).map_or(encoded.as_str(), |(_, data)| data);
    let bytes = decode_base64(payload)?;
    let mime = ImageMime::sniff(&bytes)?;
    Ok(ProcessedResult { bytes, mime })
}
