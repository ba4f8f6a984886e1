mod presets;
mod prompt;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RedrawError, Result};

pub use presets::ModePreset;

/// What the masked area starts from before generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskContent {
    #[default]
    Original,
    Fill,
    LatentNoise,
}

impl fmt::Display for MaskContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "Original"),
            Self::Fill => write!(f, "Fill"),
            Self::LatentNoise => write!(f, "Latent Noise"),
        }
    }
}

/// How much of the page the model regenerates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InpaintArea {
    #[default]
    OnlyMasked,
    WholePicture,
}

impl fmt::Display for InpaintArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnlyMasked => write!(f, "Only Masked"),
            Self::WholePicture => write!(f, "Whole Picture"),
        }
    }
}

/// Named redraw presets, one per kind of text area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedrawMode {
    #[default]
    StandardBubble,
    TransparentBubble,
    NarrativeBox,
}

impl RedrawMode {
    pub const ALL: &[Self] = &[Self::StandardBubble, Self::TransparentBubble, Self::NarrativeBox];

    /// Wire/config identifier (`standard_bubble`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::StandardBubble => "standard_bubble",
            Self::TransparentBubble => "transparent_bubble",
            Self::NarrativeBox => "narrative_box",
        }
    }

    pub fn preset(self) -> ModePreset {
        presets::preset_for(self)
    }
}

impl fmt::Display for RedrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.preset().label)
    }
}

/// Remote model family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelChoice {
    #[default]
    NanoBananaPro,
    StableDiffusionStandard,
}

impl ModelChoice {
    pub const ALL: &[Self] = &[Self::NanoBananaPro, Self::StableDiffusionStandard];

    /// Model identifier as sent to the remote endpoint.
    pub fn remote_model_id(self) -> &'static str {
        match self {
            Self::NanoBananaPro => "gemini-2.5-flash-image",
            Self::StableDiffusionStandard => "stable-diffusion-standard",
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NanoBananaPro => write!(f, "nano-banana-pro"),
            Self::StableDiffusionStandard => write!(f, "stable-diffusion-standard"),
        }
    }
}

/// Generation parameters forwarded with every request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingParams {
    pub prompt: String,
    pub negative_prompt: String,
    /// 0.0 keeps the original, 1.0 ignores it.
    pub denoising_strength: f32,
    /// Feather radius applied to the mask edge, in pixels.
    pub mask_blur: u32,
    /// Context margin around the masked area, in pixels.
    pub padding: u32,
    pub mask_content: MaskContent,
    pub inpaint_area: InpaintArea,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        RedrawMode::default().preset().params
    }
}

impl ProcessingParams {
    pub fn for_mode(mode: RedrawMode) -> Self {
        mode.preset().params
    }

    pub fn validate(&self) -> Result<()> {
        if !self.denoising_strength.is_finite() || !(0.0..=1.0).contains(&self.denoising_strength)
        {
            return Err(RedrawError::InvalidParams(format!(
                "denoising strength must be within 0.0..=1.0, got {}",
                self.denoising_strength
            )));
        }
        Ok(())
    }

    /// Apply user overrides on top of the current values.
    pub fn apply(&mut self, overrides: &ParamsOverride) {
        if let Some(ref prompt) = overrides.prompt {
            self.prompt = prompt.clone();
        }
        if let Some(ref negative) = overrides.negative_prompt {
            self.negative_prompt = negative.clone();
        }
        if let Some(strength) = overrides.denoising_strength {
            self.denoising_strength = strength;
        }
        if let Some(blur) = overrides.mask_blur {
            self.mask_blur = blur;
        }
        if let Some(padding) = overrides.padding {
            self.padding = padding;
        }
        if let Some(content) = overrides.mask_content {
            self.mask_content = content;
        }
        if let Some(area) = overrides.inpaint_area {
            self.inpaint_area = area;
        }
    }

    /// Instruction text for prompt-driven image models.
    pub fn compose_prompt(&self) -> String {
        prompt::compose(self)
    }
}

/// Individually overridable fields; `None` keeps the preset value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParamsOverride {
    pub prompt: Option<String>,
    pub negative_prompt: Option<String>,
    pub denoising_strength: Option<f32>,
    pub mask_blur: Option<u32>,
    pub padding: Option<u32>,
    pub mask_content: Option<MaskContent>,
    pub inpaint_area: Option<InpaintArea>,
}

impl ParamsOverride {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
