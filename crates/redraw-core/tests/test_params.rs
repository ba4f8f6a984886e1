use approx::assert_abs_diff_eq;

use redraw_core::params::{
    InpaintArea, MaskContent, ModelChoice, ParamsOverride, ProcessingParams, RedrawMode,
};

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

#[test]
fn test_preset_values() {
    let cases = [
        (RedrawMode::StandardBubble, 0.40, 4, 64, MaskContent::Original),
        (RedrawMode::TransparentBubble, 0.45, 4, 32, MaskContent::Original),
        (RedrawMode::NarrativeBox, 0.55, 4, 32, MaskContent::Fill),
    ];
    for (mode, denoise, blur, padding, content) in cases {
        let params = mode.preset().params;
        assert_abs_diff_eq!(params.denoising_strength, denoise);
        assert_eq!(params.mask_blur, blur);
        assert_eq!(params.padding, padding);
        assert_eq!(params.mask_content, content);
        assert_eq!(params.inpaint_area, InpaintArea::OnlyMasked);
        assert!(!params.prompt.is_empty());
        assert!(!params.negative_prompt.is_empty());
        params.validate().unwrap();
    }
}

#[test]
fn test_default_mode_is_standard_bubble() {
    assert_eq!(RedrawMode::default(), RedrawMode::StandardBubble);
    assert_eq!(
        ProcessingParams::default(),
        ProcessingParams::for_mode(RedrawMode::StandardBubble)
    );
    assert_eq!(RedrawMode::ALL.len(), 3);
}

#[test]
fn test_preset_labels() {
    assert_eq!(RedrawMode::NarrativeBox.to_string(), "Narrative Box");
    assert_eq!(RedrawMode::TransparentBubble.key(), "transparent_bubble");
}

// ---------------------------------------------------------------------------
// Validation and overrides
// ---------------------------------------------------------------------------

#[test]
fn test_denoise_range_validation() {
    let mut params = ProcessingParams::default();
    for ok in [0.0, 0.5, 1.0] {
        params.denoising_strength = ok;
        assert!(params.validate().is_ok());
    }
    for bad in [-0.01, 1.01, f32::NAN, f32::INFINITY] {
        params.denoising_strength = bad;
        assert!(params.validate().is_err(), "accepted {}", bad);
    }
}

#[test]
fn test_overrides_only_touch_given_fields() {
    let mut params = ProcessingParams::for_mode(RedrawMode::NarrativeBox);
    let original_prompt = params.prompt.clone();
    params.apply(&ParamsOverride {
        denoising_strength: Some(0.8),
        padding: Some(0),
        inpaint_area: Some(InpaintArea::WholePicture),
        ..ParamsOverride::default()
    });
    assert_abs_diff_eq!(params.denoising_strength, 0.8);
    assert_eq!(params.padding, 0);
    assert_eq!(params.inpaint_area, InpaintArea::WholePicture);
    assert_eq!(params.mask_content, MaskContent::Fill);
    assert_eq!(params.prompt, original_prompt);
    assert!(ParamsOverride::default().is_empty());
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[test]
fn test_wire_names() {
    let mut params = ProcessingParams::default();
    params.mask_content = MaskContent::LatentNoise;
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json["maskContent"], "latent_noise");
    assert_eq!(json["inpaintArea"], "only_masked");
    assert_eq!(json["maskBlur"], 4);
    assert!(json.get("denoisingStrength").is_some());
    assert!(json.get("negativePrompt").is_some());
}

#[test]
fn test_params_survive_toml() {
    let params = ProcessingParams::for_mode(RedrawMode::TransparentBubble);
    let text = toml::to_string_pretty(&params).unwrap();
    let back: ProcessingParams = toml::from_str(&text).unwrap();
    assert_eq!(back, params);
}

#[test]
fn test_partial_override_from_json() {
    let overrides: ParamsOverride =
        serde_json::from_str(r#"{"maskBlur": 8, "maskContent": "fill"}"#).unwrap();
    assert_eq!(overrides.mask_blur, Some(8));
    assert_eq!(overrides.mask_content, Some(MaskContent::Fill));
    assert!(overrides.prompt.is_none());
}

// ---------------------------------------------------------------------------
// Model and prompt
// ---------------------------------------------------------------------------

#[test]
fn test_model_ids() {
    assert_eq!(ModelChoice::default(), ModelChoice::NanoBananaPro);
    assert_eq!(
        ModelChoice::NanoBananaPro.remote_model_id(),
        "gemini-2.5-flash-image"
    );
    assert_eq!(
        serde_json::to_value(ModelChoice::StableDiffusionStandard).unwrap(),
        "stable-diffusion-standard"
    );
}

#[test]
fn test_composed_prompt_carries_params() {
    let mut params = ProcessingParams::for_mode(RedrawMode::StandardBubble);
    params.prompt = "clean speech bubble".into();
    params.negative_prompt = "letters".into();
    let prompt = params.compose_prompt();
    assert!(prompt.contains("black pixels mark the regions to repaint"));
    assert!(prompt.contains("Desired result: clean speech bubble"));
    assert!(prompt.contains("Avoid: letters"));
    assert!(prompt.contains("64 pixels"));
    assert!(prompt.contains("0.40"));

    params.inpaint_area = InpaintArea::WholePicture;
    params.negative_prompt.clear();
    let prompt = params.compose_prompt();
    assert!(prompt.contains("whole page"));
    assert!(!prompt.contains("Avoid:"));
}
