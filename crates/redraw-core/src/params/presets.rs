use super::{InpaintArea, MaskContent, ProcessingParams, RedrawMode};

/// Label, description and default parameters of a redraw mode.
#[derive(Clone, Debug, PartialEq)]
pub struct ModePreset {
    pub mode: RedrawMode,
    pub label: &'static str,
    pub description: &'static str,
    pub params: ProcessingParams,
}

pub(super) fn preset_for(mode: RedrawMode) -> ModePreset {
    match mode {
        RedrawMode::StandardBubble => ModePreset {
            mode,
            label: "Standard Bubble",
            description: "White speech bubbles with standard text",
            params: ProcessingParams {
                prompt: "(masterpiece, best quality, ultra-detailed:1.2), manga style, clean lineart, \
                         (context aware inpainting:1.4), seamless texture blending, matching surrounding \
                         background, restore background pattern, highres."
                    .into(),
                negative_prompt: "(text, signature, watermark, sfx):1.4, (low quality:1.4), \
                                  (gray residue), (dirty spots), deformed."
                    .into(),
                denoising_strength: 0.4,
                mask_blur: 4,
                padding: 64,
                mask_content: MaskContent::Original,
                inpaint_area: InpaintArea::OnlyMasked,
            },
        },
        RedrawMode::TransparentBubble => ModePreset {
            mode,
            label: "Transparent Bubble",
            description: "Transparent speech bubbles overlaying artwork",
            params: ProcessingParams {
                prompt: "(masterpiece:1.2), manga style, (translucent layer:1.3), \
                         (see-through background:1.3), visible background pattern behind text area, \
                         continuity of background lines."
                    .into(),
                negative_prompt: "(opaque fill:1.4), (white background fill:1.4), \
                                  (solid color block), (text, sfx):1.4."
                    .into(),
                denoising_strength: 0.45,
                mask_blur: 4,
                padding: 32,
                mask_content: MaskContent::Original,
                inpaint_area: InpaintArea::OnlyMasked,
            },
        },
        RedrawMode::NarrativeBox => ModePreset {
            mode,
            label: "Narrative Box",
            description: "Square text boxes with heavy text",
            params: ProcessingParams {
                prompt: "(clean inside text box:1.4), (clean rectangular box), (keep box border:1.4), \
                         manga style, clean lineart."
                    .into(),
                negative_prompt: "(remaining text residue:1.3), (erasing box outline:1.4), \
                                  (broken border), (text):1.5."
                    .into(),
                denoising_strength: 0.55,
                mask_blur: 4,
                padding: 32,
                mask_content: MaskContent::Fill,
                inpaint_area: InpaintArea::OnlyMasked,
            },
        },
    }
}
