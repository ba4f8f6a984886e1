use super::{InpaintArea, MaskContent, ProcessingParams};

const BASE_INSTRUCTION: &str = "You are a professional manga image editor. The first image is a \
manga page. The second image is a mask: black pixels mark the regions to repaint, white pixels \
must stay exactly as they are. Remove all text, speech, sound effects and written characters \
inside the black regions and fill them with artwork that seamlessly matches the surroundings. \
Keep the same art style, screentone, shading, line work and composition.";

pub(super) fn compose(params: &ProcessingParams) -> String {
    let mut out = String::from(BASE_INSTRUCTION);

    let content_hint = match params.mask_content {
        MaskContent::Original => "Use the existing pixels under the mask as a starting point.",
        MaskContent::Fill => "Treat the masked area as a flat fill of the surrounding colour.",
        MaskContent::LatentNoise => "Regenerate the masked area from scratch.",
    };
    let area_hint = match params.inpaint_area {
        InpaintArea::OnlyMasked => format!(
            "Only look at the masked area plus {} pixels of surrounding context.",
            params.padding
        ),
        InpaintArea::WholePicture => "Take the whole page into account for context.".to_string(),
    };

    out.push_str("\n\n");
    out.push_str(content_hint);
    out.push(' ');
    out.push_str(&area_hint);
    out.push_str(&format!(
        " Change strength: {:.2} (0 keeps the original, 1 fully redraws). Soften mask edges by {} pixels.",
        params.denoising_strength, params.mask_blur
    ));

    if !params.prompt.trim().is_empty() {
        out.push_str("\n\nDesired result: ");
        out.push_str(params.prompt.trim());
    }
    if !params.negative_prompt.trim().is_empty() {
        out.push_str("\nAvoid: ");
        out.push_str(params.negative_prompt.trim());
    }
    out
}
