//! clap mirrors of core enums.

use clap::ValueEnum;
use redraw_core::editor::ToolSelection;
use redraw_core::export::MaskEncoding;
use redraw_core::params::{InpaintArea, MaskContent, ModelChoice, RedrawMode};

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    StandardBubble,
    TransparentBubble,
    NarrativeBox,
}

impl From<ModeArg> for RedrawMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::StandardBubble => RedrawMode::StandardBubble,
            ModeArg::TransparentBubble => RedrawMode::TransparentBubble,
            ModeArg::NarrativeBox => RedrawMode::NarrativeBox,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModelArg {
    NanoBananaPro,
    StableDiffusionStandard,
}

impl From<ModelArg> for ModelChoice {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::NanoBananaPro => ModelChoice::NanoBananaPro,
            ModelArg::StableDiffusionStandard => ModelChoice::StableDiffusionStandard,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MaskContentArg {
    Original,
    Fill,
    LatentNoise,
}

impl From<MaskContentArg> for MaskContent {
    fn from(arg: MaskContentArg) -> Self {
        match arg {
            MaskContentArg::Original => MaskContent::Original,
            MaskContentArg::Fill => MaskContent::Fill,
            MaskContentArg::LatentNoise => MaskContent::LatentNoise,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InpaintAreaArg {
    OnlyMasked,
    WholePicture,
}

impl From<InpaintAreaArg> for InpaintArea {
    fn from(arg: InpaintAreaArg) -> Self {
        match arg {
            InpaintAreaArg::OnlyMasked => InpaintArea::OnlyMasked,
            InpaintAreaArg::WholePicture => InpaintArea::WholePicture,
        }
    }
}

/// Colour convention of a mask file.
#[derive(Clone, Copy, ValueEnum)]
pub enum EncodingArg {
    /// Black marks the area to repaint
    Black,
    /// White marks the area to repaint
    White,
}

impl From<EncodingArg> for MaskEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Black => MaskEncoding::BlackEdit,
            EncodingArg::White => MaskEncoding::WhiteEdit,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ToolArg {
    Brush,
    Eraser,
    Polygon,
}

impl From<ToolArg> for ToolSelection {
    fn from(arg: ToolArg) -> Self {
        match arg {
            ToolArg::Brush => ToolSelection::Brush,
            ToolArg::Eraser => ToolSelection::Eraser,
            ToolArg::Polygon => ToolSelection::Polygon,
        }
    }
}
