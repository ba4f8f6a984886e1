//! Unified mask editor.
//!
//! Brush and polygon editing sit behind one capability set
//! ([`MaskEditing`]). [`MaskEditor`] owns both modalities, each with its own
//! history, plus the viewport that maps pointer positions into image space.
//! Whenever an edit commits, the exported mask is refreshed from the active
//! modality; that mask is the only thing the two modalities share.

mod brush;
mod command;
mod polygon;

use tracing::debug;

use crate::error::Result;
use crate::export::MaskImage;
use crate::geometry::Point;
use crate::polygon::PolygonCompletion;
use crate::raster::Tool;
use crate::viewport::Viewport;

pub use brush::BrushEditor;
pub use command::{binding_for, Command, KeyPress, ToolSelection};
pub use polygon::PolygonMaskEditor;

/// What an edit did, so hosts know whether to redraw or re-export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditEffect {
    /// Nothing changed.
    None,
    /// The paint layer changed mid-gesture; history is untouched.
    Preview,
    /// A history entry was committed or restored and the mask re-exported.
    Committed,
}

impl EditEffect {
    pub fn changed(self) -> bool {
        self != Self::None
    }
}

/// Operations shared by every mask modality. Points are in image pixels.
pub trait MaskEditing {
    fn begin_stroke(&mut self, point: Point) -> EditEffect;
    fn extend_stroke(&mut self, point: Point) -> EditEffect;
    fn end_stroke(&mut self) -> EditEffect;
    fn undo(&mut self) -> EditEffect;
    fn redo(&mut self) -> EditEffect;
    fn clear(&mut self) -> EditEffect;
    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;
    fn export_mask(&self) -> MaskImage;
    fn has_selection(&self) -> bool;
}

/// Which modality receives pointer input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    Brush,
    Polygon,
}

#[derive(Clone, Debug)]
pub struct MaskEditor {
    mode: EditorMode,
    panning: bool,
    pan_anchor: Option<Point>,
    brush: BrushEditor,
    polygon: PolygonMaskEditor,
    viewport: Viewport,
    mask: MaskImage,
}

impl MaskEditor {
    /// Fresh editor for a `width x height` page, in brush mode.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let brush = BrushEditor::new(width, height)?;
        let mask = brush.export_mask();
        Ok(Self {
            mode: EditorMode::Brush,
            panning: false,
            pan_anchor: None,
            brush,
            polygon: PolygonMaskEditor::new(width, height)?,
            viewport: Viewport::new(width, height)?,
            mask,
        })
    }

    /// Same editor with both modalities keeping at most `limit` snapshots.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.set_history_limit(limit);
        self
    }

    pub fn set_history_limit(&mut self, limit: usize) {
        self.brush.set_history_limit(limit);
        self.polygon.set_history_limit(limit);
    }

    pub fn width(&self) -> u32 {
        self.mask.width()
    }

    pub fn height(&self) -> u32 {
        self.mask.height()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn tool_selection(&self) -> ToolSelection {
        if self.panning {
            return ToolSelection::Pan;
        }
        match (self.mode, self.brush.tool()) {
            (EditorMode::Polygon, _) => ToolSelection::Polygon,
            (EditorMode::Brush, Tool::Brush) => ToolSelection::Brush,
            (EditorMode::Brush, Tool::Eraser) => ToolSelection::Eraser,
        }
    }

    pub fn brush(&self) -> &BrushEditor {
        &self.brush
    }

    pub fn polygon(&self) -> &PolygonMaskEditor {
        &self.polygon
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The mask exported at the last commit.
    pub fn mask(&self) -> &MaskImage {
        &self.mask
    }

    /// The last exported mask in the black = edit wire encoding.
    pub fn canonical_mask(&self) -> MaskImage {
        self.mask.canonical()
    }

    pub fn brush_size(&self) -> u32 {
        self.brush.brush_size()
    }

    pub fn set_brush_size(&mut self, size: u32) -> u32 {
        self.brush.set_brush_size(size)
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        if mode == self.mode {
            return;
        }
        self.finish_gesture();
        self.mode = mode;
        self.refresh_mask();
        debug!(?mode, "Editor mode switched");
    }

    pub fn select_tool(&mut self, tool: ToolSelection) {
        match tool {
            ToolSelection::Pan => {
                self.finish_gesture();
                self.panning = true;
            }
            ToolSelection::Brush | ToolSelection::Eraser => {
                self.panning = false;
                self.brush.set_tool(if tool == ToolSelection::Eraser {
                    Tool::Eraser
                } else {
                    Tool::Brush
                });
                self.set_mode(EditorMode::Brush);
            }
            ToolSelection::Polygon => {
                self.panning = false;
                self.set_mode(EditorMode::Polygon);
            }
        }
    }

    /// Replace the brush layer with an existing mask and switch to brush mode.
    pub fn load_mask(&mut self, mask: &MaskImage) -> Result<()> {
        self.finish_gesture();
        self.brush.load_mask(mask)?;
        self.mode = EditorMode::Brush;
        self.refresh_mask();
        Ok(())
    }

    /// Completed polygons and their mask, if any polygon encloses an area.
    pub fn complete_polygons(&self) -> Option<PolygonCompletion> {
        self.polygon.complete()
    }

    // ---- pointer input (screen space) ----

    pub fn pointer_down(&mut self, screen: Point) -> EditEffect {
        if self.panning {
            self.pan_anchor = Some(screen);
            return EditEffect::None;
        }
        let point = self.viewport.screen_to_image(screen);
        self.begin_stroke(point)
    }

    pub fn pointer_move(&mut self, screen: Point) -> EditEffect {
        if let Some(anchor) = self.pan_anchor {
            self.viewport.pan_by(screen.x - anchor.x, screen.y - anchor.y);
            self.pan_anchor = Some(screen);
            return EditEffect::None;
        }
        let point = self.viewport.screen_to_image(screen);
        self.extend_stroke(point)
    }

    pub fn pointer_up(&mut self) -> EditEffect {
        if self.pan_anchor.take().is_some() {
            return EditEffect::None;
        }
        self.end_stroke()
    }

    // ---- capability set (image space) ----

    pub fn begin_stroke(&mut self, point: Point) -> EditEffect {
        let effect = self.active_mut().begin_stroke(point);
        self.settle(effect)
    }

    pub fn extend_stroke(&mut self, point: Point) -> EditEffect {
        let effect = self.active_mut().extend_stroke(point);
        self.settle(effect)
    }

    pub fn end_stroke(&mut self) -> EditEffect {
        let effect = self.active_mut().end_stroke();
        self.settle(effect)
    }

    pub fn undo(&mut self) -> EditEffect {
        let effect = self.active_mut().undo();
        self.settle(effect)
    }

    pub fn redo(&mut self) -> EditEffect {
        let effect = self.active_mut().redo();
        self.settle(effect)
    }

    pub fn clear(&mut self) -> EditEffect {
        let effect = self.active_mut().clear();
        self.settle(effect)
    }

    pub fn can_undo(&self) -> bool {
        self.active().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.active().can_redo()
    }

    /// Export the active modality's current state.
    pub fn export_mask(&self) -> MaskImage {
        self.active().export_mask()
    }

    pub fn has_selection(&self) -> bool {
        self.active().has_selection()
    }

    // ---- commands ----

    pub fn dispatch(&mut self, command: Command) -> EditEffect {
        debug!(?command, "Dispatch");
        match command {
            Command::SetTool(tool) => {
                self.select_tool(tool);
                EditEffect::None
            }
            Command::SetBrushSize(size) => {
                self.set_brush_size(size);
                EditEffect::None
            }
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::Clear => self.clear(),
            Command::ZoomIn => {
                self.viewport.zoom_in();
                EditEffect::None
            }
            Command::ZoomOut => {
                self.viewport.zoom_out();
                EditEffect::None
            }
            Command::ResetZoom => {
                self.viewport.reset();
                EditEffect::None
            }
            Command::PanBy { dx, dy } => {
                self.viewport.pan_by(dx, dy);
                EditEffect::None
            }
            Command::CancelPolygon => {
                if self.mode != EditorMode::Polygon {
                    return EditEffect::None;
                }
                let effect = self.polygon.cancel_polygon();
                self.settle(effect)
            }
        }
    }

    /// Run the command bound to `press`, if any.
    pub fn handle_key(&mut self, press: KeyPress) -> Option<EditEffect> {
        binding_for(press).map(|command| self.dispatch(command))
    }

    fn active(&self) -> &dyn MaskEditing {
        match self.mode {
            EditorMode::Brush => &self.brush,
            EditorMode::Polygon => &self.polygon,
        }
    }

    fn active_mut(&mut self) -> &mut dyn MaskEditing {
        match self.mode {
            EditorMode::Brush => &mut self.brush,
            EditorMode::Polygon => &mut self.polygon,
        }
    }

    fn settle(&mut self, effect: EditEffect) -> EditEffect {
        if effect == EditEffect::Committed {
            self.refresh_mask();
        }
        effect
    }

    fn refresh_mask(&mut self) {
        self.mask = self.active().export_mask();
    }

    fn finish_gesture(&mut self) {
        self.pan_anchor = None;
        if self.mode == EditorMode::Brush {
            let effect = self.brush.end_stroke();
            self.settle(effect);
        }
    }
}
