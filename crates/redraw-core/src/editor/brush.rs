use ndarray::Array2;
use tracing::{debug, warn};

use crate::consts::{DEFAULT_BRUSH_SIZE, DEFAULT_HISTORY_LIMIT};
use crate::error::{RedrawError, Result};
use crate::export::{export_raster, MaskImage};
use crate::geometry::Point;
use crate::history::History;
use crate::raster::{snap_brush_size, RasterSurface, Tool};

use super::{EditEffect, MaskEditing};

/// Freehand brush/eraser editing over a [`RasterSurface`] with full-frame
/// undo history.
#[derive(Clone, Debug)]
pub struct BrushEditor {
    surface: RasterSurface,
    history: History<Array2<u8>>,
    tool: Tool,
    brush_size: u32,
}

impl BrushEditor {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let surface = RasterSurface::new(width, height)?;
        let history = History::with_limit(surface.snapshot(), DEFAULT_HISTORY_LIMIT);
        Ok(Self {
            surface,
            history,
            tool: Tool::default(),
            brush_size: DEFAULT_BRUSH_SIZE,
        })
    }

    /// Cap the number of kept snapshots, evicting the oldest ones already
    /// over the cap.
    pub fn set_history_limit(&mut self, limit: usize) {
        self.history.set_limit(Some(limit));
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn history(&self) -> &History<Array2<u8>> {
        &self.history
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Set the diameter, snapped into the allowed range. Returns the value
    /// actually used.
    pub fn set_brush_size(&mut self, size: u32) -> u32 {
        self.brush_size = snap_brush_size(size);
        self.brush_size
    }

    /// Replace the paint layer with the edit region of `mask`, as one
    /// undoable step.
    pub fn load_mask(&mut self, mask: &MaskImage) -> Result<()> {
        if mask.width() != self.surface.width() || mask.height() != self.surface.height() {
            return Err(RedrawError::DimensionMismatch {
                expected_width: self.surface.width(),
                expected_height: self.surface.height(),
                actual_width: mask.width(),
                actual_height: mask.height(),
            });
        }
        let coverage = mask.edit_coverage();
        self.surface.restore(&coverage)?;
        self.history.commit(coverage);
        debug!(masked = self.surface.masked_pixel_count(), "Mask loaded into brush layer");
        Ok(())
    }

    fn sync_surface(&mut self, snapshot: Option<Array2<u8>>) -> EditEffect {
        let Some(snapshot) = snapshot else {
            return EditEffect::None;
        };
        if let Err(e) = self.surface.restore(&snapshot) {
            warn!(error = %e, "Discarding history snapshot");
            return EditEffect::None;
        }
        EditEffect::Committed
    }
}

impl MaskEditing for BrushEditor {
    fn begin_stroke(&mut self, point: Point) -> EditEffect {
        if !point.is_finite() {
            return EditEffect::None;
        }
        self.surface.begin_stroke(self.tool, self.brush_size, point);
        EditEffect::Preview
    }

    fn extend_stroke(&mut self, point: Point) -> EditEffect {
        if self.surface.extend_stroke(point) {
            EditEffect::Preview
        } else {
            EditEffect::None
        }
    }

    fn end_stroke(&mut self) -> EditEffect {
        match self.surface.end_stroke() {
            Some(_) => {
                self.history.commit(self.surface.snapshot());
                EditEffect::Committed
            }
            None => EditEffect::None,
        }
    }

    fn undo(&mut self) -> EditEffect {
        // An unfinished stroke is committed first so undo removes it whole.
        self.end_stroke();
        let snapshot = self.history.undo().cloned();
        self.sync_surface(snapshot)
    }

    fn redo(&mut self) -> EditEffect {
        if self.surface.is_stroking() {
            return EditEffect::None;
        }
        let snapshot = self.history.redo().cloned();
        self.sync_surface(snapshot)
    }

    fn clear(&mut self) -> EditEffect {
        self.surface.clear();
        self.history.commit(self.surface.snapshot());
        EditEffect::Committed
    }

    fn can_undo(&self) -> bool {
        self.history.can_undo() || self.surface.is_stroking()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo() && !self.surface.is_stroking()
    }

    fn export_mask(&self) -> MaskImage {
        export_raster(self.surface.coverage())
    }

    fn has_selection(&self) -> bool {
        !self.surface.is_empty()
    }
}
