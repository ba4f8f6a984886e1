use tracing::debug;

use crate::consts::DEFAULT_HISTORY_LIMIT;
use crate::error::{RedrawError, Result};
use crate::export::{MaskEncoding, MaskImage};
use crate::geometry::Point;
use crate::history::History;
use crate::polygon::{ClickOutcome, PolygonCompletion, PolygonEditor, PolygonSnapshot};

use super::{EditEffect, MaskEditing};

/// Polygon selection with its own snapshot history.
#[derive(Clone, Debug)]
pub struct PolygonMaskEditor {
    editor: PolygonEditor,
    history: History<PolygonSnapshot>,
    width: u32,
    height: u32,
}

impl PolygonMaskEditor {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RedrawError::InvalidDimensions { width, height });
        }
        Ok(Self {
            editor: PolygonEditor::new(),
            history: History::with_limit(PolygonSnapshot::default(), DEFAULT_HISTORY_LIMIT),
            width,
            height,
        })
    }

    pub fn editor(&self) -> &PolygonEditor {
        &self.editor
    }

    pub fn history(&self) -> &History<PolygonSnapshot> {
        &self.history
    }

    pub fn set_history_limit(&mut self, limit: usize) {
        self.history.set_limit(Some(limit));
    }

    /// Place a vertex (or close the open polygon). Non-finite points are
    /// ignored.
    pub fn click(&mut self, point: Point) -> Option<ClickOutcome> {
        if !point.is_finite() {
            return None;
        }
        let outcome = self.editor.click(point);
        self.history.commit(self.editor.snapshot());
        Some(outcome)
    }

    /// Drop the open polygon, keeping the completed ones.
    pub fn cancel_polygon(&mut self) -> EditEffect {
        if self.editor.cancel() {
            self.history.commit(self.editor.snapshot());
            EditEffect::Committed
        } else {
            EditEffect::None
        }
    }

    pub fn complete(&self) -> Option<PolygonCompletion> {
        self.editor.complete(self.width, self.height)
    }
}

impl MaskEditing for PolygonMaskEditor {
    fn begin_stroke(&mut self, point: Point) -> EditEffect {
        match self.click(point) {
            Some(_) => EditEffect::Committed,
            None => EditEffect::None,
        }
    }

    fn extend_stroke(&mut self, _point: Point) -> EditEffect {
        EditEffect::None
    }

    fn end_stroke(&mut self) -> EditEffect {
        EditEffect::None
    }

    fn undo(&mut self) -> EditEffect {
        if let Some(snapshot) = self.history.undo() {
            self.editor.restore(snapshot);
            return EditEffect::Committed;
        }
        // Nothing logged (e.g. state loaded directly): fall back to popping
        // vertices and restart the log from the result.
        if self.editor.undo() {
            debug!("Polygon undo past history start");
            self.history.reset(self.editor.snapshot());
            return EditEffect::Committed;
        }
        EditEffect::None
    }

    fn redo(&mut self) -> EditEffect {
        match self.history.redo() {
            Some(snapshot) => {
                self.editor.restore(snapshot);
                EditEffect::Committed
            }
            None => EditEffect::None,
        }
    }

    fn clear(&mut self) -> EditEffect {
        self.editor.clear();
        self.history.commit(self.editor.snapshot());
        EditEffect::Committed
    }

    fn can_undo(&self) -> bool {
        self.history.can_undo() || !self.editor.is_empty()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn export_mask(&self) -> MaskImage {
        self.complete()
            .map(|c| c.mask)
            .unwrap_or_else(|| MaskImage::empty(self.width, self.height, MaskEncoding::WhiteEdit))
    }

    fn has_selection(&self) -> bool {
        self.editor.has_eligible()
    }
}
