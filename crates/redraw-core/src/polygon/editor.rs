use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{MIN_POLYGON_VERTICES, POLYGON_CLOSE_RADIUS};
use crate::export::{export_polygons, MaskImage};
use crate::geometry::Point;

/// Ordered outline in image-pixel space.
pub type Polygon = Vec<Point>;

/// Whether a polygon is currently being placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolygonState {
    /// No current polygon.
    Idle,
    /// The current polygon has at least one vertex and is still open.
    Drawing,
}

impl fmt::Display for PolygonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Drawing => write!(f, "Drawing"),
        }
    }
}

/// What a click did to the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First vertex of a new polygon.
    Started,
    /// Another vertex appended to the open polygon.
    VertexAdded,
    /// The click landed on the first vertex and closed the polygon.
    Closed,
}

/// Full editor state, as stored in history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonSnapshot {
    pub completed: Vec<Polygon>,
    pub current: Polygon,
}

/// Result of finishing a polygon selection.
#[derive(Clone, Debug)]
pub struct PolygonCompletion {
    pub polygons: Vec<Polygon>,
    pub mask: MaskImage,
}

/// Click-to-place-vertex polygon selection.
#[derive(Clone, Debug, Default)]
pub struct PolygonEditor {
    completed: Vec<Polygon>,
    current: Polygon,
}

impl PolygonEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PolygonState {
        if self.current.is_empty() {
            PolygonState::Idle
        } else {
            PolygonState::Drawing
        }
    }

    pub fn completed(&self) -> &[Polygon] {
        &self.completed
    }

    pub fn current(&self) -> &[Point] {
        &self.current
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.current.is_empty()
    }

    /// True if `point` would close the open polygon.
    pub fn closes_at(&self, point: Point) -> bool {
        self.current.len() >= MIN_POLYGON_VERTICES
            && point.distance_to(&self.current[0]) < POLYGON_CLOSE_RADIUS
    }

    pub fn click(&mut self, point: Point) -> ClickOutcome {
        if self.closes_at(point) {
            let closed = std::mem::take(&mut self.current);
            debug!(vertices = closed.len(), "Polygon closed");
            self.completed.push(closed);
            return ClickOutcome::Closed;
        }

        let outcome = if self.current.is_empty() {
            ClickOutcome::Started
        } else {
            ClickOutcome::VertexAdded
        };
        self.current.push(point);
        outcome
    }

    /// Pop the last vertex of the open polygon, or reopen the last completed
    /// polygon as the current one. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.current.pop().is_some() {
            return true;
        }
        match self.completed.pop() {
            Some(last) => {
                self.current = last;
                true
            }
            None => false,
        }
    }

    /// Abandon the open polygon, keeping completed ones.
    pub fn cancel(&mut self) -> bool {
        if self.current.is_empty() {
            return false;
        }
        self.current.clear();
        true
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.is_empty();
        self.completed.clear();
        self.current.clear();
        changed
    }

    /// Completed polygons, plus the open one if it already encloses an area.
    pub fn eligible_polygons(&self) -> Vec<Polygon> {
        let mut polygons = self.completed.clone();
        if self.current.len() >= MIN_POLYGON_VERTICES {
            polygons.push(self.current.clone());
        }
        polygons
    }

    pub fn has_eligible(&self) -> bool {
        !self.completed.is_empty() || self.current.len() >= MIN_POLYGON_VERTICES
    }

    /// Emit every eligible polygon together with its mask, or `None` when
    /// nothing is selected yet.
    pub fn complete(&self, width: u32, height: u32) -> Option<PolygonCompletion> {
        if !self.has_eligible() {
            return None;
        }
        let polygons = self.eligible_polygons();
        let mask = export_polygons(&polygons, width, height);
        Some(PolygonCompletion { polygons, mask })
    }

    pub fn snapshot(&self) -> PolygonSnapshot {
        PolygonSnapshot {
            completed: self.completed.clone(),
            current: self.current.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: &PolygonSnapshot) {
        self.completed = snapshot.completed.clone();
        self.current = snapshot.current.clone();
    }
}
