use ndarray::Array2;
use tracing::debug;

use crate::error::{RedrawError, Result};
use crate::geometry::Point;

use super::brush::{interpolate_stamps_within, stamp_disc, Tool};

/// The editable paint layer: one coverage byte per source pixel.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    /// Coverage, row-major, shape = (height, width).
    coverage: Array2<u8>,
    stroke: Option<ActiveStroke>,
}

#[derive(Clone, Debug)]
struct ActiveStroke {
    tool: Tool,
    diameter: f32,
    last: Point,
    stamps: usize,
}

/// What a finished stroke did, for logging and callers that care.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeSummary {
    pub tool: Tool,
    pub stamps: usize,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RedrawError::InvalidDimensions { width, height });
        }
        Ok(Self {
            coverage: Array2::zeros((height as usize, width as usize)),
            stroke: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.coverage.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.coverage.nrows() as u32
    }

    pub fn coverage(&self) -> &Array2<u8> {
        &self.coverage
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn active_tool(&self) -> Option<Tool> {
        self.stroke.as_ref().map(|s| s.tool)
    }

    /// Start a stroke and stamp the first disc. An unfinished stroke is
    /// abandoned (its discs stay composited).
    pub fn begin_stroke(&mut self, tool: Tool, diameter: u32, point: Point) {
        let diameter = diameter as f32;
        stamp_disc(
            &mut self.coverage,
            point,
            diameter,
            tool.composite_op(),
            tool.stamp_alpha(),
        );
        self.stroke = Some(ActiveStroke {
            tool,
            diameter,
            last: point,
            stamps: 1,
        });
    }

    /// Continue the active stroke to `point`. Returns false without a stroke.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        let Some(stroke) = self.stroke.as_mut() else {
            return false;
        };
        if !point.is_finite() {
            return false;
        }
        let op = stroke.tool.composite_op();
        let alpha = stroke.tool.stamp_alpha();
        let (h, w) = self.coverage.dim();
        for center in
            interpolate_stamps_within(stroke.last, point, stroke.diameter, w as u32, h as u32)
        {
            stamp_disc(&mut self.coverage, center, stroke.diameter, op, alpha);
            stroke.stamps += 1;
        }
        stroke.last = point;
        true
    }

    pub fn end_stroke(&mut self) -> Option<StrokeSummary> {
        let stroke = self.stroke.take()?;
        debug!(tool = %stroke.tool, stamps = stroke.stamps, "Stroke finished");
        Some(StrokeSummary {
            tool: stroke.tool,
            stamps: stroke.stamps,
        })
    }

    /// Reset every pixel to transparent and drop any active stroke.
    pub fn clear(&mut self) {
        self.coverage.fill(0);
        self.stroke = None;
    }

    pub fn snapshot(&self) -> Array2<u8> {
        self.coverage.clone()
    }

    /// Replace the layer with `snapshot`, which must match its dimensions.
    pub fn restore(&mut self, snapshot: &Array2<u8>) -> Result<()> {
        if snapshot.dim() != self.coverage.dim() {
            return Err(RedrawError::DimensionMismatch {
                expected_width: self.width(),
                expected_height: self.height(),
                actual_width: snapshot.ncols() as u32,
                actual_height: snapshot.nrows() as u32,
            });
        }
        self.coverage.assign(snapshot);
        self.stroke = None;
        Ok(())
    }

    pub fn masked_pixel_count(&self) -> usize {
        self.coverage.iter().filter(|&&a| a > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.coverage.iter().all(|&a| a == 0)
    }
}
