use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{
    BRUSH_ALPHA, BRUSH_SIZE_STEP, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE, STAMP_SPACING_FACTOR,
};
use crate::geometry::Point;

use super::composite::CompositeOp;

/// Freehand raster tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Adds coverage with a half-opaque source-over fill.
    #[default]
    Brush,
    /// Removes coverage with destination-out.
    Eraser,
}

impl Tool {
    pub fn composite_op(self) -> CompositeOp {
        match self {
            Self::Brush => CompositeOp::SourceOver,
            Self::Eraser => CompositeOp::DestinationOut,
        }
    }

    /// Alpha of a single disc stamp for this tool.
    pub fn stamp_alpha(self) -> u8 {
        match self {
            Self::Brush => BRUSH_ALPHA,
            Self::Eraser => u8::MAX,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brush => write!(f, "Brush"),
            Self::Eraser => write!(f, "Eraser"),
        }
    }
}

/// Clamp a brush diameter into `[MIN_BRUSH_SIZE, MAX_BRUSH_SIZE]` and snap it
/// to the nearest `BRUSH_SIZE_STEP`.
pub fn snap_brush_size(size: u32) -> u32 {
    let clamped = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    let snapped = (clamped + BRUSH_SIZE_STEP / 2) / BRUSH_SIZE_STEP * BRUSH_SIZE_STEP;
    snapped.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
}

/// Composite one filled disc of `diameter` centred at `center`.
///
/// A pixel belongs to the disc when its centre `(col + 0.5, row + 0.5)` lies
/// within `diameter / 2`. The disc is clipped to the buffer.
pub fn stamp_disc(
    coverage: &mut Array2<u8>,
    center: Point,
    diameter: f32,
    op: CompositeOp,
    alpha: u8,
) {
    let radius = diameter / 2.0;
    if radius <= 0.0 || !center.is_finite() {
        return;
    }
    let (h, w) = coverage.dim();
    let r2 = radius * radius;

    let min_col = (center.x - radius).floor().max(0.0) as usize;
    let max_col = ((center.x + radius).ceil().max(0.0) as usize).min(w);
    let min_row = (center.y - radius).floor().max(0.0) as usize;
    let max_row = ((center.y + radius).ceil().max(0.0) as usize).min(h);

    for row in min_row..max_row {
        let dy = row as f32 + 0.5 - center.y;
        for col in min_col..max_col {
            let dx = col as f32 + 0.5 - center.x;
            if dx * dx + dy * dy <= r2 {
                let px = &mut coverage[[row, col]];
                *px = op.apply(*px, alpha);
            }
        }
    }
}

/// Stamp centres covering the segment `from -> to`, excluding `from` (already
/// stamped by the previous event) and including `to`.
///
/// Consecutive centres are at most `radius * STAMP_SPACING_FACTOR` apart so
/// fast pointer motion leaves no gaps.
pub fn interpolate_stamps(from: Point, to: Point, diameter: f32) -> Vec<Point> {
    stamps_in_range(from, to, diameter, 0.0, 1.0)
}

/// Like [`interpolate_stamps`], but only the centres whose disc can touch a
/// `width x height` buffer. The work is bounded by the on-buffer part of the
/// segment, however far outside the buffer it reaches.
pub fn interpolate_stamps_within(
    from: Point,
    to: Point,
    diameter: f32,
    width: u32,
    height: u32,
) -> Vec<Point> {
    let reach = f64::from(diameter.max(0.0)) / 2.0;
    let bounds = (-reach, -reach, f64::from(width) + reach, f64::from(height) + reach);
    match clip_segment(from, to, bounds) {
        Some((t0, t1)) => stamps_in_range(from, to, diameter, t0, t1),
        None => Vec::new(),
    }
}

/// Stamps at parameters `i / steps` that fall inside `[t0, t1]`.
fn stamps_in_range(from: Point, to: Point, diameter: f32, t0: f64, t1: f64) -> Vec<Point> {
    if !(from.is_finite() && to.is_finite()) {
        return Vec::new();
    }
    let spacing = f64::from((diameter / 2.0 * STAMP_SPACING_FACTOR).max(0.5));
    let (x0, y0) = (f64::from(from.x), f64::from(from.y));
    let (dx, dy) = (f64::from(to.x) - x0, f64::from(to.y) - y0);
    let steps = ((dx * dx + dy * dy).sqrt() / spacing).ceil().max(1.0);

    let first = (t0 * steps).ceil().max(1.0);
    let last = if t1 >= 1.0 { steps } else { (t1 * steps).floor() };
    if first > last {
        return Vec::new();
    }
    (first as u64..=last as u64)
        .map(|i| {
            if i as f64 == steps {
                return to;
            }
            let t = i as f64 / steps;
            Point::new((x0 + dx * t) as f32, (y0 + dy * t) as f32)
        })
        .collect()
}

/// Liang-Barsky: the parameter range of `from -> to` inside `(min_x, min_y,
/// max_x, max_y)`, or `None` if the segment misses it.
fn clip_segment(from: Point, to: Point, bounds: (f64, f64, f64, f64)) -> Option<(f64, f64)> {
    let (min_x, min_y, max_x, max_y) = bounds;
    let (x0, y0) = (f64::from(from.x), f64::from(from.y));
    let (dx, dy) = (f64::from(to.x) - x0, f64::from(to.y) - y0);

    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, x0 - min_x),
        (dx, max_x - x0),
        (-dy, y0 - min_y),
        (dy, max_y - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    (t0 <= t1).then_some((t0, t1))
}
