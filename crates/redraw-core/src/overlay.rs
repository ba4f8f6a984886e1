//! Preview renderings of editor state over the source page.

use image::{Rgba, RgbaImage};
use ndarray::Array2;

use crate::consts::{
    OVERLAY_COVERAGE, OVERLAY_FILL, OVERLAY_FIRST_VERTEX, OVERLAY_LINE_WIDTH,
    OVERLAY_MARKER_RADIUS, OVERLAY_STROKE,
};
use crate::geometry::Point;
use crate::polygon::{fill_polygon, PolygonEditor};
use crate::raster::brush::interpolate_stamps_within;
use crate::raster::composite::blend_rgba;

/// Draw completed polygons (filled and outlined), the open polygon (as an
/// open path) and vertex markers over `base`. The first vertex of each
/// polygon gets its own colour.
pub fn render_polygon_overlay(base: &RgbaImage, editor: &PolygonEditor) -> RgbaImage {
    let mut out = base.clone();
    let (w, h) = out.dimensions();

    for polygon in editor.completed() {
        fill_polygon(polygon, w, h, |col, row| {
            blend_pixel(&mut out, col as u32, row as u32, OVERLAY_FILL);
        });
        draw_path(&mut out, polygon, true);
        draw_markers(&mut out, polygon);
    }

    let current = editor.current();
    if !current.is_empty() {
        draw_path(&mut out, current, false);
        draw_markers(&mut out, current);
    }
    out
}

/// Tint every covered pixel of `base` red, weighted by its coverage.
pub fn render_coverage_overlay(base: &RgbaImage, coverage: &Array2<u8>) -> RgbaImage {
    let mut out = base.clone();
    let [r, g, b] = OVERLAY_COVERAGE;
    for ((row, col), &alpha) in coverage.indexed_iter() {
        if alpha > 0 {
            blend_pixel(&mut out, col as u32, row as u32, [r, g, b, alpha]);
        }
    }
    out
}

fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: [u8; 4]) {
    if x >= img.width() || y >= img.height() {
        return;
    }
    let px = img.get_pixel_mut(x, y);
    *px = Rgba(blend_rgba(px.0, color));
}

fn paint_disc(img: &mut RgbaImage, center: Point, radius: f32, color: [u8; 4]) {
    let (w, h) = img.dimensions();
    let min_x = (center.x - radius).floor().max(0.0) as u32;
    let min_y = (center.y - radius).floor().max(0.0) as u32;
    let max_x = ((center.x + radius).ceil().max(0.0) as u32).min(w);
    let max_y = ((center.y + radius).ceil().max(0.0) as u32).min(h);
    let r2 = radius * radius;
    for y in min_y..max_y {
        for x in min_x..max_x {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= r2 {
                // Overwrite so overlapping stamps along a line stay uniform.
                img.put_pixel(x, y, Rgba(color));
            }
        }
    }
}

fn draw_segment(img: &mut RgbaImage, from: Point, to: Point) {
    let radius = OVERLAY_LINE_WIDTH / 2.0;
    paint_disc(img, from, radius, OVERLAY_STROKE);
    let (w, h) = img.dimensions();
    for p in interpolate_stamps_within(from, to, OVERLAY_LINE_WIDTH, w, h) {
        paint_disc(img, p, radius, OVERLAY_STROKE);
    }
}

fn draw_path(img: &mut RgbaImage, vertices: &[Point], closed: bool) {
    for pair in vertices.windows(2) {
        draw_segment(img, pair[0], pair[1]);
    }
    if closed && vertices.len() > 2 {
        draw_segment(img, vertices[vertices.len() - 1], vertices[0]);
    }
}

fn draw_markers(img: &mut RgbaImage, vertices: &[Point]) {
    for (i, &v) in vertices.iter().enumerate() {
        let color = if i == 0 {
            OVERLAY_FIRST_VERTEX
        } else {
            OVERLAY_STROKE
        };
        paint_disc(img, v, OVERLAY_MARKER_RADIUS, color);
    }
}
