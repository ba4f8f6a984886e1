//! Scanline polygon rasterisation.
//!
//! Pixels are sampled at their centres `(col + 0.5, row + 0.5)` and filled
//! with the **even-odd** rule: a centre is inside when a horizontal ray from
//! it crosses the outline an odd number of times. Several polygons rendered
//! into one mask are combined as a union.

use crate::consts::MIN_POLYGON_VERTICES;
use crate::geometry::Point;

/// Call `plot(col, row)` once for every pixel inside `vertices`.
///
/// The outline is implicitly closed (last vertex connects to the first).
/// Fewer than three vertices fill nothing.
pub fn fill_polygon<F>(vertices: &[Point], width: u32, height: u32, mut plot: F)
where
    F: FnMut(usize, usize),
{
    if vertices.len() < MIN_POLYGON_VERTICES || width == 0 || height == 0 {
        return;
    }
    if vertices.iter().any(|p| !p.is_finite()) {
        return;
    }

    let (min_y, max_y) = vertices
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });

    let row_start = (min_y - 0.5).floor().max(0.0) as usize;
    let row_end = ((max_y + 0.5).ceil().max(0.0) as usize).min(height as usize);
    let n = vertices.len();
    let mut crossings: Vec<f32> = Vec::with_capacity(n);

    for row in row_start..row_end {
        let cy = row as f32 + 0.5;
        crossings.clear();

        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            if (a.y > cy) != (b.y > cy) {
                let t = (cy - a.y) / (b.y - a.y);
                crossings.push(a.x + t * (b.x - a.x));
            }
        }
        crossings.sort_by(f32::total_cmp);

        for span in crossings.chunks_exact(2) {
            // Columns whose centre lies in [span[0], span[1]).
            let first = (span[0] - 0.5).ceil().max(0.0) as usize;
            let last = ((span[1] - 0.5).ceil().max(0.0) as usize).min(width as usize);
            for col in first..last {
                plot(col, row);
            }
        }
    }
}
