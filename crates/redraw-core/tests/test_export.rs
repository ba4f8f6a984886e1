mod common;

use ndarray::Array2;

use redraw_core::consts::{EDIT_PIXEL, PRESERVE_PIXEL};
use redraw_core::editor::MaskEditor;
use redraw_core::export::{export_polygons, export_raster, MaskEncoding, MaskImage};
use redraw_core::geometry::{PixelRect, Point};

use common::paint_everything;

// ---------------------------------------------------------------------------
// Raster export
// ---------------------------------------------------------------------------

#[test]
fn test_no_strokes_exports_all_white() {
    let editor = MaskEditor::new(40, 30).unwrap();
    let mask = editor.export_mask();
    assert_eq!((mask.width(), mask.height()), (40, 30));
    assert!(mask.pixels().pixels().all(|p| p.0 == PRESERVE_PIXEL));
    assert!(mask.is_empty_selection());
}

#[test]
fn test_full_canvas_stroke_exports_all_black() {
    let mut editor = MaskEditor::new(40, 30).unwrap();
    paint_everything(&mut editor);
    let mask = editor.export_mask();
    assert!(mask.pixels().pixels().all(|p| p.0 == EDIT_PIXEL));
    assert_eq!(mask.edit_pixel_count(), 40 * 30);
}

#[test]
fn test_clear_exports_all_white_again() {
    let mut editor = MaskEditor::new(40, 30).unwrap();
    paint_everything(&mut editor);
    editor.clear();
    assert!(editor.mask().pixels().pixels().all(|p| p.0 == PRESERVE_PIXEL));
}

#[test]
fn test_any_coverage_is_an_edit() {
    let mut coverage = Array2::<u8>::zeros((4, 5));
    coverage[[1, 2]] = 1;
    coverage[[3, 4]] = 255;
    let mask = export_raster(&coverage);
    assert_eq!(mask.encoding(), MaskEncoding::BlackEdit);
    assert!(mask.is_edit(2, 1));
    assert!(mask.is_edit(4, 3));
    assert!(!mask.is_edit(0, 0));
    assert_eq!(mask.edit_pixel_count(), 2);
}

#[test]
fn test_large_export_matches_coverage() {
    // Above the row-parallel threshold.
    let mut coverage = Array2::<u8>::zeros((300, 300));
    for row in 100..150 {
        for col in 20..280 {
            coverage[[row, col]] = 64;
        }
    }
    let mask = export_raster(&coverage);
    assert_eq!(mask.edit_pixel_count(), 50 * 260);
    assert!(mask.is_edit(20, 100));
    assert!(!mask.is_edit(19, 100));
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[test]
fn test_export_is_deterministic() {
    let mut editor = MaskEditor::new(64, 48).unwrap();
    editor.begin_stroke(Point::new(10.0, 10.0));
    editor.extend_stroke(Point::new(50.0, 30.0));
    editor.end_stroke();

    let first = editor.export_mask();
    let second = editor.export_mask();
    assert_eq!(first.to_png().unwrap(), second.to_png().unwrap());
    assert_eq!(first.to_base64().unwrap(), second.to_base64().unwrap());
}

#[test]
fn test_png_decodes_back_to_same_mask() {
    let mut editor = MaskEditor::new(32, 32).unwrap();
    editor.begin_stroke(Point::new(16.0, 16.0));
    editor.end_stroke();
    let mask = editor.export_mask();

    let decoded = MaskImage::decode(&mask.to_png().unwrap(), MaskEncoding::BlackEdit).unwrap();
    assert_eq!(decoded, mask);
}

#[test]
fn test_data_url_form() {
    let mask = MaskImage::empty(4, 4, MaskEncoding::BlackEdit);
    let url = mask.to_data_url().unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
    assert!(url.ends_with(&mask.to_base64().unwrap()));
}

#[test]
fn test_polygon_masks_use_white_edit() {
    let square = vec![
        Point::new(2.0, 2.0),
        Point::new(6.0, 2.0),
        Point::new(6.0, 6.0),
        Point::new(2.0, 6.0),
    ];
    let mask = export_polygons(&[square], 10, 10);
    assert_eq!(mask.encoding(), MaskEncoding::WhiteEdit);
    assert_eq!(mask.pixels().get_pixel(3, 3).0, [255, 255, 255, 255]);
    assert_eq!(mask.pixels().get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(mask.edit_pixel_count(), 16);

    let canonical = mask.canonical();
    assert_eq!(canonical.encoding(), MaskEncoding::BlackEdit);
    assert_eq!(canonical.pixels().get_pixel(3, 3).0, EDIT_PIXEL);
    assert_eq!(canonical.pixels().get_pixel(0, 0).0, PRESERVE_PIXEL);
    assert_eq!(canonical.edit_pixel_count(), 16);
}

#[test]
fn test_polygons_union() {
    let a = vec![
        Point::new(0.0, 0.0),
        Point::new(6.0, 0.0),
        Point::new(6.0, 6.0),
        Point::new(0.0, 6.0),
    ];
    let b = vec![
        Point::new(4.0, 4.0),
        Point::new(10.0, 4.0),
        Point::new(10.0, 10.0),
        Point::new(4.0, 10.0),
    ];
    let mask = export_polygons(&[a, b], 10, 10);
    // 36 + 36 - 4 overlapping.
    assert_eq!(mask.edit_pixel_count(), 68);
    assert!(mask.is_edit(5, 5));
}

#[test]
fn test_empty_polygon_mask_is_empty_selection() {
    let mask = export_polygons(&[], 8, 8);
    assert!(mask.is_empty_selection());
    assert!(mask.pixels().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    assert!(mask.canonical().pixels().pixels().all(|p| p.0 == PRESERVE_PIXEL));
}

#[test]
fn test_decode_thresholds_luma() {
    let mut img = image::GrayImage::from_pixel(3, 1, image::Luma([255]));
    img.put_pixel(0, 0, image::Luma([10]));
    img.put_pixel(1, 0, image::Luma([200]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let black = MaskImage::decode(&bytes, MaskEncoding::BlackEdit).unwrap();
    assert!(black.is_edit(0, 0));
    assert!(!black.is_edit(1, 0));

    let white = MaskImage::decode(&bytes, MaskEncoding::WhiteEdit).unwrap();
    assert!(!white.is_edit(0, 0));
    assert!(white.is_edit(1, 0));
    assert!(white.is_edit(2, 0));
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[test]
fn test_stats_bounds_and_padding() {
    let mut coverage = Array2::<u8>::zeros((100, 100));
    for row in 10..20 {
        for col in 30..50 {
            coverage[[row, col]] = 128;
        }
    }
    let stats = export_raster(&coverage).stats(16);
    assert_eq!(stats.masked_pixels, 200);
    assert_eq!(stats.total_pixels, 10_000);
    approx::assert_abs_diff_eq!(stats.fraction(), 0.02);
    assert_eq!(
        stats.bounds,
        Some(PixelRect {
            x: 30,
            y: 10,
            width: 20,
            height: 10
        })
    );
    assert_eq!(
        stats.padded_bounds,
        Some(PixelRect {
            x: 14,
            y: 0,
            width: 52,
            height: 36
        })
    );
}

#[test]
fn test_stats_of_empty_mask() {
    let stats = MaskImage::empty(10, 10, MaskEncoding::BlackEdit).stats(8);
    assert_eq!(stats.masked_pixels, 0);
    assert!(stats.bounds.is_none());
    assert!(stats.padded_bounds.is_none());
    approx::assert_abs_diff_eq!(stats.fraction(), 0.0);
}
