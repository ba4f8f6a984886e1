mod common;

use redraw_core::editor::{
    Command, EditEffect, EditorMode, KeyPress, MaskEditor, ToolSelection,
};
use redraw_core::export::{MaskEncoding, MaskImage};
use redraw_core::geometry::Point;
use redraw_core::raster::Tool;

use common::paint_everything;

fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

fn dot(editor: &mut MaskEditor, at: Point) -> EditEffect {
    editor.begin_stroke(at);
    editor.end_stroke()
}

fn draw_triangle(editor: &mut MaskEditor) {
    editor.select_tool(ToolSelection::Polygon);
    editor.begin_stroke(p(10.0, 10.0));
    editor.begin_stroke(p(80.0, 10.0));
    editor.begin_stroke(p(80.0, 80.0));
    editor.begin_stroke(p(12.0, 12.0));
}

// ---------------------------------------------------------------------------
// Brush modality
// ---------------------------------------------------------------------------

#[test]
fn test_stroke_commits_and_exports() {
    let mut editor = MaskEditor::new(100, 100).unwrap();
    assert!(!editor.has_selection());
    assert_eq!(editor.begin_stroke(p(50.0, 50.0)), EditEffect::Preview);
    assert_eq!(editor.extend_stroke(p(60.0, 50.0)), EditEffect::Preview);
    // Not exported until the stroke ends.
    assert!(editor.mask().is_empty_selection());
    assert_eq!(editor.end_stroke(), EditEffect::Committed);
    assert!(editor.mask().is_edit(55, 50));
    assert!(editor.has_selection());
    assert_eq!(editor.brush().history().len(), 2);
}

#[test]
fn test_undo_redo_restore_exact_buffers() {
    let mut editor = MaskEditor::new(60, 60).unwrap();
    dot(&mut editor, p(15.0, 15.0));
    let after_first = editor.brush().surface().snapshot();
    dot(&mut editor, p(45.0, 45.0));
    let after_second = editor.brush().surface().snapshot();

    assert_eq!(editor.undo(), EditEffect::Committed);
    assert_eq!(editor.brush().surface().coverage(), &after_first);
    assert!(!editor.mask().is_edit(45, 45));

    assert_eq!(editor.redo(), EditEffect::Committed);
    assert_eq!(editor.brush().surface().coverage(), &after_second);
    assert!(editor.mask().is_edit(45, 45));
    assert_eq!(editor.redo(), EditEffect::None);
}

#[test]
fn test_undo_at_start_is_noop() {
    let mut editor = MaskEditor::new(20, 20).unwrap();
    assert!(!editor.can_undo());
    assert_eq!(editor.undo(), EditEffect::None);
    assert!(editor.mask().is_empty_selection());
}

#[test]
fn test_undo_mid_stroke_drops_whole_stroke() {
    let mut editor = MaskEditor::new(50, 50).unwrap();
    editor.begin_stroke(p(10.0, 10.0));
    editor.extend_stroke(p(40.0, 10.0));
    assert!(editor.can_undo());
    assert_eq!(editor.undo(), EditEffect::Committed);
    assert!(editor.brush().surface().is_empty());
    assert!(!editor.brush().surface().is_stroking());
    assert!(editor.can_redo());
}

#[test]
fn test_clear_is_undoable() {
    let mut editor = MaskEditor::new(40, 30).unwrap();
    paint_everything(&mut editor);
    assert_eq!(editor.clear(), EditEffect::Committed);
    assert!(editor.mask().is_empty_selection());
    editor.undo();
    assert_eq!(editor.mask().edit_pixel_count(), 40 * 30);
}

#[test]
fn test_commit_after_undo_discards_redo() {
    let mut editor = MaskEditor::new(40, 40).unwrap();
    dot(&mut editor, p(10.0, 10.0));
    dot(&mut editor, p(30.0, 30.0));
    editor.undo();
    dot(&mut editor, p(30.0, 10.0));
    assert!(!editor.can_redo());
    assert_eq!(editor.brush().history().len(), 3);
}

#[test]
fn test_eraser_via_shortcut() {
    let mut editor = MaskEditor::new(40, 40).unwrap();
    dot(&mut editor, p(20.0, 20.0));
    assert!(editor.mask().is_edit(20, 20));

    editor.handle_key(KeyPress::plain('e'));
    assert_eq!(editor.tool_selection(), ToolSelection::Eraser);
    assert_eq!(editor.brush().tool(), Tool::Eraser);
    editor.set_brush_size(60);
    dot(&mut editor, p(20.0, 20.0));
    assert!(editor.mask().is_empty_selection());
}

#[test]
fn test_ctrl_z_and_ctrl_shift_z() {
    let mut editor = MaskEditor::new(40, 40).unwrap();
    dot(&mut editor, p(20.0, 20.0));
    assert_eq!(
        editor.handle_key(KeyPress::ctrl('z')),
        Some(EditEffect::Committed)
    );
    assert!(editor.mask().is_empty_selection());
    editor.handle_key(KeyPress::ctrl_shift('z'));
    assert!(editor.mask().is_edit(20, 20));
    assert_eq!(editor.handle_key(KeyPress::plain('x')), None);
}

#[test]
fn test_brush_size_command_snaps() {
    let mut editor = MaskEditor::new(10, 10).unwrap();
    assert_eq!(editor.brush_size(), 20);
    editor.dispatch(Command::SetBrushSize(33));
    assert_eq!(editor.brush_size(), 35);
    editor.dispatch(Command::SetBrushSize(500));
    assert_eq!(editor.brush_size(), 100);
}

// ---------------------------------------------------------------------------
// Pointer input and viewport
// ---------------------------------------------------------------------------

#[test]
fn test_pointer_input_goes_through_viewport() {
    let mut editor = MaskEditor::new(100, 100).unwrap();
    editor.viewport_mut().set_scale(2.0);
    editor.set_brush_size(5);

    editor.pointer_down(p(20.0, 20.0));
    assert_eq!(editor.pointer_up(), EditEffect::Committed);
    assert!(editor.mask().is_edit(10, 10));
    assert!(!editor.mask().is_edit(20, 20));
}

#[test]
fn test_pointer_with_rendered_size_ratio() {
    let mut editor = MaskEditor::new(200, 200).unwrap();
    editor.viewport_mut().set_rendered_size(100.0, 100.0).unwrap();
    editor.set_brush_size(5);

    editor.pointer_down(p(25.0, 25.0));
    editor.pointer_up();
    assert!(editor.mask().is_edit(50, 50));
}

#[test]
fn test_pan_tool_moves_viewport_without_editing() {
    let mut editor = MaskEditor::new(50, 50).unwrap();
    editor.handle_key(KeyPress::plain('h'));
    assert_eq!(editor.tool_selection(), ToolSelection::Pan);

    assert_eq!(editor.pointer_down(p(0.0, 0.0)), EditEffect::None);
    editor.pointer_move(p(10.0, 5.0));
    editor.pointer_move(p(12.0, 9.0));
    assert_eq!(editor.pointer_up(), EditEffect::None);

    assert_eq!(editor.viewport().translation(), p(12.0, 9.0));
    assert!(editor.mask().is_empty_selection());
    assert!(!editor.can_undo());
}

#[test]
fn test_zoom_commands() {
    let mut editor = MaskEditor::new(10, 10).unwrap();
    editor.dispatch(Command::ZoomIn);
    assert!(editor.viewport().scale() > 1.0);
    editor.dispatch(Command::PanBy { dx: 3.0, dy: 4.0 });
    editor.dispatch(Command::ResetZoom);
    approx::assert_abs_diff_eq!(editor.viewport().scale(), 1.0);
    assert_eq!(editor.viewport().translation(), Point::default());
}

// ---------------------------------------------------------------------------
// Polygon modality
// ---------------------------------------------------------------------------

#[test]
fn test_polygon_selection_exports_mask() {
    let mut editor = MaskEditor::new(100, 100).unwrap();
    draw_triangle(&mut editor);

    assert_eq!(editor.mode(), EditorMode::Polygon);
    assert!(editor.has_selection());
    assert_eq!(editor.mask().encoding(), MaskEncoding::WhiteEdit);
    assert!(editor.mask().is_edit(70, 30));
    assert!(!editor.mask().is_edit(20, 70));

    let canonical = editor.canonical_mask();
    assert_eq!(canonical.encoding(), MaskEncoding::BlackEdit);
    assert!(canonical.is_edit(70, 30));

    let completion = editor.complete_polygons().unwrap();
    assert_eq!(completion.polygons.len(), 1);
}

#[test]
fn test_polygon_undo_redo_through_history() {
    let mut editor = MaskEditor::new(100, 100).unwrap();
    editor.select_tool(ToolSelection::Polygon);
    editor.begin_stroke(p(10.0, 10.0));
    editor.begin_stroke(p(80.0, 10.0));
    editor.begin_stroke(p(80.0, 80.0));
    assert!(editor.has_selection());

    assert_eq!(editor.undo(), EditEffect::Committed);
    assert_eq!(editor.polygon().editor().current().len(), 2);
    assert!(!editor.has_selection());

    assert_eq!(editor.redo(), EditEffect::Committed);
    assert_eq!(editor.polygon().editor().current().len(), 3);
}

#[test]
fn test_polygon_clear_is_undoable() {
    let mut editor = MaskEditor::new(100, 100).unwrap();
    draw_triangle(&mut editor);
    editor.clear();
    assert!(editor.polygon().editor().is_empty());
    assert!(editor.mask().is_empty_selection());
    editor.undo();
    assert_eq!(editor.polygon().editor().completed().len(), 1);
    assert!(editor.has_selection());
}

#[test]
fn test_cancel_polygon_command() {
    let mut editor = MaskEditor::new(100, 100).unwrap();
    editor.select_tool(ToolSelection::Polygon);
    editor.begin_stroke(p(10.0, 10.0));
    editor.begin_stroke(p(50.0, 10.0));
    assert_eq!(editor.dispatch(Command::CancelPolygon), EditEffect::Committed);
    assert!(editor.polygon().editor().current().is_empty());
    assert_eq!(editor.dispatch(Command::CancelPolygon), EditEffect::None);
    editor.undo();
    assert_eq!(editor.polygon().editor().current().len(), 2);
}

#[test]
fn test_drag_in_polygon_mode_places_one_vertex() {
    let mut editor = MaskEditor::new(100, 100).unwrap();
    editor.select_tool(ToolSelection::Polygon);
    editor.pointer_down(p(10.0, 10.0));
    assert_eq!(editor.pointer_move(p(40.0, 40.0)), EditEffect::None);
    assert_eq!(editor.pointer_up(), EditEffect::None);
    assert_eq!(editor.polygon().editor().current(), &[p(10.0, 10.0)]);
}

// ---------------------------------------------------------------------------
// Mode switching
// ---------------------------------------------------------------------------

#[test]
fn test_modalities_keep_separate_state_and_history() {
    let mut editor = MaskEditor::new(100, 100).unwrap();
    dot(&mut editor, p(20.0, 80.0));
    assert!(editor.mask().is_edit(20, 80));

    draw_triangle(&mut editor);
    // The exported mask follows the active modality.
    assert!(!editor.mask().is_edit(20, 80));
    assert!(editor.mask().is_edit(70, 30));

    editor.dispatch(Command::SetTool(ToolSelection::Brush));
    assert_eq!(editor.mode(), EditorMode::Brush);
    assert!(editor.mask().is_edit(20, 80));
    assert!(!editor.mask().is_edit(70, 30));

    // Brush undo does not touch the polygons.
    editor.undo();
    assert!(editor.mask().is_empty_selection());
    assert_eq!(editor.polygon().editor().completed().len(), 1);
}

#[test]
fn test_load_mask() {
    let mut editor = MaskEditor::new(10, 10).unwrap();
    let wrong = MaskImage::empty(5, 5, MaskEncoding::BlackEdit);
    assert!(editor.load_mask(&wrong).is_err());

    let mut coverage = ndarray::Array2::<u8>::zeros((10, 10));
    coverage[[2, 3]] = 255;
    let mask = redraw_core::export::export_raster(&coverage);
    editor.load_mask(&mask).unwrap();
    assert!(editor.mask().is_edit(3, 2));
    assert_eq!(editor.mask().edit_pixel_count(), 1);
    editor.undo();
    assert!(editor.mask().is_empty_selection());
}

#[test]
fn test_history_limit_evicts_oldest_brush_steps() {
    let mut editor = MaskEditor::new(60, 20).unwrap().with_history_limit(3);
    editor.set_brush_size(5);
    for i in 0..5 {
        dot(&mut editor, p(5.0 + 10.0 * i as f32, 10.0));
    }
    assert_eq!(editor.brush().history().len(), 3);

    assert_eq!(editor.undo(), EditEffect::Committed);
    assert_eq!(editor.undo(), EditEffect::Committed);
    assert!(!editor.can_undo());
    assert_eq!(editor.undo(), EditEffect::None);
    assert!(editor.mask().is_edit(25, 10));
    assert!(!editor.mask().is_edit(35, 10));
}

#[test]
fn test_default_history_is_bounded() {
    let mut editor = MaskEditor::new(20, 20).unwrap();
    editor.set_brush_size(5);
    for _ in 0..redraw_core::consts::DEFAULT_HISTORY_LIMIT + 10 {
        dot(&mut editor, p(10.0, 10.0));
    }
    assert_eq!(
        editor.brush().history().len(),
        redraw_core::consts::DEFAULT_HISTORY_LIMIT
    );
}
