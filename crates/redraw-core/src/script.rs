//! Replayable edit scripts.
//!
//! A script is a list of pointer gestures and commands, written in TOML or
//! JSON, that drives a [`MaskEditor`] without a UI:
//!
//! ```toml
//! [viewport]
//! rendered_width = 400.0
//! rendered_height = 600.0
//!
//! [[steps]]
//! op = "brush_size"
//! size = 30
//!
//! [[steps]]
//! op = "stroke"
//! points = [{ x = 10.0, y = 10.0 }, { x = 120.0, y = 40.0 }]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::editor::{Command, EditEffect, KeyPress, MaskEditor, ToolSelection};
use crate::error::{RedrawError, Result};
use crate::geometry::Point;

/// Which coordinate system a step's points are given in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSpace {
    /// Source image pixels.
    #[default]
    Image,
    /// Pointer positions, mapped through the editor's viewport.
    Screen,
}

/// Initial viewport layout applied before the first step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSpec {
    pub rendered_width: Option<f32>,
    pub rendered_height: Option<f32>,
    pub origin: Option<Point>,
    pub scale: Option<f32>,
    pub pan: Option<Point>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditStep {
    Tool {
        tool: ToolSelection,
    },
    BrushSize {
        size: u32,
    },
    /// Press, drag through `points`, release.
    Stroke {
        points: Vec<Point>,
        #[serde(default)]
        space: CoordinateSpace,
    },
    /// Press and release at one point.
    Click {
        point: Point,
        #[serde(default)]
        space: CoordinateSpace,
    },
    /// Place every vertex, then close on the first one. Switches to the
    /// polygon tool. A vertex that would close the polygon before the final
    /// click is an error.
    Polygon {
        points: Vec<Point>,
    },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },
    Undo,
    Redo,
    Clear,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    Pan {
        dx: f32,
        dy: f32,
    },
    CancelPolygon,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EditScript {
    #[serde(default)]
    pub viewport: Option<ViewportSpec>,
    #[serde(default)]
    pub steps: Vec<EditStep>,
}

/// Counts gathered while replaying a script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub steps: usize,
    pub commits: usize,
    /// Key steps with no binding.
    pub unbound_keys: usize,
}

impl EditScript {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| RedrawError::Script(e.to_string()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| RedrawError::Script(e.to_string()))
    }

    /// Read a script; `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    /// Replay every step against `editor`, in order.
    pub fn apply(&self, editor: &mut MaskEditor) -> Result<ScriptReport> {
        if let Some(ref spec) = self.viewport {
            apply_viewport(editor, spec)?;
        }

        let mut report = ScriptReport::default();
        for (index, step) in self.steps.iter().enumerate() {
            let commits = apply_step(editor, step, &mut report)
                .map_err(|e| RedrawError::Script(format!("step {}: {e}", index + 1)))?;
            report.commits += commits;
            report.steps += 1;
        }
        info!(
            steps = report.steps,
            commits = report.commits,
            "Edit script applied"
        );
        Ok(report)
    }
}

fn apply_viewport(editor: &mut MaskEditor, spec: &ViewportSpec) -> Result<()> {
    let viewport = editor.viewport_mut();
    if spec.rendered_width.is_some() || spec.rendered_height.is_some() {
        let (w, h) = viewport.rendered_size();
        viewport.set_rendered_size(
            spec.rendered_width.unwrap_or(w),
            spec.rendered_height.unwrap_or(h),
        )?;
    }
    if let Some(origin) = spec.origin {
        viewport.set_origin(origin);
    }
    if let Some(scale) = spec.scale {
        viewport.set_scale(scale);
    }
    if let Some(pan) = spec.pan {
        viewport.pan_by(pan.x, pan.y);
    }
    Ok(())
}

fn committed(effect: EditEffect) -> usize {
    usize::from(effect == EditEffect::Committed)
}

/// Apply one step; returns how many commits it produced.
fn apply_step(editor: &mut MaskEditor, step: &EditStep, report: &mut ScriptReport) -> Result<usize> {
    debug!(?step, "Script step");
    let commits = match step {
        EditStep::Tool { tool } => committed(editor.dispatch(Command::SetTool(*tool))),
        EditStep::BrushSize { size } => committed(editor.dispatch(Command::SetBrushSize(*size))),
        EditStep::Stroke { points, space } => {
            let Some((first, rest)) = points.split_first() else {
                return Err(RedrawError::Script("stroke needs at least one point".into()));
            };
            let mut n = 0;
            match space {
                CoordinateSpace::Image => {
                    n += committed(editor.begin_stroke(*first));
                    for p in rest {
                        n += committed(editor.extend_stroke(*p));
                    }
                    n += committed(editor.end_stroke());
                }
                CoordinateSpace::Screen => {
                    n += committed(editor.pointer_down(*first));
                    for p in rest {
                        n += committed(editor.pointer_move(*p));
                    }
                    n += committed(editor.pointer_up());
                }
            }
            n
        }
        EditStep::Click { point, space } => match space {
            CoordinateSpace::Image => {
                committed(editor.begin_stroke(*point)) + committed(editor.end_stroke())
            }
            CoordinateSpace::Screen => {
                committed(editor.pointer_down(*point)) + committed(editor.pointer_up())
            }
        },
        EditStep::Polygon { points } => {
            if points.len() < 3 {
                return Err(RedrawError::Script(format!(
                    "polygon needs at least 3 points, got {}",
                    points.len()
                )));
            }
            editor.select_tool(ToolSelection::Polygon);
            let mut n = 0;
            for (i, p) in points.iter().enumerate() {
                if editor.polygon().editor().closes_at(*p) {
                    return Err(RedrawError::Script(format!(
                        "polygon point {} closes the polygon early",
                        i + 1
                    )));
                }
                n += committed(editor.begin_stroke(*p));
            }
            n + committed(editor.begin_stroke(points[0]))
        }
        EditStep::Key { key, ctrl, shift } => {
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(RedrawError::Script(format!(
                    "key must be a single character, got {key:?}"
                )));
            };
            let press = KeyPress {
                key: c,
                ctrl: *ctrl,
                shift: *shift,
            };
            match editor.handle_key(press) {
                Some(effect) => committed(effect),
                None => {
                    report.unbound_keys += 1;
                    0
                }
            }
        }
        EditStep::Undo => committed(editor.dispatch(Command::Undo)),
        EditStep::Redo => committed(editor.dispatch(Command::Redo)),
        EditStep::Clear => committed(editor.dispatch(Command::Clear)),
        EditStep::ZoomIn => committed(editor.dispatch(Command::ZoomIn)),
        EditStep::ZoomOut => committed(editor.dispatch(Command::ZoomOut)),
        EditStep::ResetZoom => committed(editor.dispatch(Command::ResetZoom)),
        EditStep::Pan { dx, dy } => committed(editor.dispatch(Command::PanBy { dx: *dx, dy: *dy })),
        EditStep::CancelPolygon => committed(editor.dispatch(Command::CancelPolygon)),
    };
    Ok(commits)
}
