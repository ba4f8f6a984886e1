use std::fmt;

use serde::{Deserialize, Serialize};

/// Tool picked from the toolbar or by shortcut.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolSelection {
    #[default]
    Brush,
    Eraser,
    /// Pointer drags move the viewport instead of editing.
    Pan,
    Polygon,
}

impl fmt::Display for ToolSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brush => write!(f, "Brush"),
            Self::Eraser => write!(f, "Eraser"),
            Self::Pan => write!(f, "Pan"),
            Self::Polygon => write!(f, "Polygon"),
        }
    }
}

/// Every editor action that is not a pointer event. Toolbar buttons and
/// keyboard shortcuts both resolve to these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    SetTool(ToolSelection),
    SetBrushSize(u32),
    Undo,
    Redo,
    Clear,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    PanBy { dx: f32, dy: f32 },
    CancelPolygon,
}

/// A key press as reported by the host UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: char,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn plain(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub fn ctrl(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            shift: false,
        }
    }

    pub fn ctrl_shift(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            shift: true,
        }
    }
}

/// Resolve a shortcut. Letters are case-insensitive; `ctrl` also stands for
/// the platform meta key.
pub fn binding_for(press: KeyPress) -> Option<Command> {
    let key = press.key.to_ascii_lowercase();
    if press.ctrl {
        return match (key, press.shift) {
            ('z', false) => Some(Command::Undo),
            ('z', true) | ('y', false) => Some(Command::Redo),
            _ => None,
        };
    }
    match key {
        'b' => Some(Command::SetTool(ToolSelection::Brush)),
        'e' => Some(Command::SetTool(ToolSelection::Eraser)),
        'h' => Some(Command::SetTool(ToolSelection::Pan)),
        'p' => Some(Command::SetTool(ToolSelection::Polygon)),
        '+' | '=' => Some(Command::ZoomIn),
        '-' => Some(Command::ZoomOut),
        '0' => Some(Command::ResetZoom),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_bindings() {
        assert_eq!(binding_for(KeyPress::ctrl('z')), Some(Command::Undo));
        assert_eq!(binding_for(KeyPress::ctrl('Z')), Some(Command::Undo));
        assert_eq!(binding_for(KeyPress::ctrl_shift('z')), Some(Command::Redo));
        assert_eq!(binding_for(KeyPress::ctrl('y')), Some(Command::Redo));
        assert_eq!(binding_for(KeyPress::plain('z')), None);
    }

    #[test]
    fn test_tool_bindings() {
        assert_eq!(
            binding_for(KeyPress::plain('B')),
            Some(Command::SetTool(ToolSelection::Brush))
        );
        assert_eq!(
            binding_for(KeyPress::plain('e')),
            Some(Command::SetTool(ToolSelection::Eraser))
        );
        assert_eq!(
            binding_for(KeyPress::plain('h')),
            Some(Command::SetTool(ToolSelection::Pan))
        );
        assert_eq!(binding_for(KeyPress::ctrl('b')), None);
    }
}
