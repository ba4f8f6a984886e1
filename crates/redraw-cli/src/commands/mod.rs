pub mod config;
pub mod info;
pub mod mask;
pub mod preview;
pub mod presets;
pub mod process;

use std::path::Path;

use anyhow::{Context, Result};
use redraw_core::editor::{MaskEditor, ToolSelection};
use redraw_core::page::Page;
use redraw_core::script::{EditScript, ScriptReport};

/// Load a page and replay `script` on a fresh editor for it.
pub(crate) fn edit_page(
    image: &Path,
    script: &Path,
    tool: Option<ToolSelection>,
) -> Result<(Page, MaskEditor, ScriptReport)> {
    let page =
        Page::open(image).with_context(|| format!("Failed to load page {}", image.display()))?;
    let script = EditScript::load(script)
        .with_context(|| format!("Failed to read edit script {}", script.display()))?;
    let mut editor = MaskEditor::new(page.width(), page.height())?;
    if let Some(tool) = tool {
        editor.select_tool(tool);
    }
    let report = script.apply(&mut editor)?;
    Ok((page, editor, report))
}
