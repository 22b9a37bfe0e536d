//! WebAssembly bindings for mockup-core.
//!
//! The web editor talks to the session through JSON-encoded [`Edit`]s.

use wasm_bindgen::prelude::*;

use crate::{Edit, Editor};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Editing session for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    editor: Editor,
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create a new session with the default document.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            editor: Editor::new(),
        }
    }

    /// Apply a JSON edit and record it in history.
    ///
    /// Returns the id of a created device, if any.
    ///
    /// # Errors
    ///
    /// Returns an error string if the edit cannot be parsed.
    #[wasm_bindgen(js_name = commitJson)]
    pub fn commit_json(&mut self, json: &str) -> Result<Option<String>, String> {
        let edit: Edit = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Ok(self.editor.commit(edit).created.map(|id| id.to_string()))
    }

    /// Apply a JSON edit without recording history (during a gesture).
    ///
    /// # Errors
    ///
    /// Returns an error string if the edit cannot be parsed.
    #[wasm_bindgen(js_name = immediateJson)]
    pub fn immediate_json(&mut self, json: &str) -> Result<(), String> {
        let edit: Edit = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.editor.apply_immediate(edit);
        Ok(())
    }

    /// Move the viewport during a drag.
    #[wasm_bindgen(js_name = panImmediate)]
    pub fn pan_immediate(&mut self, x: f32, y: f32) {
        self.editor.pan_immediate(x, y);
    }

    /// Record the end of a gesture.
    #[wasm_bindgen(js_name = commitHistory)]
    pub fn commit_history(&mut self) {
        self.editor.commit_history();
    }

    /// Undo one step.
    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    /// Redo one step.
    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    /// Whether undo is available.
    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    /// Whether redo is available.
    #[wasm_bindgen(js_name = canRedo)]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    /// Start over with a blank document.
    #[wasm_bindgen(js_name = newDocument)]
    pub fn new_document(&mut self) {
        self.editor.new_document();
    }

    /// Get the render snapshot as JSON.
    #[wasm_bindgen(js_name = snapshotJson)]
    #[must_use]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.editor.render_snapshot()).unwrap_or_default()
    }

    /// Get the full document as JSON.
    #[wasm_bindgen(js_name = documentJson)]
    #[must_use]
    pub fn document_json(&self) -> String {
        self.editor.document().to_json().unwrap_or_default()
    }
}
