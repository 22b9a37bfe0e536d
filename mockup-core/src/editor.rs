//! # Editing Session
//!
//! [`Editor`] owns the live document and its undo history. Every UI control
//! talks to the editor, never to the history directly.
//!
//! ## Committed vs. immediate edits
//!
//! ```text
//! slider tick / pointer move  ->  *_immediate()   live state only
//! pointer up / slider release ->  commit_history() one history entry
//! button / menu               ->  commit()         apply + history entry
//! ```
//!
//! Immediate edits and commits read and write the same live document, so a
//! commit always records what the user last saw.

use crate::document::{DocumentState, Edit, EditOutcome, LayoutMode, Update};
use crate::entity::{DeviceType, EntityId, EntityPatch};
use crate::history::{History, DEFAULT_CAPACITY};
use crate::media::MediaRef;
use crate::render::RenderSnapshot;
use crate::style::{Background, BorderKind, DeviceStyle, SceneBackdrop, Shadow};

/// A single editing session.
#[derive(Debug, Clone)]
pub struct Editor {
    document: DocumentState,
    history: History<DocumentState>,
    /// Live state differs from the current history entry.
    uncommitted: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Start a session from the default document.
    #[must_use]
    pub fn new() -> Self {
        Self::with_document(DocumentState::new(), DEFAULT_CAPACITY)
    }

    /// Start a session from `document`, keeping up to `capacity` snapshots.
    #[must_use]
    pub fn with_document(document: DocumentState, capacity: usize) -> Self {
        Self {
            history: History::with_capacity(document.clone(), capacity),
            document,
            uncommitted: false,
        }
    }

    /// The live document.
    #[must_use]
    pub fn document(&self) -> &DocumentState {
        &self.document
    }

    /// Read-only view for renderers.
    #[must_use]
    pub fn render_snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot::of(&self.document)
    }

    /// Apply an edit and record the result as one history entry.
    pub fn commit(&mut self, edit: Edit) -> EditOutcome {
        let outcome = self.document.apply(edit);
        self.commit_history();
        outcome
    }

    /// Apply an edit to the live document without recording history.
    pub fn apply_immediate(&mut self, edit: Edit) -> EditOutcome {
        tracing::trace!("Immediate {edit:?}");
        self.uncommitted = true;
        self.document.apply(edit)
    }

    /// Record the live document as one history entry.
    ///
    /// Call once when a gesture ends. Identical consecutive snapshots are
    /// still recorded.
    pub fn commit_history(&mut self) {
        self.history.push(self.document.clone());
        self.uncommitted = false;
        tracing::debug!(
            "Committed history entry {} of {}",
            self.history.index() + 1,
            self.history.len()
        );
    }

    /// Whether immediate edits are waiting for [`Editor::commit_history`].
    #[must_use]
    pub fn has_uncommitted_changes(&self) -> bool {
        self.uncommitted
    }

    /// Step back one entry. Returns `false` at the oldest entry.
    ///
    /// Uncommitted immediate edits are discarded.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.document = snapshot.clone();
                self.uncommitted = false;
                tracing::debug!("Undo to entry {}", self.history.index() + 1);
                true
            }
            None => {
                tracing::debug!("Undo: nothing to do");
                false
            }
        }
    }

    /// Step forward one entry. Returns `false` at the newest entry.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.document = snapshot.clone();
                self.uncommitted = false;
                tracing::debug!("Redo to entry {}", self.history.index() + 1);
                true
            }
            None => {
                tracing::debug!("Redo: nothing to do");
                false
            }
        }
    }

    /// Whether undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of stored history entries.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Index of the current history entry.
    #[must_use]
    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    /// Discard the document and history and start from defaults.
    pub fn new_document(&mut self) {
        self.new_document_from(DocumentState::new());
    }

    /// Discard the document and history and start from `document`.
    pub fn new_document_from(&mut self, document: DocumentState) {
        self.history.clear(document.clone());
        self.document = document;
        self.uncommitted = false;
        tracing::info!("Started a new document");
    }

    // Gestures.

    /// Move the viewport during a drag.
    pub fn pan_immediate(&mut self, x: f32, y: f32) {
        self.apply_immediate(Edit::Pan { x, y });
    }

    /// Record the pan at the end of a drag.
    pub fn commit_pan_history(&mut self) {
        self.commit_history();
    }

    /// Zoom during a pinch or wheel gesture.
    pub fn zoom_immediate(&mut self, zoom: impl Into<Update<f32>>) {
        let zoom = zoom.into().resolve(&self.document.viewport().zoom);
        self.apply_immediate(Edit::SetZoom { zoom });
    }

    /// Move or restyle a scene device during a drag.
    pub fn update_device_immediate(&mut self, id: EntityId, patch: EntityPatch) {
        self.apply_immediate(Edit::UpdateDevice { id, patch });
    }

    /// Change the shadow while a slider is being scrubbed.
    pub fn shadow_immediate(&mut self, shadow: impl Into<Update<Shadow>>) {
        let shadow = shadow.into().resolve(self.document.shadow());
        self.apply_immediate(Edit::SetShadow { shadow });
    }

    /// Change the border radius while its slider is being scrubbed.
    pub fn border_radius_immediate(&mut self, radius: impl Into<Update<f32>>) {
        let radius = radius.into().resolve(&self.document.border().radius());
        self.apply_immediate(Edit::SetBorderRadius { radius });
    }

    // Committed field setters.

    /// Fill or clear a media slot.
    pub fn set_media(&mut self, slot: usize, media: impl Into<Update<Option<MediaRef>>>) {
        let previous = self.document.media().get(slot).cloned().flatten();
        let media = media.into().resolve(&previous);
        self.commit(Edit::SetMedia { slot, media });
    }

    /// Choose the single-mode device. Ignored in scene mode.
    pub fn set_device(&mut self, device: impl Into<Update<DeviceType>>) {
        let previous = self.document.device().unwrap_or_default();
        let device = device.into().resolve(&previous);
        self.commit(Edit::SetDevice { device });
    }

    /// Replace the background.
    pub fn set_background(&mut self, background: impl Into<Update<Background>>) {
        let background = background.into().resolve(self.document.background());
        self.commit(Edit::SetBackground { background });
    }

    /// Set background noise.
    pub fn set_noise(&mut self, noise: impl Into<Update<f32>>) {
        let noise = noise.into().resolve(&self.document.effects().noise);
        self.commit(Edit::SetNoise { noise });
    }

    /// Set background blur.
    pub fn set_blur(&mut self, blur: impl Into<Update<f32>>) {
        let blur = blur.into().resolve(&self.document.effects().blur);
        self.commit(Edit::SetBlur { blur });
    }

    /// Set the device finish.
    pub fn set_device_style(&mut self, style: impl Into<Update<DeviceStyle>>) {
        let style = style.into().resolve(&self.document.device_style().style);
        self.commit(Edit::SetDeviceStyle { style });
    }

    /// Set the device edge thickness.
    pub fn set_edge(&mut self, edge: impl Into<Update<f32>>) {
        let edge = edge.into().resolve(&self.document.device_style().edge);
        self.commit(Edit::SetEdge { edge });
    }

    /// Set the border radius.
    pub fn set_border_radius(&mut self, radius: impl Into<Update<f32>>) {
        let radius = radius.into().resolve(&self.document.border().radius());
        self.commit(Edit::SetBorderRadius { radius });
    }

    /// Apply a border preset.
    pub fn set_border_preset(&mut self, kind: impl Into<Update<BorderKind>>) {
        let kind = kind.into().resolve(&self.document.border().kind());
        self.commit(Edit::SetBorderPreset { kind });
    }

    /// Replace the shadow.
    pub fn set_shadow(&mut self, shadow: impl Into<Update<Shadow>>) {
        let shadow = shadow.into().resolve(self.document.shadow());
        self.commit(Edit::SetShadow { shadow });
    }

    /// Set the decorative backdrop.
    pub fn set_backdrop(&mut self, backdrop: impl Into<Update<SceneBackdrop>>) {
        let backdrop = backdrop.into().resolve(&self.document.backdrop());
        self.commit(Edit::SetBackdrop { backdrop });
    }

    /// Set the viewport zoom.
    pub fn set_zoom(&mut self, zoom: impl Into<Update<f32>>) {
        let zoom = zoom.into().resolve(&self.document.viewport().zoom);
        self.commit(Edit::SetZoom { zoom });
    }

    /// Set the viewport pan as `(x, y)`.
    pub fn set_pan(&mut self, pan: impl Into<Update<(f32, f32)>>) {
        let viewport = self.document.viewport();
        let (x, y) = pan.into().resolve(&(viewport.pan_x, viewport.pan_y));
        self.commit(Edit::Pan { x, y });
    }

    /// Reset pan and zoom.
    pub fn reset_viewport(&mut self) {
        self.commit(Edit::ResetViewport);
    }

    /// Change the layout mode (and its zoom) as one entry.
    pub fn set_layout(&mut self, layout: impl Into<Update<LayoutMode>>) {
        let layout = layout.into().resolve(&self.document.layout());
        self.commit(Edit::SetLayout { layout });
    }

    /// Apply a resolution preset as one entry.
    pub fn set_resolution(&mut self, id: impl Into<String>) {
        self.commit(Edit::SetResolution { id: id.into() });
    }

    /// Set explicit canvas dimensions as `(width, height)`.
    pub fn set_canvas_size(&mut self, size: impl Into<Update<(u32, u32)>>) {
        let canvas = self.document.canvas();
        let (width, height) = size.into().resolve(&(canvas.width, canvas.height));
        self.commit(Edit::SetCanvasSize { width, height });
    }

    // Scene graph.

    /// Switch to multi-device mode.
    pub fn enter_scene_mode(&mut self) {
        self.commit(Edit::EnterSceneMode);
    }

    /// Switch back to single-device mode.
    pub fn enter_single_mode(&mut self, device: DeviceType) {
        self.commit(Edit::EnterSingleMode { device });
    }

    /// Add a device on top of the scene. Returns its id.
    pub fn add_device(&mut self, device: DeviceType) -> Option<EntityId> {
        self.commit(Edit::AddDevice { device }).created
    }

    /// Remove a scene device.
    pub fn remove_device(&mut self, id: EntityId) {
        self.commit(Edit::RemoveDevice { id });
    }

    /// Merge fields into a scene device.
    pub fn update_device(&mut self, id: EntityId, patch: EntityPatch) {
        self.commit(Edit::UpdateDevice { id, patch });
    }

    /// Raise a scene device above the others.
    pub fn bring_to_front(&mut self, id: EntityId) {
        self.commit(Edit::BringToFront { id });
    }

    /// Lower a scene device below the others.
    pub fn send_to_back(&mut self, id: EntityId) {
        self.commit(Edit::SendToBack { id });
    }

    /// Copy a scene device. Returns the copy's id.
    pub fn duplicate_device(&mut self, id: EntityId) -> Option<EntityId> {
        self.commit(Edit::DuplicateDevice { id }).created
    }
}
