//! The editable document and its single mutation entry point.
//!
//! Every change to a [`DocumentState`] is expressed as an [`Edit`] and goes
//! through [`DocumentState::apply`]. Composite edits (resolution, layout)
//! update all dependent fields in one call so that a single history commit
//! captures them together.

use serde::{Deserialize, Serialize};

use crate::entity::{DeviceKind, DeviceType, EntityId, EntityPatch, SceneEntity};
use crate::media::{MediaRef, MEDIA_SLOTS};
use crate::resolution::{self, CanvasSize};
use crate::scene::SceneGraph;
use crate::style::{
    Background, BackgroundEffects, Border, BorderKind, DeviceAppearance, DeviceStyle,
    SceneBackdrop, Shadow,
};
use crate::transform::clamp_or;
use crate::MockupResult;

/// Smallest viewport zoom, in percent.
pub const MIN_ZOOM: f32 = 10.0;
/// Largest viewport zoom, in percent.
pub const MAX_ZOOM: f32 = 400.0;
/// Largest explicit canvas dimension, in pixels.
pub const MAX_CANVAS_DIMENSION: u32 = 8192;
/// Resolution id recorded for explicit canvas sizes.
pub const CUSTOM_RESOLUTION: &str = "custom";

/// A new value, or a function of the previous one.
pub enum Update<T> {
    /// Replace with this value.
    Set(T),
    /// Compute from the previous value.
    Map(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Update<T> {
    /// Functional update.
    #[must_use]
    pub fn map(f: impl FnOnce(&T) -> T + 'static) -> Self {
        Self::Map(Box::new(f))
    }

    /// Resolve against the previous value.
    #[must_use]
    pub fn resolve(self, previous: &T) -> T {
        match self {
            Self::Set(value) => value,
            Self::Map(f) => f(previous),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set(value) => f.debug_tuple("Set").field(value).finish(),
            Self::Map(_) => f.write_str("Map(..)"),
        }
    }
}

/// Camera over the canvas. Not part of the exported image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Zoom in percent.
    pub zoom: f32,
    /// Horizontal pan offset in pixels.
    pub pan_x: f32,
    /// Vertical pan offset in pixels.
    pub pan_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: LayoutMode::Single.default_zoom(),
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// How many media slots the single-device layout shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// One device.
    #[default]
    Single,
    /// Two devices side by side.
    Double,
    /// Three devices side by side.
    Triple,
}

impl LayoutMode {
    /// Zoom applied whenever the layout changes.
    #[must_use]
    pub const fn default_zoom(self) -> f32 {
        match self {
            Self::Single => 100.0,
            Self::Double => 70.0,
            Self::Triple => 60.0,
        }
    }
}

/// Which composition is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Composition {
    /// One device type driven by the document-level style fields.
    Single {
        /// Active device type.
        device: DeviceType,
    },
    /// Independently placed device instances.
    Scene {
        /// The scene graph.
        scene: SceneGraph,
    },
}

impl Default for Composition {
    fn default() -> Self {
        Self::Single {
            device: DeviceType::default(),
        }
    }
}

/// One change to the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    /// Fill or clear a media slot (0-3).
    SetMedia {
        /// Slot index.
        slot: usize,
        /// New media, or `None` to clear.
        media: Option<MediaRef>,
    },
    /// Choose the single-mode device. Ignored in scene mode.
    SetDevice {
        /// Device type.
        device: DeviceType,
    },
    /// Replace the background.
    SetBackground {
        /// New background.
        background: Background,
    },
    /// Set background noise (0-100).
    SetNoise {
        /// Intensity.
        noise: f32,
    },
    /// Set background blur (0-20).
    SetBlur {
        /// Radius.
        blur: f32,
    },
    /// Set the device finish.
    SetDeviceStyle {
        /// Finish.
        style: DeviceStyle,
    },
    /// Set the device edge thickness (0-64).
    SetEdge {
        /// Thickness.
        edge: f32,
    },
    /// Set the border radius; the border kind follows.
    SetBorderRadius {
        /// Radius (0-40).
        radius: f32,
    },
    /// Apply a border preset, writing its radius.
    SetBorderPreset {
        /// Preset kind.
        kind: BorderKind,
    },
    /// Replace the shadow.
    SetShadow {
        /// New shadow.
        shadow: Shadow,
    },
    /// Set the decorative backdrop.
    SetBackdrop {
        /// Backdrop.
        backdrop: SceneBackdrop,
    },
    /// Set the viewport zoom.
    SetZoom {
        /// Zoom in percent.
        zoom: f32,
    },
    /// Set the viewport pan.
    Pan {
        /// Horizontal offset.
        x: f32,
        /// Vertical offset.
        y: f32,
    },
    /// Reset pan and restore the layout's default zoom.
    ResetViewport,
    /// Change layout; resets zoom to the layout's default when it changes.
    SetLayout {
        /// Layout mode.
        layout: LayoutMode,
    },
    /// Apply a resolution preset (width, height and id together).
    SetResolution {
        /// Preset id. Unknown ids resolve to the default.
        id: String,
    },
    /// Set explicit canvas dimensions.
    SetCanvasSize {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Switch to the multi-device scene, seeded with the current device.
    EnterSceneMode,
    /// Switch to single-device mode, dropping the scene.
    EnterSingleMode {
        /// Device type to show.
        device: DeviceType,
    },
    /// Add a device to the scene (entering scene mode if needed).
    AddDevice {
        /// Device type.
        device: DeviceType,
    },
    /// Remove a scene device.
    RemoveDevice {
        /// Entity id.
        id: EntityId,
    },
    /// Merge fields into a scene device.
    UpdateDevice {
        /// Entity id.
        id: EntityId,
        /// Fields to change.
        patch: EntityPatch,
    },
    /// Raise a scene device above the others.
    BringToFront {
        /// Entity id.
        id: EntityId,
    },
    /// Lower a scene device below the others.
    SendToBack {
        /// Entity id.
        id: EntityId,
    },
    /// Copy a scene device.
    DuplicateDevice {
        /// Entity id.
        id: EntityId,
    },
    /// Several edits applied in order as one change.
    Batch {
        /// Edits.
        edits: Vec<Edit>,
    },
}

/// What an applied edit produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// Entity created by the edit, if any.
    pub created: Option<EntityId>,
}

/// The complete editable mockup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredDocument")]
pub struct DocumentState {
    media: [Option<MediaRef>; MEDIA_SLOTS],
    composition: Composition,
    background: Background,
    effects: BackgroundEffects,
    device_style: DeviceAppearance,
    border: Border,
    shadow: Shadow,
    backdrop: SceneBackdrop,
    viewport: Viewport,
    layout: LayoutMode,
    canvas: CanvasSize,
}

/// Document as read from JSON, before ranges are enforced.
#[derive(Deserialize)]
struct StoredDocument {
    media: [Option<MediaRef>; MEDIA_SLOTS],
    composition: Composition,
    background: Background,
    effects: BackgroundEffects,
    device_style: DeviceAppearance,
    border: Border,
    shadow: Shadow,
    backdrop: SceneBackdrop,
    viewport: Viewport,
    layout: LayoutMode,
    canvas: CanvasSize,
}

impl From<StoredDocument> for DocumentState {
    fn from(stored: StoredDocument) -> Self {
        let viewport = Viewport {
            zoom: clamp_or(
                stored.viewport.zoom,
                MIN_ZOOM,
                MAX_ZOOM,
                stored.layout.default_zoom(),
            ),
            pan_x: finite_or_zero(stored.viewport.pan_x),
            pan_y: finite_or_zero(stored.viewport.pan_y),
        };
        let canvas = CanvasSize {
            width: stored.canvas.width.clamp(1, MAX_CANVAS_DIMENSION),
            height: stored.canvas.height.clamp(1, MAX_CANVAS_DIMENSION),
            resolution: stored.canvas.resolution,
        };
        Self {
            media: stored.media,
            composition: stored.composition,
            background: stored.background,
            effects: stored.effects.clamped(),
            device_style: stored.device_style.clamped(),
            border: stored.border,
            shadow: stored.shadow.clamped(),
            backdrop: stored.backdrop,
            viewport,
            layout: stored.layout,
            canvas,
        }
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl DocumentState {
    /// Create a document with the session defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one edit. This is the only way to mutate a document.
    pub fn apply(&mut self, edit: Edit) -> EditOutcome {
        tracing::trace!("Applying {edit:?}");
        let mut outcome = EditOutcome::default();
        match edit {
            Edit::SetMedia { slot, media } => {
                if let Some(target) = self.media.get_mut(slot) {
                    *target = media;
                } else {
                    tracing::warn!("Media slot {slot} out of range (max {})", MEDIA_SLOTS - 1);
                }
            }
            Edit::SetDevice { device } => match &mut self.composition {
                Composition::Single { device: current } => *current = device,
                Composition::Scene { .. } => {
                    tracing::debug!("SetDevice ignored in scene mode");
                }
            },
            Edit::SetBackground { background } => self.background = background,
            Edit::SetNoise { noise } => {
                self.effects = BackgroundEffects {
                    noise,
                    ..self.effects
                }
                .clamped();
            }
            Edit::SetBlur { blur } => {
                self.effects = BackgroundEffects {
                    blur,
                    ..self.effects
                }
                .clamped();
            }
            Edit::SetDeviceStyle { style } => self.device_style.style = style,
            Edit::SetEdge { edge } => {
                self.device_style = DeviceAppearance {
                    edge,
                    ..self.device_style
                }
                .clamped();
            }
            Edit::SetBorderRadius { radius } => self.border = Border::with_radius(radius),
            Edit::SetBorderPreset { kind } => self.border = Border::preset(kind),
            Edit::SetShadow { shadow } => self.shadow = shadow.clamped(),
            Edit::SetBackdrop { backdrop } => self.backdrop = backdrop,
            Edit::SetZoom { zoom } => {
                self.viewport.zoom = clamp_or(zoom, MIN_ZOOM, MAX_ZOOM, self.viewport.zoom);
            }
            Edit::Pan { x, y } => {
                if x.is_finite() && y.is_finite() {
                    self.viewport.pan_x = x;
                    self.viewport.pan_y = y;
                }
            }
            Edit::ResetViewport => {
                self.viewport = Viewport {
                    zoom: self.layout.default_zoom(),
                    pan_x: 0.0,
                    pan_y: 0.0,
                };
            }
            Edit::SetLayout { layout } => {
                if layout != self.layout {
                    self.layout = layout;
                    self.viewport.zoom = layout.default_zoom();
                }
            }
            Edit::SetResolution { id } => self.canvas = resolution::resolve(&id),
            Edit::SetCanvasSize { width, height } => {
                self.canvas = CanvasSize {
                    width: width.clamp(1, MAX_CANVAS_DIMENSION),
                    height: height.clamp(1, MAX_CANVAS_DIMENSION),
                    resolution: CUSTOM_RESOLUTION.to_string(),
                };
            }
            Edit::EnterSceneMode => self.enter_scene_mode(),
            Edit::EnterSingleMode { device } => {
                self.composition = Composition::Single { device };
            }
            Edit::AddDevice { device } => {
                self.enter_scene_mode();
                outcome.created = self.scene_mut().map(|scene| scene.add_entity(device));
            }
            Edit::RemoveDevice { id } => {
                if let Some(scene) = self.scene_mut() {
                    scene.remove_entity(id);
                }
            }
            Edit::UpdateDevice { id, patch } => {
                if let Some(scene) = self.scene_mut() {
                    scene.update_entity(id, &patch);
                }
            }
            Edit::BringToFront { id } => {
                if let Some(scene) = self.scene_mut() {
                    scene.bring_to_front(id);
                }
            }
            Edit::SendToBack { id } => {
                if let Some(scene) = self.scene_mut() {
                    scene.send_to_back(id);
                }
            }
            Edit::DuplicateDevice { id } => {
                outcome.created = self.scene_mut().and_then(|scene| scene.duplicate_entity(id));
            }
            Edit::Batch { edits } => {
                for edit in edits {
                    if let Some(created) = self.apply(edit).created {
                        outcome.created = Some(created);
                    }
                }
            }
        }
        outcome
    }

    fn enter_scene_mode(&mut self) {
        if let Composition::Single { device } = self.composition {
            let mut scene = SceneGraph::new();
            let mut seed = SceneEntity::new(device);
            if let DeviceKind::Screenshot { appearance } = &mut seed.kind {
                *appearance = self.device_style;
            }
            if let Err(e) = scene.insert_entity(seed) {
                tracing::warn!("Could not seed scene: {e}");
            }
            tracing::debug!("Entering scene mode with a {device:?}");
            self.composition = Composition::Scene { scene };
        }
    }

    fn scene_mut(&mut self) -> Option<&mut SceneGraph> {
        match &mut self.composition {
            Composition::Scene { scene } => Some(scene),
            Composition::Single { .. } => {
                tracing::debug!("Scene edit ignored in single-device mode");
                None
            }
        }
    }

    /// Media slots.
    #[must_use]
    pub fn media(&self) -> &[Option<MediaRef>; MEDIA_SLOTS] {
        &self.media
    }

    /// Authoritative composition.
    #[must_use]
    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Single-mode device type, `None` in scene mode.
    #[must_use]
    pub fn device(&self) -> Option<DeviceType> {
        match self.composition {
            Composition::Single { device } => Some(device),
            Composition::Scene { .. } => None,
        }
    }

    /// The scene graph, `None` in single-device mode.
    #[must_use]
    pub fn scene(&self) -> Option<&SceneGraph> {
        match &self.composition {
            Composition::Scene { scene } => Some(scene),
            Composition::Single { .. } => None,
        }
    }

    /// Background.
    #[must_use]
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Background effects.
    #[must_use]
    pub fn effects(&self) -> BackgroundEffects {
        self.effects
    }

    /// Device finish and edge.
    #[must_use]
    pub fn device_style(&self) -> DeviceAppearance {
        self.device_style
    }

    /// Border. Its kind is derived from the radius.
    #[must_use]
    pub fn border(&self) -> Border {
        self.border
    }

    /// Shadow.
    #[must_use]
    pub fn shadow(&self) -> &Shadow {
        &self.shadow
    }

    /// Decorative backdrop.
    #[must_use]
    pub fn backdrop(&self) -> SceneBackdrop {
        self.backdrop
    }

    /// Viewport camera.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Layout mode.
    #[must_use]
    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    /// Canvas size.
    #[must_use]
    pub fn canvas(&self) -> &CanvasSize {
        &self.canvas
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> MockupResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the scene holds duplicate ids.
    pub fn from_json(json: &str) -> MockupResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
