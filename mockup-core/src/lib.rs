//! # Saorsa Mockup Core
//!
//! Editable document engine for device mockups.
//! Compiles to WASM for the web editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              mockup-core.wasm               │
//! ├─────────────────────────────────────────────┤
//! │  Editor          │  History                 │
//! │  - Commits       │  - Bounded linear log    │
//! │  - Gestures      │  - Undo / redo           │
//! ├─────────────────────────────────────────────┤
//! │  Document        │  Scene Graph             │
//! │  - Edit reducer  │  - Device entities       │
//! │  - Styling       │  - Transforms, z-order   │
//! │  - Resolution    │  - Paint order           │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod editor;
pub mod entity;
pub mod error;
pub mod history;
pub mod media;
pub mod render;
pub mod resolution;
pub mod scene;
pub mod style;
pub mod transform;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use document::{Composition, DocumentState, Edit, EditOutcome, LayoutMode, Update, Viewport};
pub use editor::Editor;
pub use entity::{
    BrowserMode, ColorVariant, DeviceKind, DeviceType, EntityId, EntityPatch, SceneEntity,
};
pub use error::{MockupError, MockupResult};
pub use history::History;
pub use media::{DataUrlIngest, MediaIngest, MediaRef};
pub use render::{RenderBorder, RenderComposition, RenderSnapshot, Renderer};
pub use resolution::{CanvasSize, ResolutionPreset};
pub use scene::SceneGraph;
pub use style::{
    Background, BackgroundEffects, Border, BorderKind, CustomShadow, DeviceAppearance,
    DeviceStyle, SceneBackdrop, Shadow, ShadowKind,
};
pub use transform::{Transform, TransformPatch};

/// Mockup core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
