//! Read-only view of a document handed to renderers and exporters.

use serde::Serialize;

use crate::document::{Composition, DocumentState};
use crate::entity::{DeviceType, SceneEntity};
use crate::media::MediaRef;
use crate::resolution::CanvasSize;
use crate::style::{
    Background, BackgroundEffects, BorderKind, DeviceAppearance, SceneBackdrop, Shadow,
};

/// Resolved border as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderBorder {
    /// Corner radius.
    pub radius: f32,
    /// Derived category.
    pub kind: BorderKind,
}

/// Device content to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RenderComposition<'a> {
    /// Single device using the document-level styling.
    Single {
        /// Device type.
        device: DeviceType,
        /// Finish and edge.
        appearance: DeviceAppearance,
        /// Corner rounding.
        border: RenderBorder,
        /// Drop shadow.
        shadow: &'a Shadow,
        /// Filled media slots.
        media: Vec<&'a MediaRef>,
    },
    /// Scene entities in paint order.
    Scene {
        /// Entities, back to front.
        entities: Vec<&'a SceneEntity>,
    },
}

/// Everything a renderer needs, borrowed from the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot<'a> {
    /// Output dimensions.
    pub canvas: &'a CanvasSize,
    /// Background.
    pub background: &'a Background,
    /// Background effects.
    pub effects: BackgroundEffects,
    /// Decorative backdrop.
    pub backdrop: SceneBackdrop,
    /// Devices.
    pub composition: RenderComposition<'a>,
}

impl<'a> RenderSnapshot<'a> {
    /// Resolve a snapshot of `document`.
    #[must_use]
    pub fn of(document: &'a DocumentState) -> Self {
        let composition = match document.composition() {
            Composition::Single { device } => {
                let border = document.border();
                RenderComposition::Single {
                    device: *device,
                    appearance: document.device_style(),
                    border: RenderBorder {
                        radius: border.radius(),
                        kind: border.kind(),
                    },
                    shadow: document.shadow(),
                    media: document.media().iter().flatten().collect(),
                }
            }
            Composition::Scene { scene } => RenderComposition::Scene {
                entities: scene.paint_order(),
            },
        };

        Self {
            canvas: document.canvas(),
            background: document.background(),
            effects: document.effects(),
            backdrop: document.backdrop(),
            composition,
        }
    }

    /// Number of devices that will be drawn.
    #[must_use]
    pub fn device_count(&self) -> usize {
        match &self.composition {
            RenderComposition::Single { .. } => 1,
            RenderComposition::Scene { entities } => entities.len(),
        }
    }
}

/// A backend that turns snapshots into output.
pub trait Renderer {
    /// Rendered output (pixels, an encoded file, a display list).
    type Output;
    /// Rendering failure.
    type Error;

    /// Render a snapshot.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if rendering fails.
    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<Self::Output, Self::Error>;
}
