//! Placement of a scene entity on the canvas.

use serde::{Deserialize, Serialize};

/// Smallest allowed scale, in percent.
pub const MIN_SCALE: f32 = 30.0;
/// Largest allowed scale, in percent.
pub const MAX_SCALE: f32 = 400.0;
/// Rotation limit in degrees, applied symmetrically.
pub const MAX_ROTATION: f32 = 45.0;
/// Lowest z-index.
pub const MIN_Z_INDEX: i32 = 1;
/// Highest z-index.
pub const MAX_Z_INDEX: i32 = 10;

/// Clamp `value` into `[min, max]`, mapping NaN to `fallback`.
pub(crate) fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// Position, scale, rotation and depth of one scene entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// X offset from the canvas centre, in pixels.
    pub x: f32,
    /// Y offset from the canvas centre, in pixels.
    pub y: f32,
    /// Scale in percent (30-400).
    pub scale: f32,
    /// Rotation in degrees (-45..45).
    pub rotation: f32,
    /// Depth order (1-10). Higher paints later.
    pub z_index: i32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 100.0,
            rotation: 0.0,
            z_index: MIN_Z_INDEX,
        }
    }
}

impl Transform {
    /// Create a transform at the given position with default scale and rotation.
    #[must_use]
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Return this transform with every bounded field clamped to its range.
    #[must_use]
    pub fn clamped(self) -> Self {
        let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self {
            x: finite(self.x),
            y: finite(self.y),
            scale: clamp_or(self.scale, MIN_SCALE, MAX_SCALE, 100.0),
            rotation: clamp_or(self.rotation, -MAX_ROTATION, MAX_ROTATION, 0.0),
            z_index: self.z_index.clamp(MIN_Z_INDEX, MAX_Z_INDEX),
        }
    }
}

/// Partial transform update. `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformPatch {
    /// New X position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// New Y position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// New scale in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    /// New rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    /// New z-index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl TransformPatch {
    /// Patch that moves to the given position.
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that only sets the z-index.
    #[must_use]
    pub fn z_index(z_index: i32) -> Self {
        Self {
            z_index: Some(z_index),
            ..Self::default()
        }
    }

    /// Check whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the patch into `transform`, then clamp.
    pub fn apply_to(&self, transform: &mut Transform) {
        if let Some(x) = self.x {
            transform.x = x;
        }
        if let Some(y) = self.y {
            transform.y = y;
        }
        if let Some(scale) = self.scale {
            transform.scale = scale;
        }
        if let Some(rotation) = self.rotation {
            transform.rotation = rotation;
        }
        if let Some(z_index) = self.z_index {
            transform.z_index = z_index;
        }
        *transform = transform.clamped();
    }
}
