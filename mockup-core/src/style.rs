//! Presentation parameters: background, device finish, border, shadow.
//!
//! Catalog identifiers (gradient names, textures) are opaque strings here;
//! the renderer owns the catalogs.

use serde::{Deserialize, Serialize};

use crate::media::MediaRef;
use crate::transform::clamp_or;

/// Maximum background noise intensity.
pub const MAX_NOISE: f32 = 100.0;
/// Maximum background blur radius.
pub const MAX_BLUR: f32 = 20.0;
/// Maximum device edge thickness.
pub const MAX_EDGE: f32 = 64.0;
/// Maximum border radius.
pub const MAX_BORDER_RADIUS: f32 = 40.0;
/// Radii at or below this are sharp.
pub const SHARP_MAX_RADIUS: f32 = 10.0;
/// Radii at or below this (and above sharp) are curved.
pub const CURVED_MAX_RADIUS: f32 = 30.0;
/// Maximum opacity, in percent.
pub const MAX_OPACITY: f32 = 100.0;
/// Custom shadow offset limit, applied symmetrically.
pub const MAX_SHADOW_OFFSET: f32 = 100.0;
/// Maximum custom shadow blur and spread.
pub const MAX_SHADOW_EXTENT: f32 = 100.0;

/// Canvas background. Each variant carries only the payload it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Background {
    /// Flat color (CSS color string).
    Solid(String),
    /// Linear gradient preset id.
    LinearGradient(String),
    /// Radial gradient preset id.
    RadialGradient(String),
    /// Cosmic backdrop preset id.
    Cosmic(String),
    /// Texture preset id.
    Texture(String),
    /// Uploaded image.
    Image(MediaRef),
    /// No background.
    Transparent,
}

impl Default for Background {
    fn default() -> Self {
        Self::LinearGradient("sunset".to_string())
    }
}

/// Effects layered over any background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "EffectLevels")]
pub struct BackgroundEffects {
    /// Noise intensity (0-100).
    pub noise: f32,
    /// Blur radius (0-20).
    pub blur: f32,
}

/// Stored effect levels, clamped on load.
#[derive(Deserialize)]
struct EffectLevels {
    noise: f32,
    blur: f32,
}

impl From<EffectLevels> for BackgroundEffects {
    fn from(levels: EffectLevels) -> Self {
        Self {
            noise: levels.noise,
            blur: levels.blur,
        }
        .clamped()
    }
}

impl Default for BackgroundEffects {
    fn default() -> Self {
        Self {
            noise: 0.0,
            blur: 0.0,
        }
    }
}

impl BackgroundEffects {
    /// Clamp both parameters to their ranges.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            noise: clamp_or(self.noise, 0.0, MAX_NOISE, 0.0),
            blur: clamp_or(self.blur, 0.0, MAX_BLUR, 0.0),
        }
    }
}

/// Finish applied to device frames and screenshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceStyle {
    /// Plain frame.
    #[default]
    Default,
    /// Frosted light glass.
    GlassLight,
    /// Frosted dark glass.
    GlassDark,
    /// Liquid glass.
    Liquid,
}

/// Device finish plus edge thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceAppearance {
    /// Finish.
    pub style: DeviceStyle,
    /// Edge thickness in pixels (0-64).
    pub edge: f32,
}

impl Default for DeviceAppearance {
    fn default() -> Self {
        Self {
            style: DeviceStyle::Default,
            edge: 12.0,
        }
    }
}

impl DeviceAppearance {
    /// Clamp the edge thickness.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            style: self.style,
            edge: clamp_or(self.edge, 0.0, MAX_EDGE, 0.0),
        }
    }
}

/// Border category, derived from the radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderKind {
    /// Radius up to 10.
    Sharp,
    /// Radius up to 30.
    Curved,
    /// Radius above 30.
    Round,
}

impl BorderKind {
    /// Radius written by the preset button for this kind.
    #[must_use]
    pub const fn preset_radius(self) -> f32 {
        match self {
            Self::Sharp => 0.0,
            Self::Curved => 20.0,
            Self::Round => MAX_BORDER_RADIUS,
        }
    }
}

/// Corner rounding. The radius is stored; the kind is always derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BorderRadius")]
pub struct Border {
    radius: f32,
}

#[derive(Deserialize)]
struct BorderRadius {
    radius: f32,
}

impl From<BorderRadius> for Border {
    fn from(stored: BorderRadius) -> Self {
        Self::with_radius(stored.radius)
    }
}

impl Default for Border {
    fn default() -> Self {
        Self::preset(BorderKind::Curved)
    }
}

impl Border {
    /// Border with the given radius, clamped to 0-40.
    #[must_use]
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius: clamp_or(radius, 0.0, MAX_BORDER_RADIUS, 0.0),
        }
    }

    /// Border produced by a preset button.
    #[must_use]
    pub fn preset(kind: BorderKind) -> Self {
        Self::with_radius(kind.preset_radius())
    }

    /// Corner radius.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Category derived from the radius.
    #[must_use]
    pub fn kind(&self) -> BorderKind {
        if self.radius <= SHARP_MAX_RADIUS {
            BorderKind::Sharp
        } else if self.radius <= CURVED_MAX_RADIUS {
            BorderKind::Curved
        } else {
            BorderKind::Round
        }
    }
}

/// Preset shadow shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowKind {
    /// No shadow.
    None,
    /// Wide soft shadow.
    #[default]
    Spread,
    /// Tight shadow hugging the device.
    Hug,
    /// Shadow tinted by the screenshot.
    Adaptive,
}

/// Fully custom drop shadow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomShadow {
    /// Horizontal offset (-100..100).
    pub offset_x: f32,
    /// Vertical offset (-100..100).
    pub offset_y: f32,
    /// Blur radius (0-100).
    pub blur: f32,
    /// Spread (0-100).
    pub spread: f32,
    /// Opacity in percent (0-100).
    pub opacity: f32,
    /// CSS color string.
    pub color: String,
}

impl Default for CustomShadow {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 20.0,
            blur: 40.0,
            spread: 0.0,
            opacity: 30.0,
            color: "#000000".to_string(),
        }
    }
}

impl CustomShadow {
    /// Clamp every scalar to its range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            offset_x: clamp_or(self.offset_x, -MAX_SHADOW_OFFSET, MAX_SHADOW_OFFSET, 0.0),
            offset_y: clamp_or(self.offset_y, -MAX_SHADOW_OFFSET, MAX_SHADOW_OFFSET, 0.0),
            blur: clamp_or(self.blur, 0.0, MAX_SHADOW_EXTENT, 0.0),
            spread: clamp_or(self.spread, 0.0, MAX_SHADOW_EXTENT, 0.0),
            opacity: clamp_or(self.opacity, 0.0, MAX_OPACITY, 0.0),
            color: self.color,
        }
    }
}

/// Device drop shadow, either a preset or fully custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Shadow {
    /// One of the preset shapes.
    Presets {
        /// Shape.
        kind: ShadowKind,
        /// Opacity in percent (0-100).
        opacity: f32,
    },
    /// Custom parameters.
    Custom(CustomShadow),
}

impl Default for Shadow {
    fn default() -> Self {
        Self::Presets {
            kind: ShadowKind::Spread,
            opacity: 50.0,
        }
    }
}

impl Shadow {
    /// Clamp every scalar to its range.
    #[must_use]
    pub fn clamped(self) -> Self {
        match self {
            Self::Presets { kind, opacity } => Self::Presets {
                kind,
                opacity: clamp_or(opacity, 0.0, MAX_OPACITY, 0.0),
            },
            Self::Custom(custom) => Self::Custom(custom.clamped()),
        }
    }

    /// Whether the shadow draws anything.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        match self {
            Self::Presets { kind, opacity } => *kind != ShadowKind::None && *opacity > 0.0,
            Self::Custom(custom) => custom.opacity > 0.0,
        }
    }
}

/// Decorative layer drawn behind the devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneBackdrop {
    /// Nothing.
    #[default]
    None,
    /// Floor shadow.
    Shadow,
    /// Floating shapes.
    Shapes,
}
