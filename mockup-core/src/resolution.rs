//! Named export resolutions and the canvas size they produce.

use serde::{Deserialize, Serialize};

/// Preset used when an id is unknown.
pub const DEFAULT_RESOLUTION: &str = "hd-720p";

/// A named output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolutionPreset {
    /// Stable identifier.
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

const PRESETS: &[ResolutionPreset] = &[
    ResolutionPreset {
        id: "hd-720p",
        label: "HD 720p",
        width: 1280,
        height: 720,
    },
    ResolutionPreset {
        id: "hd-1080p",
        label: "Full HD 1080p",
        width: 1920,
        height: 1080,
    },
    ResolutionPreset {
        id: "qhd-1440p",
        label: "QHD 1440p",
        width: 2560,
        height: 1440,
    },
    ResolutionPreset {
        id: "uhd-4k",
        label: "4K UHD",
        width: 3840,
        height: 2160,
    },
    ResolutionPreset {
        id: "ig-square",
        label: "Instagram Square",
        width: 1080,
        height: 1080,
    },
    ResolutionPreset {
        id: "ig-portrait",
        label: "Instagram Portrait",
        width: 1080,
        height: 1350,
    },
    ResolutionPreset {
        id: "story-1080x1920",
        label: "Story",
        width: 1080,
        height: 1920,
    },
    ResolutionPreset {
        id: "twitter-post",
        label: "Twitter Post",
        width: 1600,
        height: 900,
    },
    ResolutionPreset {
        id: "dribbble",
        label: "Dribbble Shot",
        width: 1600,
        height: 1200,
    },
];

/// Explicit canvas dimensions and the preset they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Originating preset id.
    pub resolution: String,
}

impl Default for CanvasSize {
    fn default() -> Self {
        resolve(DEFAULT_RESOLUTION)
    }
}

impl CanvasSize {
    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)] // pixel sizes are far below 2^24
        let ratio = self.width as f32 / self.height.max(1) as f32;
        ratio
    }
}

/// All presets in display order.
#[must_use]
pub fn presets() -> &'static [ResolutionPreset] {
    PRESETS
}

/// Look up a preset by id.
#[must_use]
pub fn lookup(id: &str) -> Option<&'static ResolutionPreset> {
    PRESETS.iter().find(|p| p.id == id)
}

/// Resolve a preset id to a canvas size, falling back to the 720p default.
#[must_use]
pub fn resolve(id: &str) -> CanvasSize {
    let preset = lookup(id).unwrap_or_else(|| {
        tracing::debug!("Unknown resolution {id:?}, using {DEFAULT_RESOLUTION}");
        &PRESETS[0]
    });
    CanvasSize {
        width: preset.width,
        height: preset.height,
        resolution: preset.id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known() {
        let size = resolve("hd-1080p");
        assert_eq!((size.width, size.height), (1920, 1080));
        assert_eq!(size.resolution, "hd-1080p");

        let story = resolve("story-1080x1920");
        assert_eq!((story.width, story.height), (1080, 1920));
    }

    #[test]
    fn test_resolve_fallback() {
        let size = resolve("nonexistent-id");
        assert_eq!((size.width, size.height), (1280, 720));
        assert_eq!(size.resolution, DEFAULT_RESOLUTION);
    }

    #[test]
    fn test_default_is_first_preset() {
        assert_eq!(presets()[0].id, DEFAULT_RESOLUTION);
        assert_eq!(CanvasSize::default(), resolve(DEFAULT_RESOLUTION));
    }

    #[test]
    fn test_ids_unique() {
        for (i, a) in presets().iter().enumerate() {
            assert!(presets()[i + 1..].iter().all(|b| b.id != a.id));
        }
    }

    #[test]
    fn test_aspect_ratio() {
        assert!((resolve("ig-square").aspect_ratio() - 1.0).abs() < f32::EPSILON);
    }
}
