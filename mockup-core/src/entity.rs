//! Scene entities - the device instances placed on a multi-device canvas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::style::{DeviceAppearance, DeviceStyle};
use crate::transform::{Transform, TransformPatch};
use crate::{MockupError, MockupResult};

/// Unique identifier for a scene entity.
///
/// Ids are independent of position in the scene, so reordering or removing
/// other entities never invalidates a held id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Create a new unique entity ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an entity ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`MockupError::InvalidEntityId`] if the string is not a UUID.
    pub fn parse(s: &str) -> MockupResult<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| MockupError::InvalidEntityId(format!("{s}: {e}")))
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Device type tag, used to pick a factory and in single-device mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// Smartphone frame.
    #[default]
    Phone,
    /// Tablet frame.
    Tablet,
    /// Laptop frame.
    Laptop,
    /// Browser window chrome.
    Browser,
    /// Bare screenshot, no hardware frame.
    Screenshot,
}

impl DeviceType {
    /// All device types in menu order.
    pub const ALL: [Self; 5] = [
        Self::Phone,
        Self::Tablet,
        Self::Laptop,
        Self::Browser,
        Self::Screenshot,
    ];

    /// Parse a device type, falling back to [`DeviceType::Phone`] for unknown names.
    #[must_use]
    pub fn parse_or_default(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "phone" => Self::Phone,
            "tablet" => Self::Tablet,
            "laptop" => Self::Laptop,
            "browser" => Self::Browser,
            "screenshot" => Self::Screenshot,
            other => {
                tracing::debug!("Unknown device type {other:?}, using phone");
                Self::default()
            }
        }
    }
}

/// Browser chrome theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserMode {
    /// Light chrome.
    #[default]
    Light,
    /// Dark chrome.
    Dark,
}

/// Hardware color of a framed device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorVariant {
    /// Space black.
    #[default]
    Black,
    /// Silver.
    Silver,
    /// Gold.
    Gold,
    /// Deep blue.
    Blue,
}

/// Device content with the options that only apply to that device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeviceKind {
    /// Smartphone frame.
    Phone {
        /// Hardware color.
        color: ColorVariant,
    },
    /// Tablet frame.
    Tablet {
        /// Hardware color.
        color: ColorVariant,
    },
    /// Laptop frame.
    Laptop {
        /// Hardware color.
        color: ColorVariant,
    },
    /// Browser window.
    Browser {
        /// URL shown in the address bar.
        site_url: String,
        /// Chrome theme.
        mode: BrowserMode,
    },
    /// Bare screenshot.
    Screenshot {
        /// Finish and edge thickness.
        appearance: DeviceAppearance,
    },
}

impl DeviceKind {
    /// Default content for a freshly added device of `device_type`.
    #[must_use]
    pub fn default_for(device_type: DeviceType) -> Self {
        match device_type {
            DeviceType::Phone => Self::Phone {
                color: ColorVariant::Black,
            },
            DeviceType::Tablet => Self::Tablet {
                color: ColorVariant::Silver,
            },
            DeviceType::Laptop => Self::Laptop {
                color: ColorVariant::Silver,
            },
            DeviceType::Browser => Self::Browser {
                site_url: "example.com".to_string(),
                mode: BrowserMode::Light,
            },
            DeviceType::Screenshot => Self::Screenshot {
                appearance: DeviceAppearance {
                    style: DeviceStyle::Default,
                    edge: 0.0,
                },
            },
        }
    }

    /// The tag of this kind.
    #[must_use]
    pub const fn device_type(&self) -> DeviceType {
        match self {
            Self::Phone { .. } => DeviceType::Phone,
            Self::Tablet { .. } => DeviceType::Tablet,
            Self::Laptop { .. } => DeviceType::Laptop,
            Self::Browser { .. } => DeviceType::Browser,
            Self::Screenshot { .. } => DeviceType::Screenshot,
        }
    }

    /// Default scale, in percent, so devices of different sizes start comparable.
    #[must_use]
    pub const fn default_scale(device_type: DeviceType) -> f32 {
        match device_type {
            DeviceType::Phone => 100.0,
            DeviceType::Tablet => 80.0,
            DeviceType::Laptop | DeviceType::Browser => 60.0,
            DeviceType::Screenshot => 70.0,
        }
    }
}

/// One device instance on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntity {
    /// Unique identifier.
    pub id: EntityId,
    /// Device content.
    pub kind: DeviceKind,
    /// Placement.
    pub transform: Transform,
}

impl SceneEntity {
    /// Create an entity with per-type defaults and a fresh id.
    #[must_use]
    pub fn new(device_type: DeviceType) -> Self {
        Self {
            id: EntityId::new(),
            kind: DeviceKind::default_for(device_type),
            transform: Transform {
                scale: DeviceKind::default_scale(device_type),
                ..Transform::default()
            },
        }
    }

    /// Set the transform (clamped).
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform.clamped();
        self
    }

    /// The entity's device type.
    #[must_use]
    pub const fn device_type(&self) -> DeviceType {
        self.kind.device_type()
    }
}

/// Partial update for an entity. Device options that do not apply to the
/// entity's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityPatch {
    /// Placement changes.
    #[serde(default, flatten)]
    pub transform: TransformPatch,
    /// New hardware color (phone, tablet, laptop).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorVariant>,
    /// New address bar URL (browser).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    /// New chrome theme (browser).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_mode: Option<BrowserMode>,
    /// New finish (screenshot).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<DeviceStyle>,
    /// New edge thickness (screenshot).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<f32>,
}

impl EntityPatch {
    /// Patch that only changes placement.
    #[must_use]
    pub fn transform(transform: TransformPatch) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }

    /// Merge the patch into `entity`.
    pub fn apply_to(&self, entity: &mut SceneEntity) {
        self.transform.apply_to(&mut entity.transform);

        match &mut entity.kind {
            DeviceKind::Phone { color }
            | DeviceKind::Tablet { color }
            | DeviceKind::Laptop { color } => {
                if let Some(new_color) = self.color {
                    *color = new_color;
                }
            }
            DeviceKind::Browser { site_url, mode } => {
                if let Some(url) = &self.site_url {
                    site_url.clone_from(url);
                }
                if let Some(new_mode) = self.browser_mode {
                    *mode = new_mode;
                }
            }
            DeviceKind::Screenshot { appearance } => {
                if let Some(style) = self.style {
                    appearance.style = style;
                }
                if let Some(edge) = self.edge {
                    appearance.edge = edge;
                }
                *appearance = appearance.clamped();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_per_type() {
        for device_type in DeviceType::ALL {
            let entity = SceneEntity::new(device_type);
            assert_eq!(entity.device_type(), device_type);
        }
    }

    #[test]
    fn test_ids_unique() {
        let a = SceneEntity::new(DeviceType::Phone);
        let b = SceneEntity::new(DeviceType::Phone);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_id_parse_roundtrip() {
        let id = EntityId::new();
        let parsed = EntityId::parse(&id.to_string()).expect("should parse");
        assert_eq!(id, parsed);
        assert!(EntityId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_unknown_device_type_defaults() {
        assert_eq!(DeviceType::parse_or_default("Laptop"), DeviceType::Laptop);
        assert_eq!(DeviceType::parse_or_default("toaster"), DeviceType::Phone);
    }

    #[test]
    fn test_patch_ignores_mismatched_options() {
        let mut phone = SceneEntity::new(DeviceType::Phone);
        let patch = EntityPatch {
            site_url: Some("rust-lang.org".to_string()),
            color: Some(ColorVariant::Gold),
            ..EntityPatch::default()
        };
        patch.apply_to(&mut phone);

        assert_eq!(
            phone.kind,
            DeviceKind::Phone {
                color: ColorVariant::Gold
            }
        );
    }

    #[test]
    fn test_patch_browser_fields() {
        let mut browser = SceneEntity::new(DeviceType::Browser);
        let patch = EntityPatch {
            site_url: Some("rust-lang.org".to_string()),
            browser_mode: Some(BrowserMode::Dark),
            ..EntityPatch::default()
        };
        patch.apply_to(&mut browser);

        match browser.kind {
            DeviceKind::Browser { site_url, mode } => {
                assert_eq!(site_url, "rust-lang.org");
                assert_eq!(mode, BrowserMode::Dark);
            }
            other => panic!("Expected browser, got {other:?}"),
        }
    }

    #[test]
    fn test_patch_screenshot_edge_clamped() {
        let mut shot = SceneEntity::new(DeviceType::Screenshot);
        let patch = EntityPatch {
            style: Some(DeviceStyle::Liquid),
            edge: Some(500.0),
            ..EntityPatch::default()
        };
        patch.apply_to(&mut shot);

        match shot.kind {
            DeviceKind::Screenshot { appearance } => {
                assert_eq!(appearance.style, DeviceStyle::Liquid);
                assert!((appearance.edge - 64.0).abs() < f32::EPSILON);
            }
            other => panic!("Expected screenshot, got {other:?}"),
        }
    }

    #[test]
    fn test_patch_json_is_flat() {
        let patch: EntityPatch =
            serde_json::from_str(r#"{"x": 12.0, "rotation": 90.0, "site_url": "a.b"}"#)
                .expect("deserialization should work");
        assert_eq!(patch.transform.x, Some(12.0));
        assert_eq!(patch.transform.rotation, Some(90.0));
        assert_eq!(patch.site_url.as_deref(), Some("a.b"));
    }
}
