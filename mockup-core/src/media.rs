//! Opaque media references and the ingestion boundary.
//!
//! The document never decodes images. Uploads are turned into a [`MediaRef`]
//! by a [`MediaIngest`] implementation before they reach a setter.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Number of media slots in a document.
pub const MEDIA_SLOTS: usize = 4;

/// Opaque, stable reference to an ingested image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(String);

impl MediaRef {
    /// Wrap an existing reference string.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Borrow the reference string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MediaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Data URLs can be megabytes long.
        const MAX_SHOWN: usize = 48;
        match self.0.char_indices().nth(MAX_SHOWN) {
            Some((cut, _)) => write!(f, "{}...", &self.0[..cut]),
            None => f.write_str(&self.0),
        }
    }
}

/// Turns raw uploaded bytes into a [`MediaRef`].
pub trait MediaIngest {
    /// Ingest `bytes` of the given MIME type.
    fn ingest(&mut self, bytes: &[u8], mime: &str) -> MediaRef;
}

/// Ingests media as `data:` URLs. Identical input yields identical references.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlIngest;

impl MediaIngest for DataUrlIngest {
    fn ingest(&mut self, bytes: &[u8], mime: &str) -> MediaRef {
        let mime = if mime.is_empty() {
            "application/octet-stream"
        } else {
            mime
        };
        tracing::debug!("Ingesting {} bytes as {mime}", bytes.len());
        MediaRef(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }
}
