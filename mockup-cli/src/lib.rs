//! # Saorsa Mockup CLI
//!
//! Command-line host for the mockup document engine.
//!
//! Replays a JSON edit script against a fresh editing session and prints the
//! resolved render snapshot, which is what an exporter would consume.
//!
//! ## Usage
//!
//! ```bash
//! mockup --script edits.json --resolution ig-square --pretty
//! ```
//!
//! ## Script format
//!
//! A JSON array of steps:
//!
//! ```json
//! [
//!   {"commit": {"op": "set_layout", "layout": "double"}},
//!   {"immediate": {"op": "pan", "x": 10.0, "y": 4.0}},
//!   "commit_history",
//!   "undo"
//! ]
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::{Path, PathBuf};

use clap::Parser;
use mockup_core::history::DEFAULT_CAPACITY;
use mockup_core::media::MEDIA_SLOTS;
use mockup_core::{DataUrlIngest, DocumentState, Edit, Editor, MediaIngest, RenderSnapshot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Command-line arguments for the mockup CLI.
#[derive(Debug, Clone, Parser)]
#[command(name = "mockup")]
#[command(about = "Replay mockup edit scripts and print the render snapshot")]
#[command(version)]
pub struct CliArgs {
    /// Path to a JSON edit script
    #[arg(long, env = "MOCKUP_SCRIPT")]
    pub script: Option<PathBuf>,

    /// Initial resolution preset
    #[arg(long, env = "MOCKUP_RESOLUTION", default_value = "hd-720p")]
    pub resolution: String,

    /// Images to place in the media slots, in order
    #[arg(long = "media", num_args = 1..)]
    pub media: Vec<PathBuf>,

    /// Number of undo steps to keep
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub history: usize,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

/// Replay configuration.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Resolution preset applied to the starting document.
    pub resolution: String,
    /// Image files loaded into the media slots.
    pub media: Vec<PathBuf>,
    /// History capacity.
    pub history: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            resolution: mockup_core::resolution::DEFAULT_RESOLUTION.to_string(),
            media: Vec::new(),
            history: DEFAULT_CAPACITY,
        }
    }
}

impl From<&CliArgs> for ReplayConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            resolution: args.resolution.clone(),
            media: args.media.clone(),
            history: args.history,
        }
    }
}

/// Errors that can occur while loading inputs.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The script is not valid JSON or has unknown steps.
    #[error("invalid edit script: {0}")]
    Script(#[from] serde_json::Error),
    /// More media files than slots.
    #[error("too many media files: {0} (max {max})", max = MEDIA_SLOTS)]
    TooManyMedia(usize),
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Apply an edit and record history.
    Commit(Edit),
    /// Apply an edit without recording history.
    Immediate(Edit),
    /// Record the live document (end of a gesture).
    CommitHistory,
    /// Undo one step.
    Undo,
    /// Redo one step.
    Redo,
    /// Start over from the starting document.
    NewDocument,
}

/// Summary printed after a replay.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Stored history entries.
    pub history_len: usize,
    /// Current history index.
    pub history_index: usize,
    /// Whether undo is available.
    pub can_undo: bool,
    /// Whether redo is available.
    pub can_redo: bool,
    /// Whether immediate edits were left uncommitted.
    pub uncommitted: bool,
    /// What a renderer would draw.
    pub snapshot: RenderSnapshot<'a>,
}

impl<'a> Report<'a> {
    /// Summarize an editor.
    #[must_use]
    pub fn of(editor: &'a Editor) -> Self {
        Self {
            history_len: editor.history_len(),
            history_index: editor.history_index(),
            can_undo: editor.can_undo(),
            can_redo: editor.can_redo(),
            uncommitted: editor.has_uncommitted_changes(),
            snapshot: editor.render_snapshot(),
        }
    }
}

fn read(path: &Path) -> Result<Vec<u8>, ReplayError> {
    std::fs::read(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a script from JSON text.
///
/// # Errors
///
/// Returns [`ReplayError::Script`] if the text is not a valid script.
pub fn parse_script(json: &str) -> Result<Vec<Step>, ReplayError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a script file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_script(path: &Path) -> Result<Vec<Step>, ReplayError> {
    let bytes = read(path)?;
    let steps: Vec<Step> = serde_json::from_slice(&bytes)?;
    tracing::debug!("Loaded {} steps from {}", steps.len(), path.display());
    Ok(steps)
}

/// Guess an image MIME type from a file extension.
#[must_use]
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Build the starting document for a replay.
///
/// The starting document is the session's first history entry, so loading
/// media or a resolution here cannot be undone.
///
/// # Errors
///
/// Returns an error if a media file cannot be read or there are too many.
pub fn initial_document(config: &ReplayConfig) -> Result<DocumentState, ReplayError> {
    if config.media.len() > MEDIA_SLOTS {
        return Err(ReplayError::TooManyMedia(config.media.len()));
    }

    let mut document = DocumentState::new();
    document.apply(Edit::SetResolution {
        id: config.resolution.clone(),
    });

    let mut ingest = DataUrlIngest;
    for (slot, path) in config.media.iter().enumerate() {
        let bytes = read(path)?;
        let media = ingest.ingest(&bytes, mime_for(path));
        tracing::info!("Media slot {slot}: {} ({})", path.display(), media);
        document.apply(Edit::SetMedia {
            slot,
            media: Some(media),
        });
    }
    Ok(document)
}

/// Run `steps` against a session started from `document`.
///
/// A `new_document` step starts over from `document`, so the configured
/// resolution and media survive it.
#[must_use]
pub fn replay(document: DocumentState, history: usize, steps: Vec<Step>) -> Editor {
    let mut editor = Editor::with_document(document.clone(), history);
    for (i, step) in steps.into_iter().enumerate() {
        tracing::debug!("Step {i}: {step:?}");
        match step {
            Step::Commit(edit) => {
                if let Some(id) = editor.commit(edit).created {
                    tracing::info!("Step {i} created device {id}");
                }
            }
            Step::Immediate(edit) => {
                editor.apply_immediate(edit);
            }
            Step::CommitHistory => editor.commit_history(),
            Step::Undo => {
                editor.undo();
            }
            Step::Redo => {
                editor.redo();
            }
            Step::NewDocument => editor.new_document_from(document.clone()),
        }
    }
    if editor.has_uncommitted_changes() {
        tracing::warn!("Script ended with uncommitted immediate edits");
    }
    editor
}
