use std::path::PathBuf;

use crate::state::{ArtifactKind, Field, PreviewDocument, UsageStats};

/// Successfully decoded contents of a loaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub name: String,
    pub contents: String,
}

/// A file could not be read or decoded as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReadFailure {
    pub message: String,
}

/// The clipboard write failed; the outcome is not affected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardFailure {
    pub message: String,
}

/// Preview facet of a completed generation as decoded at the wire boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewPayload {
    /// No preview and no preview error in the response.
    Absent,
    /// Decoded preview bytes.
    Document(PreviewDocument),
    /// Service-reported preview failure, or a malformed encoded payload.
    Error(String),
}

/// Text and preview facets of a successful generation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSuccess {
    pub resume_text: String,
    pub preview: PreviewPayload,
    pub usage: Option<UsageStats>,
}

/// The request failed outright; `message` is already user-facing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited a field directly.
    FieldEdited { field: Field, value: String },
    /// User picked a file to load into a field.
    FileLoadRequested { field: Field, path: PathBuf },
    /// A file read finished; stale tickets are dropped.
    FileLoaded {
        field: Field,
        ticket: u64,
        result: Result<LoadedFile, FileReadFailure>,
    },
    /// User triggered generation.
    GenerateClicked,
    /// The in-flight request settled.
    GenerationCompleted {
        result: Result<GenerationSuccess, GenerationFailure>,
    },
    /// User asked to copy the generated text.
    CopyRequested,
    /// The clipboard write settled.
    CopyCompleted {
        result: Result<(), ClipboardFailure>,
    },
    /// Scheduled reversion of the copy acknowledgment.
    CopyAckExpired { serial: u64 },
    /// User asked to download the generated LaTeX text.
    DownloadTextRequested,
    /// User asked to download the preview document.
    DownloadPreviewRequested,
    /// An artifact write settled.
    ArtifactSaved {
        artifact: ArtifactKind,
        result: Result<PathBuf, String>,
    },
    ZoomIn,
    ZoomOut,
    ZoomReset,
    /// Fallback for placeholder wiring.
    NoOp,
}
