use std::fmt;
use std::path::PathBuf;

use crate::client::HealthStatus;
use crate::read::ReadError;

/// Which input field a file read belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSlot {
    JobDescription,
    Resume,
    Template,
}

/// Decoded contents of a loaded file plus its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedText {
    pub name: String,
    pub contents: String,
}

/// Preview facet of a generation response after wire decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewField {
    /// Neither a payload nor a preview error was present.
    Absent,
    /// Decoded preview bytes.
    Document(Vec<u8>),
    /// Service-reported preview failure, or an undecodable payload.
    Error(String),
}

/// Token accounting the service reports for a successful generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageTotals {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A successful generation response, fully decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutput {
    pub resume_text: String,
    pub preview: PreviewField,
    pub usage: Option<UsageTotals>,
}

/// The two artifact files the engine can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFile {
    ResumeTex,
    ResumePdf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateError {
    pub kind: GenerateFailureKind,
    pub message: String,
}

impl GenerateError {
    pub(crate) fn new(kind: GenerateFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateFailureKind {
    Timeout,
    Network,
    HttpStatus(u16),
    MalformedResponse,
}

impl fmt::Display for GenerateFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateFailureKind::Timeout => write!(f, "timeout"),
            GenerateFailureKind::Network => write!(f, "network error"),
            GenerateFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            GenerateFailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The in-flight generation request settled.
    GenerationSettled {
        result: Result<GenerationOutput, GenerateError>,
    },
    /// A requested file read finished.
    FileRead {
        slot: InputSlot,
        ticket: u64,
        result: Result<LoadedText, ReadError>,
    },
    /// An artifact write finished.
    ArtifactWritten {
        artifact: ArtifactFile,
        result: Result<PathBuf, String>,
    },
    /// The startup connectivity probe settled.
    HealthChecked {
        result: Result<HealthStatus, GenerateError>,
    },
}
