use std::path::PathBuf;

use crate::state::{Field, GenerationRequest, PreviewDocument};

/// Side effects requested by `update`; the shell executes them strictly in
/// list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read and decode a file as text, replying with `Msg::FileLoaded`.
    ReadTextFile {
        field: Field,
        ticket: u64,
        path: PathBuf,
    },
    /// Send the generation request, replying with `Msg::GenerationCompleted`.
    DispatchGeneration { request: GenerationRequest },
    /// Release the live renderable preview handle, if any.
    RevokePreview,
    /// Construct a renderable handle for a freshly decoded preview. The
    /// executor releases any live handle first (revoke-then-create).
    PresentPreview { document: PreviewDocument },
    /// Write the text to the system clipboard, replying with
    /// `Msg::CopyCompleted`.
    CopyText { text: String },
    /// Fire `Msg::CopyAckExpired { serial }` after `COPY_ACK_RESET`.
    ScheduleAckReset { serial: u64 },
    /// Write `optimized_resume.tex`, replying with `Msg::ArtifactSaved`.
    SaveTextArtifact { contents: String },
    /// Write `optimized_resume.pdf`, replying with `Msg::ArtifactSaved`.
    SavePreviewArtifact { document: PreviewDocument },
}
