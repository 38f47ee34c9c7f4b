//! Tailor engine: the effectful half of the workbench. Owns the generation
//! service client, text-file acquisition, the preview spool, and artifact
//! writing, all driven from a dedicated thread behind channel endpoints.
mod artifact;
mod client;
mod engine;
mod preview;
mod read;
mod types;

pub use artifact::{
    ensure_output_dir, ArtifactWriter, PersistError, RESUME_PDF_FILENAME, RESUME_TEX_FILENAME,
};
pub use client::{
    ClientSettings, GenerateRequestBody, GenerateService, HealthStatus, HttpGenerateClient,
    GENERATE_PATH, HEALTH_PATH, MALFORMED_PREVIEW_REASON,
};
pub use engine::{EngineConfig, EngineHandle};
pub use preview::{PreviewError, PreviewHandle, PreviewManager, PreviewStore};
pub use read::{read_text_file, ReadError};
pub use types::{
    ArtifactFile, EngineEvent, GenerateError, GenerateFailureKind, GenerationOutput, InputSlot,
    LoadedText, PreviewField, UsageTotals,
};
