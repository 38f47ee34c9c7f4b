//! Tailor core: pure generation-workflow state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{
    ClipboardFailure, FileReadFailure, GenerationFailure, GenerationSuccess, LoadedFile, Msg,
    PreviewPayload,
};
pub use state::{
    AppState, ArtifactKind, Field, GenerationOutcome, GenerationRequest, InputField,
    PreviewDocument, PreviewOutcome, SaveStatus, UsageStats, ZoomPercent, COPY_ACK_RESET,
    MISSING_INPUT_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, FieldView, OutcomePhase, PreviewPane, ResultView};
