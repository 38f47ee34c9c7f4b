use crate::state::{SaveStatus, UsageStats};

/// Coarse phase of the most recent attempt, for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutcomePhase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Render-ready projection of one input field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldView {
    pub value: String,
    pub source_name: Option<String>,
    pub read_error: Option<String>,
}

/// Preview pane contents, present only while the outcome is `Succeeded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewPane {
    Absent,
    Ready { byte_len: usize, zoom_percent: u16 },
    Unavailable { reason: String },
}

/// Result pane contents, present only while the outcome is `Succeeded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub resume_text: String,
    pub copy_acknowledged: bool,
    pub clipboard_error: Option<String>,
    pub usage: Option<UsageStats>,
    pub preview: PreviewPane,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: OutcomePhase,
    pub job_description: FieldView,
    pub resume: FieldView,
    pub template: FieldView,
    /// False only while a request is in flight.
    pub generate_enabled: bool,
    /// The `Failed` message, when the whole attempt failed.
    pub error_banner: Option<String>,
    pub result: Option<ResultView>,
    pub save_status: Option<SaveStatus>,
    pub dirty: bool,
}
