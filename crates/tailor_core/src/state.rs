use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::view_model::{AppViewModel, FieldView, OutcomePhase, PreviewPane, ResultView};

/// Shown when submission is attempted with a blank job description or resume.
pub const MISSING_INPUT_MESSAGE: &str = "Please fill in both job description and resume";

/// How long the copy acknowledgment stays visible before reverting.
pub const COPY_ACK_RESET: Duration = Duration::from_secs(2);

/// The three editable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    JobDescription,
    Resume,
    Template,
}

impl Field {
    /// Advisory file-picker extension hints; not content validators.
    pub fn extension_hints(self) -> &'static [&'static str] {
        match self {
            Field::JobDescription | Field::Resume => &["txt", "pdf", "doc", "docx"],
            Field::Template => &["txt", "tex"],
        }
    }
}

/// One editable text field plus its provenance.
///
/// `source_name` is set when the value was populated from a file and cleared
/// on any direct edit. `read_ticket` identifies the most recent outstanding
/// file read; completions carrying an older ticket are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputField {
    pub value: String,
    pub source_name: Option<String>,
    pub read_error: Option<String>,
    read_ticket: u64,
}

impl InputField {
    pub(crate) fn edit(&mut self, value: String) {
        self.value = value;
        self.source_name = None;
        self.read_error = None;
    }

    pub(crate) fn issue_read_ticket(&mut self) -> u64 {
        self.read_ticket += 1;
        self.read_ticket
    }

    pub(crate) fn is_current_ticket(&self, ticket: u64) -> bool {
        self.read_ticket == ticket
    }
}

/// Decoded binary preview returned alongside the textual result.
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewDocument(Vec<u8>);

impl PreviewDocument {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for PreviewDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PreviewDocument({} bytes)", self.0.len())
    }
}

/// Preview zoom as an integer percentage, clamped to [50, 200] in steps of 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomPercent(u16);

impl ZoomPercent {
    pub const MIN: u16 = 50;
    pub const MAX: u16 = 200;
    pub const STEP: u16 = 10;
    pub const DEFAULT: u16 = 100;

    pub fn percent(self) -> u16 {
        self.0
    }

    pub(crate) fn zoom_in(self) -> Self {
        Self((self.0 + Self::STEP).min(Self::MAX))
    }

    pub(crate) fn zoom_out(self) -> Self {
        Self(self.0.saturating_sub(Self::STEP).max(Self::MIN))
    }
}

impl Default for ZoomPercent {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Token accounting reported by the service for a successful generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageStats {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Preview facet of a successful generation, independent of the text facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// Service returned neither a preview nor a preview error.
    Absent,
    /// Decoded preview document, with the zoom that exists only in this state.
    Available {
        document: PreviewDocument,
        zoom: ZoomPercent,
    },
    /// The preview could not be produced; the text result is still usable.
    Unavailable { reason: String },
}

/// Single source of truth for the most recent generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationOutcome {
    #[default]
    Idle,
    Pending,
    Succeeded {
        resume_text: String,
        preview: PreviewOutcome,
        usage: Option<UsageStats>,
    },
    Failed {
        message: String,
    },
}

impl GenerationOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, GenerationOutcome::Pending)
    }

    pub(crate) fn has_live_preview(&self) -> bool {
        matches!(
            self,
            GenerationOutcome::Succeeded {
                preview: PreviewOutcome::Available { .. },
                ..
            }
        )
    }
}

/// Immutable payload built from the current field values at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub job_description: String,
    pub resume: String,
    /// `None` when the template field is blank; the wire encoding then omits
    /// the key entirely.
    pub template: Option<String>,
}

/// Which downloadable artifact a save refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    LatexResume,
    PreviewPdf,
}

/// Result of the most recent artifact save, surfaced inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveStatus {
    pub artifact: ArtifactKind,
    pub outcome: Result<PathBuf, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    job_description: InputField,
    resume: InputField,
    template: InputField,
    outcome: GenerationOutcome,
    copy_acknowledged: bool,
    copy_ack_serial: u64,
    clipboard_error: Option<String>,
    save_status: Option<SaveStatus>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self) -> &GenerationOutcome {
        &self.outcome
    }

    pub fn field(&self, field: Field) -> &InputField {
        match field {
            Field::JobDescription => &self.job_description,
            Field::Resume => &self.resume,
            Field::Template => &self.template,
        }
    }

    pub(crate) fn field_mut(&mut self, field: Field) -> &mut InputField {
        match field {
            Field::JobDescription => &mut self.job_description,
            Field::Resume => &mut self.resume,
            Field::Template => &mut self.template,
        }
    }

    pub(crate) fn outcome_mut(&mut self) -> &mut GenerationOutcome {
        &mut self.outcome
    }

    /// Replaces the outcome wholesale; the controller is the only caller.
    pub(crate) fn set_outcome(&mut self, outcome: GenerationOutcome) {
        self.outcome = outcome;
        self.mark_dirty();
    }

    /// Synchronous start of a new attempt: previous result, acknowledgment,
    /// inline clipboard error and save status are all cleared before any
    /// effect runs.
    pub(crate) fn begin_attempt(&mut self) {
        self.outcome = GenerationOutcome::Pending;
        self.copy_acknowledged = false;
        self.clipboard_error = None;
        self.save_status = None;
        self.mark_dirty();
    }

    pub(crate) fn acknowledge_copy(&mut self) -> u64 {
        self.copy_ack_serial += 1;
        self.copy_acknowledged = true;
        self.clipboard_error = None;
        self.mark_dirty();
        self.copy_ack_serial
    }

    pub(crate) fn expire_copy_ack(&mut self, serial: u64) {
        if serial == self.copy_ack_serial && self.copy_acknowledged {
            self.copy_acknowledged = false;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_clipboard_error(&mut self, message: String) {
        self.clipboard_error = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn set_save_status(&mut self, status: SaveStatus) {
        self.save_status = Some(status);
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns the dirty flag and clears it; the shell renders when true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let phase = match &self.outcome {
            GenerationOutcome::Idle => OutcomePhase::Idle,
            GenerationOutcome::Pending => OutcomePhase::Pending,
            GenerationOutcome::Succeeded { .. } => OutcomePhase::Succeeded,
            GenerationOutcome::Failed { .. } => OutcomePhase::Failed,
        };

        let error_banner = match &self.outcome {
            GenerationOutcome::Failed { message } => Some(message.clone()),
            _ => None,
        };

        let result = match &self.outcome {
            GenerationOutcome::Succeeded {
                resume_text,
                preview,
                usage,
            } => Some(ResultView {
                resume_text: resume_text.clone(),
                copy_acknowledged: self.copy_acknowledged,
                clipboard_error: self.clipboard_error.clone(),
                usage: *usage,
                preview: match preview {
                    PreviewOutcome::Absent => PreviewPane::Absent,
                    PreviewOutcome::Available { document, zoom } => PreviewPane::Ready {
                        byte_len: document.len(),
                        zoom_percent: zoom.percent(),
                    },
                    PreviewOutcome::Unavailable { reason } => PreviewPane::Unavailable {
                        reason: reason.clone(),
                    },
                },
            }),
            _ => None,
        };

        AppViewModel {
            phase,
            job_description: field_view(&self.job_description),
            resume: field_view(&self.resume),
            template: field_view(&self.template),
            generate_enabled: !self.outcome.is_pending(),
            error_banner,
            result,
            save_status: self.save_status.clone(),
            dirty: self.dirty,
        }
    }
}

fn field_view(field: &InputField) -> FieldView {
    FieldView {
        value: field.value.clone(),
        source_name: field.source_name.clone(),
        read_error: field.read_error.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::ZoomPercent;

    #[test]
    fn zoom_in_clamps_to_upper_bound() {
        assert_eq!(ZoomPercent(195).zoom_in().percent(), 200);
        assert_eq!(ZoomPercent(200).zoom_in().percent(), 200);
    }

    #[test]
    fn zoom_out_clamps_to_lower_bound() {
        assert_eq!(ZoomPercent(55).zoom_out().percent(), 50);
        assert_eq!(ZoomPercent(50).zoom_out().percent(), 50);
    }

    #[test]
    fn default_zoom_is_one_hundred() {
        assert_eq!(ZoomPercent::default().percent(), 100);
    }
}
