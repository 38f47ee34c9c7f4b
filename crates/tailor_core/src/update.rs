use crate::msg::{GenerationFailure, GenerationSuccess, Msg, PreviewPayload};
use crate::state::{
    AppState, Field, GenerationOutcome, GenerationRequest, PreviewOutcome, SaveStatus, ZoomPercent,
    MISSING_INPUT_MESSAGE,
};
use crate::Effect;

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldEdited { field, value } => {
            state.field_mut(field).edit(value);
            state.mark_dirty();
            Vec::new()
        }
        Msg::FileLoadRequested { field, path } => {
            // Last-submitted-wins: a new ticket invalidates any read still in
            // flight for the same field.
            let ticket = state.field_mut(field).issue_read_ticket();
            vec![Effect::ReadTextFile {
                field,
                ticket,
                path,
            }]
        }
        Msg::FileLoaded {
            field,
            ticket,
            result,
        } => {
            apply_file_load(&mut state, field, ticket, result);
            Vec::new()
        }
        Msg::GenerateClicked => submit(&mut state),
        Msg::GenerationCompleted { result } => apply_completion(&mut state, result),
        Msg::CopyRequested => match state.outcome() {
            GenerationOutcome::Succeeded { resume_text, .. } => vec![Effect::CopyText {
                text: resume_text.clone(),
            }],
            _ => Vec::new(),
        },
        Msg::CopyCompleted { result } => {
            if !matches!(state.outcome(), GenerationOutcome::Succeeded { .. }) {
                // The result this copy referred to is gone; drop silently.
                return (state, Vec::new());
            }
            match result {
                Ok(()) => {
                    let serial = state.acknowledge_copy();
                    vec![Effect::ScheduleAckReset { serial }]
                }
                Err(failure) => {
                    state.set_clipboard_error(failure.message);
                    Vec::new()
                }
            }
        }
        Msg::CopyAckExpired { serial } => {
            state.expire_copy_ack(serial);
            Vec::new()
        }
        Msg::DownloadTextRequested => match state.outcome() {
            GenerationOutcome::Succeeded { resume_text, .. } => vec![Effect::SaveTextArtifact {
                contents: resume_text.clone(),
            }],
            _ => Vec::new(),
        },
        Msg::DownloadPreviewRequested => match state.outcome() {
            GenerationOutcome::Succeeded {
                preview: PreviewOutcome::Available { document, .. },
                ..
            } => vec![Effect::SavePreviewArtifact {
                document: document.clone(),
            }],
            _ => Vec::new(),
        },
        Msg::ArtifactSaved { artifact, result } => {
            state.set_save_status(SaveStatus {
                artifact,
                outcome: result,
            });
            Vec::new()
        }
        Msg::ZoomIn => adjust_zoom(&mut state, ZoomPercent::zoom_in),
        Msg::ZoomOut => adjust_zoom(&mut state, ZoomPercent::zoom_out),
        Msg::ZoomReset => adjust_zoom(&mut state, |_| ZoomPercent::default()),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Submission: validate, guard re-entrancy, clear the previous attempt, and
/// dispatch. The stale preview is revoked strictly before the dispatch effect
/// so no freed resource is ever visible alongside the new request.
fn submit(state: &mut AppState) -> Vec<Effect> {
    if state.outcome().is_pending() {
        // At most one request in flight; the trigger is also disabled in the
        // view, but the controller refuses regardless.
        return Vec::new();
    }

    let had_preview = state.outcome().has_live_preview();

    if state.field(Field::JobDescription).value.trim().is_empty()
        || state.field(Field::Resume).value.trim().is_empty()
    {
        state.set_outcome(GenerationOutcome::Failed {
            message: MISSING_INPUT_MESSAGE.to_string(),
        });
        return if had_preview {
            vec![Effect::RevokePreview]
        } else {
            Vec::new()
        };
    }

    let template = state.field(Field::Template).value.clone();
    let request = GenerationRequest {
        job_description: state.field(Field::JobDescription).value.clone(),
        resume: state.field(Field::Resume).value.clone(),
        template: if template.trim().is_empty() {
            None
        } else {
            Some(template)
        },
    };

    state.begin_attempt();

    let mut effects = Vec::with_capacity(2);
    if had_preview {
        effects.push(Effect::RevokePreview);
    }
    effects.push(Effect::DispatchGeneration { request });
    effects
}

/// Classifies a settled request. The text and preview facets are orthogonal:
/// resume text with a failed preview is still an overall success.
fn apply_completion(
    state: &mut AppState,
    result: Result<GenerationSuccess, GenerationFailure>,
) -> Vec<Effect> {
    if !state.outcome().is_pending() {
        // No request of ours is outstanding; a settled response has nothing
        // to apply to.
        return Vec::new();
    }

    match result {
        Ok(success) => {
            let (preview, effects) = match success.preview {
                PreviewPayload::Document(document) => (
                    PreviewOutcome::Available {
                        document: document.clone(),
                        zoom: ZoomPercent::default(),
                    },
                    vec![Effect::PresentPreview { document }],
                ),
                PreviewPayload::Error(reason) => (PreviewOutcome::Unavailable { reason }, Vec::new()),
                PreviewPayload::Absent => (PreviewOutcome::Absent, Vec::new()),
            };
            state.set_outcome(GenerationOutcome::Succeeded {
                resume_text: success.resume_text,
                preview,
                usage: success.usage,
            });
            effects
        }
        Err(failure) => {
            state.set_outcome(GenerationOutcome::Failed {
                message: failure.message,
            });
            Vec::new()
        }
    }
}

fn apply_file_load(
    state: &mut AppState,
    field: Field,
    ticket: u64,
    result: Result<crate::msg::LoadedFile, crate::msg::FileReadFailure>,
) {
    let slot = state.field_mut(field);
    if !slot.is_current_ticket(ticket) {
        // Superseded by a later load request for the same field.
        return;
    }
    match result {
        Ok(loaded) => {
            slot.value = loaded.contents;
            slot.source_name = Some(loaded.name);
            slot.read_error = None;
        }
        Err(failure) => {
            // Existing value and provenance stay untouched.
            slot.read_error = Some(failure.message);
        }
    }
    state.mark_dirty();
}

fn adjust_zoom(state: &mut AppState, op: impl Fn(ZoomPercent) -> ZoomPercent) -> Vec<Effect> {
    let changed = match state.outcome_mut() {
        GenerationOutcome::Succeeded {
            preview: PreviewOutcome::Available { zoom, .. },
            ..
        } => {
            let next = op(*zoom);
            let changed = next != *zoom;
            *zoom = next;
            changed
        }
        _ => false,
    };
    if changed {
        state.mark_dirty();
    }
    Vec::new()
}
