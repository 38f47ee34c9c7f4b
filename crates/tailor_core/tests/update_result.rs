use std::path::PathBuf;

use tailor_core::{
    update, AppState, ArtifactKind, ClipboardFailure, Effect, Field, GenerationSuccess, Msg,
    OutcomePhase, PreviewDocument, PreviewPayload,
};

fn edit(state: AppState, field: Field, value: &str) -> AppState {
    let (state, _) = update(
        state,
        Msg::FieldEdited {
            field,
            value: value.to_string(),
        },
    );
    state
}

fn succeeded_state(preview: PreviewPayload) -> AppState {
    let state = edit(AppState::new(), Field::JobDescription, "jd");
    let state = edit(state, Field::Resume, "cv");
    let (state, _) = update(state, Msg::GenerateClicked);
    let (state, _) = update(
        state,
        Msg::GenerationCompleted {
            result: Ok(GenerationSuccess {
                resume_text: "\\documentclass{article}".to_string(),
                preview,
                usage: None,
            }),
        },
    );
    state
}

fn copy_ok(state: AppState) -> (AppState, Vec<Effect>) {
    update(state, Msg::CopyCompleted { result: Ok(()) })
}

#[test]
fn copy_request_is_gated_on_success() {
    let state = AppState::new();
    let (state, effects) = update(state, Msg::CopyRequested);
    assert!(effects.is_empty());

    let state = succeeded_state(PreviewPayload::Absent);
    let (_state, effects) = update(state, Msg::CopyRequested);
    assert_eq!(
        effects,
        vec![Effect::CopyText {
            text: "\\documentclass{article}".to_string(),
        }]
    );
}

#[test]
fn copy_success_acknowledges_then_schedules_reset() {
    let state = succeeded_state(PreviewPayload::Absent);
    let (state, effects) = copy_ok(state);

    assert_eq!(effects, vec![Effect::ScheduleAckReset { serial: 1 }]);
    assert!(state.view().result.unwrap().copy_acknowledged);
}

#[test]
fn ack_expiry_reverts_acknowledgment() {
    let state = succeeded_state(PreviewPayload::Absent);
    let (state, _) = copy_ok(state);
    let (state, effects) = update(state, Msg::CopyAckExpired { serial: 1 });

    assert!(effects.is_empty());
    assert!(!state.view().result.unwrap().copy_acknowledged);
}

#[test]
fn stale_ack_expiry_does_not_clear_newer_acknowledgment() {
    let state = succeeded_state(PreviewPayload::Absent);
    let (state, _) = copy_ok(state);
    // A second copy lands before the first reset fires.
    let (state, effects) = copy_ok(state);
    assert_eq!(effects, vec![Effect::ScheduleAckReset { serial: 2 }]);

    let (state, _) = update(state, Msg::CopyAckExpired { serial: 1 });
    assert!(state.view().result.unwrap().copy_acknowledged);

    let (state, _) = update(state, Msg::CopyAckExpired { serial: 2 });
    assert!(!state.view().result.unwrap().copy_acknowledged);
}

#[test]
fn copy_failure_is_contained_inline() {
    let state = succeeded_state(PreviewPayload::Absent);
    let (state, effects) = update(
        state,
        Msg::CopyCompleted {
            result: Err(ClipboardFailure {
                message: "clipboard unavailable".to_string(),
            }),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    // The outcome is untouched; the error rides alongside the result.
    assert_eq!(view.phase, OutcomePhase::Succeeded);
    let result = view.result.unwrap();
    assert_eq!(
        result.clipboard_error.as_deref(),
        Some("clipboard unavailable")
    );
    assert!(!result.copy_acknowledged);
}

#[test]
fn copy_completion_after_result_was_replaced_is_dropped() {
    let state = succeeded_state(PreviewPayload::Absent);
    // A new submission replaces the result the copy referred to.
    let (state, _) = update(state, Msg::GenerateClicked);
    let (state, effects) = copy_ok(state);

    assert!(effects.is_empty());
    assert_eq!(state.view().phase, OutcomePhase::Pending);
}

#[test]
fn text_download_is_gated_and_carries_contents() {
    let (_, effects) = update(AppState::new(), Msg::DownloadTextRequested);
    assert!(effects.is_empty());

    let state = succeeded_state(PreviewPayload::Absent);
    let (_state, effects) = update(state, Msg::DownloadTextRequested);
    assert_eq!(
        effects,
        vec![Effect::SaveTextArtifact {
            contents: "\\documentclass{article}".to_string(),
        }]
    );
}

#[test]
fn preview_download_requires_an_available_preview() {
    let state = succeeded_state(PreviewPayload::Absent);
    let (_state, effects) = update(state, Msg::DownloadPreviewRequested);
    assert!(effects.is_empty());

    let state = succeeded_state(PreviewPayload::Document(PreviewDocument::new(vec![7, 7])));
    let (_state, effects) = update(state, Msg::DownloadPreviewRequested);
    assert_eq!(
        effects,
        vec![Effect::SavePreviewArtifact {
            document: PreviewDocument::new(vec![7, 7]),
        }]
    );
}

#[test]
fn artifact_save_result_is_recorded() {
    let state = succeeded_state(PreviewPayload::Absent);
    let (state, effects) = update(
        state,
        Msg::ArtifactSaved {
            artifact: ArtifactKind::LatexResume,
            result: Ok(PathBuf::from("output/optimized_resume.tex")),
        },
    );

    assert!(effects.is_empty());
    let status = state.view().save_status.expect("save status recorded");
    assert_eq!(status.artifact, ArtifactKind::LatexResume);
    assert_eq!(
        status.outcome,
        Ok(PathBuf::from("output/optimized_resume.tex"))
    );
}
