use std::path::PathBuf;
use std::sync::Once;

use tailor_core::{
    update, AppState, Effect, Field, FileReadFailure, LoadedFile, Msg, OutcomePhase,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tailor_logging::initialize_for_tests);
}

/// Requests a file load and returns the ticket the effect carries.
fn request_load(state: AppState, field: Field, path: &str) -> (AppState, u64) {
    let (state, effects) = update(
        state,
        Msg::FileLoadRequested {
            field,
            path: PathBuf::from(path),
        },
    );
    let ticket = match effects.as_slice() {
        [Effect::ReadTextFile { ticket, .. }] => *ticket,
        other => panic!("expected a single ReadTextFile effect, got {other:?}"),
    };
    (state, ticket)
}

fn loaded(name: &str, contents: &str) -> Result<LoadedFile, FileReadFailure> {
    Ok(LoadedFile {
        name: name.to_string(),
        contents: contents.to_string(),
    })
}

#[test]
fn direct_edit_clears_provenance() {
    init_logging();
    let state = AppState::new();
    let (state, ticket) = request_load(state, Field::Resume, "cv.txt");
    let (state, _) = update(
        state,
        Msg::FileLoaded {
            field: Field::Resume,
            ticket,
            result: loaded("cv.txt", "ten years of experience"),
        },
    );
    assert_eq!(state.view().resume.source_name.as_deref(), Some("cv.txt"));

    let (state, effects) = update(
        state,
        Msg::FieldEdited {
            field: Field::Resume,
            value: "edited by hand".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().resume.value, "edited by hand");
    assert_eq!(state.view().resume.source_name, None);
}

#[test]
fn file_load_success_sets_value_and_source() {
    init_logging();
    let state = AppState::new();
    let (state, ticket) = request_load(state, Field::JobDescription, "jd.txt");
    let (state, effects) = update(
        state,
        Msg::FileLoaded {
            field: Field::JobDescription,
            ticket,
            result: loaded("jd.txt", "senior crab wrangler"),
        },
    );
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.job_description.value, "senior crab wrangler");
    assert_eq!(view.job_description.source_name.as_deref(), Some("jd.txt"));
    assert_eq!(view.job_description.read_error, None);
}

#[test]
fn file_load_failure_leaves_field_untouched() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(
        state,
        Msg::FieldEdited {
            field: Field::Resume,
            value: "kept".to_string(),
        },
    );
    let (state, ticket) = request_load(state, Field::Resume, "broken.bin");
    let (state, _) = update(
        state,
        Msg::FileLoaded {
            field: Field::Resume,
            ticket,
            result: Err(FileReadFailure {
                message: "Failed to read file".to_string(),
            }),
        },
    );

    let view = state.view();
    assert_eq!(view.resume.value, "kept");
    assert_eq!(view.resume.source_name, None);
    assert_eq!(
        view.resume.read_error.as_deref(),
        Some("Failed to read file")
    );
    // A read failure never touches the outcome.
    assert_eq!(view.phase, OutcomePhase::Idle);
}

#[test]
fn superseded_read_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (state, first) = request_load(state, Field::Template, "one.tex");
    let (state, second) = request_load(state, Field::Template, "two.tex");
    assert_ne!(first, second);

    // The earlier read completes late; last-submitted-wins drops it.
    let (state, _) = update(
        state,
        Msg::FileLoaded {
            field: Field::Template,
            ticket: first,
            result: loaded("one.tex", "stale"),
        },
    );
    assert_eq!(state.view().template.value, "");

    let (state, _) = update(
        state,
        Msg::FileLoaded {
            field: Field::Template,
            ticket: second,
            result: loaded("two.tex", "current"),
        },
    );
    assert_eq!(state.view().template.value, "current");
    assert_eq!(state.view().template.source_name.as_deref(), Some("two.tex"));
}

#[test]
fn read_failure_does_not_block_other_fields() {
    init_logging();
    let state = AppState::new();
    let (state, bad) = request_load(state, Field::JobDescription, "bad.docx");
    let (state, good) = request_load(state, Field::Resume, "cv.txt");

    let (state, _) = update(
        state,
        Msg::FileLoaded {
            field: Field::JobDescription,
            ticket: bad,
            result: Err(FileReadFailure {
                message: "unreadable".to_string(),
            }),
        },
    );
    let (state, _) = update(
        state,
        Msg::FileLoaded {
            field: Field::Resume,
            ticket: good,
            result: loaded("cv.txt", "fine"),
        },
    );

    let view = state.view();
    assert_eq!(view.job_description.read_error.as_deref(), Some("unreadable"));
    assert_eq!(view.resume.value, "fine");
    assert_eq!(view.resume.read_error, None);
}

#[test]
fn edit_clears_previous_read_error() {
    init_logging();
    let state = AppState::new();
    let (state, ticket) = request_load(state, Field::Resume, "bad.pdf");
    let (state, _) = update(
        state,
        Msg::FileLoaded {
            field: Field::Resume,
            ticket,
            result: Err(FileReadFailure {
                message: "unreadable".to_string(),
            }),
        },
    );
    let (state, _) = update(
        state,
        Msg::FieldEdited {
            field: Field::Resume,
            value: "typed instead".to_string(),
        },
    );
    assert_eq!(state.view().resume.read_error, None);
}
