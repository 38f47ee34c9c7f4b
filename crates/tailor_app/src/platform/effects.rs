use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use tailor_core::{
    ArtifactKind, Effect, Field, FileReadFailure, GenerationFailure, GenerationRequest,
    GenerationSuccess, LoadedFile, Msg, PreviewDocument, PreviewPayload, UsageStats,
    COPY_ACK_RESET,
};
use tailor_engine::{
    ArtifactFile, EngineConfig, EngineEvent, EngineHandle, GenerateError, GenerateFailureKind,
    GenerateRequestBody, GenerationOutput, InputSlot, PreviewField, PreviewManager, PreviewStore,
};
use tailor_logging::{tailor_info, tailor_warn};

use super::clipboard;

/// Executes core effects strictly in list order: engine commands for the
/// asynchronous ones, the preview manager synchronously for handle lifetime.
pub struct EffectRunner {
    engine: EngineHandle,
    preview: PreviewManager,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        config: EngineConfig,
        spool_dir: PathBuf,
        msg_tx: mpsc::Sender<Msg>,
    ) -> anyhow::Result<Self> {
        let (engine, events) = EngineHandle::new(config)
            .map_err(|err| anyhow::anyhow!("engine start failed: {}", err.message))?;
        spawn_event_pump(events, msg_tx.clone());
        let preview = PreviewManager::new(PreviewStore::new(spool_dir)?);
        Ok(Self {
            engine,
            preview,
            msg_tx,
        })
    }

    /// Fire the startup connectivity probe; the result is logged only.
    pub fn check_health(&self) {
        self.engine.check_health();
    }

    /// Spool path of the currently displayed preview, if one is live.
    pub fn preview_path(&self) -> Option<&Path> {
        self.preview.current_path()
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ReadTextFile {
                    field,
                    ticket,
                    path,
                } => self.engine.read_file(map_field(field), ticket, path),
                Effect::DispatchGeneration { request } => {
                    tailor_info!("dispatching generation request");
                    self.engine.generate(map_request(request));
                }
                Effect::RevokePreview => self.preview.revoke(),
                Effect::PresentPreview { document } => {
                    match self.preview.present(document.as_bytes()) {
                        Ok(path) => tailor_info!("preview ready at {:?}", path),
                        Err(err) => tailor_warn!("could not spool preview: {}", err),
                    }
                }
                Effect::CopyText { text } => clipboard::copy_text(text, self.msg_tx.clone()),
                Effect::ScheduleAckReset { serial } => {
                    let tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(COPY_ACK_RESET);
                        let _ = tx.send(Msg::CopyAckExpired { serial });
                    });
                }
                Effect::SaveTextArtifact { contents } => self.engine.write_resume_tex(contents),
                Effect::SavePreviewArtifact { document } => self
                    .engine
                    .write_resume_pdf(document.as_bytes().to_vec()),
            }
        }
    }
}

fn spawn_event_pump(events: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            if msg_tx.send(map_event(event)).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::GenerationSettled { result } => Msg::GenerationCompleted {
            result: match result {
                Ok(output) => Ok(map_output(output)),
                Err(err) => Err(map_generate_error(err)),
            },
        },
        EngineEvent::FileRead {
            slot,
            ticket,
            result,
        } => Msg::FileLoaded {
            field: map_slot(slot),
            ticket,
            result: result
                .map(|loaded| LoadedFile {
                    name: loaded.name,
                    contents: loaded.contents,
                })
                .map_err(|err| FileReadFailure {
                    message: err.to_string(),
                }),
        },
        EngineEvent::ArtifactWritten { artifact, result } => Msg::ArtifactSaved {
            artifact: map_artifact(artifact),
            result,
        },
        EngineEvent::HealthChecked { result } => {
            match result {
                Ok(health) => tailor_info!("service healthy: {}", health.status),
                Err(err) => tailor_warn!("service probe failed: {} ({})", err.message, err.kind),
            }
            Msg::NoOp
        }
    }
}

/// Only service failures carry their own text to the user; transport-level
/// failures collapse to a generic message, with the diagnostic in the log.
fn map_generate_error(err: GenerateError) -> GenerationFailure {
    tailor_warn!("generation failed: {} ({})", err.message, err.kind);
    let message = match err.kind {
        GenerateFailureKind::HttpStatus(_) => err.message,
        GenerateFailureKind::MalformedResponse => "Failed to generate resume".to_string(),
        GenerateFailureKind::Timeout | GenerateFailureKind::Network => {
            "An error occurred".to_string()
        }
    };
    GenerationFailure { message }
}

fn map_output(output: GenerationOutput) -> GenerationSuccess {
    GenerationSuccess {
        resume_text: output.resume_text,
        preview: match output.preview {
            PreviewField::Absent => PreviewPayload::Absent,
            PreviewField::Document(bytes) => {
                PreviewPayload::Document(PreviewDocument::new(bytes))
            }
            PreviewField::Error(reason) => PreviewPayload::Error(reason),
        },
        usage: output.usage.map(|usage| UsageStats {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }),
    }
}

fn map_request(request: GenerationRequest) -> GenerateRequestBody {
    GenerateRequestBody {
        job_description: request.job_description,
        resume: request.resume,
        template: request.template,
    }
}

fn map_field(field: Field) -> InputSlot {
    match field {
        Field::JobDescription => InputSlot::JobDescription,
        Field::Resume => InputSlot::Resume,
        Field::Template => InputSlot::Template,
    }
}

fn map_slot(slot: InputSlot) -> Field {
    match slot {
        InputSlot::JobDescription => Field::JobDescription,
        InputSlot::Resume => Field::Resume,
        InputSlot::Template => Field::Template,
    }
}

fn map_artifact(artifact: ArtifactFile) -> ArtifactKind {
    match artifact {
        ArtifactFile::ResumeTex => ArtifactKind::LatexResume,
        ArtifactFile::ResumePdf => ArtifactKind::PreviewPdf,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_text_reaches_the_user() {
        let failure = map_generate_error(GenerateError {
            kind: GenerateFailureKind::HttpStatus(400),
            message: "Job description and resume cannot be empty".to_string(),
        });
        assert_eq!(failure.message, "Job description and resume cannot be empty");
    }

    #[test]
    fn transport_errors_collapse_to_the_generic_message() {
        let failure = map_generate_error(GenerateError {
            kind: GenerateFailureKind::Network,
            message: "connection refused".to_string(),
        });
        assert_eq!(failure.message, "An error occurred");
    }

    #[test]
    fn decoded_document_is_carried_into_the_core_payload() {
        let success = map_output(GenerationOutput {
            resume_text: "X".to_string(),
            preview: PreviewField::Document(vec![1, 2, 3]),
            usage: None,
        });
        assert_eq!(
            success.preview,
            PreviewPayload::Document(PreviewDocument::new(vec![1, 2, 3]))
        );
    }
}
