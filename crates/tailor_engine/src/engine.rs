use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use tailor_logging::tailor_info;

use crate::artifact::ArtifactWriter;
use crate::client::{ClientSettings, GenerateRequestBody, GenerateService, HttpGenerateClient};
use crate::read::read_text_file;
use crate::{ArtifactFile, EngineEvent, GenerateError, InputSlot};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub client: ClientSettings,
    pub output_dir: PathBuf,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            client: ClientSettings::default(),
            output_dir,
        }
    }
}

enum EngineCommand {
    Generate { request: GenerateRequestBody },
    ReadFile {
        slot: InputSlot,
        ticket: u64,
        path: PathBuf,
    },
    WriteResumeTex { contents: String },
    WriteResumePdf { bytes: Vec<u8> },
    CheckHealth,
}

/// Channel endpoint into the engine thread. Commands are cheap to send; the
/// thread runs blocking filesystem work inline and network work on its own
/// tokio runtime.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    /// Spawns the engine thread; events arrive on the returned receiver.
    pub fn new(config: EngineConfig) -> Result<(Self, mpsc::Receiver<EngineEvent>), GenerateError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let client = Arc::new(HttpGenerateClient::new(config.client.clone())?);
        let writer = ArtifactWriter::new(config.output_dir.clone());
        tailor_info!(
            "engine starting: service {} output {:?}",
            config.client.base_url,
            config.output_dir
        );

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &client, &writer, command, &event_tx);
            }
        });

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn generate(&self, request: GenerateRequestBody) {
        let _ = self.cmd_tx.send(EngineCommand::Generate { request });
    }

    pub fn read_file(&self, slot: InputSlot, ticket: u64, path: PathBuf) {
        let _ = self.cmd_tx.send(EngineCommand::ReadFile { slot, ticket, path });
    }

    pub fn write_resume_tex(&self, contents: String) {
        let _ = self.cmd_tx.send(EngineCommand::WriteResumeTex { contents });
    }

    pub fn write_resume_pdf(&self, bytes: Vec<u8>) {
        let _ = self.cmd_tx.send(EngineCommand::WriteResumePdf { bytes });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    client: &Arc<HttpGenerateClient>,
    writer: &ArtifactWriter,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Generate { request } => {
            let client = client.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = client.generate(&request).await;
                let _ = event_tx.send(EngineEvent::GenerationSettled { result });
            });
        }
        EngineCommand::CheckHealth => {
            let client = client.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = client.health().await;
                let _ = event_tx.send(EngineEvent::HealthChecked { result });
            });
        }
        EngineCommand::ReadFile { slot, ticket, path } => {
            let result = read_text_file(&path);
            let _ = event_tx.send(EngineEvent::FileRead {
                slot,
                ticket,
                result,
            });
        }
        EngineCommand::WriteResumeTex { contents } => {
            let result = writer
                .write_resume_tex(&contents)
                .map_err(|err| err.to_string());
            let _ = event_tx.send(EngineEvent::ArtifactWritten {
                artifact: ArtifactFile::ResumeTex,
                result,
            });
        }
        EngineCommand::WriteResumePdf { bytes } => {
            let result = writer
                .write_resume_pdf(&bytes)
                .map_err(|err| err.to_string());
            let _ = event_tx.send(EngineEvent::ArtifactWritten {
                artifact: ArtifactFile::ResumePdf,
                result,
            });
        }
    }
}
