use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tailor_core::{update, AppState, AppViewModel, Field, Msg};
use tailor_engine::{ClientSettings, EngineConfig};
use tailor_logging::tailor_info;

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui;

pub fn run_app(service_url: String, output_dir: PathBuf) -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);
    tailor_info!("tailor starting; service {}", service_url);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let config = EngineConfig {
        client: ClientSettings {
            base_url: service_url,
            ..ClientSettings::default()
        },
        output_dir,
    };
    let spool_dir = std::env::temp_dir().join(format!("tailor_preview_{}", std::process::id()));
    let mut runner = EffectRunner::new(config, spool_dir, msg_tx.clone())?;
    runner.check_health();

    enable_raw_mode().context("enable raw mode")?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = event_loop(&mut terminal, &mut runner, &msg_rx);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

/// Modal input state of the shell: free typing, or a one-line path prompt.
enum Mode {
    Edit,
    PathPrompt { field: Field, buffer: String },
}

enum KeyOutcome {
    Continue,
    Quit,
    Dispatch(Msg),
}

struct Shell {
    state: AppState,
    view: AppViewModel,
    focus: Field,
    mode: Mode,
}

impl Shell {
    fn new() -> Self {
        let mut state = AppState::new();
        let view = state.view();
        state.consume_dirty();
        Self {
            state,
            view,
            focus: Field::JobDescription,
            mode: Mode::Edit,
        }
    }

    fn dispatch(&mut self, msg: Msg, runner: &mut EffectRunner) {
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;
        runner.run(effects);
        if self.state.consume_dirty() {
            self.view = self.state.view();
        }
    }

    fn focused_value(&self) -> &str {
        match self.focus {
            Field::JobDescription => &self.view.job_description.value,
            Field::Resume => &self.view.resume.value,
            Field::Template => &self.view.template.value,
        }
    }

    fn prompt(&self) -> Option<(Field, &str)> {
        match &self.mode {
            Mode::PathPrompt { field, buffer } => Some((*field, buffer.as_str())),
            Mode::Edit => None,
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let mode = std::mem::replace(&mut self.mode, Mode::Edit);
        match mode {
            Mode::PathPrompt { field, mut buffer } => match key.code {
                KeyCode::Esc => KeyOutcome::Continue,
                KeyCode::Enter => KeyOutcome::Dispatch(Msg::FileLoadRequested {
                    field,
                    path: PathBuf::from(buffer.trim()),
                }),
                KeyCode::Backspace => {
                    buffer.pop();
                    self.mode = Mode::PathPrompt { field, buffer };
                    KeyOutcome::Continue
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    buffer.push(c);
                    self.mode = Mode::PathPrompt { field, buffer };
                    KeyOutcome::Continue
                }
                _ => {
                    self.mode = Mode::PathPrompt { field, buffer };
                    KeyOutcome::Continue
                }
            },
            Mode::Edit => self.on_edit_key(key),
        }
    }

    fn on_edit_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => KeyOutcome::Quit,
                KeyCode::Char('g') => KeyOutcome::Dispatch(Msg::GenerateClicked),
                KeyCode::Char('o') => {
                    self.mode = Mode::PathPrompt {
                        field: self.focus,
                        buffer: String::new(),
                    };
                    KeyOutcome::Continue
                }
                KeyCode::Char('y') => KeyOutcome::Dispatch(Msg::CopyRequested),
                KeyCode::Char('t') => KeyOutcome::Dispatch(Msg::DownloadTextRequested),
                KeyCode::Char('p') => KeyOutcome::Dispatch(Msg::DownloadPreviewRequested),
                KeyCode::Char('r') => KeyOutcome::Dispatch(Msg::ZoomReset),
                _ => KeyOutcome::Continue,
            };
        }
        match key.code {
            KeyCode::Esc => KeyOutcome::Quit,
            KeyCode::Tab => {
                self.focus = next_field(self.focus);
                KeyOutcome::Continue
            }
            KeyCode::BackTab => {
                self.focus = previous_field(self.focus);
                KeyOutcome::Continue
            }
            KeyCode::PageUp => KeyOutcome::Dispatch(Msg::ZoomIn),
            KeyCode::PageDown => KeyOutcome::Dispatch(Msg::ZoomOut),
            KeyCode::Enter => self.edit_focused(|value| value.push('\n')),
            KeyCode::Backspace => self.edit_focused(|value| {
                value.pop();
            }),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                self.edit_focused(move |value| value.push(c))
            }
            _ => KeyOutcome::Continue,
        }
    }

    fn edit_focused(&mut self, mutate: impl FnOnce(&mut String)) -> KeyOutcome {
        let mut value = self.focused_value().to_string();
        mutate(&mut value);
        KeyOutcome::Dispatch(Msg::FieldEdited {
            field: self.focus,
            value,
        })
    }
}

fn next_field(field: Field) -> Field {
    match field {
        Field::JobDescription => Field::Resume,
        Field::Resume => Field::Template,
        Field::Template => Field::JobDescription,
    }
}

fn previous_field(field: Field) -> Field {
    match field {
        Field::JobDescription => Field::Template,
        Field::Resume => Field::JobDescription,
        Field::Template => Field::Resume,
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    runner: &mut EffectRunner,
    msg_rx: &mpsc::Receiver<Msg>,
) -> anyhow::Result<()> {
    let mut shell = Shell::new();
    loop {
        terminal.draw(|frame| {
            ui::render(
                frame,
                &shell.view,
                shell.focus,
                shell.prompt(),
                runner.preview_path(),
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match shell.on_key(key) {
                        KeyOutcome::Quit => break,
                        KeyOutcome::Dispatch(msg) => shell.dispatch(msg, runner),
                        KeyOutcome::Continue => {}
                    }
                }
            }
        }

        // Engine and timer completions arrive between input events.
        while let Ok(msg) = msg_rx.try_recv() {
            shell.dispatch(msg, runner);
        }
    }
    Ok(())
}
