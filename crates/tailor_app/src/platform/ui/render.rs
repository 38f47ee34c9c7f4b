use std::path::Path;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tailor_core::{AppViewModel, Field, FieldView, OutcomePhase, PreviewPane};

pub fn render(
    frame: &mut Frame,
    view: &AppViewModel,
    focus: Field,
    prompt: Option<(Field, &str)>,
    preview_path: Option<&Path>,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Percentage(40),
        Constraint::Min(6),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(frame.area());

    frame.render_widget(status_line(view), chunks[0]);
    render_inputs(frame, view, focus, chunks[1]);
    render_result(frame, view, chunks[2]);
    render_preview(frame, view, preview_path, chunks[3]);
    frame.render_widget(help_line(), chunks[4]);

    if let Some((field, buffer)) = prompt {
        render_prompt(frame, field, buffer);
    }
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::JobDescription => "Job Description",
        Field::Resume => "Resume",
        Field::Template => "Template (optional)",
    }
}

fn status_line(view: &AppViewModel) -> Paragraph<'_> {
    let mut parts: Vec<String> = Vec::new();
    parts.push(
        match view.phase {
            OutcomePhase::Idle => "Idle",
            OutcomePhase::Pending => "Generating...",
            OutcomePhase::Succeeded => "Done",
            OutcomePhase::Failed => "Error",
        }
        .to_string(),
    );
    if let Some(message) = &view.error_banner {
        parts.push(message.clone());
    }
    if let Some(usage) = view.result.as_ref().and_then(|result| result.usage) {
        parts.push(format!(
            "tokens {} prompt / {} completion / {} total",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        ));
    }
    if let Some(status) = &view.save_status {
        parts.push(match &status.outcome {
            Ok(path) => format!("saved {}", path.display()),
            Err(message) => format!("save failed: {message}"),
        });
    }
    let style = match view.phase {
        OutcomePhase::Failed => Style::default().fg(Color::Red),
        _ => Style::default(),
    };
    Paragraph::new(parts.join(" | ")).style(style)
}

fn render_inputs(frame: &mut Frame, view: &AppViewModel, focus: Field, area: Rect) {
    let columns = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(40),
        Constraint::Percentage(20),
    ])
    .split(area);

    render_field(
        frame,
        &view.job_description,
        Field::JobDescription,
        focus,
        columns[0],
    );
    render_field(frame, &view.resume, Field::Resume, focus, columns[1]);
    render_field(frame, &view.template, Field::Template, focus, columns[2]);
}

fn render_field(frame: &mut Frame, field: &FieldView, which: Field, focus: Field, area: Rect) {
    let mut title = vec![Span::raw(field_label(which))];
    if let Some(name) = &field.source_name {
        title.push(Span::styled(
            format!(" [{name}]"),
            Style::default().fg(Color::Green),
        ));
    }
    if let Some(error) = &field.read_error {
        title.push(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        ));
    }

    let border_style = if which == focus {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(title));
    let paragraph = Paragraph::new(field.value.as_str())
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_result(frame: &mut Frame, view: &AppViewModel, area: Rect) {
    let widget = match &view.result {
        Some(result) => {
            let mut title = vec![Span::raw("Generated LaTeX Resume")];
            if result.copy_acknowledged {
                title.push(Span::styled(
                    " Copied!",
                    Style::default().fg(Color::Green),
                ));
            }
            if let Some(error) = &result.clipboard_error {
                title.push(Span::styled(
                    format!(" copy failed: {error}"),
                    Style::default().fg(Color::Red),
                ));
            }
            Paragraph::new(result.resume_text.as_str())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(Line::from(title)),
                )
                .wrap(Wrap { trim: false })
        }
        None => {
            let placeholder = match view.phase {
                OutcomePhase::Pending => "Generating...",
                _ => "",
            };
            Paragraph::new(placeholder).block(Block::default().borders(Borders::ALL).title("Result"))
        }
    };
    frame.render_widget(widget, area);
}

fn render_preview(frame: &mut Frame, view: &AppViewModel, preview_path: Option<&Path>, area: Rect) {
    let line = match view.result.as_ref().map(|result| &result.preview) {
        Some(PreviewPane::Ready {
            byte_len,
            zoom_percent,
        }) => {
            let path = preview_path
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            format!("{byte_len} bytes at {zoom_percent}% {path}")
        }
        Some(PreviewPane::Unavailable { reason }) => format!("unavailable: {reason}"),
        Some(PreviewPane::Absent) => "none returned".to_string(),
        None => String::new(),
    };
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("PDF Preview")),
        area,
    );
}

fn help_line() -> Paragraph<'static> {
    Paragraph::new(
        "Tab focus | ^O load file | ^G generate | ^Y copy | ^T save .tex | ^P save .pdf | \
         PgUp/PgDn zoom | ^R reset zoom | Esc quit",
    )
    .style(Style::default().fg(Color::DarkGray))
}

fn render_prompt(frame: &mut Frame, field: Field, buffer: &str) {
    let area = centered_rect(60, 3, frame.area());
    frame.render_widget(Clear, area);
    let hints = field.extension_hints().join(", ");
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Load file into {} ({hints})", field_label(field)));
    frame.render_widget(Paragraph::new(buffer).block(block), area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);
    let horizontal = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1]);
    horizontal[1]
}
