//! Layout components (step header, status bar)

use crate::app::App;
use crate::platform::{
    COPY_CONTACT_SHORTCUT, NEXT_STEP_SHORTCUT, PREV_STEP_SHORTCUT, RESET_SHORTCUT, SUBMIT_SHORTCUT,
};
use crate::state::{Step, SubmissionStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Split the screen into header, form and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Step header
            Constraint::Min(0),    // Form
            Constraint::Length(2), // Status bar + key hints
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Numbered step markers with the current one highlighted
pub fn draw_step_header(frame: &mut Frame, area: Rect, current: Step) {
    let mut spans = Vec::new();
    for step in Step::ALL {
        if step != Step::One {
            spans.push(Span::styled(" ── ", Style::default().fg(Color::DarkGray)));
        }
        let (marker, style) = if step == current {
            (
                "●",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else if step.number() < current.number() {
            ("✓", Style::default().fg(Color::Green))
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(
            format!("{marker} {} {}", step.number(), step.title()),
            style,
        ));
    }

    let title = format!(
        " Request a Quote · Step {} of {}: {} ",
        current.number(),
        Step::ALL.len(),
        current.title()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Save state, submission status, feedback and contact on the first line;
/// shortcuts on the second
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let save_style = if app.wizard.is_autosave_pending() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Green)
    };
    let status = app.wizard.submission_status();
    let status_style = match status {
        SubmissionStatus::Idle => Style::default().fg(Color::DarkGray),
        SubmissionStatus::Submitting => Style::default().fg(Color::Yellow),
        SubmissionStatus::Succeeded => Style::default().fg(Color::Green),
        SubmissionStatus::Failed => Style::default().fg(Color::Red),
    };
    let separator = Span::styled(" │ ", Style::default().fg(Color::DarkGray));

    let mut spans = vec![
        Span::styled(format!(" {}", app.save_status()), save_style),
        separator.clone(),
        Span::styled(status.label(), status_style),
    ];
    if let Some(message) = &app.state.status_message {
        spans.push(separator.clone());
        spans.push(Span::styled(
            message.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(contact) = app.config.contact_line() {
        spans.push(separator);
        spans.push(Span::styled(contact, Style::default().fg(Color::Cyan)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

    let hints = format!(
        " Tab: next field │ {NEXT_STEP_SHORTCUT}/{PREV_STEP_SHORTCUT}: step │ \
         {SUBMIT_SHORTCUT}: submit │ {RESET_SHORTCUT}: clear │ \
         {COPY_CONTACT_SHORTCUT}: copy contact │ Ctrl+C: quit"
    );
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        rows[1],
    );
}
