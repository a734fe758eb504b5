//! Error and progress dialogs

use super::base::Dialog;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Error overlay; Enter or Esc dismisses it
pub fn render_error_dialog(frame: &mut Frame, message: &str) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", key),
        Span::raw(" or "),
        Span::styled("Esc", key),
        Span::raw(" to dismiss"),
    ]);

    Dialog {
        title: "Error",
        accent: Color::Red,
        message,
        hint: Some(hint),
        max_width: 64,
    }
    .render(frame);
}

/// Shown while the inquiry is with the endpoint
pub fn render_submitting_dialog(frame: &mut Frame) {
    Dialog {
        title: "Submitting…",
        accent: Color::Yellow,
        message: "Sending your quote request. Your answers stay saved if this fails.",
        hint: None,
        max_width: 50,
    }
    .render(frame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_rows(draw: impl FnOnce(&mut Frame)) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(110, 40)).unwrap();
        terminal.draw(draw).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn shows(rows: &[String], text: &str) -> bool {
        rows.iter().any(|row| row.contains(text))
    }

    #[test]
    fn test_short_error_shows_full_dismiss_hint() {
        let rows = rendered_rows(|frame| render_error_dialog(frame, "Phone Number is required"));
        assert!(shows(&rows, "Press Enter or Esc to dismiss"));
    }

    #[test]
    fn test_each_validation_error_on_its_own_line() {
        let message =
            "Company Name is required\nContact Person is required\nEmail Address is required";
        let rows = rendered_rows(|frame| render_error_dialog(frame, message));
        assert!(shows(&rows, "Company Name is required"));
        assert!(shows(&rows, "Email Address is required"));
        assert!(shows(&rows, "Press Enter or Esc to dismiss"));
    }

    #[test]
    fn test_submitting_dialog_has_title() {
        let rows = rendered_rows(render_submitting_dialog);
        assert!(shows(&rows, "Submitting…"));
    }
}
