//! Shared dialog frame

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

/// Horizontal padding inside the border, both sides together
const PADDING: u16 = 4;

pub struct Dialog<'a> {
    pub title: &'a str,
    /// Title and border color
    pub accent: Color,
    /// Body text; `\n` starts a new paragraph
    pub message: &'a str,
    pub hint: Option<Line<'a>>,
    pub max_width: u16,
}

impl Dialog<'_> {
    /// Draw centered over whatever is already on screen
    pub fn render(self, frame: &mut Frame) {
        let area = frame.area();
        let inner_width = self.max_width.saturating_sub(PADDING + 2).max(1) as usize;
        let body = wrap_text(self.message, inner_width);

        let widest = body
            .iter()
            .map(|line| line.chars().count())
            .chain(std::iter::once(self.title.chars().count()))
            .chain(self.hint.as_ref().map(Line::width))
            .max()
            .unwrap_or(0) as u16;
        let width = (widest + PADDING + 2).min(self.max_width).min(area.width);
        // Title, blank, body, optional blank + hint, borders
        let hint_rows = if self.hint.is_some() { 2 } else { 0 };
        let height = (body.len() as u16 + 2 + hint_rows + 2).min(area.height);

        let dialog_area = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };
        frame.render_widget(Clear, dialog_area);

        let mut lines = Vec::with_capacity(body.len() + 4);
        lines.push(Line::from(Span::styled(
            self.title,
            Style::default()
                .fg(self.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
        lines.extend(body.into_iter().map(Line::from));
        if let Some(hint) = self.hint {
            lines.push(Line::default());
            lines.push(hint);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent))
            .style(Style::default().bg(Color::Black));
        frame.render_widget(
            Paragraph::new(lines).block(block.padding(Padding::horizontal(PADDING / 2))),
            dialog_area,
        );
    }
}

/// Greedy word wrap. Words longer than `max_width` get a line of their own.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.chars().count();
            if current_width > 0 && current_width + 1 + word_width > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_text_single_line() {
        assert_eq!(wrap_text("Saved", 20), vec!["Saved"]);
    }

    #[test]
    fn test_wraps_on_word_boundary() {
        assert_eq!(
            wrap_text("Company Name is required", 14),
            vec!["Company Name", "is required"]
        );
    }

    #[test]
    fn test_keeps_paragraph_breaks() {
        assert_eq!(
            wrap_text("Email is required\nPhone is required", 40),
            vec!["Email is required", "Phone is required"]
        );
    }

    #[test]
    fn test_long_word_not_split() {
        assert_eq!(
            wrap_text("see garment-manufacturer", 10),
            vec!["see", "garment-manufacturer"]
        );
    }

    #[test]
    fn test_empty_text_yields_one_blank_line() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }
}
