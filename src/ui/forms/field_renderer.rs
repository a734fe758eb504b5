//! Field rendering utilities for forms

use crate::state::{FieldKind, FieldName};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field needs including its border
pub fn field_height(name: FieldName) -> u16 {
    if name.is_multiline() { 5 } else { 3 }
}

/// Draw one inquiry field. Empty fields show their placeholder; select
/// fields show the option label with arrows while focused.
pub fn draw_field(frame: &mut Frame, area: Rect, name: FieldName, value: &str, is_active: bool) {
    let accent = Style::default().fg(Color::Cyan);
    let border_style = if is_active {
        accent
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default()
    };
    let placeholder_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);
    let cursor = Span::styled("▌", accent);

    let lines: Vec<Line> = match name.kind() {
        FieldKind::Select(_) => {
            let shown = if value.is_empty() {
                Span::styled(name.placeholder(), placeholder_style)
            } else {
                Span::styled(name.display_value(value), value_style)
            };
            if is_active {
                vec![Line::from(vec![
                    Span::styled("◀ ", accent),
                    shown,
                    Span::styled(" ▶", accent),
                ])]
            } else {
                vec![Line::from(shown)]
            }
        }
        FieldKind::Text { .. } if value.is_empty() => {
            let mut spans = Vec::with_capacity(2);
            if is_active {
                spans.push(cursor);
            }
            spans.push(Span::styled(name.placeholder(), placeholder_style));
            vec![Line::from(spans)]
        }
        FieldKind::Text { .. } => {
            // split('\n') keeps a trailing empty line so the cursor follows Enter
            let mut lines: Vec<Line> = value
                .split('\n')
                .map(|l| Line::from(Span::styled(l, value_style)))
                .collect();
            if is_active {
                if let Some(last) = lines.last_mut() {
                    last.spans.push(cursor);
                }
            }
            lines
        }
    };

    let title = if name.is_required() {
        Line::from(vec![
            Span::raw(format!(" {} ", name.label())),
            Span::styled("* ", Style::default().fg(Color::Red)),
        ])
    } else {
        Line::from(format!(" {} ", name.label()))
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_field(name: FieldName, value: &str, is_active: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, field_height(name))).unwrap();
        terminal
            .draw(|frame| draw_field(frame, frame.area(), name, value, is_active))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_field_heights() {
        assert_eq!(field_height(FieldName::Email), 3);
        assert_eq!(field_height(FieldName::Message), 5);
    }

    #[test]
    fn test_required_marker_in_title() {
        let screen = render_field(FieldName::CompanyName, "", false);
        assert!(screen.contains("Company Name"));
        assert!(screen.contains('*'));
        let screen = render_field(FieldName::PrimaryMarkets, "", false);
        assert!(!screen.contains('*'));
    }

    #[test]
    fn test_placeholder_when_empty() {
        let screen = render_field(FieldName::Email, "", false);
        assert!(screen.contains("your@company.com"));
        let screen = render_field(FieldName::Email, "jo@acme.com", false);
        assert!(!screen.contains("your@company.com"));
        assert!(screen.contains("jo@acme.com"));
    }

    #[test]
    fn test_active_select_shows_arrows() {
        let screen = render_field(FieldName::Timeline, "1-3-months", true);
        assert!(screen.contains("◀ 1-3 months ▶"));
    }

    #[test]
    fn test_multiline_value_spans_rows() {
        let screen = render_field(FieldName::Specifications, "200 gsm\n150 cm width", false);
        assert!(screen.contains("200 gsm"));
        assert!(screen.contains("150 cm width"));
    }
}
