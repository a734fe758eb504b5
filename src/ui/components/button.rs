//! Action row buttons

use crate::state::ActionButton;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a wizard action. Submit gets the accent color so it reads as the
/// final step; `is_enabled` is false while a submission is in flight.
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    button: ActionButton,
    is_selected: bool,
    is_enabled: bool,
) {
    let accent = match button {
        ActionButton::Submit => Color::Green,
        ActionButton::Next => Color::Cyan,
        ActionButton::Previous => Color::White,
    };

    let border_style = if is_selected && is_enabled {
        Style::default().fg(accent)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let label = if is_selected && is_enabled {
        format!("▶ {}", button.label())
    } else {
        button.label().to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(
        Paragraph::new(label)
            .style(text_style)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
