//! The quote request form: fields of the current step, fabric grid and actions

use super::field_renderer::{draw_field, field_height};
use crate::app::App;
use crate::state::{
    focus_targets, ActionButton, FocusTarget, Step, FABRIC_GRID_COLUMNS, FABRIC_TYPES,
};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BUTTON_WIDTH: u16 = 28;
const FABRIC_CELL_WIDTH: usize = 18;

pub fn draw_inquiry(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.wizard.current_step();
    let focus = app.state.current_focus(step);

    let block = Block::default()
        .title(format!(" {} ", step.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // One row per focus target, in Tab order
    let targets = focus_targets(step);
    let mut constraints: Vec<Constraint> = targets
        .iter()
        .map(|target| match target {
            FocusTarget::Field(name) => Constraint::Length(field_height(*name)),
            FocusTarget::FabricGrid => Constraint::Length(fabric_grid_height()),
            FocusTarget::Actions => Constraint::Length(BUTTON_HEIGHT),
        })
        .collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (target, row) in targets.iter().zip(rows.iter()) {
        let is_active = *target == focus;
        match target {
            FocusTarget::Field(name) => {
                let value = app.wizard.fields().get(*name);
                draw_field(frame, *row, *name, value, is_active)
            }
            FocusTarget::FabricGrid => draw_fabric_grid(frame, *row, app, is_active),
            FocusTarget::Actions => draw_actions(frame, *row, app, step, is_active),
        }
    }
}

fn fabric_grid_height() -> u16 {
    FABRIC_TYPES.len().div_ceil(FABRIC_GRID_COLUMNS) as u16 + 2
}

/// Checkbox grid over the fabric catalogue
fn draw_fabric_grid(frame: &mut Frame, area: Rect, app: &App, is_active: bool) {
    let fields = app.wizard.fields();
    let cursor_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let lines: Vec<Line> = FABRIC_TYPES
        .chunks(FABRIC_GRID_COLUMNS)
        .enumerate()
        .map(|(row, fabrics)| {
            let spans: Vec<Span> = fabrics
                .iter()
                .enumerate()
                .map(|(col, fabric)| {
                    let index = row * FABRIC_GRID_COLUMNS + col;
                    let under_cursor = is_active && index == app.state.fabric_cursor;
                    let checked = fields.has_fabric_type(fabric);
                    let text = format!(
                        "{}[{}] {:<width$}",
                        if under_cursor { "› " } else { "  " },
                        if checked { "x" } else { " " },
                        fabric,
                        width = FABRIC_CELL_WIDTH
                    );
                    let style = if under_cursor {
                        cursor_style
                    } else if checked {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default()
                    };
                    Span::styled(text, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let selected = fields.fabric_types.len();
    let title = Line::from(vec![
        Span::raw(" Fabric Types "),
        Span::styled("* ", Style::default().fg(Color::Red)),
        Span::styled(
            format!("({selected} selected) "),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_actions(frame: &mut Frame, area: Rect, app: &App, step: Step, is_active: bool) {
    let buttons = ActionButton::for_step(step);
    let mut constraints: Vec<Constraint> = buttons
        .iter()
        .map(|_| Constraint::Length(BUTTON_WIDTH))
        .collect();
    constraints.push(Constraint::Min(0));
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let selected = app.state.selected_action(step);
    let enabled = !app.is_submitting();
    for (button, cell) in buttons.iter().zip(cells.iter()) {
        render_action_button(
            frame,
            *cell,
            *button,
            is_active && *button == selected,
            enabled,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fabric_grid_fits_all_types() {
        assert_eq!(fabric_grid_height(), 6);
    }
}
