//! Presentation state: focus, selection and messages around the wizard

use super::forms::{FieldName, Step, FABRIC_TYPES};
use std::collections::VecDeque;

/// Columns in the fabric type checkbox grid
pub const FABRIC_GRID_COLUMNS: usize = 2;

/// What keyboard input currently goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FieldName),
    FabricGrid,
    Actions,
}

/// Buttons in the action row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    Previous,
    Next,
    Submit,
}

impl ActionButton {
    /// Buttons offered on a step, primary action last
    pub fn for_step(step: Step) -> &'static [ActionButton] {
        match step {
            Step::One => &[ActionButton::Next],
            Step::Two => &[ActionButton::Previous, ActionButton::Next],
            Step::Three => &[ActionButton::Previous, ActionButton::Submit],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Previous => "Previous",
            Self::Next => "Next Step",
            Self::Submit => "Submit Quote Request",
        }
    }
}

/// Focus targets on a step, in Tab order
pub fn focus_targets(step: Step) -> Vec<FocusTarget> {
    let mut targets = Vec::with_capacity(6);
    if step == Step::Three {
        targets.push(FocusTarget::FabricGrid);
    }
    for name in FieldName::for_step(step) {
        targets.push(FocusTarget::Field(*name));
    }
    targets.push(FocusTarget::Actions);
    targets
}

#[derive(Debug, Default)]
pub struct AppState {
    /// Index into `focus_targets` for the current step
    pub focus_index: usize,
    /// Highlighted cell in the fabric grid
    pub fabric_cursor: usize,
    /// Index into `ActionButton::for_step` for the current step
    pub selected_button: usize,
    /// Error messages waiting to be shown, oldest first
    pub errors: VecDeque<String>,
    /// Transient feedback in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    pub fn current_focus(&self, step: Step) -> FocusTarget {
        let targets = focus_targets(step);
        targets[self.focus_index.min(targets.len() - 1)]
    }

    pub fn next_focus(&mut self, step: Step) {
        let count = focus_targets(step).len();
        self.focus_index = (self.focus_index + 1) % count;
    }

    pub fn prev_focus(&mut self, step: Step) {
        let count = focus_targets(step).len();
        if self.focus_index == 0 {
            self.focus_index = count - 1;
        } else {
            self.focus_index -= 1;
        }
    }

    /// Back to the first input with the primary button selected
    pub fn reset_focus(&mut self, step: Step) {
        self.focus_index = 0;
        self.fabric_cursor = 0;
        self.selected_button = ActionButton::for_step(step).len() - 1;
    }

    pub fn selected_action(&self, step: Step) -> ActionButton {
        let buttons = ActionButton::for_step(step);
        buttons[self.selected_button.min(buttons.len() - 1)]
    }

    pub fn next_button(&mut self, step: Step) {
        let count = ActionButton::for_step(step).len();
        self.selected_button = (self.selected_button + 1) % count;
    }

    pub fn prev_button(&mut self, step: Step) {
        let count = ActionButton::for_step(step).len();
        if self.selected_button == 0 {
            self.selected_button = count - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    /// Move the fabric grid cursor by rows/columns, clamped to the grid
    pub fn move_fabric_cursor(&mut self, rows: isize, cols: isize) {
        let cols_total = FABRIC_GRID_COLUMNS as isize;
        let row = self.fabric_cursor as isize / cols_total + rows;
        let col = self.fabric_cursor as isize % cols_total + cols;
        let rows_total = FABRIC_TYPES.len().div_ceil(FABRIC_GRID_COLUMNS) as isize;
        if (0..rows_total).contains(&row) && (0..cols_total).contains(&col) {
            let index = (row * cols_total + col) as usize;
            if index < FABRIC_TYPES.len() {
                self.fabric_cursor = index;
            }
        }
    }

    pub fn selected_fabric(&self) -> &'static str {
        FABRIC_TYPES[self.fabric_cursor.min(FABRIC_TYPES.len() - 1)]
    }

    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_targets_first_step() {
        assert_eq!(
            focus_targets(Step::One),
            vec![
                FocusTarget::Field(FieldName::CompanyName),
                FocusTarget::Field(FieldName::ContactPerson),
                FocusTarget::Field(FieldName::Email),
                FocusTarget::Field(FieldName::Phone),
                FocusTarget::Actions,
            ]
        );
    }

    #[test]
    fn test_focus_targets_last_step_starts_with_grid() {
        let targets = focus_targets(Step::Three);
        assert_eq!(targets[0], FocusTarget::FabricGrid);
        assert_eq!(targets.last(), Some(&FocusTarget::Actions));
    }

    #[test]
    fn test_focus_cycles() {
        let mut state = AppState::default();
        for _ in 0..4 {
            state.next_focus(Step::Two);
        }
        assert_eq!(state.focus_index, 0);
        state.prev_focus(Step::Two);
        assert_eq!(state.current_focus(Step::Two), FocusTarget::Actions);
    }

    #[test]
    fn test_current_focus_clamps_stale_index() {
        let state = AppState {
            focus_index: 42,
            ..Default::default()
        };
        assert_eq!(state.current_focus(Step::One), FocusTarget::Actions);
    }

    #[test]
    fn test_reset_focus_selects_primary_button() {
        let mut state = AppState::default();
        state.reset_focus(Step::Three);
        assert_eq!(state.selected_action(Step::Three), ActionButton::Submit);
        state.reset_focus(Step::One);
        assert_eq!(state.selected_action(Step::One), ActionButton::Next);
    }

    #[test]
    fn test_buttons_wrap() {
        let mut state = AppState::default();
        state.reset_focus(Step::Two);
        state.next_button(Step::Two);
        assert_eq!(state.selected_action(Step::Two), ActionButton::Previous);
        state.prev_button(Step::Two);
        assert_eq!(state.selected_action(Step::Two), ActionButton::Next);
    }

    #[test]
    fn test_fabric_cursor_moves_within_grid() {
        let mut state = AppState::default();
        state.move_fabric_cursor(0, 1);
        assert_eq!(state.selected_fabric(), "Silk");
        state.move_fabric_cursor(1, 0);
        assert_eq!(state.selected_fabric(), "Blends");
        state.move_fabric_cursor(0, 1);
        assert_eq!(state.selected_fabric(), "Blends");
        state.move_fabric_cursor(10, 0);
        assert_eq!(state.selected_fabric(), "Blends");
        state.move_fabric_cursor(2, -1);
        assert_eq!(state.selected_fabric(), "Technical");
    }

    #[test]
    fn test_error_queue_order() {
        let mut state = AppState::default();
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }
}
