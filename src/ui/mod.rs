//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use components::{render_error_dialog, render_submitting_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, form_area, status_area) = layout::create_layout(frame.area());

    layout::draw_step_header(frame, header_area, app.wizard.current_step());
    forms::draw_inquiry(frame, form_area, app);
    layout::draw_status_bar(frame, status_area, app);

    // Overlays, errors on top
    if app.is_submitting() {
        render_submitting_dialog(frame);
    }
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    }
}
