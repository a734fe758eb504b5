//! Centered overlay dialogs

mod base;
mod notices;

pub use notices::{render_error_dialog, render_submitting_dialog};
