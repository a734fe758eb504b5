//! Form rendering

mod field_renderer;
mod inquiry_form;

pub use inquiry_form::draw_inquiry;
