//! Form rendering module
//!
//! - `field_renderer`: text field, checkbox and selector widgets
//! - `screen`: lays out the controls of the current form screen

mod field_renderer;
mod screen;

pub use screen::draw_screen;
