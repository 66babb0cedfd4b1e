//! Application state module

mod app_state;
mod screen_form;

pub use app_state::*;
pub use screen_form::*;
