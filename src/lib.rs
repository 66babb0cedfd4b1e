//! JobFinder account forms
//!
//! Client-side validation and submission state for the login and sign-up
//! screens, plus the auth capability their submissions go through.

pub mod auth;
pub mod config;
pub mod forms;

pub use config::AppConfig;
