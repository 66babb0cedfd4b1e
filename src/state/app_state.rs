//! Application state definitions

use super::screen_form::ScreenForm;
use jobfinder::auth::{AuthService, LoginPipeline, SignUpPipeline};
use jobfinder::config::StartScreen;
use jobfinder::forms::FormKind;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long a status message stays visible
const STATUS_TTL: Duration = Duration::from_secs(5);

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    SignUp,
    Login,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::SignUp => "Create Account",
            View::Login => "Welcome Back!",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            View::SignUp => "Join JobFinder today and unlock your career potential.",
            View::Login => "Log in to continue your journey.",
        }
    }

    pub fn other(&self) -> View {
        match self {
            View::SignUp => View::Login,
            View::Login => View::SignUp,
        }
    }
}

impl From<StartScreen> for View {
    fn from(screen: StartScreen) -> Self {
        match screen {
            StartScreen::SignUp => View::SignUp,
            StartScreen::Login => View::Login,
        }
    }
}

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Transient message shown in the status bar
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub shown_at: Instant,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= STATUS_TTL
    }
}

/// Main application state
pub struct AppState {
    pub current_view: View,
    pub view_history: Vec<View>,
    pub sign_up: ScreenForm,
    pub login: ScreenForm,
    pub status: Option<StatusMessage>,
}

impl AppState {
    pub fn new(start: View, auth: Arc<dyn AuthService>) -> Self {
        Self {
            current_view: start,
            view_history: Vec::new(),
            sign_up: ScreenForm::new(
                FormKind::SignUp,
                Arc::new(SignUpPipeline::new(Arc::clone(&auth))),
            ),
            login: ScreenForm::new(FormKind::Login, Arc::new(LoginPipeline::new(auth))),
            status: None,
        }
    }

    pub fn screen(&self, view: View) -> &ScreenForm {
        match view {
            View::SignUp => &self.sign_up,
            View::Login => &self.login,
        }
    }

    pub fn screen_mut(&mut self, view: View) -> &mut ScreenForm {
        match view {
            View::SignUp => &mut self.sign_up,
            View::Login => &mut self.login,
        }
    }

    pub fn current_screen(&self) -> &ScreenForm {
        self.screen(self.current_view)
    }

    pub fn current_screen_mut(&mut self) -> &mut ScreenForm {
        self.screen_mut(self.current_view)
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage::new(kind, text));
    }

    /// Drop the status message once it has been visible long enough
    pub fn expire_status(&mut self) {
        if self.status.as_ref().is_some_and(StatusMessage::is_expired) {
            self.status = None;
        }
    }
}
