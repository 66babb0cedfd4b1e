//! Per-screen form state: focus, control layout, and the owned form session

use super::app_state::View;
use jobfinder::forms::{
    fields, FieldValue, FormKind, FormSession, Role, SessionError, SubmissionPipeline,
    SubmitOutcome,
};
use std::sync::Arc;

/// Trait for common focus operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// A focusable item on a form screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Text {
        field: &'static str,
        label: &'static str,
        placeholder: &'static str,
        secret: bool,
    },
    Checkbox {
        field: &'static str,
        label: &'static str,
    },
    RoleSelect,
    Submit {
        label: &'static str,
    },
    Link {
        label: &'static str,
        target: View,
    },
}

impl Control {
    /// Form field backing this control, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Control::Text { field, .. } | Control::Checkbox { field, .. } => Some(*field),
            Control::RoleSelect => Some(fields::ROLE),
            Control::Submit { .. } | Control::Link { .. } => None,
        }
    }
}

pub const LOGIN_CONTROLS: &[Control] = &[
    Control::Text {
        field: fields::EMAIL,
        label: "Email Address",
        placeholder: "you@example.com",
        secret: false,
    },
    Control::Text {
        field: fields::PASSWORD,
        label: "Password",
        placeholder: "Enter your password",
        secret: true,
    },
    Control::Checkbox {
        field: fields::REMEMBER_ME,
        label: "Remember me",
    },
    Control::Submit { label: "Log In" },
    Control::Link {
        label: "Don't have an account? Sign Up",
        target: View::SignUp,
    },
];

pub const SIGN_UP_CONTROLS: &[Control] = &[
    Control::Text {
        field: fields::FIRST_NAME,
        label: "First Name",
        placeholder: "John",
        secret: false,
    },
    Control::Text {
        field: fields::LAST_NAME,
        label: "Last Name",
        placeholder: "Doe",
        secret: false,
    },
    Control::Text {
        field: fields::EMAIL,
        label: "Email Address",
        placeholder: "you@example.com",
        secret: false,
    },
    Control::Text {
        field: fields::PHONE,
        label: "Phone Number (optional)",
        placeholder: "10 digits",
        secret: false,
    },
    Control::Text {
        field: fields::PASSWORD,
        label: "Password",
        placeholder: "At least 8 characters",
        secret: true,
    },
    Control::Text {
        field: fields::CONFIRM_PASSWORD,
        label: "Confirm Password",
        placeholder: "Re-enter your password",
        secret: true,
    },
    Control::RoleSelect,
    Control::Checkbox {
        field: fields::AGREED,
        label: "I agree to JobFinder's Terms of Service and Privacy Policy",
    },
    Control::Submit {
        label: "Create Account",
    },
    Control::Link {
        label: "Already have an account? Log In",
        target: View::Login,
    },
];

/// One form screen
pub struct ScreenForm {
    pub kind: FormKind,
    pub session: FormSession,
    pub controls: &'static [Control],
    pub active_control: usize,
    /// Show password fields in clear text
    pub password_visible: bool,
}

impl ScreenForm {
    pub fn new(kind: FormKind, pipeline: Arc<dyn SubmissionPipeline>) -> Self {
        let controls = match kind {
            FormKind::Login => LOGIN_CONTROLS,
            FormKind::SignUp => SIGN_UP_CONTROLS,
        };
        Self {
            kind,
            session: FormSession::for_form(kind, pipeline),
            controls,
            active_control: 0,
            password_visible: false,
        }
    }

    pub fn active(&self) -> Control {
        self.controls[self.active_control.min(self.controls.len() - 1)]
    }

    /// Append a character to the focused text field
    pub fn input_char(&mut self, c: char) -> Result<(), SessionError> {
        match self.active() {
            Control::Text { field, .. } => {
                let mut text = self.session.values().text(field).to_string();
                text.push(c);
                self.session.set_field(field, text)
            }
            _ => Ok(()),
        }
    }

    /// Remove the last character of the focused text field
    pub fn backspace(&mut self) -> Result<(), SessionError> {
        match self.active() {
            Control::Text { field, .. } => {
                let mut text = self.session.values().text(field).to_string();
                if text.pop().is_none() {
                    return Ok(());
                }
                self.session.set_field(field, text)
            }
            _ => Ok(()),
        }
    }

    /// Toggle a checkbox or cycle the role selector
    pub fn toggle(&mut self) -> Result<(), SessionError> {
        match self.active() {
            Control::Checkbox { field, .. } => {
                let checked = self.session.values().flag(field);
                self.session.set_field(field, FieldValue::Flag(!checked))
            }
            Control::RoleSelect => {
                let role = self
                    .session
                    .values()
                    .text(fields::ROLE)
                    .parse::<Role>()
                    .unwrap_or_default();
                self.session.set_field(fields::ROLE, role.next().as_str())
            }
            _ => Ok(()),
        }
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        self.set_active_field(self.active_control);
        self.session.submit()
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.active_control = 0;
    }
}

impl Form for ScreenForm {
    fn field_count(&self) -> usize {
        self.controls.len()
    }
    fn active_field(&self) -> usize {
        self.active_control
    }
    /// Moving focus blurs (touches) the field being left
    fn set_active_field(&mut self, index: usize) {
        if let Some(field) = self.active().field() {
            self.session.touch(field);
        }
        self.active_control = index.min(self.controls.len() - 1);
    }
}
