//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let main_area = layout::create_layout(frame.area());

    forms::draw_screen(frame, main_area, app);

    // Draw status bar
    layout::draw_status_bar(frame, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::View;
    use jobfinder::auth::InMemoryAuth;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 45)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_sign_up_screen_renders_every_control() {
        let app = App::with_auth(View::SignUp, Arc::new(InMemoryAuth::new()));
        let screen = render(&app);
        for text in [
            "Create Account",
            "First Name",
            "Confirm Password",
            "Job Seeker",
            "Terms of Service",
            "Already have an account? Log In",
        ] {
            assert!(screen.contains(text), "missing {text}");
        }
    }

    #[test]
    fn test_errors_hidden_before_interaction() {
        let app = App::with_auth(View::Login, Arc::new(InMemoryAuth::new()));
        let screen = render(&app);
        assert!(screen.contains("Welcome Back!"));
        assert!(!screen.contains("Email is required"));
    }

    #[test]
    fn test_errors_shown_after_submit_attempt() {
        let app = App::with_auth(View::Login, Arc::new(InMemoryAuth::new()));
        assert!(matches!(
            app.state.login.session.submit(),
            jobfinder::forms::SubmitOutcome::Invalid(_)
        ));
        let screen = render(&app);
        assert!(screen.contains("Email is required"));
        assert!(screen.contains("Password must be at least 8 characters"));
    }

    #[test]
    fn test_password_is_masked() {
        let app = App::with_auth(View::Login, Arc::new(InMemoryAuth::new()));
        app.state
            .login
            .session
            .set_field(jobfinder::forms::fields::PASSWORD, "hunter22")
            .unwrap();
        let screen = render(&app);
        assert!(!screen.contains("hunter22"));
        assert!(screen.contains("••••••••"));
    }
}
