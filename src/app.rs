//! Application state and core logic

use crate::platform::SHORTCUT_MODIFIER;
use crate::state::{AppState, Control, Form, StatusKind, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jobfinder::auth::{self, AuthService};
use jobfinder::forms::{fields, Resolution, SessionError, SubmissionState, SubmitOutcome};
use jobfinder::AppConfig;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A submission outcome coming back from a spawned pipeline task
#[derive(Debug)]
struct SubmissionEvent {
    view: View,
    resolution: Resolution,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Whether the app should quit
    quit: bool,
    submissions_tx: mpsc::UnboundedSender<SubmissionEvent>,
    submissions_rx: mpsc::UnboundedReceiver<SubmissionEvent>,
}

impl App {
    /// Create a new App instance from user configuration
    pub fn new(config: &AppConfig) -> Self {
        Self::with_auth(config.start_screen().into(), auth::build(config))
    }

    pub fn with_auth(start: View, auth: Arc<dyn AuthService>) -> Self {
        let (submissions_tx, submissions_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(start, auth),
            quit: false,
            submissions_tx,
            submissions_rx,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Apply finished submissions and expire old status messages
    pub fn tick(&mut self) {
        while let Ok(event) = self.submissions_rx.try_recv() {
            self.apply_submission(event);
        }
        self.state.expire_status();
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        if view == self.state.current_view {
            return;
        }
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
    }

    /// Go back to previous view; quits when there is none
    pub fn go_back(&mut self) {
        match self.state.view_history.pop() {
            Some(view) => self.state.current_view = view,
            None => self.quit = true,
        }
    }

    fn is_shortcut(key: &KeyEvent, c: char) -> bool {
        key.code == KeyCode::Char(c)
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(SHORTCUT_MODIFIER))
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if Self::is_shortcut(&key, 's') {
            self.submit_current();
            return Ok(());
        }
        if Self::is_shortcut(&key, 'r') {
            self.state.current_screen_mut().reset();
            self.state.set_status(StatusKind::Info, "Form cleared");
            return Ok(());
        }
        if Self::is_shortcut(&key, 'n') {
            self.navigate(self.state.current_view.other());
            return Ok(());
        }
        if Self::is_shortcut(&key, 'p') {
            let screen = self.state.current_screen_mut();
            screen.password_visible = !screen.password_visible;
            return Ok(());
        }

        let active = self.state.current_screen().active();
        let result = match key.code {
            KeyCode::Esc => {
                self.go_back();
                Ok(())
            }
            KeyCode::Tab | KeyCode::Down => {
                self.state.current_screen_mut().next_field();
                Ok(())
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.current_screen_mut().prev_field();
                Ok(())
            }
            KeyCode::Enter => match active {
                Control::Submit { .. } => {
                    self.submit_current();
                    Ok(())
                }
                Control::Link { target, .. } => {
                    self.navigate(target);
                    Ok(())
                }
                Control::Checkbox { .. } | Control::RoleSelect => {
                    self.state.current_screen_mut().toggle()
                }
                Control::Text { .. } => {
                    self.state.current_screen_mut().next_field();
                    Ok(())
                }
            },
            KeyCode::Char(' ')
                if matches!(active, Control::Checkbox { .. } | Control::RoleSelect) =>
            {
                self.state.current_screen_mut().toggle()
            }
            KeyCode::Left | KeyCode::Right if matches!(active, Control::RoleSelect) => {
                self.state.current_screen_mut().toggle()
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | SHORTCUT_MODIFIER) =>
            {
                self.state.current_screen_mut().input_char(c)
            }
            KeyCode::Backspace => self.state.current_screen_mut().backspace(),
            _ => Ok(()),
        };

        match result {
            Ok(()) => {}
            Err(SessionError::Submitting) => {
                self.state
                    .set_status(StatusKind::Info, "Please wait, submission in progress...");
            }
            Err(err) => warn!(%err, "form intent rejected"),
        }
        Ok(())
    }

    fn submit_current(&mut self) {
        let view = self.state.current_view;
        match self.state.current_screen_mut().submit() {
            SubmitOutcome::Invalid(errors) => {
                debug!(?view, errors = errors.len(), "submit blocked");
                self.state
                    .set_status(StatusKind::Error, "Please fix the highlighted fields");
            }
            SubmitOutcome::AlreadySubmitting => {}
            SubmitOutcome::Started(task) => {
                let tx = self.submissions_tx.clone();
                tokio::spawn(async move {
                    let resolution = task.run().await;
                    // The receiver is gone when the app has shut down.
                    let _ = tx.send(SubmissionEvent { view, resolution });
                });
            }
        }
    }

    fn apply_submission(&mut self, event: SubmissionEvent) {
        let SubmissionEvent { view, resolution } = event;
        let state = match resolution {
            Resolution::Applied(state) => state,
            Resolution::Discarded => {
                debug!(?view, "stale submission ignored");
                return;
            }
        };

        match state {
            SubmissionState::Succeeded(success) => {
                self.state.set_status(StatusKind::Success, success.message);
                match view {
                    View::SignUp => {
                        self.state.sign_up.reset();
                        self.state.login.reset();
                        if let Err(err) = self
                            .state
                            .login
                            .session
                            .set_field(fields::EMAIL, success.identity.email)
                        {
                            warn!(%err, "could not prefill login email");
                        }
                        self.navigate(View::Login);
                    }
                    View::Login => self.state.login.reset(),
                }
            }
            SubmissionState::Failed(failure) => {
                self.state.set_status(StatusKind::Error, failure.to_string());
            }
            SubmissionState::Idle | SubmissionState::Submitting => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobfinder::auth::InMemoryAuth;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app(start: View) -> App {
        App::with_auth(start, Arc::new(InMemoryAuth::new()))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    /// Fill the focused text field and move to the next control
    fn fill(app: &mut App, text: &str) {
        type_text(app, text);
        app.handle_key(key(KeyCode::Tab)).unwrap();
    }

    async fn wait_for_submission(app: &mut App) {
        let event = app
            .submissions_rx
            .recv()
            .await
            .expect("submission event");
        app.apply_submission(event);
    }

    fn fill_sign_up(app: &mut App) {
        fill(app, "Ada");
        fill(app, "Lovelace");
        fill(app, "ada@example.com");
        fill(app, "");
        fill(app, "password123");
        fill(app, "password123");
        // Keep the default role and tick the agreement box.
        app.handle_key(key(KeyCode::Tab)).unwrap();
        app.handle_key(key(KeyCode::Char(' '))).unwrap();
        app.handle_key(key(KeyCode::Tab)).unwrap();
    }

    mod navigation {
        use super::*;

        #[test]
        fn test_should_quit_initially_false() {
            assert!(!app(View::SignUp).should_quit());
        }

        #[test]
        fn test_navigate_saves_history() {
            let mut app = app(View::SignUp);
            app.navigate(View::Login);
            assert_eq!(app.state.current_view, View::Login);
            assert_eq!(app.state.view_history, vec![View::SignUp]);
        }

        #[test]
        fn test_navigate_to_same_view_is_noop() {
            let mut app = app(View::SignUp);
            app.navigate(View::SignUp);
            assert!(app.state.view_history.is_empty());
        }

        #[test]
        fn test_escape_goes_back_then_quits() {
            let mut app = app(View::SignUp);
            app.handle_key(ctrl('n')).unwrap();
            assert_eq!(app.state.current_view, View::Login);

            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.current_view, View::SignUp);
            assert!(!app.should_quit());

            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(app.should_quit());
        }

        #[test]
        fn test_enter_on_link_navigates() {
            let mut app = app(View::Login);
            app.state.login.active_control = app.state.login.controls.len() - 1;
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.current_view, View::SignUp);
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn test_typing_goes_to_focused_field() {
            let mut app = app(View::Login);
            type_text(&mut app, "a@b.com");
            assert_eq!(app.state.login.session.values().text(fields::EMAIL), "a@b.com");
        }

        #[test]
        fn test_error_hidden_until_blur() {
            let mut app = app(View::Login);
            type_text(&mut app, "bad");
            assert_eq!(app.state.login.session.visible_error(fields::EMAIL), None);

            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert_eq!(
                app.state.login.session.visible_error(fields::EMAIL).as_deref(),
                Some("Invalid email address")
            );
        }

        #[test]
        fn test_unbound_control_chords_do_not_type() {
            let mut app = app(View::Login);
            type_text(&mut app, "ab");
            app.handle_key(ctrl('a')).unwrap();
            app.handle_key(ctrl('x')).unwrap();
            assert_eq!(app.state.login.session.values().text(fields::EMAIL), "ab");
        }

        #[test]
        fn test_shifted_characters_still_type() {
            let mut app = app(View::Login);
            app.handle_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT))
                .unwrap();
            assert_eq!(app.state.login.session.values().text(fields::EMAIL), "A");
        }

        #[test]
        fn test_toggle_password_visibility() {
            let mut app = app(View::Login);
            app.handle_key(ctrl('p')).unwrap();
            assert!(app.state.login.password_visible);
        }

        #[test]
        fn test_reset_clears_form() {
            let mut app = app(View::Login);
            type_text(&mut app, "a@b.com");
            app.handle_key(ctrl('r')).unwrap();
            assert_eq!(app.state.login.session.values().text(fields::EMAIL), "");
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_invalid_submit_sets_error_status() {
            let mut app = app(View::Login);
            app.handle_key(ctrl('s')).unwrap();
            let status = app.state.status.as_ref().unwrap();
            assert_eq!(status.kind, StatusKind::Error);
            assert_eq!(
                app.state.login.session.visible_error(fields::PASSWORD).as_deref(),
                Some("Password must be at least 8 characters")
            );
        }

        #[tokio::test]
        async fn test_sign_up_then_login() {
            let mut app = app(View::SignUp);
            fill_sign_up(&mut app);
            assert!(app.state.sign_up.session.can_submit());

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.state.sign_up.session.is_submitting());
            wait_for_submission(&mut app).await;

            assert_eq!(app.state.current_view, View::Login);
            assert_eq!(
                app.state.status.as_ref().unwrap().text,
                "Account created for Ada as a job_seeker!"
            );
            assert_eq!(
                app.state.login.session.values().text(fields::EMAIL),
                "ada@example.com"
            );
            assert_eq!(
                app.state.sign_up.session.submission_state(),
                SubmissionState::Idle
            );

            // Email is prefilled; focus the password field and log in.
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "password123");
            app.handle_key(ctrl('s')).unwrap();
            wait_for_submission(&mut app).await;

            let status = app.state.status.as_ref().unwrap();
            assert_eq!(status.kind, StatusKind::Success);
            assert_eq!(status.text, "Welcome back, ada@example.com");
            assert_eq!(app.state.login.session.values().text(fields::EMAIL), "");
        }

        #[tokio::test]
        async fn test_failed_login_reports_reason() {
            let mut app = app(View::Login);
            fill(&mut app, "nobody@example.com");
            type_text(&mut app, "password123");
            app.handle_key(ctrl('s')).unwrap();
            wait_for_submission(&mut app).await;

            let status = app.state.status.as_ref().unwrap();
            assert_eq!(status.kind, StatusKind::Error);
            assert_eq!(status.text, "Invalid email or password");
            assert!(matches!(
                app.state.login.session.submission_state(),
                SubmissionState::Failed(_)
            ));
        }

        #[tokio::test]
        async fn test_typing_while_submitting_is_rejected() {
            let mut app = app(View::Login);
            fill(&mut app, "a@b.com");
            type_text(&mut app, "password123");
            app.handle_key(ctrl('s')).unwrap();

            app.handle_key(key(KeyCode::Char('x'))).unwrap();
            assert_eq!(
                app.state.login.session.values().text(fields::PASSWORD),
                "password123"
            );
            assert_eq!(app.state.status.as_ref().unwrap().kind, StatusKind::Info);
            wait_for_submission(&mut app).await;
        }

        #[test]
        fn test_discarded_resolution_is_ignored() {
            let mut app = app(View::Login);
            app.apply_submission(SubmissionEvent {
                view: View::Login,
                resolution: Resolution::Discarded,
            });
            assert!(app.state.status.is_none());
            assert_eq!(app.state.current_view, View::Login);
        }
    }
}
