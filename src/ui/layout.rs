//! Layout components (form panel area, status bar)

use crate::app::App;
use crate::platform::{RESET_SHORTCUT, REVEAL_SHORTCUT, SUBMIT_SHORTCUT, SWITCH_SHORTCUT};
use crate::state::{StatusKind, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", app.state.current_view.title()),
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];
    spans.push(Span::raw(" "));

    // A status message replaces the key hints while it is shown
    match &app.state.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => Color::Yellow,
                StatusKind::Success => Color::Green,
                StatusKind::Error => Color::Red,
            };
            spans.push(Span::styled(&status.text, Style::default().fg(color)));
        }
        None => spans.push(Span::styled(
            get_view_hints(&app.state.current_view),
            Style::default().fg(Color::Gray),
        )),
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: &View) -> String {
    let switch = match view {
        View::SignUp => "log in",
        View::Login => "sign up",
    };
    format!(
        "Tab:next  {SUBMIT_SHORTCUT}:submit  {RESET_SHORTCUT}:reset  {REVEAL_SHORTCUT}:show pw  {SWITCH_SHORTCUT}:{switch}  Esc:back"
    )
}
