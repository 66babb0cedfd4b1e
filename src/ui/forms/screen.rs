//! Login and sign-up screen rendering

use super::field_renderer::{draw_checkbox, draw_choice, draw_text_field};
use crate::app::App;
use crate::state::{Control, ScreenForm};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use jobfinder::forms::{fields, Role, SessionSnapshot};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the centered form panel
const PANEL_WIDTH: u16 = 72;
const FIELD_HEIGHT: u16 = 3;
const LINK_HEIGHT: u16 = 1;

fn control_height(control: &Control) -> u16 {
    match control {
        Control::Text { .. } | Control::Checkbox { .. } | Control::RoleSelect => FIELD_HEIGHT,
        Control::Submit { .. } => BUTTON_HEIGHT,
        Control::Link { .. } => LINK_HEIGHT,
    }
}

/// Center a panel horizontally, at most `width` wide
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Draw the form screen for the current view
pub fn draw_screen(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.state.current_view;
    let screen = app.state.current_screen();
    // One snapshot per frame keeps values and errors consistent
    let snapshot = screen.session.snapshot();

    let panel = centered(area, PANEL_WIDTH);
    let block = Block::default()
        .title(format!(" {} ", view.title()))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let mut constraints = vec![Constraint::Length(2)]; // Subtitle
    constraints.extend(
        screen
            .controls
            .iter()
            .map(|control| Constraint::Length(control_height(control))),
    );
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    let subtitle = Paragraph::new(Span::styled(
        view.subtitle(),
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[0]);

    for (idx, control) in screen.controls.iter().enumerate() {
        let is_active = idx == screen.active_control;
        draw_control(frame, chunks[idx + 1], control, screen, &snapshot, is_active);
    }
}

fn draw_control(
    frame: &mut Frame,
    area: Rect,
    control: &Control,
    screen: &ScreenForm,
    snapshot: &SessionSnapshot,
    is_active: bool,
) {
    match *control {
        Control::Text {
            field,
            label,
            placeholder,
            secret,
        } => draw_text_field(
            frame,
            area,
            label,
            snapshot.values.text(field),
            placeholder,
            secret && !screen.password_visible,
            is_active,
            snapshot.visible_error(field),
        ),
        Control::Checkbox { field, label } => draw_checkbox(
            frame,
            area,
            label,
            snapshot.values.flag(field),
            is_active,
            snapshot.visible_error(field),
        ),
        Control::RoleSelect => {
            let current = snapshot.values.text(fields::ROLE);
            let labels: Vec<&str> = Role::ALL.iter().map(Role::label).collect();
            let selected = Role::ALL
                .iter()
                .position(|role| role.as_str() == current)
                .unwrap_or(0);
            draw_choice(
                frame,
                area,
                "I am a",
                &labels,
                selected,
                is_active,
                snapshot.visible_error(fields::ROLE),
            );
        }
        Control::Submit { label } => {
            let content = if snapshot.submission.is_submitting() {
                "Submitting..."
            } else {
                label
            };
            render_button(frame, area, content, is_active, snapshot.can_submit());
        }
        Control::Link { label, .. } => {
            let style = if is_active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
            } else {
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED)
            };
            let link = Paragraph::new(Line::from(Span::styled(label, style)))
                .alignment(Alignment::Center);
            frame.render_widget(link, area);
        }
    }
}
