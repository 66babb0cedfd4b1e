//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const MASK_CHAR: char = '•';

fn border_style(is_active: bool, has_error: bool) -> Style {
    if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Bordered block titled with the label, with the error (if any) along the bottom edge
fn field_block<'a>(label: &'a str, is_active: bool, error: Option<&'a str>) -> Block<'a> {
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, error.is_some()));

    match error {
        Some(message) => block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        ))),
        None => block,
    }
}

/// Text shown for a field value, masked when secret
pub fn display_text(value: &str, secret: bool) -> String {
    if secret {
        value.chars().map(|_| MASK_CHAR).collect()
    } else {
        value.to_string()
    }
}

/// Draw a single-line text field
#[allow(clippy::too_many_arguments)]
pub fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    secret: bool,
    is_active: bool,
    error: Option<&str>,
) {
    let cursor = if is_active { "▌" } else { "" };

    let mut spans = if value.is_empty() {
        vec![Span::styled(
            placeholder.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        let style = if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        vec![Span::styled(display_text(value, secret), style)]
    };
    // Cursor sits before the placeholder so it reads as an empty input
    if value.is_empty() {
        spans.insert(0, Span::styled(cursor, Style::default().fg(Color::Cyan)));
    } else {
        spans.push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
    }

    let paragraph = Paragraph::new(Line::from(spans));
    frame.render_widget(paragraph.block(field_block(label, is_active, error)), area);
}

/// Draw a checkbox with its label
pub fn draw_checkbox(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    checked: bool,
    is_active: bool,
    error: Option<&str>,
) {
    let mark = if checked { "[x]" } else { "[ ]" };
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(mark, style.add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(label.to_string(), style),
    ]));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(is_active, error.is_some()));
    let block = match error {
        Some(message) => block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        ))),
        None => block,
    };
    frame.render_widget(paragraph.block(block), area);
}

/// Draw a one-of-many selector, highlighting the chosen option
pub fn draw_choice(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    options: &[&str],
    selected: usize,
    is_active: bool,
    error: Option<&str>,
) {
    let mut spans = Vec::with_capacity(options.len() * 2);
    for (idx, option) in options.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("   "));
        }
        if idx == selected {
            let style = if is_active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled(format!("(•) {option}"), style));
        } else {
            spans.push(Span::styled(
                format!("( ) {option}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans));
    frame.render_widget(paragraph.block(field_block(label, is_active, error)), area);
}
