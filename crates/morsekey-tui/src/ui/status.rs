//! Status bar
//!
//! Displays the transmission state and the last status message.

use morsekey_core::SessionState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = match app.transmission().map(|t| t.state) {
        None | Some(SessionState::Completed) => {
            Span::styled("Ready", Style::default().fg(Color::Green))
        },
        Some(SessionState::Idle | SessionState::Emitting) => Span::styled(
            "Sending",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Some(SessionState::Cancelled) => Span::styled("Stopped", Style::default().fg(Color::White)),
        Some(SessionState::Faulted) => Span::styled(
            "Fault",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let message = app.status_message().map_or_else(String::new, |m| format!(" | {m}"));

    let status_line = Line::from(vec![
        Span::raw(" "),
        state,
        Span::raw(message),
        Span::styled(" | Enter send, Esc stop, Ctrl-Q quit", Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
