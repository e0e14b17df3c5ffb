//! Message line and Morse preview.

use morsekey_core::InputBuffer;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::App;

/// Render the message being composed, with its length counter.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let buffer = app.buffer();
    let counter = format!(" {}/{} ", buffer.len(), InputBuffer::MAX_LEN);
    let counter_style = if buffer.is_full() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Message ")
        .title(Line::styled(counter, counter_style).right_aligned());
    let paragraph =
        Paragraph::new(buffer.display()).style(Style::default().fg(Color::White)).block(block);

    frame.render_widget(paragraph, area);
}

/// Render the Morse rendering of the current message.
pub fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let preview = app.preview().map(|seq| seq.to_string()).unwrap_or_default();

    let paragraph = Paragraph::new(preview)
        .style(Style::default().fg(Color::Cyan))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Morse "));

    frame.render_widget(paragraph, area);
}
