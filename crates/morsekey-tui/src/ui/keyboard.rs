//! On-screen keyboard grid.

use morsekey_app::{Keyboard, Layer};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

const SPACE_BAR: &str = "    [          space          ]";

/// Render the active keyboard layer. Keys without a Morse code are dimmed.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layer = app.layer();

    let mut lines: Vec<Line> = (0..Keyboard::ROWS)
        .map(|row| {
            let indent = Span::raw(" ".repeat(row));
            let keys = Keyboard::row(layer, row).into_iter().map(|key| {
                let style = if key.enabled {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Span::styled(format!("[{}]", key.label), style)
            });
            Line::from(std::iter::once(indent).chain(keys).collect::<Vec<_>>())
        })
        .collect();
    lines.push(Line::from(Span::styled(SPACE_BAR, Style::default().fg(Color::White))));

    let title = match layer {
        Layer::Lower => Span::raw(" Keyboard (Tab: shift, Shift key ignored) "),
        Layer::Upper => Span::styled(
            " Keyboard SHIFT (Tab: unshift, Shift key ignored) ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}
