//! Indicator LED and channel lamps.

use morsekey_core::{ChannelId, LineState};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::color_of;
use crate::App;

const LED_WIDTH: u16 = 16;
const LAMP_GLYPH: &str = "\u{25cf}";

/// Render the LED next to the channel lamps.
pub fn render(frame: &mut Frame, app: &App, lamps: &[(ChannelId, LineState)], area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LED_WIDTH), Constraint::Min(0)])
        .split(area);

    let [led_area, lamps_area] = chunks.as_ref() else {
        return;
    };

    let led = app.led();
    let led_style = if led.lit {
        Style::default().fg(color_of(led.color)).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let led_line = Line::from(vec![
        Span::styled(LAMP_GLYPH, led_style),
        Span::raw(" "),
        Span::styled(led.color.name(), Style::default().fg(color_of(led.color))),
    ]);
    frame.render_widget(
        Paragraph::new(led_line).block(Block::default().borders(Borders::ALL).title(" LED ")),
        *led_area,
    );

    let active_channel = app.transmission().filter(|t| t.is_running()).map(|t| t.marker.channel);
    let mut spans = Vec::with_capacity(lamps.len() * 2);
    for &(channel, state) in lamps {
        let mut style = Style::default().fg(if state.is_on() { Color::Yellow } else { Color::DarkGray });
        if active_channel == Some(channel) {
            style = style.add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(format!("{LAMP_GLYPH} {channel}"), style));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title(" Lines ")),
        *lamps_area,
    );
}
