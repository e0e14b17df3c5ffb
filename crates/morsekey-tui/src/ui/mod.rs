//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod indicator;
mod keyboard;
mod message;
mod status;

use morsekey_core::{ChannelId, IndicatorColor, LineState};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Color,
};

use crate::App;

/// Render the entire UI.
///
/// `lamps` is the current state of every output channel.
pub fn render(frame: &mut Frame, app: &App, lamps: &[(ChannelId, LineState)]) {
    const MESSAGE_HEIGHT: u16 = 3;
    const PREVIEW_HEIGHT: u16 = 3;
    const INDICATOR_HEIGHT: u16 = 3;
    const KEYBOARD_MIN_HEIGHT: u16 = 7;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(MESSAGE_HEIGHT),
            Constraint::Length(PREVIEW_HEIGHT),
            Constraint::Length(INDICATOR_HEIGHT),
            Constraint::Min(KEYBOARD_MIN_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [message_area, preview_area, indicator_area, keyboard_area, status_area] = chunks.as_ref()
    else {
        return;
    };

    message::render(frame, app, *message_area);
    message::render_preview(frame, app, *preview_area);
    indicator::render(frame, app, lamps, *indicator_area);
    keyboard::render(frame, app, *keyboard_area);
    status::render(frame, app, *status_area);
}

/// Terminal color for an indicator color.
fn color_of(color: IndicatorColor) -> Color {
    match color {
        IndicatorColor::Yellow => Color::Yellow,
        IndicatorColor::Blue => Color::Blue,
        IndicatorColor::Red => Color::Red,
        IndicatorColor::Orange => Color::Rgb(255, 140, 0),
        IndicatorColor::Pink => Color::Rgb(255, 105, 180),
        IndicatorColor::Purple => Color::Magenta,
        IndicatorColor::Green => Color::Green,
    }
}

#[cfg(test)]
mod tests {
    use morsekey_app::{AppEvent, KeyInput};
    use morsekey_core::sink::DEFAULT_CHANNELS;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn rendered(app: &App, lamps: &[(ChannelId, LineState)]) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).expect("test backend");
        terminal.draw(|frame| render(frame, app, lamps)).expect("draw");

        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn dark_lamps() -> Vec<(ChannelId, LineState)> {
        DEFAULT_CHANNELS.iter().map(|&c| (c, LineState::Off)).collect()
    }

    #[test]
    fn shows_message_with_cursor_and_counter() {
        let mut app = App::default();
        for c in "sos".chars() {
            let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
        }

        let screen = rendered(&app, &dark_lamps());

        assert!(screen.contains("sos_"), "{screen}");
        assert!(screen.contains("3/12"), "{screen}");
        assert!(screen.contains("... --- ..."), "{screen}");
    }

    #[test]
    fn shows_every_lamp() {
        let screen = rendered(&App::default(), &dark_lamps());

        for channel in DEFAULT_CHANNELS {
            assert!(screen.contains(&channel.to_string()), "{screen}");
        }
    }

    #[test]
    fn shift_relabels_keyboard() {
        let mut app = App::default();
        assert!(rendered(&app, &dark_lamps()).contains("[q]"));

        let _ = app.handle(AppEvent::Key(KeyInput::Tab));
        let screen = rendered(&app, &dark_lamps());
        assert!(screen.contains("[Q]"), "{screen}");
        assert!(screen.contains("SHIFT"), "{screen}");
    }

    #[test]
    fn keyboard_title_explains_shift() {
        let screen = rendered(&App::default(), &dark_lamps());

        assert!(screen.contains("Tab: shift, Shift key ignored"), "{screen}");
    }
}
