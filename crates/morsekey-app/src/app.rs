//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! interactive state of the keyboard completely decoupled from terminal I/O
//! and transmission timing.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Edits the message buffer through the shifted keyboard layout.
//! - Mirrors the running session on the indicator LED.
//! - Keeps a one-line status for user feedback.

use morsekey_core::{
    EncodeError, EncodedSequence, InputBuffer, SessionState, SupersedeOutcome, encode,
};

use crate::{AppAction, AppEvent, KeyInput, Keyboard, Layer, Led, Transmission};

/// Application settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// Clear the message buffer once a submit is accepted.
    pub clear_on_submit: bool,
}

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a terminal.
#[derive(Debug, Clone)]
pub struct App {
    config: AppConfig,
    /// Message being composed.
    buffer: InputBuffer,
    /// Shift state, toggled by Tab.
    shift: bool,
    /// Indicator LED.
    led: Led,
    /// Most recent transmission. `None` before the first submit.
    transmission: Option<Transmission>,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl App {
    /// Create a new App.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            buffer: InputBuffer::new(),
            shift: false,
            led: Led::default(),
            transmission: None,
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Submitted { message, session, marker, duration, superseded } => {
                if self.config.clear_on_submit && self.buffer.as_str() == message {
                    self.buffer.clear();
                }
                let mut status = format!(
                    "Sending {session} on {} ({}), {:.1}s",
                    marker.channel,
                    marker.color,
                    duration.as_secs_f64()
                );
                if let Some(SupersedeOutcome::TimedOut { id }) = superseded {
                    status.push_str(&format!(", {id} did not stop in time"));
                }
                self.status_message = Some(status);
                self.transmission =
                    Some(Transmission { session, marker, message, state: SessionState::Idle });
                vec![AppAction::Render]
            },
            AppEvent::SubmitRejected { error } => {
                self.status_message = Some(Self::describe(&error));
                vec![AppAction::Render]
            },
            AppEvent::SessionStarted { session, marker } => {
                self.led = Led { color: marker.color, lit: false };
                if let Some(tx) = self.transmission.as_mut().filter(|tx| tx.session == session) {
                    tx.state = SessionState::Emitting;
                }
                vec![AppAction::Render]
            },
            AppEvent::Pulse { session, active, .. } => {
                if self.transmission.as_ref().is_none_or(|tx| tx.session != session) {
                    tracing::trace!(%session, "pulse from superseded session");
                    return vec![];
                }
                self.led.lit = active;
                vec![AppAction::Render]
            },
            AppEvent::SessionFinished { report } => {
                let Some(tx) = self.transmission.as_mut().filter(|tx| tx.session == report.id)
                else {
                    return vec![];
                };
                tx.state = report.state;
                self.led.lit = false;
                self.status_message = Some(match report.state {
                    SessionState::Completed => format!("Sent {}", report.id),
                    SessionState::Cancelled => format!("Stopped {}", report.id),
                    SessionState::Faulted => format!("Output fault during {}", report.id),
                    SessionState::Idle | SessionState::Emitting => return vec![],
                });
                vec![AppAction::Render]
            },
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Char(typed) => {
                let Some(character) = Keyboard::resolve(self.shift, typed) else {
                    tracing::debug!(?typed, shift = self.shift, "key ignored");
                    return vec![];
                };
                if !self.buffer.append(character) {
                    self.status_message =
                        Some(format!("Message full ({} characters)", InputBuffer::MAX_LEN));
                } else if character != typed {
                    self.status_message =
                        Some(format!("Typed {typed:?} as {character:?}, Tab toggles shift"));
                }
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                self.buffer.backspace();
                vec![AppAction::Render]
            },
            KeyInput::Tab => {
                self.shift = !self.shift;
                vec![AppAction::Render]
            },
            KeyInput::Enter => self.submit(),
            KeyInput::Esc => self.cancel(),
            KeyInput::Quit => self.quit(),
        }
    }

    /// Submit the current buffer content.
    pub fn submit(&mut self) -> Vec<AppAction> {
        if self.buffer.is_empty() {
            self.status_message = Some("Nothing to send".into());
            return vec![AppAction::Render];
        }
        vec![AppAction::Submit { message: self.buffer.finalize() }, AppAction::Render]
    }

    /// Stop the running transmission, if any.
    pub fn cancel(&mut self) -> Vec<AppAction> {
        if self.is_transmitting() {
            vec![AppAction::CancelTransmission, AppAction::Render]
        } else {
            vec![]
        }
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    fn describe(error: &EncodeError) -> String {
        match error {
            EncodeError::UnknownSymbol { character, .. } => {
                format!("Cannot send {character:?}: no Morse code")
            },
        }
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Settings.
    pub fn config(&self) -> AppConfig {
        self.config
    }

    /// Message buffer.
    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    /// Encoding of the current buffer, if it has one.
    pub fn preview(&self) -> Option<EncodedSequence> {
        encode(self.buffer.as_str()).ok()
    }

    /// Current shift state.
    pub fn shift(&self) -> bool {
        self.shift
    }

    /// Keyboard layer selected by the shift state.
    pub fn layer(&self) -> Layer {
        Layer::from_shift(self.shift)
    }

    /// Indicator LED.
    pub fn led(&self) -> Led {
        self.led
    }

    /// Most recent transmission.
    pub fn transmission(&self) -> Option<&Transmission> {
        self.transmission.as_ref()
    }

    /// True while the most recent transmission has not finished.
    pub fn is_transmitting(&self) -> bool {
        self.transmission.as_ref().is_some_and(Transmission::is_running)
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
