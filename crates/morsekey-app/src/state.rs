//! Observable application state types.
//!
//! View model for the front end: what the indicator LED shows and what the
//! most recent transmission is doing.

use morsekey_core::{IndicatorColor, Marker, SessionId, SessionState};

/// Indicator LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Led {
    /// Color of the session that last started.
    pub color: IndicatorColor,
    /// True while a mark is being sent.
    pub lit: bool,
}

/// Most recently submitted transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    /// Session number.
    pub session: SessionId,
    /// Channel and color it emits on.
    pub marker: Marker,
    /// Message being sent.
    pub message: String,
    /// Last known lifecycle state.
    pub state: SessionState,
}

impl Transmission {
    /// True until the session reports a terminal state.
    pub fn is_running(&self) -> bool {
        !self.state.is_terminal()
    }
}
