//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (Keyboard, Resize) and system ticks.
//! - Transmission notifications from the supervisor and the session
//!   indicator.

use std::time::Duration;

use morsekey_core::{
    EncodeError, Marker, PulseKind, SessionId, SessionReport, SupersedeOutcome,
};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// A submit was accepted and a session started.
    Submitted {
        /// Message as submitted.
        message: String,
        /// New session.
        session: SessionId,
        /// Its channel and color.
        marker: Marker,
        /// Nominal playback time.
        duration: Duration,
        /// What happened to the session it replaced.
        superseded: Option<SupersedeOutcome>,
    },

    /// A submit was refused because the message cannot be encoded.
    SubmitRejected {
        /// Encoder failure.
        error: EncodeError,
    },

    /// A session began emitting.
    SessionStarted {
        /// Session number.
        session: SessionId,
        /// Its channel and color.
        marker: Marker,
    },

    /// A session drove its line.
    Pulse {
        /// Session that wrote.
        session: SessionId,
        /// Symbol kind.
        kind: PulseKind,
        /// True for a mark.
        active: bool,
    },

    /// A session worker finished and was reaped.
    SessionFinished {
        /// Terminal summary.
        report: SessionReport,
    },
}
