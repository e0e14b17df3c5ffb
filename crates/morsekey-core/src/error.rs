//! Error types for the transmission core.
//!
//! Every error here is local and recoverable. An [`EncodeError`] rejects a
//! submit before any session state changes; a [`SinkError`] ends the session
//! that hit it but never propagates past the supervisor.

use thiserror::Error;

use crate::sink::ChannelId;

/// Errors produced by the Morse encoder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Character is neither a space nor present in the alphabet table.
    #[error("no Morse encoding for {character:?} at position {index}")]
    UnknownSymbol {
        /// Offending character as typed (before case normalization).
        character: char,
        /// Character index within the message.
        index: usize,
    },
}

impl EncodeError {
    /// The character that could not be encoded.
    pub fn character(&self) -> char {
        match self {
            Self::UnknownSymbol { character, .. } => *character,
        }
    }
}

/// Errors reported by a [`crate::SignalSink`] implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// Channel is not wired to any output.
    #[error("channel {channel} is unavailable")]
    Unavailable {
        /// Channel that was addressed.
        channel: ChannelId,
    },
}
