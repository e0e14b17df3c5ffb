//! Signal sink abstraction.
//!
//! The core only knows output lines as numbered channels that can be set
//! [`LineState::On`] or [`LineState::Off`]. How a channel is realized (GPIO
//! pin, simulated lamp, log line) is up to the [`SignalSink`] implementation.
//!
//! Sessions never touch a sink directly; every write goes through the
//! [`SinkArbiter`], which decides whether the writing session still owns the
//! line.

mod arbiter;
mod memory;

use std::fmt;

pub use arbiter::{Ownership, SinkArbiter, WriteOutcome};
pub use memory::{MemorySink, Transition};

use crate::error::SinkError;

/// Output channel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChannelId(pub u8);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.0)
    }
}

/// Default channel set: board pins 7, 11 and 13.
pub const DEFAULT_CHANNELS: [ChannelId; 3] = [ChannelId(7), ChannelId(11), ChannelId(13)];

/// Level of an output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineState {
    /// Line driven high (mark).
    On,
    /// Line released (gap / idle).
    #[default]
    Off,
}

impl LineState {
    /// True for [`LineState::On`].
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Destination for on/off transitions.
///
/// A write must take effect before it returns; the session starts its hold
/// right after.
pub trait SignalSink: Send + Sync {
    /// Drive `channel` to `state`.
    fn set_channel_state(&self, channel: ChannelId, state: LineState) -> Result<(), SinkError>;
}

/// Sink that only logs transitions.
///
/// Useful when no output hardware is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl SignalSink for TracingSink {
    fn set_channel_state(&self, channel: ChannelId, state: LineState) -> Result<(), SinkError> {
        tracing::trace!(%channel, ?state, "line transition");
        Ok(())
    }
}
