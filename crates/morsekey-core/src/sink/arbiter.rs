use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{ChannelId, LineState, SignalSink};
use crate::{error::SinkError, session::SessionId};

/// How the arbiter treats writes from sessions that lost ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    /// Only the current owner may write; everything else is discarded.
    #[default]
    Exclusive,
    /// Every session may write. A straggler that ignores cancellation keeps
    /// driving the line alongside its successor.
    Shared,
}

/// Result of an arbitrated write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Write reached the sink.
    Applied,
    /// Writer no longer owns the sink; nothing was written.
    Superseded,
}

/// Ownership token holder for a shared [`SignalSink`].
///
/// A session acquires the sink when it begins emitting. Acquisition and the
/// all-channels-off reset happen under one lock, and every write checks the
/// owner under that same lock, so a superseded session can never turn a line
/// on after its successor reset it.
///
/// The lock is only held for the synchronous sink call, never across a hold.
pub struct SinkArbiter {
    sink: Arc<dyn SignalSink>,
    channels: Vec<ChannelId>,
    ownership: Ownership,
    owner: Mutex<Option<SessionId>>,
}

impl SinkArbiter {
    /// Wrap `sink`, managing the given channel set.
    pub fn new(sink: Arc<dyn SignalSink>, channels: Vec<ChannelId>, ownership: Ownership) -> Self {
        Self { sink, channels, ownership, owner: Mutex::new(None) }
    }

    fn lock(&self) -> MutexGuard<'_, Option<SessionId>> {
        self.owner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Managed channels.
    pub fn channels(&self) -> &[ChannelId] {
        &self.channels
    }

    /// Ownership mode.
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Session currently holding the sink.
    pub fn owner(&self) -> Option<SessionId> {
        *self.lock()
    }

    /// Whether `session` may still write.
    ///
    /// Always true in [`Ownership::Shared`] mode.
    pub fn holds(&self, session: SessionId) -> bool {
        match self.ownership {
            Ownership::Shared => true,
            Ownership::Exclusive => *self.lock() == Some(session),
        }
    }

    /// Make `session` the owner and force every managed channel off.
    ///
    /// All channels are written even if one fails; the first error is
    /// returned.
    pub fn acquire(&self, session: SessionId) -> Result<(), SinkError> {
        let mut owner = self.lock();
        if let Some(previous) = owner.replace(session) {
            tracing::debug!(%session, %previous, "sink ownership handed over");
        }
        self.reset_locked()
    }

    /// Write through the arbiter on behalf of `session`.
    pub fn write(
        &self,
        session: SessionId,
        channel: ChannelId,
        state: LineState,
    ) -> Result<WriteOutcome, SinkError> {
        let owner = self.lock();
        if self.ownership == Ownership::Exclusive && *owner != Some(session) {
            tracing::trace!(%session, %channel, ?state, "write from superseded session dropped");
            return Ok(WriteOutcome::Superseded);
        }
        self.sink.set_channel_state(channel, state)?;
        Ok(WriteOutcome::Applied)
    }

    /// Give up ownership if `session` still holds it.
    pub fn release(&self, session: SessionId) {
        let mut owner = self.lock();
        if *owner == Some(session) {
            *owner = None;
        }
    }

    /// Drop any owner and force every managed channel off.
    pub fn force_off(&self) -> Result<(), SinkError> {
        let mut owner = self.lock();
        *owner = None;
        self.reset_locked()
    }

    fn reset_locked(&self) -> Result<(), SinkError> {
        let mut first_error = None;
        for &channel in &self.channels {
            if let Err(e) = self.sink.set_channel_state(channel, LineState::Off) {
                tracing::warn!(%channel, error = %e, "failed to reset channel");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl std::fmt::Debug for SinkArbiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkArbiter")
            .field("channels", &self.channels)
            .field("ownership", &self.ownership)
            .field("owner", &self.owner())
            .finish_non_exhaustive()
    }
}
