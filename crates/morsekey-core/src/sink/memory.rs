use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tokio::time::Instant;

use super::{ChannelId, LineState, SignalSink};
use crate::error::SinkError;

/// One recorded write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Channel written.
    pub channel: ChannelId,
    /// State written.
    pub state: LineState,
    /// Clock reading at the time of the write (honours a paused clock).
    pub at: Instant,
}

/// In-memory sink for testing and simulation
///
/// Records every write in order and tracks the current level per channel.
/// Clones share the same record. Channels can be marked as failing to
/// exercise the fault path.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<MemorySinkInner>>,
}

#[derive(Debug, Default)]
struct MemorySinkInner {
    transitions: Vec<Transition>,
    levels: HashMap<ChannelId, LineState>,
    failing: HashSet<ChannelId>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemorySinkInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every later write to `channel` fail.
    pub fn fail_channel(&self, channel: ChannelId) {
        self.lock().failing.insert(channel);
    }

    /// All writes so far, in order.
    pub fn transitions(&self) -> Vec<Transition> {
        self.lock().transitions.clone()
    }

    /// Writes to a single channel, in order.
    pub fn transitions_on(&self, channel: ChannelId) -> Vec<Transition> {
        self.lock().transitions.iter().filter(|t| t.channel == channel).copied().collect()
    }

    /// Number of writes with the given state.
    pub fn count(&self, state: LineState) -> usize {
        self.lock().transitions.iter().filter(|t| t.state == state).count()
    }

    /// Current level of `channel` (`Off` if never written).
    pub fn level(&self, channel: ChannelId) -> LineState {
        self.lock().levels.get(&channel).copied().unwrap_or_default()
    }

    /// True if any channel is currently on.
    pub fn any_on(&self) -> bool {
        self.lock().levels.values().any(|l| l.is_on())
    }

    /// Forget recorded writes, keeping levels.
    pub fn clear_history(&self) {
        self.lock().transitions.clear();
    }
}

impl SignalSink for MemorySink {
    fn set_channel_state(&self, channel: ChannelId, state: LineState) -> Result<(), SinkError> {
        let mut inner = self.lock();
        if inner.failing.contains(&channel) {
            return Err(SinkError::Unavailable { channel });
        }
        inner.transitions.push(Transition { channel, state, at: Instant::now() });
        inner.levels.insert(channel, state);
        Ok(())
    }
}
