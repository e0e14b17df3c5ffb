//! Simulated channel lamps.
//!
//! Stands in for the GPIO lines: each configured channel is a lamp that the
//! UI draws lit or dark. Writes to channels outside the panel are refused,
//! the way a missing pin would be.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use morsekey_core::{ChannelId, LineState, SignalSink, SinkError};

/// Shared lamp state, written by sessions and read by the renderer.
#[derive(Debug, Clone, Default)]
pub struct LampPanel {
    lamps: Arc<Mutex<BTreeMap<ChannelId, LineState>>>,
}

impl LampPanel {
    /// Panel with one dark lamp per channel.
    pub fn new(channels: &[ChannelId]) -> Self {
        let lamps = channels.iter().map(|&c| (c, LineState::Off)).collect();
        Self { lamps: Arc::new(Mutex::new(lamps)) }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<ChannelId, LineState>> {
        self.lamps.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current lamp states, ordered by channel.
    pub fn snapshot(&self) -> Vec<(ChannelId, LineState)> {
        self.lock().iter().map(|(c, s)| (*c, *s)).collect()
    }
}

impl SignalSink for LampPanel {
    fn set_channel_state(&self, channel: ChannelId, state: LineState) -> Result<(), SinkError> {
        let mut lamps = self.lock();
        let lamp = lamps.get_mut(&channel).ok_or(SinkError::Unavailable { channel })?;
        *lamp = state;
        tracing::trace!(%channel, ?state, "lamp");
        Ok(())
    }
}
