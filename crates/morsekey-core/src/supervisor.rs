//! Single-active-session supervisor.
//!
//! Every [`Supervisor::submit`] encodes the message, asks the running session
//! to stop, waits a bounded time for it, and starts the replacement no matter
//! how the wait ended. A session that does not exit in time keeps running as
//! a straggler; the [`SinkArbiter`] makes sure it can no longer reach the
//! sink in [`Ownership::Exclusive`] mode.

use std::{sync::Arc, time::Duration};

use crate::{
    env::Environment,
    error::EncodeError,
    indicator::{Indicator, Marker, MarkerPicker, RandomPicker},
    morse,
    session::{Session, SessionHandle, SessionId, SessionReport, SessionState},
    sink::{ChannelId, DEFAULT_CHANNELS, Ownership, SignalSink, SinkArbiter},
    timing::Timing,
};

/// Default bound on the wait for a superseded session.
pub const DEFAULT_SUPERSEDE_TIMEOUT: Duration = Duration::from_secs(1);

/// Supervisor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorConfig {
    /// Timing policy for every session.
    pub timing: Timing,
    /// How long `submit` waits for the previous session to stop.
    pub supersede_timeout: Duration,
    /// Channel set to pick from and reset. Empty means the default set.
    pub channels: Vec<ChannelId>,
    /// Whether stragglers may keep writing.
    pub ownership: Ownership,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            timing: Timing::default(),
            supersede_timeout: DEFAULT_SUPERSEDE_TIMEOUT,
            channels: DEFAULT_CHANNELS.to_vec(),
            ownership: Ownership::default(),
        }
    }
}

/// How the previous session left when a new one was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupersedeOutcome {
    /// Reached a terminal state within the timeout.
    Exited {
        /// Superseded session.
        id: SessionId,
        /// State it ended in.
        state: SessionState,
    },
    /// Still running when the timeout elapsed.
    TimedOut {
        /// Superseded session.
        id: SessionId,
    },
}

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    /// Newly started session.
    pub session: SessionId,
    /// Its channel and color.
    pub marker: Marker,
    /// Number of symbols it will play.
    pub symbols: usize,
    /// Nominal playback time.
    pub duration: Duration,
    /// What happened to the session it replaced, if one was running.
    pub superseded: Option<SupersedeOutcome>,
}

/// Keeps at most one transmission session active.
pub struct Supervisor<E: Environment> {
    config: SupervisorConfig,
    env: E,
    arbiter: Arc<SinkArbiter>,
    picker: Box<dyn MarkerPicker>,
    indicator: Option<Arc<dyn Indicator>>,
    active: Option<SessionHandle>,
    stragglers: Vec<SessionHandle>,
    next_id: u64,
}

impl<E: Environment> Supervisor<E> {
    /// Create a supervisor driving `sink`, with a random marker picker.
    pub fn new(mut config: SupervisorConfig, env: E, sink: Arc<dyn SignalSink>) -> Self {
        if config.channels.is_empty() {
            config.channels = DEFAULT_CHANNELS.to_vec();
        }
        let arbiter = Arc::new(SinkArbiter::new(sink, config.channels.clone(), config.ownership));
        Self {
            config,
            env,
            arbiter,
            picker: Box::new(RandomPicker::new()),
            indicator: None,
            active: None,
            stragglers: Vec::new(),
            next_id: 1,
        }
    }

    /// Replace the marker picker.
    #[must_use]
    pub fn with_picker(mut self, picker: impl MarkerPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Attach an indicator handed to every new session.
    #[must_use]
    pub fn with_indicator(mut self, indicator: Arc<dyn Indicator>) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Current settings.
    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// The arbiter guarding the sink.
    pub fn arbiter(&self) -> &Arc<SinkArbiter> {
        &self.arbiter
    }

    /// Most recently started session, if any.
    pub fn active(&self) -> Option<&SessionHandle> {
        self.active.as_ref()
    }

    /// State of the most recently started session.
    pub fn active_state(&self) -> Option<SessionState> {
        self.active.as_ref().map(SessionHandle::state)
    }

    /// True while the most recent session has not reached a terminal state.
    pub fn is_transmitting(&self) -> bool {
        self.active_state().is_some_and(|s| !s.is_terminal())
    }

    /// Superseded sessions whose workers have not been reaped yet.
    pub fn straggler_count(&self) -> usize {
        self.stragglers.len()
    }

    /// Encode `message` and start transmitting it, superseding the running
    /// session.
    ///
    /// # Errors
    ///
    /// [`EncodeError`] if the message contains a character without an
    /// encoding. Nothing is cancelled or started in that case.
    pub async fn submit(&mut self, message: &str) -> Result<SubmitReport, EncodeError> {
        let sequence = morse::encode(message)?;

        let superseded = match self.active.take() {
            Some(previous) => {
                let outcome = self.supersede(&previous).await;
                self.stragglers.push(previous);
                outcome
            },
            None => None,
        };

        let id = SessionId(self.next_id);
        self.next_id += 1;
        let marker = self.picker.pick(&self.config.channels);
        let symbols = sequence.len();
        let duration = self.config.timing.sequence_duration(&sequence);

        let mut session = Session::new(
            id,
            sequence,
            self.config.timing,
            marker,
            Arc::clone(&self.arbiter),
            self.env.clone(),
        );
        if let Some(indicator) = &self.indicator {
            session = session.with_indicator(Arc::clone(indicator));
        }

        tracing::info!(
            session = %id,
            channel = %marker.channel,
            color = %marker.color,
            symbols,
            ?duration,
            "submitted"
        );
        self.active = Some(session.spawn());

        Ok(SubmitReport { session: id, marker, symbols, duration, superseded })
    }

    async fn supersede(&self, previous: &SessionHandle) -> Option<SupersedeOutcome> {
        if previous.state().is_terminal() {
            return None;
        }
        previous.cancel();

        if previous.wait_terminal(&self.env, self.config.supersede_timeout).await {
            let state = previous.state();
            tracing::debug!(session = %previous.id(), ?state, "previous session exited");
            Some(SupersedeOutcome::Exited { id: previous.id(), state })
        } else {
            tracing::warn!(
                session = %previous.id(),
                timeout = ?self.config.supersede_timeout,
                "previous session did not stop in time, superseding"
            );
            Some(SupersedeOutcome::TimedOut { id: previous.id() })
        }
    }

    /// Cancel the running session without starting another.
    ///
    /// Returns `false` if nothing was running.
    pub fn cancel(&self) -> bool {
        match &self.active {
            Some(handle) if !handle.state().is_terminal() => {
                tracing::info!(session = %handle.id(), "cancel requested");
                handle.cancel();
                true
            },
            _ => false,
        }
    }

    /// Collect reports from every finished worker. Never blocks on a running
    /// session.
    pub async fn reap(&mut self) -> Vec<SessionReport> {
        let mut finished = Vec::new();

        let (done, running): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.stragglers).into_iter().partition(SessionHandle::is_finished);
        self.stragglers = running;
        finished.extend(done);

        if self.active.as_ref().is_some_and(SessionHandle::is_finished) {
            finished.extend(self.active.take());
        }

        let mut reports = Vec::with_capacity(finished.len());
        for handle in finished {
            let id = handle.id();
            match handle.join().await {
                Some(report) => reports.push(report),
                None => tracing::warn!(session = %id, "session worker did not return a report"),
            }
        }
        reports
    }

    /// Cancel every session, wait up to the supersede timeout for them, and
    /// force all channels off.
    pub async fn shutdown(mut self) {
        let handles: Vec<_> = self.active.take().into_iter().chain(self.stragglers.drain(..)).collect();

        for handle in &handles {
            handle.cancel();
        }
        for handle in &handles {
            if !handle.wait_terminal(&self.env, self.config.supersede_timeout).await {
                tracing::warn!(session = %handle.id(), "session did not stop, aborting");
                handle.abort();
            }
        }

        if let Err(e) = self.arbiter.force_off() {
            tracing::warn!(error = %e, "failed to release channels on shutdown");
        }
        tracing::info!(sessions = handles.len(), "supervisor shut down");
    }
}

impl<E: Environment> std::fmt::Debug for Supervisor<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("config", &self.config)
            .field("active", &self.active.as_ref().map(SessionHandle::id))
            .field("stragglers", &self.stragglers.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}
