//! Transmission session state machine.
//!
//! A [`Session`] plays one [`EncodedSequence`] onto the sink, one write per
//! symbol boundary, holding for each symbol's duration. It runs on its own
//! tokio task and is controlled from the spawning side through a
//! [`SessionHandle`].
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──► Emitting ──► Completed
//!   │          ├──────► Cancelled
//!   │          └──────► Faulted
//!   └─────────────────► Cancelled   (cancelled before start)
//! ```
//!
//! Cancellation is polled before every symbol, never during a hold. Losing
//! sink ownership to a newer session counts as cancellation.

use std::{fmt, sync::Arc, time::Duration};

use tokio::{sync::watch, task::JoinHandle};

use crate::{
    cancel::CancelToken,
    env::Environment,
    indicator::{Indicator, Marker, PulseKind},
    sink::{LineState, SinkArbiter, WriteOutcome},
    symbol::EncodedSequence,
    timing::Timing,
};

/// Supervisor-assigned session number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Created, not yet started.
    Idle,
    /// Iterating symbols and driving the sink.
    Emitting,
    /// Sequence exhausted, line released.
    Completed,
    /// Cancellation (or loss of ownership) observed.
    Cancelled,
    /// Sink write failed.
    Faulted,
}

impl SessionState {
    /// `Completed`, `Cancelled` and `Faulted` are terminal.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Faulted)
    }
}

/// Summary returned by a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    /// Session number.
    pub id: SessionId,
    /// Channel and color used.
    pub marker: Marker,
    /// Terminal state reached.
    pub state: SessionState,
    /// Symbols whose transition reached the sink.
    pub symbols_emitted: usize,
}

/// One playback of an encoded sequence.
pub struct Session<E: Environment> {
    id: SessionId,
    sequence: EncodedSequence,
    timing: Timing,
    marker: Marker,
    arbiter: Arc<SinkArbiter>,
    indicator: Option<Arc<dyn Indicator>>,
    cancel: CancelToken,
    state: watch::Sender<SessionState>,
    env: E,
}

impl<E: Environment> Session<E> {
    /// Create an idle session.
    pub fn new(
        id: SessionId,
        sequence: EncodedSequence,
        timing: Timing,
        marker: Marker,
        arbiter: Arc<SinkArbiter>,
        env: E,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            id,
            sequence,
            timing,
            marker,
            arbiter,
            indicator: None,
            cancel: CancelToken::new(),
            state,
            env,
        }
    }

    /// Attach an indicator that mirrors every transition.
    #[must_use]
    pub fn with_indicator(mut self, indicator: Arc<dyn Indicator>) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Session number.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Channel and color this session emits on.
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Token that cancels this session.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Receiver for state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Run on a new tokio task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> SessionHandle {
        SessionHandle {
            id: self.id,
            marker: self.marker,
            cancel: self.cancel.clone(),
            state: self.state.subscribe(),
            task: tokio::spawn(self.run()),
        }
    }

    /// Play the sequence to completion, cancellation or fault.
    pub async fn run(self) -> SessionReport {
        if self.cancel.is_cancelled() {
            tracing::debug!(session = %self.id, "cancelled before start");
            return self.finish(SessionState::Cancelled, 0);
        }

        if let Err(e) = self.arbiter.acquire(self.id) {
            tracing::warn!(session = %self.id, error = %e, "sink reset failed");
            return self.finish(SessionState::Faulted, 0);
        }

        self.state.send_replace(SessionState::Emitting);
        if let Some(indicator) = &self.indicator {
            indicator.on_session_start(self.id, self.marker);
        }
        tracing::info!(
            session = %self.id,
            channel = %self.marker.channel,
            color = %self.marker.color,
            symbols = self.sequence.len(),
            "transmission started"
        );

        let started = self.env.now();
        let mut emitted = 0;
        for &symbol in self.sequence.iter() {
            if self.cancel.is_cancelled() || !self.arbiter.holds(self.id) {
                self.release_line();
                return self.finish(SessionState::Cancelled, emitted);
            }

            let level = if symbol.is_mark() { LineState::On } else { LineState::Off };
            match self.arbiter.write(self.id, self.marker.channel, level) {
                Ok(WriteOutcome::Applied) => {},
                Ok(WriteOutcome::Superseded) => {
                    return self.finish(SessionState::Cancelled, emitted);
                },
                Err(e) => {
                    tracing::warn!(session = %self.id, error = %e, "sink write failed");
                    self.release_line();
                    return self.finish(SessionState::Faulted, emitted);
                },
            }
            self.notify(PulseKind::from(symbol), level.is_on());
            emitted += 1;

            let hold = self.timing.duration(symbol);
            tracing::debug!(session = %self.id, ?symbol, ?hold, "symbol");
            self.env.sleep(hold).await;
        }

        let elapsed = self.env.now() - started;
        tracing::debug!(session = %self.id, ?elapsed, "sequence played");
        match self.arbiter.write(self.id, self.marker.channel, LineState::Off) {
            Ok(_) => {
                self.notify(PulseKind::Gap, false);
                self.finish(SessionState::Completed, emitted)
            },
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "final release failed");
                self.finish(SessionState::Faulted, emitted)
            },
        }
    }

    /// Best-effort release of the session's own channel.
    fn release_line(&self) {
        match self.arbiter.write(self.id, self.marker.channel, LineState::Off) {
            Ok(WriteOutcome::Applied) => self.notify(PulseKind::Gap, false),
            Ok(WriteOutcome::Superseded) => {},
            Err(e) => tracing::warn!(session = %self.id, error = %e, "release failed"),
        }
    }

    fn notify(&self, kind: PulseKind, active: bool) {
        if let Some(indicator) = &self.indicator {
            indicator.on_symbol(self.id, kind, active);
        }
    }

    fn finish(&self, state: SessionState, symbols_emitted: usize) -> SessionReport {
        self.arbiter.release(self.id);
        self.state.send_replace(state);
        tracing::info!(session = %self.id, ?state, symbols_emitted, "transmission finished");
        SessionReport { id: self.id, marker: self.marker, state, symbols_emitted }
    }
}

impl<E: Environment> fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("marker", &self.marker)
            .field("symbols", &self.sequence.len())
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Spawning side's handle to a running session.
#[derive(Debug)]
pub struct SessionHandle {
    id: SessionId,
    marker: Marker,
    cancel: CancelToken,
    state: watch::Receiver<SessionState>,
    task: JoinHandle<SessionReport>,
}

impl SessionHandle {
    /// Session number.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Channel and color the session emits on.
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Latest published state.
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Request cooperative cancellation.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the worker task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Resolves once the session reaches a terminal state.
    ///
    /// Also resolves if the worker exits without publishing one, returning
    /// the last state it did publish.
    pub async fn terminated(&self) -> SessionState {
        let mut rx = self.state.clone();
        let reached = rx.wait_for(SessionState::is_terminal).await.map(|state| *state);
        reached.unwrap_or_else(|_| *rx.borrow())
    }

    /// Wait up to `timeout` for a terminal state. Returns `false` on timeout.
    pub async fn wait_terminal<E: Environment>(&self, env: &E, timeout: Duration) -> bool {
        tokio::select! {
            biased;
            _ = self.terminated() => true,
            () = env.sleep(timeout) => false,
        }
    }

    /// Stop the worker without waiting for a symbol boundary.
    ///
    /// The line may be left on; follow with [`SinkArbiter::force_off`].
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait for the worker and take its report.
    ///
    /// `None` if the worker was aborted or panicked.
    pub async fn join(self) -> Option<SessionReport> {
        self.task.await.ok()
    }
}
