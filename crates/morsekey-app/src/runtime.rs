//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Supervisor`]: transmission sessions
//! - [`Driver`]: Platform-specific I/O
//!
//! Session indicator callbacks arrive on an unbounded channel so the session
//! worker never waits on the UI.

use std::sync::Arc;

use morsekey_core::{Environment, Indicator, Marker, PulseKind, SessionId, Supervisor};
use tokio::sync::mpsc;

use crate::{App, AppAction, AppEvent, Driver};

/// Indicator that forwards session callbacks to the runtime as events.
#[derive(Debug, Clone)]
pub struct ChannelIndicator {
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl ChannelIndicator {
    /// Forward callbacks into `tx`.
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }

    fn forward(&self, event: AppEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("runtime gone, indicator event dropped");
        }
    }
}

impl Indicator for ChannelIndicator {
    fn on_session_start(&self, session: SessionId, marker: Marker) {
        self.forward(AppEvent::SessionStarted { session, marker });
    }

    fn on_symbol(&self, session: SessionId, kind: PulseKind, active: bool) {
        self.forward(AppEvent::Pulse { session, kind, active });
    }
}

/// Generic runtime that orchestrates App, Supervisor, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `E`: Environment for session timing
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    app: App,
    supervisor: Supervisor<E>,
    indicator_events: mpsc::UnboundedReceiver<AppEvent>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    /// Create a runtime. The supervisor's indicator is replaced with one that
    /// feeds the App.
    pub fn new(driver: D, app: App, supervisor: Supervisor<E>) -> Self {
        let (tx, indicator_events) = mpsc::unbounded_channel();
        let supervisor = supervisor.with_indicator(Arc::new(ChannelIndicator::new(tx)));
        Self { driver, app, supervisor, indicator_events }
    }

    /// Run the main event loop until the App asks to quit.
    ///
    /// On exit every session is cancelled and all channels are forced off,
    /// also when the driver failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let result = self.event_loop().await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "driver failed");
        }

        self.supervisor.shutdown().await;
        self.driver.stop();
        result
    }

    async fn event_loop(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;
        loop {
            if self.process_cycle().await? {
                return Ok(());
            }
        }
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let event = tokio::select! {
            biased;

            Some(event) = self.indicator_events.recv() => Some(event),
            polled = self.driver.poll_event() => polled?,
        };

        if let Some(event) = event {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        // Drain before reaping so a finished session's last pulse is not
        // applied after its report.
        while let Ok(event) = self.indicator_events.try_recv() {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        for report in self.supervisor.reap().await {
            let actions = self.app.handle(AppEvent::SessionFinished { report });
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Submit { message } => {
                        let event = match self.supervisor.submit(&message).await {
                            Ok(report) => AppEvent::Submitted {
                                message,
                                session: report.session,
                                marker: report.marker,
                                duration: report.duration,
                                superseded: report.superseded,
                            },
                            Err(error) => {
                                tracing::info!(%error, "submit rejected");
                                AppEvent::SubmitRejected { error }
                            },
                        };
                        pending_actions.extend(self.app.handle(event));
                    },
                    AppAction::CancelTransmission => {
                        self.supervisor.cancel();
                    },
                }
            }
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Get a reference to the Supervisor
    pub fn supervisor(&self) -> &Supervisor<E> {
        &self.supervisor
    }
}
