//! Supersede protocol tests.
//!
//! A very long unit keeps the first session parked inside a single hold, so
//! it cannot observe cancellation before the supersede timeout elapses.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use morsekey_core::{
    ChannelId, Indicator, IndicatorColor, LineState, Marker, MarkerPicker, MemorySink, Ownership,
    PulseKind, SessionId, SessionState, SupersedeOutcome, Supervisor, SupervisorConfig, SystemEnv,
    Timing,
};
use tokio::time::Instant;

const OLD: ChannelId = ChannelId(7);
const NEW: ChannelId = ChannelId(11);

/// Hands out channels in order, cycling.
struct CyclePicker {
    channels: Vec<ChannelId>,
    next: usize,
}

impl CyclePicker {
    fn new(channels: &[ChannelId]) -> Self {
        Self { channels: channels.to_vec(), next: 0 }
    }
}

impl MarkerPicker for CyclePicker {
    fn pick(&mut self, _channels: &[ChannelId]) -> Marker {
        let channel = self.channels[self.next % self.channels.len()];
        self.next += 1;
        Marker { channel, color: IndicatorColor::Purple }
    }
}

#[derive(Default)]
struct PulseLog(Mutex<Vec<(SessionId, bool)>>);

impl Indicator for PulseLog {
    fn on_symbol(&self, session: SessionId, _kind: PulseKind, active: bool) {
        self.0.lock().expect("lock").push((session, active));
    }
}

fn supervisor(sink: &MemorySink, config: SupervisorConfig) -> Supervisor<SystemEnv> {
    Supervisor::new(config, SystemEnv::new(), Arc::new(sink.clone()))
        .with_picker(CyclePicker::new(&[OLD, NEW]))
}

fn slow_config(ownership: Ownership) -> SupervisorConfig {
    SupervisorConfig {
        timing: Timing::with_unit(Duration::from_secs(10)),
        supersede_timeout: Duration::from_secs(1),
        ownership,
        ..SupervisorConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn new_session_runs_while_old_one_is_stuck_in_hold() {
    let sink = MemorySink::new();
    let mut supervisor = supervisor(&sink, slow_config(Ownership::Exclusive));

    supervisor.submit("T").await.expect("encodable");
    tokio::task::yield_now().await;
    assert_eq!(sink.level(OLD), LineState::On);

    let report = supervisor.submit("E").await.expect("encodable");
    tokio::task::yield_now().await;

    assert_eq!(report.superseded, Some(SupersedeOutcome::TimedOut { id: SessionId(1) }));
    assert_eq!(supervisor.straggler_count(), 1);
    assert_eq!(sink.level(OLD), LineState::Off, "reset on acquire");
    assert_eq!(sink.level(NEW), LineState::On, "new session reached the sink");
}

#[tokio::test(start_paused = true)]
async fn exclusive_mode_silences_straggler() {
    let sink = MemorySink::new();
    let mut supervisor = supervisor(&sink, slow_config(Ownership::Exclusive));

    supervisor.submit("T").await.expect("encodable");
    tokio::task::yield_now().await;
    supervisor.submit("E").await.expect("encodable");
    let handover = Instant::now();

    tokio::time::sleep(Duration::from_secs(60)).await;
    let mut reports = supervisor.reap().await;
    reports.sort_by_key(|r| r.id);

    let late: Vec<_> = sink.transitions_on(OLD).into_iter().filter(|t| t.at > handover).collect();
    assert!(late.is_empty(), "straggler wrote after handover: {late:?}");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].state, SessionState::Cancelled);
    assert_eq!(reports[1].state, SessionState::Completed);
    assert!(!sink.any_on());
}

#[tokio::test(start_paused = true)]
async fn shared_mode_lets_straggler_release_its_line() {
    let sink = MemorySink::new();
    let mut supervisor = supervisor(&sink, slow_config(Ownership::Shared));

    supervisor.submit("T").await.expect("encodable");
    tokio::task::yield_now().await;
    supervisor.submit("E").await.expect("encodable");
    let handover = Instant::now();

    tokio::time::sleep(Duration::from_secs(60)).await;
    supervisor.reap().await;

    let late: Vec<_> = sink
        .transitions_on(OLD)
        .into_iter()
        .filter(|t| t.at > handover)
        .map(|t| t.state)
        .collect();
    assert_eq!(late, vec![LineState::Off]);
}

#[tokio::test(start_paused = true)]
async fn prompt_session_exits_within_timeout() {
    let sink = MemorySink::new();
    let mut supervisor = supervisor(&sink, SupervisorConfig::default());

    supervisor.submit("SOS").await.expect("encodable");
    tokio::time::sleep(Duration::from_millis(100)).await;
    let report = supervisor.submit("E").await.expect("encodable");

    assert_eq!(
        report.superseded,
        Some(SupersedeOutcome::Exited { id: SessionId(1), state: SessionState::Cancelled })
    );
    assert_eq!(report.session, SessionId(2));
}

#[tokio::test(start_paused = true)]
async fn finished_session_is_not_superseded() {
    let sink = MemorySink::new();
    let mut supervisor = supervisor(&sink, SupervisorConfig::default());

    supervisor.submit("E").await.expect("encodable");
    tokio::time::sleep(Duration::from_secs(1)).await;
    let report = supervisor.submit("E").await.expect("encodable");

    assert_eq!(report.superseded, None);
}

#[tokio::test(start_paused = true)]
async fn unknown_symbol_starts_nothing() {
    let sink = MemorySink::new();
    let mut supervisor = supervisor(&sink, SupervisorConfig::default());

    let err = supervisor.submit("hi§").await.expect_err("not encodable");

    assert_eq!(err.to_string(), "no Morse encoding for '§' at position 2");
    assert!(supervisor.active().is_none());
    assert!(sink.transitions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn shutdown_forces_every_line_off() {
    let sink = MemorySink::new();
    let mut supervisor = supervisor(&sink, slow_config(Ownership::Shared));

    supervisor.submit("T").await.expect("encodable");
    tokio::task::yield_now().await;
    supervisor.submit("T").await.expect("encodable");
    tokio::task::yield_now().await;
    assert!(sink.any_on());

    supervisor.shutdown().await;

    assert!(!sink.any_on());
    for channel in [ChannelId(7), ChannelId(11), ChannelId(13)] {
        assert_eq!(sink.level(channel), LineState::Off);
    }
}

#[tokio::test(start_paused = true)]
async fn straggler_pulses_carry_their_own_session() {
    let sink = MemorySink::new();
    let log = Arc::new(PulseLog::default());
    let mut supervisor =
        supervisor(&sink, slow_config(Ownership::Shared)).with_indicator(log.clone());

    supervisor.submit("T").await.expect("encodable");
    tokio::task::yield_now().await;
    supervisor.submit("T").await.expect("encodable");

    tokio::time::sleep(Duration::from_secs(60)).await;
    supervisor.reap().await;

    let pulses = log.0.lock().expect("lock").clone();
    assert_eq!(pulses, vec![
        (SessionId(1), true),
        (SessionId(2), true),
        (SessionId(1), false),
        (SessionId(2), false),
    ]);
}
