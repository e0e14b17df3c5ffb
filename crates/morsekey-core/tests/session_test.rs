//! Transmission session behavior against a recording sink.
//!
//! All tests run on tokio's paused clock, so recorded transition timestamps
//! are exact and hold durations can be compared with `Timing` directly.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use morsekey_core::{
    ChannelId, Indicator, IndicatorColor, LineState, Marker, MemorySink, Ownership, PulseKind,
    Session, SessionId, SessionState, SinkArbiter, Symbol, SystemEnv, Timing, encode,
    sink::DEFAULT_CHANNELS,
};

const UNIT: Duration = Duration::from_millis(60);
const MARKER: Marker = Marker { channel: ChannelId(7), color: IndicatorColor::Red };

fn arbiter(sink: &MemorySink) -> Arc<SinkArbiter> {
    Arc::new(SinkArbiter::new(
        Arc::new(sink.clone()),
        DEFAULT_CHANNELS.to_vec(),
        Ownership::Exclusive,
    ))
}

fn session(message: &str, timing: Timing, sink: &MemorySink) -> Session<SystemEnv> {
    let sequence = encode(message).expect("encodable");
    Session::new(SessionId(1), sequence, timing, MARKER, arbiter(sink), SystemEnv::new())
}

#[derive(Default)]
struct RecordingIndicator {
    started: Mutex<Vec<(SessionId, Marker)>>,
    pulses: Mutex<Vec<(PulseKind, bool)>>,
}

impl Indicator for RecordingIndicator {
    fn on_session_start(&self, session: SessionId, marker: Marker) {
        self.started.lock().expect("lock").push((session, marker));
    }

    fn on_symbol(&self, session: SessionId, kind: PulseKind, active: bool) {
        assert_eq!(session, SessionId(1));
        self.pulses.lock().expect("lock").push((kind, active));
    }
}

#[tokio::test(start_paused = true)]
async fn sos_drives_one_write_per_symbol() {
    let sink = MemorySink::new();
    let sequence = encode("SOS").expect("encodable");
    let expected: Vec<LineState> = sequence
        .iter()
        .map(|s| if s.is_mark() { LineState::On } else { LineState::Off })
        .chain([LineState::Off])
        .collect();

    let report = session("SOS", Timing::with_unit(UNIT), &sink).run().await;

    assert_eq!(report.state, SessionState::Completed);
    assert_eq!(report.symbols_emitted, 17);

    // Three resets, then the session's own channel only.
    let transitions = sink.transitions();
    assert_eq!(transitions.len(), DEFAULT_CHANNELS.len() + expected.len());
    assert!(transitions[..3].iter().all(|t| t.state == LineState::Off));
    let played: Vec<_> = transitions[3..].iter().map(|t| t.state).collect();
    assert_eq!(played, expected);
    assert!(transitions[3..].iter().all(|t| t.channel == MARKER.channel));
    assert!(!sink.any_on());
}

#[tokio::test(start_paused = true)]
async fn holds_match_timing() {
    let sink = MemorySink::new();
    let timing = Timing::with_unit(UNIT);
    let sequence = encode("PARIS").expect("encodable");

    session("PARIS", timing, &sink).run().await;

    let played = &sink.transitions()[3..];
    for (symbol, pair) in sequence.iter().zip(played.windows(2)) {
        assert_eq!(pair[1].at - pair[0].at, timing.duration(*symbol), "hold after {symbol:?}");
    }
    let total = played[played.len() - 1].at - played[0].at;
    assert_eq!(total, timing.sequence_duration(&sequence));
    assert_eq!(total, UNIT * 43);
}

#[tokio::test(start_paused = true)]
async fn legacy_timing_uses_fixed_holds() {
    let sink = MemorySink::new();

    session("et", Timing::Legacy, &sink).run().await;

    let played = &sink.transitions()[3..];
    let holds: Vec<_> = played.windows(2).map(|w| w[1].at - w[0].at).collect();
    assert_eq!(holds, vec![
        Duration::from_millis(300),
        Duration::from_millis(900),
        Duration::from_millis(1000),
    ]);
}

#[tokio::test(start_paused = true)]
async fn cancelled_before_start_never_turns_on() {
    let sink = MemorySink::new();
    let session = session("SOS", Timing::with_unit(UNIT), &sink);
    session.cancel_token().cancel();

    let report = session.run().await;

    assert_eq!(report.state, SessionState::Cancelled);
    assert_eq!(report.symbols_emitted, 0);
    assert_eq!(sink.count(LineState::On), 0);
    assert!(sink.count(LineState::Off) <= 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_mid_sequence_releases_line() {
    let sink = MemorySink::new();
    let handle = session("HELLO", Timing::with_unit(UNIT), &sink).spawn();

    tokio::time::sleep(UNIT * 5 + Duration::from_millis(10)).await;
    handle.cancel();

    assert_eq!(handle.terminated().await, SessionState::Cancelled);
    let report = handle.join().await.expect("report");
    assert!(report.symbols_emitted > 0);
    assert!(report.symbols_emitted < encode("HELLO").expect("encodable").len());
    assert_eq!(sink.level(MARKER.channel), LineState::Off);
    let last = sink.transitions().last().copied().expect("at least one write");
    assert_eq!(last.state, LineState::Off);
}

#[tokio::test(start_paused = true)]
async fn state_is_published() {
    let sink = MemorySink::new();
    let session = session("E", Timing::with_unit(UNIT), &sink);
    let mut states = session.subscribe();
    assert_eq!(*states.borrow(), SessionState::Idle);

    let handle = session.spawn();
    states.changed().await.expect("sender alive");
    assert_eq!(*states.borrow_and_update(), SessionState::Emitting);
    assert_eq!(handle.state(), SessionState::Emitting);

    assert_eq!(handle.terminated().await, SessionState::Completed);
    assert!(handle.wait_terminal(&SystemEnv::new(), Duration::ZERO).await);
}

#[tokio::test(start_paused = true)]
async fn reset_failure_faults_session() {
    let sink = MemorySink::new();
    sink.fail_channel(ChannelId(13));

    let report = session("SOS", Timing::with_unit(UNIT), &sink).run().await;

    assert_eq!(report.state, SessionState::Faulted);
    assert_eq!(report.symbols_emitted, 0);
    assert_eq!(sink.count(LineState::On), 0);
}

#[tokio::test(start_paused = true)]
async fn write_failure_mid_sequence_faults_session() {
    let sink = MemorySink::new();
    let handle = session("TTT", Timing::with_unit(UNIT), &sink).spawn();

    tokio::time::sleep(UNIT).await;
    sink.fail_channel(MARKER.channel);

    assert_eq!(handle.terminated().await, SessionState::Faulted);
    assert_eq!(sink.level(MARKER.channel), LineState::On, "failed channel keeps its last level");
}

#[tokio::test(start_paused = true)]
async fn indicator_mirrors_sink() {
    let sink = MemorySink::new();
    let indicator = Arc::new(RecordingIndicator::default());

    session("AN", Timing::with_unit(UNIT), &sink).with_indicator(indicator.clone()).run().await;

    let started = indicator.started.lock().expect("lock").clone();
    assert_eq!(started, vec![(SessionId(1), MARKER)]);

    let pulses = indicator.pulses.lock().expect("lock").clone();
    let sink_states: Vec<bool> = sink.transitions()[3..].iter().map(|t| t.state.is_on()).collect();
    let indicator_states: Vec<bool> = pulses.iter().map(|(_, active)| *active).collect();
    assert_eq!(indicator_states, sink_states);

    let kinds: Vec<_> = pulses.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(kinds, vec![
        PulseKind::Dot,
        PulseKind::Gap,
        PulseKind::Dash,
        PulseKind::Gap,
        PulseKind::Dash,
        PulseKind::Gap,
        PulseKind::Dot,
        PulseKind::Gap,
    ]);
    assert_eq!(encode("AN").expect("encodable").count(Symbol::InterCharacterGap), 1);
}
