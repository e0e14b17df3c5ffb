//! Environment abstraction for deterministic timing.
//!
//! Decouples session logic from the clock. Sessions only ever hold through
//! [`Environment::sleep`], so tests can run whole transmissions against
//! tokio's paused clock and production uses the real one.

use std::time::Duration;

/// Abstract environment providing time and holds.
///
/// # Invariants
///
/// - `now()` never goes backwards
/// - `sleep(d)` resolves no earlier than `d` after it was polled first
pub trait Environment: Clone + Send + Sync + 'static {
    /// The instant type used by this environment.
    type Instant: Copy + Ord + Send + Sync + std::ops::Sub<Output = Duration>;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;

    /// Hold for the given duration.
    ///
    /// This is the only suspension point of a transmission session.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production environment backed by the tokio clock.
///
/// Uses `tokio::time::Instant`, which honours `tokio::time::pause()`, so the
/// same type drives both real runs and paused-clock tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = tokio::time::Instant;

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
