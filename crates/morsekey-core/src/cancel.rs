//! Cooperative cancellation token.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared cancellation flag.
///
/// The spawning side keeps one clone and hands another to the session. The
/// session only polls it at symbol boundaries, so a cancel takes effect after
/// the current hold at the latest.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create an uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_flag() {
        let token = CancelToken::new();
        let worker = token.clone();

        assert!(!worker.is_cancelled());
        token.cancel();
        assert!(worker.is_cancelled());

        token.cancel();
        assert!(worker.is_cancelled());
    }
}
