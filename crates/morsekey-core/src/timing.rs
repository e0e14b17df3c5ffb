//! Symbol timing policy.
//!
//! Maps each [`Symbol`] to a wall-clock hold. Two policies exist:
//!
//! - **Canonical**: `units x unit`, the standard 1:3:1:3:7 ratios. Speed is
//!   usually given in words per minute using PARIS timing (a dot lasts
//!   `1.2 / wpm` seconds).
//! - **Legacy**: the fixed holds of the first keyboard build (300 ms dot,
//!   1000 ms dash, 300 ms per gap unit). The dash ratio is ~3.33:1 rather
//!   than 3:1.

use std::time::Duration;

use crate::symbol::{EncodedSequence, Symbol};

const LEGACY_DOT: Duration = Duration::from_millis(300);
const LEGACY_DASH: Duration = Duration::from_millis(1000);
const LEGACY_GAP_UNIT: Duration = Duration::from_millis(300);

/// Slowest speed accepted by [`Timing::from_wpm`].
pub const MIN_WPM: u32 = 1;
/// Fastest speed accepted by [`Timing::from_wpm`].
pub const MAX_WPM: u32 = 60;

/// Timing policy for a transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// Standard ratios scaled by a single unit (the dot length).
    Canonical {
        /// Duration of one unit.
        unit: Duration,
    },
    /// Fixed 300 ms / 1000 ms holds.
    Legacy,
}

impl Default for Timing {
    /// 20 WPM canonical timing (60 ms unit).
    fn default() -> Self {
        Self::from_wpm(20)
    }
}

impl Timing {
    /// Canonical timing with the given unit length.
    pub const fn with_unit(unit: Duration) -> Self {
        Self::Canonical { unit }
    }

    /// Canonical timing from a PARIS words-per-minute speed.
    ///
    /// `wpm` is clamped to [`MIN_WPM`]..=[`MAX_WPM`].
    pub fn from_wpm(wpm: u32) -> Self {
        let wpm = wpm.clamp(MIN_WPM, MAX_WPM);
        Self::Canonical { unit: Duration::from_micros(1_200_000 / u64::from(wpm)) }
    }

    /// Hold duration for one symbol.
    pub fn duration(&self, symbol: Symbol) -> Duration {
        match self {
            Self::Canonical { unit } => *unit * symbol.units(),
            Self::Legacy => match symbol {
                Symbol::Dot => LEGACY_DOT,
                Symbol::Dash => LEGACY_DASH,
                gap => LEGACY_GAP_UNIT * gap.units(),
            },
        }
    }

    /// Total hold time of a sequence, excluding the final release.
    pub fn sequence_duration(&self, sequence: &EncodedSequence) -> Duration {
        sequence.iter().map(|s| self.duration(*s)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_twenty_wpm() {
        assert_eq!(Timing::default(), Timing::with_unit(Duration::from_millis(60)));
    }

    #[test]
    fn canonical_scales_units() {
        let timing = Timing::with_unit(Duration::from_millis(10));

        assert_eq!(timing.duration(Symbol::Dot), Duration::from_millis(10));
        assert_eq!(timing.duration(Symbol::Dash), Duration::from_millis(30));
        assert_eq!(timing.duration(Symbol::IntraCharacterGap), Duration::from_millis(10));
        assert_eq!(timing.duration(Symbol::InterCharacterGap), Duration::from_millis(30));
        assert_eq!(timing.duration(Symbol::InterWordGap), Duration::from_millis(70));
    }

    #[test]
    fn legacy_uses_fixed_holds() {
        let timing = Timing::Legacy;

        assert_eq!(timing.duration(Symbol::Dot), Duration::from_millis(300));
        assert_eq!(timing.duration(Symbol::Dash), Duration::from_millis(1000));
        assert_eq!(timing.duration(Symbol::IntraCharacterGap), Duration::from_millis(300));
        assert_eq!(timing.duration(Symbol::InterCharacterGap), Duration::from_millis(900));
        assert_eq!(timing.duration(Symbol::InterWordGap), Duration::from_millis(2100));
    }

    #[test]
    fn wpm_is_clamped() {
        assert_eq!(Timing::from_wpm(0), Timing::from_wpm(MIN_WPM));
        assert_eq!(Timing::from_wpm(500), Timing::from_wpm(MAX_WPM));
        assert_eq!(Timing::from_wpm(60), Timing::with_unit(Duration::from_millis(20)));
    }

    #[test]
    fn sequence_duration_sums_holds() {
        let seq = crate::morse::encode("e e").expect("encodable");
        let timing = Timing::with_unit(Duration::from_millis(10));

        // dot + word gap + dot = 1 + 7 + 1 units
        assert_eq!(timing.sequence_duration(&seq), Duration::from_millis(90));
    }
}
