//! Visual indicator callback and diagnostic markers.
//!
//! Every session emits on one channel and shows one indicator color. The pair
//! is purely diagnostic: a new color after submit confirms that a new session
//! replaced the old one. Selection goes through [`MarkerPicker`] so tests can
//! pin it.

use std::fmt;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    session::SessionId,
    sink::{ChannelId, DEFAULT_CHANNELS},
    symbol::Symbol,
};

/// Indicator-facing view of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PulseKind {
    /// Short mark.
    Dot,
    /// Long mark.
    Dash,
    /// Any gap, including the release after the last symbol.
    Gap,
}

impl From<Symbol> for PulseKind {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::Dot => Self::Dot,
            Symbol::Dash => Self::Dash,
            Symbol::IntraCharacterGap | Symbol::InterCharacterGap | Symbol::InterWordGap => {
                Self::Gap
            },
        }
    }
}

/// Indicator colors a session can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndicatorColor {
    /// Yellow.
    #[default]
    Yellow,
    /// Blue.
    Blue,
    /// Red.
    Red,
    /// Orange.
    Orange,
    /// Pink.
    Pink,
    /// Purple.
    Purple,
    /// Green.
    Green,
}

impl IndicatorColor {
    /// Every color, in declaration order.
    pub const ALL: [Self; 7] =
        [Self::Yellow, Self::Blue, Self::Red, Self::Orange, Self::Pink, Self::Purple, Self::Green];

    /// Lower-case color name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Purple => "purple",
            Self::Green => "green",
        }
    }
}

impl fmt::Display for IndicatorColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Channel and color a session emits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    /// Output channel driven by the session.
    pub channel: ChannelId,
    /// Indicator color shown while the session is on.
    pub color: IndicatorColor,
}

impl Default for Marker {
    fn default() -> Self {
        Self { channel: DEFAULT_CHANNELS[0], color: IndicatorColor::default() }
    }
}

/// Observer for the on/off transitions of a session.
///
/// Purely observational: implementations must not block, since they are
/// called from the session worker between sink write and hold.
pub trait Indicator: Send + Sync {
    /// Called once when a session starts emitting.
    fn on_session_start(&self, _session: SessionId, _marker: Marker) {}

    /// Called for every transition, with the same on/off state the sink saw.
    ///
    /// A superseded session in shared mode still reports its own release,
    /// so observers should key on `session`.
    fn on_symbol(&self, session: SessionId, kind: PulseKind, active: bool);
}

/// Strategy choosing the marker for a new session.
pub trait MarkerPicker: Send + Sync {
    /// Pick a marker. `channels` is the configured, non-empty channel set.
    fn pick(&mut self, channels: &[ChannelId]) -> Marker;
}

/// Uniformly random channel and color.
#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Picker seeded from OS entropy.
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Reproducible picker.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerPicker for RandomPicker {
    fn pick(&mut self, channels: &[ChannelId]) -> Marker {
        let channel = channels.choose(&mut self.rng).copied().unwrap_or(DEFAULT_CHANNELS[0]);
        let color = IndicatorColor::ALL.choose(&mut self.rng).copied().unwrap_or_default();
        Marker { channel, color }
    }
}

/// Always returns the same marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker {
    marker: Marker,
}

impl FixedPicker {
    /// Picker that always yields `marker`.
    pub const fn new(marker: Marker) -> Self {
        Self { marker }
    }
}

impl MarkerPicker for FixedPicker {
    fn pick(&mut self, _channels: &[ChannelId]) -> Marker {
        self.marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_collapse_to_gap_kind() {
        assert_eq!(PulseKind::from(Symbol::Dot), PulseKind::Dot);
        assert_eq!(PulseKind::from(Symbol::Dash), PulseKind::Dash);
        assert_eq!(PulseKind::from(Symbol::InterWordGap), PulseKind::Gap);
        assert_eq!(PulseKind::from(Symbol::IntraCharacterGap), PulseKind::Gap);
    }

    #[test]
    fn random_picker_stays_within_channel_set() {
        let channels = [ChannelId(11), ChannelId(13)];
        let mut picker = RandomPicker::with_seed(7);

        for _ in 0..100 {
            let marker = picker.pick(&channels);
            assert!(channels.contains(&marker.channel));
        }
    }

    #[test]
    fn seeded_pickers_agree() {
        let mut a = RandomPicker::with_seed(42);
        let mut b = RandomPicker::with_seed(42);

        for _ in 0..10 {
            assert_eq!(a.pick(&DEFAULT_CHANNELS), b.pick(&DEFAULT_CHANNELS));
        }
    }

    #[test]
    fn fixed_picker_ignores_channels() {
        let marker = Marker { channel: ChannelId(13), color: IndicatorColor::Green };
        let mut picker = FixedPicker::new(marker);

        assert_eq!(picker.pick(&[ChannelId(7)]), marker);
    }
}
