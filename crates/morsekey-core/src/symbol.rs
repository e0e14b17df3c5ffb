//! Timing symbols and encoded sequences.
//!
//! A [`Symbol`] is the atomic timed unit of a transmission. Marks (`Dot`,
//! `Dash`) drive the line on, the three gap kinds drive it off. An
//! [`EncodedSequence`] is the immutable, ordered output of the encoder.

use std::fmt;

/// One atomic timed unit in an encoded sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Short mark, 1 unit on.
    Dot,
    /// Long mark, 3 units on.
    Dash,
    /// Gap between marks of one character, 1 unit off.
    IntraCharacterGap,
    /// Gap between characters of one word, 3 units off.
    InterCharacterGap,
    /// Gap between words, 7 units off.
    InterWordGap,
}

impl Symbol {
    /// Nominal duration in timing units.
    pub const fn units(self) -> u32 {
        match self {
            Self::Dot | Self::IntraCharacterGap => 1,
            Self::Dash | Self::InterCharacterGap => 3,
            Self::InterWordGap => 7,
        }
    }

    /// Whether this symbol drives the line on.
    pub const fn is_mark(self) -> bool {
        matches!(self, Self::Dot | Self::Dash)
    }

    /// Whether this symbol is any of the gap kinds.
    pub const fn is_gap(self) -> bool {
        !self.is_mark()
    }
}

impl From<Mark> for Symbol {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Dot => Self::Dot,
            Mark::Dash => Self::Dash,
        }
    }
}

/// A keyed element of a character's code.
///
/// The alphabet table is expressed in marks only; the encoder inserts the
/// gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Short element.
    Dot,
    /// Long element.
    Dash,
}

/// Immutable, ordered list of symbols produced by one encode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedSequence {
    symbols: Vec<Symbol>,
}

impl EncodedSequence {
    pub(crate) fn from_symbols(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True if the message encoded to nothing (empty input).
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in transmission order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Iterate symbols in transmission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    /// Sum of nominal durations in units.
    pub fn total_units(&self) -> u64 {
        self.symbols.iter().map(|s| u64::from(s.units())).sum()
    }

    /// Number of symbols equal to `symbol`.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.symbols.iter().filter(|&&s| s == symbol).count()
    }
}

impl<'a> IntoIterator for &'a EncodedSequence {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

/// Renders marks as `.`/`-`, characters separated by a space and words by
/// ` / `. Intra-character gaps are implicit.
impl fmt::Display for EncodedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            match symbol {
                Symbol::Dot => f.write_str(".")?,
                Symbol::Dash => f.write_str("-")?,
                Symbol::IntraCharacterGap => {},
                Symbol::InterCharacterGap => f.write_str(" ")?,
                Symbol::InterWordGap => f.write_str(" / ")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_units() {
        assert_eq!(Symbol::Dot.units(), 1);
        assert_eq!(Symbol::Dash.units(), 3);
        assert_eq!(Symbol::IntraCharacterGap.units(), 1);
        assert_eq!(Symbol::InterCharacterGap.units(), 3);
        assert_eq!(Symbol::InterWordGap.units(), 7);
    }

    #[test]
    fn only_dot_and_dash_are_marks() {
        assert!(Symbol::Dot.is_mark());
        assert!(Symbol::Dash.is_mark());
        assert!(Symbol::IntraCharacterGap.is_gap());
        assert!(Symbol::InterCharacterGap.is_gap());
        assert!(Symbol::InterWordGap.is_gap());
    }

    #[test]
    fn total_units_sums_symbols() {
        let seq = EncodedSequence::from_symbols(vec![
            Symbol::Dot,
            Symbol::IntraCharacterGap,
            Symbol::Dash,
            Symbol::InterWordGap,
        ]);
        assert_eq!(seq.total_units(), 12);
        assert_eq!(seq.count(Symbol::Dash), 1);
    }
}
