//! On-screen keyboard layout.
//!
//! Two layers share one grid of key positions. A typed character selects a
//! position (it may belong to either layer) and the active layer decides
//! which character that position produces, the way a shifted on-screen
//! keyboard relabels its keys. Keys whose character has no Morse encoding
//! are disabled and resolve to nothing.

use morsekey_core::is_encodable;

const LOWER: [&str; 4] = ["1234567890-=", "qwertyuiop[]", "asdfghjkl;'", "zxcvbnm,./"];
const UPPER: [&str; 4] = ["!@#$%^&*()_+", "QWERTYUIOP{}", "ASDFGHJKL:\"", "ZXCVBNM<>?"];

/// Keyboard layer selected by the shift state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    /// Unshifted: digits and lower case letters.
    #[default]
    Lower,
    /// Shifted: symbols and upper case letters.
    Upper,
}

impl Layer {
    /// Layer for the given shift state.
    pub const fn from_shift(shift: bool) -> Self {
        if shift { Self::Upper } else { Self::Lower }
    }

    const fn rows(self) -> &'static [&'static str; 4] {
        match self {
            Self::Lower => &LOWER,
            Self::Upper => &UPPER,
        }
    }
}

/// One key as drawn on a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    /// Character the key produces on this layer.
    pub label: char,
    /// False if the character has no Morse encoding.
    pub enabled: bool,
}

/// The fixed keyboard layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keyboard;

impl Keyboard {
    /// Number of character rows (space bar excluded).
    pub const ROWS: usize = 4;

    /// Keys of one row on the given layer. Empty past the last row.
    pub fn row(layer: Layer, row: usize) -> Vec<Key> {
        layer
            .rows()
            .get(row)
            .map(|keys| keys.chars().map(|label| Key { label, enabled: is_encodable(label) }).collect())
            .unwrap_or_default()
    }

    /// Grid position of a typed character on either layer.
    fn position(typed: char) -> Option<(usize, usize)> {
        [Layer::Lower, Layer::Upper].into_iter().find_map(|layer| {
            layer
                .rows()
                .iter()
                .enumerate()
                .find_map(|(row, keys)| keys.chars().position(|c| c == typed).map(|col| (row, col)))
        })
    }

    /// Character produced by pressing the key for `typed` with the given
    /// shift state.
    ///
    /// `None` if the character is not on the keyboard or the resulting key is
    /// disabled. Space is always accepted.
    pub fn resolve(shift: bool, typed: char) -> Option<char> {
        if typed == ' ' {
            return Some(' ');
        }
        let (row, col) = Self::position(typed)?;
        let produced = Layer::from_shift(shift).rows()[row].chars().nth(col)?;
        is_encodable(produced).then_some(produced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_share_one_grid() {
        for (lower, upper) in LOWER.iter().zip(UPPER.iter()) {
            assert_eq!(lower.chars().count(), upper.chars().count());
        }
    }

    #[test]
    fn shift_selects_case() {
        assert_eq!(Keyboard::resolve(false, 'q'), Some('q'));
        assert_eq!(Keyboard::resolve(true, 'q'), Some('Q'));
        assert_eq!(Keyboard::resolve(false, 'Q'), Some('q'));
    }

    #[test]
    fn shift_relabels_number_row() {
        assert_eq!(Keyboard::resolve(false, '9'), Some('9'));
        assert_eq!(Keyboard::resolve(true, '9'), Some('('));
        assert_eq!(Keyboard::resolve(false, '('), Some('9'));
        assert_eq!(Keyboard::resolve(true, '/'), Some('?'));
    }

    #[test]
    fn disabled_keys_resolve_to_nothing() {
        assert_eq!(Keyboard::resolve(true, '1'), None, "! has no encoding");
        assert_eq!(Keyboard::resolve(false, '['), None);
        assert_eq!(Keyboard::resolve(false, '§'), None, "not on the keyboard");
    }

    #[test]
    fn space_always_resolves() {
        assert_eq!(Keyboard::resolve(false, ' '), Some(' '));
        assert_eq!(Keyboard::resolve(true, ' '), Some(' '));
    }

    #[test]
    fn rows_mark_disabled_keys() {
        let top = Keyboard::row(Layer::Upper, 0);
        let enabled: String = top.iter().filter(|k| k.enabled).map(|k| k.label).collect();

        assert_eq!(enabled, "()");
        assert!(Keyboard::row(Layer::Lower, Keyboard::ROWS).is_empty());
    }
}
