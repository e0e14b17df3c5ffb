//! Morse encoder.
//!
//! Pure text to [`EncodedSequence`] conversion. The alphabet is a fixed
//! `match` compiled into the binary, so lookups never allocate and nothing is
//! resolved at transmit time.
//!
//! # Framing
//!
//! - Marks of one character are separated by `IntraCharacterGap`.
//! - Adjacent characters are separated by `InterCharacterGap`.
//! - Every space becomes one `InterWordGap`, which takes the place of the
//!   character gap.
//! - Nothing trails the final character.

use crate::{
    error::EncodeError,
    symbol::{EncodedSequence, Mark, Symbol},
};

/// Every non-space character the encoder accepts, in canonical case.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789,.?/-()";

/// Marks for a canonical (upper case) character, or `None` if the table has
/// no entry.
pub fn code_for(character: char) -> Option<&'static [Mark]> {
    use Mark::{Dash, Dot};

    let marks: &'static [Mark] = match character {
        'A' => &[Dot, Dash],
        'B' => &[Dash, Dot, Dot, Dot],
        'C' => &[Dash, Dot, Dash, Dot],
        'D' => &[Dash, Dot, Dot],
        'E' => &[Dot],
        'F' => &[Dot, Dot, Dash, Dot],
        'G' => &[Dash, Dash, Dot],
        'H' => &[Dot, Dot, Dot, Dot],
        'I' => &[Dot, Dot],
        'J' => &[Dot, Dash, Dash, Dash],
        'K' => &[Dash, Dot, Dash],
        'L' => &[Dot, Dash, Dot, Dot],
        'M' => &[Dash, Dash],
        'N' => &[Dash, Dot],
        'O' => &[Dash, Dash, Dash],
        'P' => &[Dot, Dash, Dash, Dot],
        'Q' => &[Dash, Dash, Dot, Dash],
        'R' => &[Dot, Dash, Dot],
        'S' => &[Dot, Dot, Dot],
        'T' => &[Dash],
        'U' => &[Dot, Dot, Dash],
        'V' => &[Dot, Dot, Dot, Dash],
        'W' => &[Dot, Dash, Dash],
        'X' => &[Dash, Dot, Dot, Dash],
        'Y' => &[Dash, Dot, Dash, Dash],
        'Z' => &[Dash, Dash, Dot, Dot],
        '1' => &[Dot, Dash, Dash, Dash, Dash],
        '2' => &[Dot, Dot, Dash, Dash, Dash],
        '3' => &[Dot, Dot, Dot, Dash, Dash],
        '4' => &[Dot, Dot, Dot, Dot, Dash],
        '5' => &[Dot, Dot, Dot, Dot, Dot],
        '6' => &[Dash, Dot, Dot, Dot, Dot],
        '7' => &[Dash, Dash, Dot, Dot, Dot],
        '8' => &[Dash, Dash, Dash, Dot, Dot],
        '9' => &[Dash, Dash, Dash, Dash, Dot],
        '0' => &[Dash, Dash, Dash, Dash, Dash],
        ',' => &[Dash, Dash, Dot, Dot, Dash, Dash],
        '.' => &[Dot, Dash, Dot, Dash, Dot, Dash],
        '?' => &[Dot, Dot, Dash, Dash, Dot, Dot],
        '/' => &[Dash, Dot, Dot, Dash, Dot],
        '-' => &[Dash, Dot, Dot, Dot, Dot, Dash],
        '(' => &[Dash, Dot, Dash, Dash, Dot],
        ')' => &[Dash, Dot, Dash, Dash, Dot, Dash],
        _ => return None,
    };
    Some(marks)
}

/// Whether `character` can appear in an encodable message.
///
/// True for space and for every table character in either case.
pub fn is_encodable(character: char) -> bool {
    character == ' ' || code_for(character.to_ascii_uppercase()).is_some()
}

/// Encode a message into its symbol sequence.
///
/// Case-insensitive. Fails on the first character that is neither a space
/// nor in the alphabet table; nothing is dropped or substituted.
pub fn encode(message: &str) -> Result<EncodedSequence, EncodeError> {
    let mut symbols = Vec::with_capacity(message.len().saturating_mul(8));
    let mut after_character = false;

    for (index, character) in message.chars().enumerate() {
        if character == ' ' {
            symbols.push(Symbol::InterWordGap);
            after_character = false;
            continue;
        }

        let marks = code_for(character.to_ascii_uppercase())
            .ok_or(EncodeError::UnknownSymbol { character, index })?;

        if after_character {
            symbols.push(Symbol::InterCharacterGap);
        }
        for (i, mark) in marks.iter().enumerate() {
            if i > 0 {
                symbols.push(Symbol::IntraCharacterGap);
            }
            symbols.push(Symbol::from(*mark));
        }
        after_character = true;
    }

    Ok(EncodedSequence::from_symbols(symbols))
}
