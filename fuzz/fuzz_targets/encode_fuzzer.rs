//! Fuzz target for the Morse encoder
//!
//! Feeds arbitrary strings to `encode` to find panics and framing bugs.
//!
//! # Invariants
//!
//! - Never panics; unknown characters only ever produce `UnknownSymbol`
//! - The reported character is the first one without an encoding, at its
//!   character index
//! - Successful output never starts with a character gap, never has two
//!   adjacent marks, and has one word gap per space

#![no_main]

use libfuzzer_sys::fuzz_target;
use morsekey_core::{encode, is_encodable, EncodeError, Symbol};

fuzz_target!(|message: &str| {
    let first_bad = message.chars().enumerate().find(|(_, c)| !is_encodable(*c));

    match encode(message) {
        Ok(seq) => {
            assert!(first_bad.is_none(), "accepted unencodable input {first_bad:?}");
            assert_eq!(seq.count(Symbol::InterWordGap), message.matches(' ').count());
            assert_ne!(seq.symbols().first(), Some(&Symbol::InterCharacterGap));
            assert_ne!(seq.symbols().last(), Some(&Symbol::InterCharacterGap));
            for pair in seq.symbols().windows(2) {
                assert!(!(pair[0].is_mark() && pair[1].is_mark()), "adjacent marks");
                assert!(!(pair[0].is_gap() && pair[1] == Symbol::IntraCharacterGap));
            }
        }
        Err(EncodeError::UnknownSymbol { character, index }) => {
            assert_eq!(first_bad, Some((index, character)));
        }
    }
});
