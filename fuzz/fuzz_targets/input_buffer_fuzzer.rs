//! Fuzz target for the input buffer
//!
//! Drives the buffer with arbitrary edit sequences and checks it against a
//! plain `Vec<char>` model.
//!
//! # Invariants
//!
//! - Length never exceeds `MAX_LEN` and always equals the character count
//! - Append is refused exactly when the model is full
//! - Backspace returns the model's last character

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use morsekey_core::InputBuffer;

#[derive(Debug, Clone, Arbitrary)]
enum Edit {
    Append(char),
    Backspace,
    Clear,
    Finalize,
}

fuzz_target!(|edits: Vec<Edit>| {
    let mut buffer = InputBuffer::new();
    let mut model: Vec<char> = Vec::new();

    for edit in edits {
        match edit {
            Edit::Append(c) => {
                let accepted = buffer.append(c);
                assert_eq!(accepted, model.len() < InputBuffer::MAX_LEN);
                if accepted {
                    model.push(c);
                }
            }
            Edit::Backspace => assert_eq!(buffer.backspace(), model.pop()),
            Edit::Clear => {
                buffer.clear();
                model.clear();
            }
            Edit::Finalize => {
                assert_eq!(buffer.finalize(), model.iter().collect::<String>());
            }
        }

        assert!(buffer.len() <= InputBuffer::MAX_LEN);
        assert_eq!(buffer.len(), model.len());
        assert_eq!(buffer.as_str().chars().count(), model.len());
    }
});
