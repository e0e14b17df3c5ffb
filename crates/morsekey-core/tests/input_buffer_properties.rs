//! Property-based tests for the bounded input buffer.

use morsekey_core::InputBuffer;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    Append(char),
    Backspace,
    Clear,
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        6 => any::<char>().prop_map(Edit::Append),
        3 => Just(Edit::Backspace),
        1 => Just(Edit::Clear),
    ]
}

#[test]
fn thirteenth_character_is_ignored() {
    let mut buffer = InputBuffer::new();

    let accepted: Vec<bool> = "ABCDEFGHIJKLM".chars().map(|c| buffer.append(c)).collect();

    assert_eq!(buffer.len(), 12);
    assert_eq!(buffer.as_str(), "ABCDEFGHIJKL");
    assert_eq!(accepted.iter().filter(|a| **a).count(), 12);
    assert!(!accepted[12]);
}

proptest! {
    #[test]
    fn prop_length_never_exceeds_bound(edits in prop::collection::vec(edit_strategy(), 0..64)) {
        let mut buffer = InputBuffer::new();

        for edit in edits {
            match edit {
                Edit::Append(c) => { buffer.append(c); },
                Edit::Backspace => { buffer.backspace(); },
                Edit::Clear => buffer.clear(),
            }
            prop_assert!(buffer.len() <= InputBuffer::MAX_LEN);
            prop_assert_eq!(buffer.len(), buffer.as_str().chars().count());
            prop_assert_eq!(buffer.is_full(), buffer.len() == InputBuffer::MAX_LEN);
        }
    }

    #[test]
    fn prop_append_then_backspace_restores(
        initial in "[A-Z0-9 ]{0,12}",
        added in prop::collection::vec(any::<char>(), 0..12),
    ) {
        let mut buffer = InputBuffer::new();
        for c in initial.chars() {
            buffer.append(c);
        }
        let before = buffer.finalize();

        let accepted = added.iter().filter(|c| buffer.append(**c)).count();
        for _ in 0..accepted {
            prop_assert!(buffer.backspace().is_some());
        }

        prop_assert_eq!(buffer.finalize(), before);
    }

    #[test]
    fn prop_display_is_content_plus_cursor(content in "[a-z0-9 ,.?]{0,12}") {
        let mut buffer = InputBuffer::new();
        for c in content.chars() {
            buffer.append(c);
        }

        prop_assert_eq!(buffer.display(), format!("{content}{}", InputBuffer::CURSOR));
    }
}
