//! Bounded message input buffer.
//!
//! Holds the message being composed. Editing only ever happens at the end,
//! and content never exceeds [`InputBuffer::MAX_LEN`] characters. Overflow is
//! silently ignored rather than reported as an error.

/// Message editor with a fixed capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    content: String,
    len: usize,
}

impl InputBuffer {
    /// Maximum number of content characters.
    pub const MAX_LEN: usize = 12;

    /// Placeholder drawn after the content to mark the cursor. Not content.
    pub const CURSOR: char = '_';

    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character at the end.
    ///
    /// Returns `false` (and changes nothing) when the buffer is full.
    pub fn append(&mut self, character: char) -> bool {
        if self.len >= Self::MAX_LEN {
            return false;
        }
        self.content.push(character);
        self.len += 1;
        true
    }

    /// Remove and return the last character, or `None` if empty.
    pub fn backspace(&mut self) -> Option<char> {
        let removed = self.content.pop()?;
        self.len -= 1;
        Some(removed)
    }

    /// Current content as an owned message.
    ///
    /// Does not clear the buffer; the next message continues from here unless
    /// the caller clears it.
    pub fn finalize(&self) -> String {
        self.content.clone()
    }

    /// Drop all content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.len = 0;
    }

    /// Current content.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Number of content characters (not bytes).
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if there is no content.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if further appends will be ignored.
    pub fn is_full(&self) -> bool {
        self.len >= Self::MAX_LEN
    }

    /// Content followed by the cursor placeholder, for display.
    pub fn display(&self) -> String {
        let mut shown = String::with_capacity(self.content.len() + 1);
        shown.push_str(&self.content);
        shown.push(Self::CURSOR);
        shown
    }
}
