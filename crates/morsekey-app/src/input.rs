//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries so key handling can
/// be scripted in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character, resolved through the active keyboard layer.
    Char(char),
    /// Enter/Return key (submit).
    Enter,
    /// Backspace key (delete last character).
    Backspace,
    /// Tab key (toggle shift).
    Tab,
    /// Escape key (stop the running transmission).
    Esc,
    /// Quit request (Ctrl-C / Ctrl-Q).
    Quit,
}
