//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Encode and transmit a message, superseding any running transmission.
    Submit {
        /// Finalized buffer content.
        message: String,
    },

    /// Stop the running transmission without starting another.
    CancelTransmission,
}
