//! Terminal UI for the Morse keyboard
//!
//! A thin shell over [`morsekey_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic
//! [`morsekey_app::Runtime`].
//!
//! This crate only handles terminal input, rendering, and the simulated
//! channel lamps.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod lamps;
pub mod terminal;
pub mod ui;

pub use cli::Args;
pub use lamps::LampPanel;
pub use morsekey_app::{App, AppAction, AppConfig, AppEvent, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
