//! Application layer for the Morse keyboard
//!
//! Pure state machine and generic runtime between a front end and the
//! transmission core, so the same orchestration runs in the terminal and in
//! paused-clock tests.
//!
//! # Components
//!
//! - [`Keyboard`]: on-screen layout with an explicit shift layer
//! - [`App`]: UI state machine (message editing, shift, indicator LED)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Event loop wiring [`App`] to a [`morsekey_core::Supervisor`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod input;
mod keyboard;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::{App, AppConfig};
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use keyboard::{Key, Keyboard, Layer};
pub use runtime::{ChannelIndicator, Runtime};
pub use state::{Led, Transmission};
