//! Morse transmission core.
//!
//! Turns a short typed message into a timed on/off pulse train and drives it
//! onto an abstract signal line, replacing any transmission still in flight.
//!
//! # Components
//!
//! - [`encode`]: pure text to [`EncodedSequence`] conversion
//! - [`InputBuffer`]: bounded message editor (append/backspace at the end)
//! - [`Session`]: one cancellable playback of a sequence onto a
//!   [`SignalSink`]
//! - [`Supervisor`]: keeps at most one session active, superseding the old
//!   one on every submit
//!
//! Time is abstracted behind [`Environment`] so sessions can run against the
//! paused tokio clock in tests and the real clock in production.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod buffer;
pub mod cancel;
pub mod env;
pub mod error;
pub mod indicator;
pub mod morse;
pub mod session;
pub mod sink;
pub mod supervisor;
pub mod symbol;
pub mod timing;

pub use buffer::InputBuffer;
pub use cancel::CancelToken;
pub use env::{Environment, SystemEnv};
pub use error::{EncodeError, SinkError};
pub use indicator::{
    FixedPicker, Indicator, IndicatorColor, Marker, MarkerPicker, PulseKind, RandomPicker,
};
pub use morse::{encode, is_encodable};
pub use session::{Session, SessionHandle, SessionId, SessionReport, SessionState};
pub use sink::{
    ChannelId, LineState, MemorySink, Ownership, SignalSink, SinkArbiter, TracingSink, Transition,
};
pub use supervisor::{SubmitReport, SupersedeOutcome, Supervisor, SupervisorConfig};
pub use symbol::{EncodedSequence, Mark, Symbol};
pub use timing::Timing;
