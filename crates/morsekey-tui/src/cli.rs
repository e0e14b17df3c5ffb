//! Command line arguments.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use morsekey_app::AppConfig;
use morsekey_core::{ChannelId, Ownership, RandomPicker, SupervisorConfig, Timing};

/// Morse keyboard
#[derive(Parser, Debug)]
#[command(name = "morsekey")]
#[command(about = "Type a short message and send it as Morse code")]
#[command(version)]
pub struct Args {
    /// Sending speed in words per minute (PARIS timing)
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=60))]
    pub wpm: u32,

    /// Unit (dot) length in milliseconds, overrides --wpm
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub unit_ms: Option<u64>,

    /// Fixed 300 ms dot / 1000 ms dash holds instead of 1:3 ratios
    #[arg(long, conflicts_with = "unit_ms")]
    pub legacy_timing: bool,

    /// How long a submit waits for the previous transmission to stop
    #[arg(long, default_value_t = 1000)]
    pub supersede_timeout_ms: u64,

    /// Output channel, repeat for several (default: 7, 11, 13)
    #[arg(long = "channel", value_name = "CHANNEL")]
    pub channels: Vec<u8>,

    /// Let superseded transmissions keep driving their line
    #[arg(long)]
    pub shared_sink: bool,

    /// Clear the message once it has been sent off
    #[arg(long)]
    pub clear_on_submit: bool,

    /// Seed for channel and color selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log file. Without one, logs are discarded.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Timing policy selected by the flags.
    pub fn timing(&self) -> Timing {
        if self.legacy_timing {
            Timing::Legacy
        } else if let Some(ms) = self.unit_ms {
            Timing::with_unit(Duration::from_millis(ms))
        } else {
            Timing::from_wpm(self.wpm)
        }
    }

    /// Supervisor settings.
    pub fn supervisor_config(&self) -> SupervisorConfig {
        SupervisorConfig {
            timing: self.timing(),
            supersede_timeout: Duration::from_millis(self.supersede_timeout_ms),
            channels: self.channels.iter().copied().map(ChannelId).collect(),
            ownership: if self.shared_sink { Ownership::Shared } else { Ownership::Exclusive },
        }
    }

    /// Application settings.
    pub fn app_config(&self) -> AppConfig {
        AppConfig { clear_on_submit: self.clear_on_submit }
    }

    /// Marker picker, seeded if requested.
    pub fn picker(&self) -> RandomPicker {
        self.seed.map_or_else(RandomPicker::new, RandomPicker::with_seed)
    }
}
