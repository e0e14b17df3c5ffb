//! Morse keyboard entry point.

use std::{fs::File, sync::Mutex};

use clap::Parser;
use morsekey_core::{Supervisor, SystemEnv, sink::DEFAULT_CHANNELS};
use morsekey_tui::{App, Args, LampPanel, Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.supervisor_config();
    let channels = if config.channels.is_empty() {
        DEFAULT_CHANNELS.to_vec()
    } else {
        config.channels.clone()
    };
    let lamps = LampPanel::new(&channels);

    tracing::info!(timing = ?config.timing, ?channels, ownership = ?config.ownership, "starting");

    let supervisor = Supervisor::new(config, SystemEnv::new(), std::sync::Arc::new(lamps.clone()))
        .with_picker(args.picker());
    let driver = TerminalDriver::new(lamps)?;
    let runtime = Runtime::new(driver, App::new(args.app_config()), supervisor);

    Ok(runtime.run().await?)
}

/// Log to `--log-file` if given. The terminal is in raw mode on the
/// alternate screen, so nothing is written to stdout or stderr.
fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let file = File::options().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .init();
    Ok(())
}
