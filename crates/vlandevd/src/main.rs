//! vlandevd - Tagged Sub-Interface Manager Daemon
//!
//! Entry point for the vlandevd daemon.

use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use netdevd_vlandev::device_kinds;

/// Initializes tracing/logging subsystem
fn init_logging() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    info!("--- Starting vlandevd ---");

    for kind in device_kinds() {
        info!(kind = kind.name, "registered device kind");
    }

    // Device instances are created and driven by the host framework's
    // config transport, which lives outside this daemon.
    info!("vlandevd initialization complete");

    ExitCode::SUCCESS
}
