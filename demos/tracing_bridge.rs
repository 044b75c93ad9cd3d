//! Sending `tracing` events through the rotating logger.
//!
//! Run with `RUST_LOG=debug` to see debug events as well.

use duolog::LoggerConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;

    let config = LoggerConfig::new()
        .with_prefix("BRIDGE")
        .with_log_dir(temp_dir.path())
        .with_max_lines(3);
    duolog::init_logging(&config, None)?;

    tracing::info!("first event");
    tracing::warn!(attempt = 2, "retrying");
    tracing::error!("third event fills app-1.log");
    tracing::debug!("only shown with RUST_LOG=debug");

    duolog::shutdown_logging();
    for entry in std::fs::read_dir(temp_dir.path())? {
        println!("{}", std::fs::read_to_string(entry?.path())?);
    }

    Ok(())
}
