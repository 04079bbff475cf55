/// Logger setup: warnings go to the terminal, everything at the configured level
/// goes to the log file.
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::OpenOptions;
use std::sync::OnceLock;

static LOGGER_READY: OnceLock<()> = OnceLock::new();

/// "info", "debug", ... -> LevelFilter; unknown names fall back to Info
pub fn level_from_str(level: &str) -> LevelFilter {
    level.trim().parse::<LevelFilter>().unwrap_or(LevelFilter::Info)
}

/// Installs the global logger. Calling it again is a no-op.
pub fn init_logger(level: &str, log_file: &str) -> Result<(), Box<dyn std::error::Error>> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;
    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Warn,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
        WriteLogger::new(level_from_str(level), config, file),
    ])?;
    let _ = LOGGER_READY.set(());
    log::info!("logging to {} at level {}", log_file, level);
    Ok(())
}
