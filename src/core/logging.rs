//! Logging initialization

use log::SetLoggerError;

/// Install env_logger as the global logger.
///
/// Default filter is `info`; override with `RUST_LOG`. Timestamps carry
/// milliseconds. Fails if a global logger is already installed.
///
/// # Example
/// ```
/// if clump::core::logging::init().is_err() {
///     eprintln!("logger already installed");
/// }
/// log::info!("Clump world started");
/// ```
pub fn init() -> Result<(), SetLoggerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init()
}
