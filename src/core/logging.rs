//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g. `RUST_LOG=lidarwalk=trace`
/// to see per-tick controller output.
///
/// # Example
/// ```no_run
/// lidarwalk::core::logging::init();
/// log::info!("Scanner online");
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
}
