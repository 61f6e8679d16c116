// Logger setup for hosts embedding the adapter
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Initialize logging from `RUST_LOG`, or fall back to warnings plus debug for this crate.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger() {
    let result = if std::env::var("RUST_LOG").is_ok() {
        env_logger::try_init()
    } else {
        Builder::new()
            .target(Target::Stdout)
            .filter_level(LevelFilter::Warn)
            .filter_module("p2p_playback", LevelFilter::Debug)
            .try_init()
    };

    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}
