//! Platform logging initialization for the dashboard console.
//!
//! Logs go to `./dashboard.log` by default so they do not interleave with the
//! rendered console on stdout.

use console_logging::{console_info, LogDestination};

use super::config::ConsoleConfig;

pub fn initialize(config: &ConsoleConfig) {
    console_logging::initialize(config.log_destination.clone(), config.log_level);
    match &config.log_destination {
        LogDestination::File(path) | LogDestination::Both(path) => {
            console_info!("Logging to {:?}", path);
        }
        LogDestination::Terminal => console_info!("Logging to terminal"),
    }
}
