mod platform;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let config = platform::config::ConsoleConfig::load().context("loading configuration")?;
    platform::logging::initialize(&config);
    platform::run_app(config)
}
