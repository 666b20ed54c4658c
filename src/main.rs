#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use anyhow::Result;
use tracing::info;

use doorwatch::app::App;
use doorwatch::config::Config;
use doorwatch::formatter::FrameCounter;
use doorwatch::platform;

/// The main entry point of the application.
///
/// Installs the log subscriber, loads the configuration from the environment, then runs the
/// headless game loop until exit or the configured frame limit.
pub fn main() -> Result<()> {
    let frames = FrameCounter::new();
    platform::init_tracing(frames.clone())?;

    let config = Config::load()?;
    let mut app = App::new(config, frames)?;

    info!(loop_time = ?app.loop_time(), "Starting game loop");
    app.run_to_end();

    Ok(())
}
