//! Host platform services: frame pacing, entropy, and the log subscriber.

use std::time::Duration;

use rand::Rng;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::error::{GameResult, PlatformError};
use crate::formatter::{CustomFormatter, FrameCounter};

/// Sleeps for `duration`, spinning for the tail to hit frame boundaries precisely.
pub fn sleep(duration: Duration) {
    spin_sleep::sleep(duration);
}

/// A fresh session seed from the thread-local generator.
pub fn random_seed() -> u64 {
    rand::rng().random()
}

/// Installs the global tracing subscriber. Log lines are tagged with the frame from `frames`.
///
/// Filtering follows `RUST_LOG`, defaulting to `debug`.
pub fn init_tracing(frames: FrameCounter) -> GameResult<()> {
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(true)
                .event_format(CustomFormatter::new(frames)),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| PlatformError::TracingInit(format!("Failed to set tracing subscriber: {e}")))?;
    Ok(())
}
