//! Centralized error types for the game.
//!
//! Gameplay itself is total: rejected actions (toggling a broken door, switching on an empty
//! flashlight) are outcomes, not errors. What can fail is everything around it: loading the
//! configuration, installing the tracing subscriber, and driving the session.

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while loading or validating [`crate::config::Config`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Extract(Box::new(error))
    }
}

/// Platform-specific errors.
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("Tracing subscriber initialization failed: {0}")]
    TracingInit(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
