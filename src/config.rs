use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Runtime options for the headless frame driver.
///
/// Every field can be overridden through a `DOORWATCH_`-prefixed environment variable,
/// e.g. `DOORWATCH_FPS=30` or `DOORWATCH_SEED=42`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulation rate; every frame advances the game by `1 / fps` seconds.
    pub fps: u32,
    /// Stop after this many frames. Runs until exit when unset.
    pub frames: Option<u64>,
    /// Sleep between frames to run at wall-clock speed.
    pub realtime: bool,
    /// Session seed. A random one is drawn when unset.
    pub seed: Option<u64>,
    /// Let the scripted player drive the session.
    pub autopilot: bool,
    /// Frames before the ghost model finishes loading.
    pub model_load_frames: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60,
            frames: Some(60 * 120),
            realtime: false,
            seed: None,
            autopilot: true,
            model_load_frames: 30,
        }
    }
}

impl Config {
    /// Loads the configuration from the environment on top of the defaults.
    pub fn load() -> Result<Config, ConfigError> {
        Self::from_figment(Figment::new().merge(Env::prefixed("DOORWATCH_")))
    }

    /// Extracts and validates a configuration from `figment`, filling unset keys with defaults.
    pub fn from_figment(figment: Figment) -> Result<Config, ConfigError> {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(figment)
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=1000).contains(&self.fps) {
            return Err(ConfigError::Invalid {
                field: "fps",
                reason: format!("must be between 1 and 1000, got {}", self.fps),
            });
        }
        if self.frames == Some(0) {
            return Err(ConfigError::Invalid {
                field: "frames",
                reason: "must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }

    /// Seconds simulated per frame.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.fps as f32
    }
}
