use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::autopilot::Autopilot;
use crate::config::Config;
use crate::error::GameResult;
use crate::formatter::FrameCounter;
use crate::game::Game;
use crate::platform;
use crate::presentation::TracingPresenter;
use crate::systems::GhostModel;

/// Headless frame driver: ticks the game at a fixed rate and presents through the log.
pub struct App {
    pub game: Game,
    autopilot: Option<Autopilot>,
    presenter: TracingPresenter,
    frames: FrameCounter,
    config: Config,
    loop_time: Duration,
}

impl App {
    pub fn new(config: Config, frames: FrameCounter) -> GameResult<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(platform::random_seed);
        info!(seed, fps = config.fps, autopilot = config.autopilot, "Creating app");

        let game = Game::new(seed);
        let autopilot = config.autopilot.then(|| Autopilot::new(seed.wrapping_add(1)));
        let loop_time = Duration::from_secs_f32(config.frame_delta());

        Ok(Self {
            game,
            autopilot,
            presenter: TracingPresenter::default(),
            frames,
            config,
            loop_time,
        })
    }

    /// Runs a single frame. Returns `false` once the app should stop.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();
        let frame = self.frames.get();
        let dt = self.config.frame_delta();

        if frame == self.config.model_load_frames {
            self.game.attach_ghost_model(GhostModel::new("ghost"));
        }

        if let Some(autopilot) = self.autopilot.as_mut() {
            autopilot.drive(dt, &mut self.game);
        }

        let exit = self.game.tick(dt);
        self.game.present(&mut self.presenter);
        self.frames.advance();

        if exit {
            info!("Exit requested. Exiting...");
            return false;
        }
        if self.config.frames.is_some_and(|limit| self.frames.get() >= limit) {
            info!(frames = self.frames.get(), "Frame limit reached");
            return false;
        }

        if self.config.realtime {
            if start.elapsed() < self.loop_time {
                let time = self.loop_time.saturating_sub(start.elapsed());
                if time != Duration::ZERO {
                    platform::sleep(time);
                }
            } else {
                warn!(behind = ?(start.elapsed() - self.loop_time), "Game loop behind schedule");
            }
        }

        true
    }

    pub fn loop_time(&self) -> Duration {
        self.loop_time
    }

    /// Runs frames until exit or the frame limit.
    pub fn run_to_end(&mut self) {
        while self.run() {}
        debug!(
            stage = ?self.game.stage(),
            ghost = %self.game.ghost().kind(),
            battery = self.game.flashlight().battery_units(),
            "Session finished"
        );
    }
}
