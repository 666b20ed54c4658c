//! A scripted player for headless sessions.
//!
//! The autopilot only looks at what a player could see (where the ghost is, which doors are
//! open, the battery gauge) and answers with the same commands a keyboard and mouse would
//! produce. It reacts with a randomized delay and does not always pick the best defense.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::events::GameCommand;
use crate::game::Game;
use crate::systems::{CameraPose, DoorSide, GameStage, GhostPhase};

/// Reaction delay bounds, in seconds.
const REACTION_MIN: f32 = 0.3;
const REACTION_MAX: f32 = 1.2;
/// Chance of answering a stalker with the door instead of the flashlight.
const SLAM_CHANCE: f64 = 0.3;
/// Seconds spent on the game over screen before restarting.
const RESTART_DELAY: f32 = 2.0;

/// What the autopilot decided for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub camera: CameraPose,
    pub commands: SmallVec<[GameCommand; 4]>,
}

/// The situation the autopilot is currently reacting to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Threat {
    Calm,
    Approaching(DoorSide),
    Stalking(DoorSide),
    Lost,
}

pub struct Autopilot {
    rng: SmallRng,
    threat: Threat,
    /// Seconds left before acting on `threat`.
    hesitation: f32,
    /// Answer the current stalker with the door rather than the light.
    slam: bool,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            threat: Threat::Calm,
            hesitation: 0.0,
            slam: false,
        }
    }

    /// Plans the next frame and applies it to `game`.
    pub fn drive(&mut self, dt: f32, game: &mut Game) {
        let plan = self.plan(dt, game);
        game.set_camera(plan.camera);
        for command in plan.commands {
            game.command(command);
        }
    }

    /// Decides the camera pose and commands for the next frame without touching the game.
    pub fn plan(&mut self, dt: f32, game: &Game) -> Plan {
        let threat = Self::assess(game);
        if threat != self.threat {
            self.hesitation = self.rng.random_range(REACTION_MIN..=REACTION_MAX);
            self.slam = self.rng.random_bool(SLAM_CHANCE);
            if threat == Threat::Lost {
                self.hesitation = RESTART_DELAY;
            }
            debug!(?threat, hesitation = self.hesitation, slam = self.slam, "Autopilot reassessing");
            self.threat = threat;
        }
        self.hesitation = (self.hesitation - dt).max(0.0);

        let mut commands = SmallVec::new();
        let camera = match threat {
            Threat::Stalking(side) => CameraPose::looking_at(side.stalk_position()),
            _ => CameraPose::default(),
        };

        if self.hesitation > 0.0 {
            return Plan { camera, commands };
        }

        let flashlight = game.flashlight();
        let doors = game.doors();
        match threat {
            Threat::Calm => {
                if flashlight.is_on() {
                    Self::click(&mut commands);
                }
            }
            Threat::Approaching(side) => {
                // Closing the only open door would just force the other one open.
                if doors.is_open(side) && doors.is_open(side.other()) && !doors.is_broken(side) {
                    commands.push(GameCommand::ToggleDoor(side));
                }
                if flashlight.is_on() {
                    Self::click(&mut commands);
                }
            }
            Threat::Stalking(side) => {
                let can_light = !flashlight.is_depleted() && flashlight.battery_units() >= 1.0;
                if (self.slam || !can_light) && !doors.is_broken(side) {
                    trace!(door = %side, "Autopilot slamming the door");
                    commands.push(GameCommand::ToggleDoor(side));
                } else if can_light && !flashlight.is_on() {
                    Self::click(&mut commands);
                }
            }
            Threat::Lost => commands.push(GameCommand::Restart),
        }

        Plan { camera, commands }
    }

    fn assess(game: &Game) -> Threat {
        if game.stage() == GameStage::GameOver {
            return Threat::Lost;
        }
        match game.ghost().phase() {
            GhostPhase::Stalk { side, .. } => Threat::Stalking(side),
            GhostPhase::Approach { side, .. } | GhostPhase::Attack { side, .. } => Threat::Approaching(side),
            GhostPhase::Wander { .. } | GhostPhase::Retreat { .. } => Threat::Calm,
        }
    }

    fn click(commands: &mut SmallVec<[GameCommand; 4]>) {
        commands.push(GameCommand::PressFlashlight);
        commands.push(GameCommand::ReleaseFlashlight);
    }
}
