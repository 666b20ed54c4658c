use bevy_ecs::{
    event::{EventReader, EventWriter},
    resource::Resource,
    system::{Res, ResMut, SystemParam},
};
use tracing::{debug, info};

use crate::events::{GameCommand, GameEvent, PresentationEvent, StageTransition};
use crate::systems::components::{GlobalState, LightState};
use crate::systems::door::Doors;
use crate::systems::flashlight::Flashlight;
use crate::systems::ghost::{Ghost, GhostView};

/// A resource to track the overall stage of the session from a high-level perspective.
#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum GameStage {
    /// The main gameplay loop is active.
    #[default]
    Playing,
    /// Gameplay is frozen; only session commands are processed.
    Paused,
    /// The ghost reached the player. Only a restart leaves this stage.
    GameOver,
}

impl GameStage {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStage::Playing)
    }
}

/// Run condition for systems that only advance during play.
pub fn is_playing(stage: Res<GameStage>) -> bool {
    stage.is_playing()
}

/// Everything a session restart touches.
#[derive(SystemParam)]
pub struct SessionReset<'w> {
    stage: ResMut<'w, GameStage>,
    doors: ResMut<'w, Doors>,
    flashlight: ResMut<'w, Flashlight>,
    ghost: ResMut<'w, Ghost>,
    light: ResMut<'w, LightState>,
    view: ResMut<'w, GhostView>,
    effects: EventWriter<'w, PresentationEvent>,
}

impl SessionReset<'_> {
    /// Puts doors, flashlight and ghost back to their initial state and resumes play.
    pub fn restart(&mut self) {
        info!(from = ?*self.stage, "Restarting session");
        self.doors.reset();
        self.flashlight.reset();
        self.ghost.reset();
        *self.light = LightState::default();
        *self.view = GhostView::default();
        *self.stage = GameStage::Playing;
        self.effects.write(PresentationEvent::Restarted);
    }

    fn toggle_pause(&mut self) {
        *self.stage = match *self.stage {
            GameStage::Playing => GameStage::Paused,
            GameStage::Paused => GameStage::Playing,
            GameStage::GameOver => GameStage::GameOver,
        };
        debug!(stage = ?*self.stage, "Pause toggled");
    }
}

/// Handles exit, pause and restart commands. Runs in every stage.
pub fn session_command_system(
    mut events: EventReader<GameEvent>,
    mut global: ResMut<GlobalState>,
    mut session: SessionReset,
) {
    for event in events.read() {
        let GameEvent::Command(command) = *event;
        match command {
            GameCommand::Exit => {
                info!("Exit requested");
                global.exit = true;
            }
            GameCommand::TogglePause => session.toggle_pause(),
            GameCommand::Restart => session.restart(),
            _ => {}
        }
    }
}

/// One-shot restart, run outside the schedule.
pub fn restart_system(mut session: SessionReset) {
    session.restart();
}

/// Applies stage transitions raised by gameplay systems this frame.
pub fn stage_system(mut transitions: EventReader<StageTransition>, mut stage: ResMut<GameStage>) {
    for transition in transitions.read() {
        match transition {
            StageTransition::GameOver => {
                if *stage != GameStage::GameOver {
                    info!("Game over");
                    *stage = GameStage::GameOver;
                }
            }
        }
    }
}
