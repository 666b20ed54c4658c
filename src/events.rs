use bevy_ecs::event::Event;
use glam::Vec3;

use crate::systems::door::DoorSide;

/// Player and session intents, produced by input mapping (or the autopilot).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    /// Open or close a door (keyboard).
    ToggleDoor(DoorSide),
    /// Mouse button down on the flashlight.
    PressFlashlight,
    /// Mouse button up on the flashlight.
    ReleaseFlashlight,
    TogglePause,
    Restart,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// Requests for the session stage, raised by gameplay systems and applied by the stage system.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageTransition {
    /// The ghost reached the player.
    GameOver,
}

/// One-shot effects for the presentation layer, drained once per frame.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum PresentationEvent {
    CameraShake { intensity: f32, seconds: f32 },
    DoorBroken(DoorSide),
    /// A door closed onto nothing, or opened.
    DoorMoved { side: DoorSide, open: bool },
    /// The flashlight ran dry and is forced off.
    FlashlightDepleted,
    /// The flashlight came back after its recharge delay.
    FlashlightRecovered,
    /// The ghost reached the player at this position.
    GameOver { at: Vec3 },
    Restarted,
}
