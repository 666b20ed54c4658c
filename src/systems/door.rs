//! The two doors between the player and the corridor.
//!
//! Doors are mutually exclusive (the player can never seal both) and a door slammed on a
//! stalking ghost breaks for the rest of the session.

use bevy_ecs::{
    event::{EventReader, EventWriter},
    resource::Resource,
    system::{Res, ResMut},
};
use glam::Vec3;
use smallvec::SmallVec;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, IntoStaticStr};
use tracing::{debug, info, warn};

use crate::constants::{self, door};
use crate::events::{GameCommand, GameEvent, PresentationEvent};
use crate::systems::ghost::Ghost;
use crate::systems::state::GameStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum DoorSide {
    Left,
    Right,
}

impl DoorSide {
    pub fn other(self) -> Self {
        match self {
            DoorSide::Left => DoorSide::Right,
            DoorSide::Right => DoorSide::Left,
        }
    }

    /// The side of the room a given x coordinate is nearer to. The center counts as right.
    pub fn nearest(x: f32) -> Self {
        if x < 0.0 {
            DoorSide::Left
        } else {
            DoorSide::Right
        }
    }

    /// X coordinate of this door's center.
    pub fn x(self) -> f32 {
        match self {
            DoorSide::Left => door::LEFT_X,
            DoorSide::Right => door::RIGHT_X,
        }
    }

    /// Where a ghost stands when it stalks this door: just outside, at eye height.
    pub fn stalk_position(self) -> Vec3 {
        Vec3::new(
            self.x(),
            constants::ghost::STALK_HEIGHT,
            door::WALL_Z - constants::ghost::STALK_OFFSET,
        )
    }

    fn index(self) -> usize {
        match self {
            DoorSide::Left => 0,
            DoorSide::Right => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorState {
    pub is_open: bool,
    pub is_broken: bool,
}

impl Default for DoorState {
    fn default() -> Self {
        Self {
            is_open: true,
            is_broken: false,
        }
    }
}

/// What a toggle request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorToggle {
    /// The door is broken; nothing happened.
    Rejected,
    Opened,
    Closed,
    /// The door closed and the other door was forced open to keep one way out.
    ClosedForcingOther,
    /// The door was slammed on the stalking ghost and broke.
    Breached,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Doors {
    doors: [DoorState; 2],
}

impl Doors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, side: DoorSide) -> DoorState {
        self.doors[side.index()]
    }

    pub fn is_open(&self, side: DoorSide) -> bool {
        self.doors[side.index()].is_open
    }

    pub fn is_broken(&self, side: DoorSide) -> bool {
        self.doors[side.index()].is_broken
    }

    /// Doors currently open, left first.
    pub fn open_sides(&self) -> SmallVec<[DoorSide; 2]> {
        DoorSide::iter().filter(|side| self.is_open(*side)).collect()
    }

    /// True while the ghost stalks right behind this door.
    pub fn is_ghost_blocking(&self, side: DoorSide, ghost: &Ghost) -> bool {
        ghost.is_stalking(side)
    }

    /// Opens or closes a door on player request.
    ///
    /// Closing a door the ghost is stalking breaches it instead. Closing a door while the other
    /// one is closed forces the other one open.
    pub fn toggle(&mut self, side: DoorSide, ghost: &mut Ghost) -> DoorToggle {
        if self.is_broken(side) {
            warn!(door = %side, "Ignoring toggle of a broken door");
            return DoorToggle::Rejected;
        }

        if self.is_open(side) && self.is_ghost_blocking(side, ghost) {
            self.breach(side, ghost);
            return DoorToggle::Breached;
        }

        let open = !self.is_open(side);
        self.doors[side.index()].is_open = open;
        if open {
            debug!(door = %side, "Door opened");
            return DoorToggle::Opened;
        }

        let other = side.other();
        if !self.is_open(other) {
            self.doors[other.index()].is_open = true;
            debug!(door = %side, forced = %other, "Door closed, forcing the other door open");
            DoorToggle::ClosedForcingOther
        } else {
            debug!(door = %side, "Door closed");
            DoorToggle::Closed
        }
    }

    /// Breaks a door for good and drives the ghost behind it back.
    pub fn breach(&mut self, side: DoorSide, ghost: &mut Ghost) {
        let door = &mut self.doors[side.index()];
        door.is_broken = true;
        door.is_open = true;
        info!(door = %side, "Door slammed on the ghost and broke");
        ghost.on_hit_by_door();
    }

    pub fn reset(&mut self) {
        self.doors = Default::default();
    }
}

/// Applies door commands for the frame, before the flashlight and ghost update.
pub fn door_control_system(
    mut events: EventReader<GameEvent>,
    mut doors: ResMut<Doors>,
    mut ghost: ResMut<Ghost>,
    mut effects: EventWriter<PresentationEvent>,
    stage: Res<GameStage>,
) {
    // Commands issued while paused or over are dropped, not deferred
    if !stage.is_playing() {
        events.clear();
        return;
    }

    for event in events.read() {
        let GameEvent::Command(GameCommand::ToggleDoor(side)) = *event else {
            continue;
        };

        match doors.toggle(side, &mut ghost) {
            DoorToggle::Rejected => {}
            DoorToggle::Opened => {
                effects.write(PresentationEvent::DoorMoved { side, open: true });
            }
            DoorToggle::Closed => {
                effects.write(PresentationEvent::DoorMoved { side, open: false });
            }
            DoorToggle::ClosedForcingOther => {
                effects.write(PresentationEvent::DoorMoved { side, open: false });
                effects.write(PresentationEvent::DoorMoved {
                    side: side.other(),
                    open: true,
                });
            }
            DoorToggle::Breached => {
                effects.write(PresentationEvent::CameraShake {
                    intensity: constants::effects::BREACH_SHAKE_INTENSITY,
                    seconds: constants::effects::BREACH_SHAKE_SECONDS,
                });
                effects.write(PresentationEvent::DoorBroken(side));
            }
        }
    }
}
