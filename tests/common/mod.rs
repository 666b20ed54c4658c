#![allow(dead_code)]

use bevy_ecs::{
    event::{EventRegistry, Events},
    world::World,
};
use doorwatch::{
    events::{GameCommand, GameEvent, PresentationEvent, StageTransition},
    game::Game,
    presentation::Presenter,
    systems::{
        CameraPose, DeltaTime, DoorSide, DoorState, Doors, Flashlight, GameRng, GameStage, Ghost, GhostModel, GhostView,
        GlobalState, LightState,
    },
};
use glam::{Quat, Vec3};
use rand::{rngs::SmallRng, SeedableRng};

/// A frame delta that sums exactly in binary floating point.
pub const DT: f32 = 0.25;

pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// A ghost whose model has finished loading, wandering from its spawn point.
pub fn loaded_ghost() -> Ghost {
    let mut ghost = Ghost::new();
    ghost.attach_model(GhostModel::new("test"));
    ghost
}

/// A loaded ghost stalking `side`.
pub fn stalking_ghost(side: DoorSide) -> Ghost {
    let mut ghost = loaded_ghost();
    ghost.teleport_to(side);
    ghost
}

/// A camera aimed straight at whatever stalks `side`.
pub fn aimed_at(side: DoorSide) -> CameraPose {
    CameraPose::looking_at(side.stalk_position())
}

/// A camera swung `degrees` sideways away from whatever stalks `side`.
pub fn aimed_off(side: DoorSide, degrees: f32) -> CameraPose {
    let aimed = aimed_at(side);
    CameraPose {
        forward: Quat::from_rotation_y(degrees.to_radians()) * aimed.forward,
        ..aimed
    }
}

/// A world holding every resource and event the gameplay systems touch.
pub fn create_test_world() -> World {
    let mut world = World::default();

    EventRegistry::register_event::<GameEvent>(&mut world);
    EventRegistry::register_event::<StageTransition>(&mut world);
    EventRegistry::register_event::<PresentationEvent>(&mut world);

    world.insert_resource(GlobalState::default());
    world.insert_resource(GameStage::default());
    world.insert_resource(DeltaTime(DT));
    world.insert_resource(CameraPose::default());
    world.insert_resource(LightState::default());
    world.insert_resource(GameRng::seeded(0));
    world.insert_resource(Doors::new());
    world.insert_resource(Flashlight::new());
    world.insert_resource(Ghost::new());
    world.insert_resource(GhostView::default());

    world
}

pub fn send_command(world: &mut World, command: GameCommand) {
    world.send_event(GameEvent::Command(command));
}

/// Takes every presentation event written so far.
pub fn drain_effects(world: &mut World) -> Vec<PresentationEvent> {
    world.resource_mut::<Events<PresentationEvent>>().drain().collect()
}

/// A session whose ghost model is already loaded.
pub fn loaded_game(seed: u64) -> Game {
    let mut game = Game::new(seed);
    game.attach_ghost_model(GhostModel::new("test"));
    game
}

/// Sends a full click (press and release) on the flashlight.
pub fn click_flashlight(game: &mut Game) {
    game.command(GameCommand::PressFlashlight);
    game.command(GameCommand::ReleaseFlashlight);
}

/// A presenter that remembers everything it was told.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub visible: bool,
    pub ghost_position: Option<Vec3>,
    pub ghost_tint: Option<Vec3>,
    pub light: f32,
    pub button: bool,
    pub bars: u8,
    pub depleted: bool,
    pub doors: Vec<(DoorSide, DoorState)>,
    pub effects: Vec<PresentationEvent>,
}

impl Presenter for RecordingPresenter {
    fn ghost_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn ghost_transform(&mut self, position: Vec3, _facing: Option<f32>) {
        self.ghost_position = Some(position);
    }

    fn ghost_tint(&mut self, tint: Vec3) {
        self.ghost_tint = Some(tint);
    }

    fn light(&mut self, intensity: f32) {
        self.light = intensity;
    }

    fn button(&mut self, pressed: bool) {
        self.button = pressed;
    }

    fn battery(&mut self, bars: u8, _fraction: f32, depleted: bool) {
        self.bars = bars;
        self.depleted = depleted;
    }

    fn door(&mut self, side: DoorSide, state: DoorState) {
        self.doors.retain(|(s, _)| *s != side);
        self.doors.push((side, state));
    }

    fn effect(&mut self, event: PresentationEvent) {
        self.effects.push(event);
    }
}
