//! This module contains the session controller: the ECS world and the per-frame schedule.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::RunSystemOnce;
use bevy_ecs::world::World;
use smallvec::SmallVec;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent, PresentationEvent, StageTransition};
use crate::presentation::Presenter;
use crate::systems::{
    door_control_system, flashlight_control_system, flashlight_system, ghost_system, is_playing, restart_system,
    session_command_system, stage_system, CameraPose, DeltaTime, DoorSide, Doors, Flashlight, GameRng, GameStage, Ghost,
    GhostModel, GhostView, GlobalState, LightState,
};

/// System sets fixing the order of a frame: inputs, then simulation, then reactions.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Commands queued since the last frame
    Input,
    /// Flashlight, then ghost
    Update,
    /// Stage transitions raised during the update
    Respond,
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// Owns the three gameplay subsystems (doors, flashlight, ghost) as resources of one `World`,
/// with a `Schedule` running them in a fixed order each frame. There is no state outside the
/// world; a restart overwrites it in place.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Creates a fresh session whose randomness is derived from `seed`.
    pub fn new(seed: u64) -> Game {
        info!(seed, "Starting game initialization");

        let mut world = World::default();
        let mut schedule = Schedule::default();

        debug!("Registering events");
        Self::setup_ecs(&mut world);

        debug!("Inserting resources");
        Self::insert_resources(&mut world, seed);

        debug!("Configuring system execution schedule");
        Self::configure_schedule(&mut schedule);

        info!("Game initialization completed successfully");
        Game { world, schedule }
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<StageTransition>(world);
        EventRegistry::register_event::<PresentationEvent>(world);
    }

    fn insert_resources(world: &mut World, seed: u64) {
        world.insert_resource(GlobalState::default());
        world.insert_resource(GameStage::default());
        world.insert_resource(DeltaTime::default());
        world.insert_resource(CameraPose::default());
        world.insert_resource(LightState::default());
        world.insert_resource(GameRng::seeded(seed));
        world.insert_resource(Doors::new());
        world.insert_resource(Flashlight::new());
        world.insert_resource(Ghost::new());
        world.insert_resource(GhostView::default());
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (
                    session_command_system,
                    (door_control_system, flashlight_control_system).chain(),
                )
                    .chain()
                    .in_set(GameplaySet::Input),
                (flashlight_system, ghost_system).chain().in_set(GameplaySet::Update),
                stage_system.in_set(GameplaySet::Respond),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Update.run_if(is_playing),
                    GameplaySet::Respond,
                )
                    .chain(),
            );
    }

    /// Queues a command for the next tick.
    pub fn command(&mut self, command: GameCommand) {
        self.world.send_event(GameEvent::Command(command));
    }

    /// Updates the camera pose the ghost sees on the next tick.
    pub fn set_camera(&mut self, pose: CameraPose) {
        self.world.insert_resource(pose);
    }

    /// Completes the ghost's asynchronous model load. Ticks before this leave the ghost untouched.
    pub fn attach_ghost_model(&mut self, model: GhostModel) -> bool {
        self.world.resource_mut::<Ghost>().attach_model(model)
    }

    /// Executes one frame of game logic.
    ///
    /// Applies queued commands, updates the flashlight, ticks the ghost with the freshly updated
    /// light state, then applies stage transitions. Returns `true` once an exit was requested.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !dt.is_finite() || dt < 0.0 {
            warn!(dt, "Ignoring invalid frame delta");
            return self.world.resource::<GlobalState>().exit;
        }

        self.world.insert_resource(DeltaTime(dt));
        self.schedule.run(&mut self.world);

        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<StageTransition>>().update();
        self.world.resource_mut::<Events<PresentationEvent>>().update();

        self.world.resource::<GlobalState>().exit
    }

    /// Resets doors, flashlight and ghost to their initial state and resumes play immediately.
    pub fn restart(&mut self) -> GameResult<()> {
        self.world
            .run_system_once(restart_system)
            .map_err(|e| GameError::InvalidState(format!("restart failed: {e}")))
    }

    /// Pushes the state left by the last tick to the presentation layer.
    pub fn present<P: Presenter>(&mut self, presenter: &mut P) {
        match self.world.resource::<GhostView>().0 {
            Some(frame) => {
                presenter.ghost_visible(true);
                presenter.ghost_transform(frame.position, frame.facing);
                presenter.ghost_tint(frame.tint);
            }
            None => presenter.ghost_visible(false),
        }

        let flashlight = self.world.resource::<Flashlight>();
        presenter.light(flashlight.intensity());
        presenter.button(flashlight.is_button_down());
        presenter.battery(flashlight.battery_bars(), flashlight.battery_fraction(), flashlight.is_depleted());

        let doors = self.world.resource::<Doors>();
        for side in DoorSide::iter() {
            presenter.door(side, doors.state(side));
        }

        let effects: SmallVec<[PresentationEvent; 8]> =
            self.world.resource_mut::<Events<PresentationEvent>>().drain().collect();
        for effect in effects {
            presenter.effect(effect);
        }
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn doors(&self) -> &Doors {
        self.world.resource::<Doors>()
    }

    pub fn flashlight(&self) -> &Flashlight {
        self.world.resource::<Flashlight>()
    }

    pub fn ghost(&self) -> &Ghost {
        self.world.resource::<Ghost>()
    }

    pub fn camera(&self) -> CameraPose {
        *self.world.resource::<CameraPose>()
    }

    pub fn light_on(&self) -> bool {
        self.world.resource::<LightState>().0
    }

    /// The ghost frame produced by the last tick, if the ghost has ticked since the last restart.
    pub fn ghost_view(&self) -> GhostView {
        *self.world.resource::<GhostView>()
    }
}
