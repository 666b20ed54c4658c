//! The ghost's behavior state machine.
//!
//! The ghost wanders a corridor beyond the front wall. In a lit room it occasionally walks up
//! to a door; in a dark room it may teleport straight to an open door and stalk it. A stalker
//! is banished by holding the flashlight beam on it, or attacks once its patience runs out.
//!
//! Each phase carries its own timers, so a timer can only exist (and only be non-zero) inside
//! the phase it belongs to. Every transition goes through [`Ghost::set_phase`].

use std::f32::consts::PI;

use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{Res, ResMut},
};
use glam::Vec3;
use rand::seq::IndexedRandom;
use rand::Rng;
use strum_macros::EnumDiscriminants;
use tracing::{debug, info, trace};

use crate::constants::ghost::*;
use crate::constants::tint;
use crate::events::{PresentationEvent, StageTransition};
use crate::systems::components::{CameraPose, DeltaTime, GameRng, LightState};
use crate::systems::door::{DoorSide, Doors};

/// Which leg of the walk toward a door the ghost is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproachLeg {
    /// Cutting across the corridor toward the pivot in front of the door.
    Diagonal,
    /// Walking straight up to the door.
    Straight,
}

#[derive(Debug, Clone, Copy, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(GhostPhaseKind), derive(Hash, strum_macros::Display, strum_macros::IntoStaticStr))]
pub enum GhostPhase {
    /// Drifting along the corridor on a sine path.
    Wander {
        /// Sine argument of the path.
        sine: f32,
        /// Seconds since the last teleport roll.
        rng_check: f32,
    },
    Approach { side: DoorSide, leg: ApproachLeg },
    /// Standing just outside a door.
    Stalk {
        side: DoorSide,
        stalk_timer: f32,
        /// Seconds spent in the beam. Never decays while stalking.
        exposure: f32,
    },
    /// Rushing the player. `struck` is set once the player has been reached.
    Attack { side: DoorSide, struck: bool },
    Retreat { side: Option<DoorSide> },
}

impl GhostPhase {
    pub fn kind(&self) -> GhostPhaseKind {
        GhostPhaseKind::from(self)
    }
}

/// Handle to the ghost's loaded visual representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhostModel {
    pub name: String,
}

impl GhostModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// What the presentation layer needs from one ghost tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostFrame {
    /// Where to draw the ghost, idle bob included.
    pub position: Vec3,
    /// Yaw that turns the ghost toward the camera, when billboarding applies.
    pub facing: Option<f32>,
    pub tint: Vec3,
    pub phase: GhostPhaseKind,
    /// The ghost reached the player on this tick.
    pub game_over: bool,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Ghost {
    phase: GhostPhase,
    position: Vec3,
    tint: Vec3,
    /// Seconds of ticking, drives the idle bob.
    clock: f32,
    model: Option<GhostModel>,
}

impl Default for Ghost {
    fn default() -> Self {
        Self {
            phase: GhostPhase::Wander {
                sine: 0.0,
                rng_check: 0.0,
            },
            position: SPAWN_POSITION,
            tint: tint::NEUTRAL,
            clock: 0.0,
            model: None,
        }
    }
}

impl Ghost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GhostPhase {
        self.phase
    }

    pub fn kind(&self) -> GhostPhaseKind {
        self.phase.kind()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn tint(&self) -> Vec3 {
        self.tint
    }

    /// The door the ghost is currently going for, if any.
    pub fn attack_side(&self) -> Option<DoorSide> {
        match self.phase {
            GhostPhase::Approach { side, .. } | GhostPhase::Stalk { side, .. } | GhostPhase::Attack { side, .. } => Some(side),
            GhostPhase::Wander { .. } | GhostPhase::Retreat { .. } => None,
        }
    }

    pub fn is_stalking(&self, side: DoorSide) -> bool {
        matches!(self.phase, GhostPhase::Stalk { side: s, .. } if s == side)
    }

    pub fn stalk_timer(&self) -> f32 {
        match self.phase {
            GhostPhase::Stalk { stalk_timer, .. } => stalk_timer,
            _ => 0.0,
        }
    }

    pub fn exposure(&self) -> f32 {
        match self.phase {
            GhostPhase::Stalk { exposure, .. } => exposure,
            _ => 0.0,
        }
    }

    /// How far the white→red exposure tint has progressed, in `[0, 1]`.
    pub fn tint_ratio(&self) -> f32 {
        exposure_ratio(self.exposure())
    }

    pub fn model(&self) -> Option<&GhostModel> {
        self.model.as_ref()
    }

    /// Installs the visual representation once it has loaded. Only the first call takes effect.
    pub fn attach_model(&mut self, model: GhostModel) -> bool {
        if self.model.is_some() {
            debug!(model = %model.name, "Ghost model already attached, ignoring");
            return false;
        }
        info!(model = %model.name, "Ghost model attached");
        self.model = Some(model);
        true
    }

    /// Back to a fresh wander. A loaded model survives the reset.
    pub fn reset(&mut self) {
        let model = self.model.take();
        *self = Self { model, ..Self::default() };
    }

    /// Snaps the ghost just outside `side` and starts stalking it.
    pub fn teleport_to(&mut self, side: DoorSide) {
        self.position = side.stalk_position();
        self.tint = tint::NEUTRAL;
        self.set_phase(GhostPhase::Stalk {
            side,
            stalk_timer: 0.0,
            exposure: 0.0,
        });
    }

    /// Starts walking from the current position toward `side`.
    pub fn begin_approach(&mut self, side: DoorSide) {
        self.set_phase(GhostPhase::Approach {
            side,
            leg: ApproachLeg::Diagonal,
        });
    }

    /// The ghost was struck by a slammed door. Ignored once the player has been reached.
    pub fn on_hit_by_door(&mut self) -> bool {
        if let GhostPhase::Attack { struck: true, .. } = self.phase {
            return false;
        }

        let side = self.attack_side();
        self.tint = tint::INJURED;
        self.set_phase(GhostPhase::Retreat { side });
        true
    }

    /// Advances the state machine by `dt` seconds.
    ///
    /// Returns `None` without touching any state until the model is attached.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        camera: &CameraPose,
        doors: &Doors,
        light_on: bool,
        rng: &mut R,
    ) -> Option<GhostFrame> {
        if self.model.is_none() {
            return None;
        }

        self.clock += dt;
        let mut game_over = false;

        match self.phase {
            GhostPhase::Wander { sine, rng_check } => self.tick_wander(sine, rng_check, dt, doors, light_on, rng),
            GhostPhase::Approach { side, leg } => self.tick_approach(side, leg, dt, doors),
            GhostPhase::Stalk {
                side,
                stalk_timer,
                exposure,
            } => self.tick_stalk(side, stalk_timer, exposure, dt, camera, light_on, rng),
            GhostPhase::Attack { side, struck } => game_over = self.tick_attack(side, struck, dt, camera),
            GhostPhase::Retreat { side } => self.tick_retreat(side, dt),
        }

        Some(self.frame(camera, game_over))
    }

    fn tick_wander<R: Rng>(&mut self, sine: f32, rng_check: f32, dt: f32, doors: &Doors, light_on: bool, rng: &mut R) {
        let sine = sine + dt * WANDER_RATE;
        let mut rng_check = rng_check;
        self.position = wander_point(sine);

        if light_on {
            if self.position.x.abs() > APPROACH_TRIGGER_X && rng.random::<f32>() < APPROACH_CHANCE {
                let side = choose_attack_side(self.position.x, doors, rng.random());
                self.begin_approach(side);
                return;
            }
        } else {
            rng_check += dt;
            if rng_check >= TELEPORT_INTERVAL {
                rng_check = 0.0;
                if let Some(side) = roll_teleport(&doors.open_sides(), rng) {
                    self.teleport_to(side);
                    return;
                }
            }
        }

        self.phase = GhostPhase::Wander { sine, rng_check };
    }

    fn tick_approach(&mut self, side: DoorSide, leg: ApproachLeg, dt: f32, doors: &Doors) {
        let step = APPROACH_SPEED * dt;
        match leg {
            ApproachLeg::Diagonal => {
                let pivot = Vec3::new(side.x(), STALK_HEIGHT, APPROACH_PIVOT_Z);
                if move_towards(&mut self.position, pivot, step) {
                    trace!(door = %side, "Ghost turning toward the door");
                    self.phase = GhostPhase::Approach {
                        side,
                        leg: ApproachLeg::Straight,
                    };
                }
            }
            ApproachLeg::Straight => {
                if !move_towards(&mut self.position, side.stalk_position(), step) {
                    return;
                }
                if doors.is_open(side) {
                    self.set_phase(GhostPhase::Attack { side, struck: false });
                } else {
                    debug!(door = %side, "Ghost turned away by a closed door");
                    self.tint = tint::REJECTED;
                    self.set_phase(GhostPhase::Retreat { side: Some(side) });
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn tick_stalk<R: Rng>(
        &mut self,
        side: DoorSide,
        stalk_timer: f32,
        exposure: f32,
        dt: f32,
        camera: &CameraPose,
        light_on: bool,
        rng: &mut R,
    ) {
        let stalk_timer = stalk_timer + dt;
        let mut exposure = exposure;
        let anchor = side.stalk_position();
        let irradiated = light_on && camera.alignment(self.position) > EXPOSURE_CONE_COS;

        if irradiated {
            exposure += dt;
            let jitter = Vec3::new(
                rng.random_range(-EXPOSURE_JITTER..=EXPOSURE_JITTER),
                rng.random_range(-EXPOSURE_JITTER..=EXPOSURE_JITTER),
                0.0,
            );
            self.position = anchor + jitter;
            self.tint = tint::NEUTRAL.lerp(tint::EXPOSED, exposure_ratio(exposure));
            trace!(door = %side, exposure, "Ghost irradiated");
        } else {
            self.position = anchor;
        }

        if exposure >= BANISH_EXPOSURE {
            info!(door = %side, "Ghost banished by the flashlight");
            self.set_phase(GhostPhase::Retreat { side: Some(side) });
        } else if stalk_timer >= STALK_TIMEOUT {
            info!(door = %side, exposure, "Ghost lost patience and attacks");
            self.set_phase(GhostPhase::Attack { side, struck: false });
        } else {
            self.phase = GhostPhase::Stalk {
                side,
                stalk_timer,
                exposure,
            };
        }
    }

    /// Returns true on the one tick the ghost reaches the camera.
    fn tick_attack(&mut self, side: DoorSide, struck: bool, dt: f32, camera: &CameraPose) -> bool {
        let t = 1.0 - (-ATTACK_RATE * dt).exp();
        self.position = self.position.lerp(camera.position, t);

        if struck || self.position.distance(camera.position) >= KILL_DISTANCE {
            return false;
        }

        info!(door = %side, "Ghost reached the player");
        self.phase = GhostPhase::Attack { side, struck: true };
        true
    }

    fn tick_retreat(&mut self, side: Option<DoorSide>, dt: f32) {
        self.position.z -= RETREAT_SPEED * dt;
        self.tint = self.tint.lerp(tint::NEUTRAL, 1.0 - (-TINT_RELAX_RATE * dt).exp());

        if self.position.z > RETREAT_EXIT_Z {
            return;
        }

        // Leaving by the left starts the path heading left, the right exit heads right.
        let sine = match side.unwrap_or_else(|| DoorSide::nearest(self.position.x)) {
            DoorSide::Left => PI,
            DoorSide::Right => 0.0,
        };
        self.position = wander_point(sine);
        self.tint = tint::NEUTRAL;
        self.set_phase(GhostPhase::Wander { sine, rng_check: 0.0 });
    }

    fn set_phase(&mut self, next: GhostPhase) {
        let from = self.phase.kind();
        let to = next.kind();
        if from != to {
            debug!(%from, %to, position = ?self.position, "Ghost phase transition");
        }
        self.phase = next;
    }

    fn frame(&self, camera: &CameraPose, game_over: bool) -> GhostFrame {
        let phase = self.kind();
        let (position, facing) = match phase {
            GhostPhaseKind::Attack | GhostPhaseKind::Stalk => (self.position, None),
            _ => {
                let bob = (self.clock * BOB_RATE).sin() * BOB_AMPLITUDE;
                let to_camera = camera.position - self.position;
                (self.position + Vec3::Y * bob, Some(to_camera.x.atan2(to_camera.z)))
            }
        };

        GhostFrame {
            position,
            facing,
            tint: self.tint,
            phase,
            game_over,
        }
    }
}

/// Share of the banish threshold reached, capped at 1.
fn exposure_ratio(exposure: f32) -> f32 {
    (exposure / BANISH_EXPOSURE).min(1.0)
}

/// Point on the wander path for a given sine argument.
pub fn wander_point(sine: f32) -> Vec3 {
    Vec3::new(sine.sin() * WANDER_AMPLITUDE, WANDER_HEIGHT, WANDER_Z)
}

/// Picks the door a lit-room ghost walks toward from corridor position `x`.
///
/// A lone open door always wins. With both open, `roll` (uniform in `[0, 1)`) picks the nearer
/// door with [`NEAR_SIDE_BIAS`] probability. With both closed, the nearer door.
pub fn choose_attack_side(x: f32, doors: &Doors, roll: f32) -> DoorSide {
    let near = DoorSide::nearest(x);
    match (doors.is_open(DoorSide::Left), doors.is_open(DoorSide::Right)) {
        (true, false) => DoorSide::Left,
        (false, true) => DoorSide::Right,
        (true, true) if roll < NEAR_SIDE_BIAS => near,
        (true, true) => near.other(),
        (false, false) => near,
    }
}

/// Rolls a dark-room teleport: succeeds with [`TELEPORT_CHANCE`], then picks uniformly among the
/// `open` doors. Never teleports when no door is open.
pub fn roll_teleport<R: Rng>(open: &[DoorSide], rng: &mut R) -> Option<DoorSide> {
    if !rng.random_bool(TELEPORT_CHANCE) {
        return None;
    }
    let side = open.choose(rng).copied();
    if side.is_none() {
        trace!("Teleport roll succeeded but no door is open");
    }
    side
}

/// Moves `position` up to `step` toward `target`. Returns true once it arrives.
fn move_towards(position: &mut Vec3, target: Vec3, step: f32) -> bool {
    let offset = target - *position;
    let distance = offset.length();
    if distance <= step {
        *position = target;
        true
    } else {
        *position += offset / distance * step;
        false
    }
}

/// The latest ghost frame, kept for the presentation layer.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GhostView(pub Option<GhostFrame>);

/// Ticks the ghost with this frame's light state and reports a caught player.
#[allow(clippy::too_many_arguments)]
pub fn ghost_system(
    dt: Res<DeltaTime>,
    camera: Res<CameraPose>,
    doors: Res<Doors>,
    light: Res<LightState>,
    mut ghost: ResMut<Ghost>,
    mut rng: ResMut<GameRng>,
    mut view: ResMut<GhostView>,
    mut stage: EventWriter<StageTransition>,
    mut effects: EventWriter<PresentationEvent>,
) {
    let Some(frame) = ghost.tick(dt.0, &camera, &doors, light.0, &mut rng.0) else {
        trace!("Ghost model not loaded yet, skipping tick");
        return;
    };

    if frame.game_over {
        stage.write(StageTransition::GameOver);
        effects.write(PresentationEvent::GameOver { at: frame.position });
    }
    view.0 = Some(frame);
}
