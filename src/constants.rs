//! This module contains all the constants used in the game.
//!
//! World units are meters. The player stands at the origin looking down -Z; both doors sit in
//! the wall in front of them and the ghost roams a corridor beyond that wall.

use glam::Vec3;

/// Where the camera starts each session.
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 1.6, 0.0);
/// The camera's initial facing direction (straight at the front wall).
pub const CAMERA_FORWARD: Vec3 = Vec3::NEG_Z;

pub mod door {
    /// X coordinate of the left door's center.
    pub const LEFT_X: f32 = -2.5;
    /// X coordinate of the right door's center.
    pub const RIGHT_X: f32 = 2.5;
    /// Depth of the wall both doors are set into.
    pub const WALL_Z: f32 = -4.0;
}

pub mod flashlight {
    pub const MAX_BATTERY: f32 = 6.0;
    /// Seconds of light bought by one battery unit.
    pub const DRAIN_INTERVAL: f32 = 3.0;
    /// Seconds a depleted flashlight waits before it comes back.
    pub const RECHARGE_DELAY: f32 = 5.0;
    /// Battery level granted once a depleted flashlight recovers.
    pub const RECOVERY_CHARGE: f32 = 1.1;
    /// Units per second regained while the flashlight is off.
    pub const PASSIVE_RECHARGE_RATE: f32 = 0.5;
    /// The least battery needed to switch on.
    pub const MIN_SWITCH_ON: f32 = 1.0;
    /// Light intensity handed to the presentation layer while on.
    pub const BEAM_INTENSITY: f32 = 2.5;
}

pub mod ghost {
    use glam::Vec3;

    /// Where the ghost appears when a session starts.
    pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, WANDER_HEIGHT, WANDER_Z);

    pub const WANDER_Z: f32 = -16.0;
    pub const WANDER_HEIGHT: f32 = 1.6;
    pub const WANDER_AMPLITUDE: f32 = 8.0;
    /// Multiplier applied to `dt` when advancing the wander sine.
    pub const WANDER_RATE: f32 = 0.5;

    /// |x| beyond which a lit-room ghost may start an approach.
    pub const APPROACH_TRIGGER_X: f32 = 6.0;
    /// Per-tick chance of starting an approach near the path extremes.
    pub const APPROACH_CHANCE: f32 = 0.005;
    /// Chance of picking the nearer door when both are open.
    pub const NEAR_SIDE_BIAS: f32 = 0.64;
    pub const APPROACH_SPEED: f32 = 3.0;
    /// Depth of the turn between the diagonal and the straight approach legs.
    pub const APPROACH_PIVOT_Z: f32 = -9.0;

    /// Seconds between teleport rolls while the room is dark.
    pub const TELEPORT_INTERVAL: f32 = 1.5;
    pub const TELEPORT_CHANCE: f64 = 0.5;

    /// Distance the ghost keeps from the wall while stalking a door.
    pub const STALK_OFFSET: f32 = 1.0;
    pub const STALK_HEIGHT: f32 = 1.5;
    pub const STALK_TIMEOUT: f32 = 4.0;
    /// Seconds of continuous or cumulative exposure that banish a stalking ghost.
    pub const BANISH_EXPOSURE: f32 = 2.0;
    /// Minimum cosine between camera forward and camera→ghost for the beam to count (~25°).
    pub const EXPOSURE_CONE_COS: f32 = 0.9;
    /// Half-extent of the per-tick shake applied while irradiated.
    pub const EXPOSURE_JITTER: f32 = 0.05;

    /// Exponential rate at which an attacking ghost closes on the camera.
    pub const ATTACK_RATE: f32 = 4.0;
    pub const KILL_DISTANCE: f32 = 0.5;

    pub const RETREAT_SPEED: f32 = 6.0;
    /// Once a retreating ghost is deeper than this it resumes wandering.
    pub const RETREAT_EXIT_Z: f32 = WANDER_Z;
    /// Exponential rate at which tint relaxes back to neutral while retreating.
    pub const TINT_RELAX_RATE: f32 = 3.0;

    pub const BOB_AMPLITUDE: f32 = 0.15;
    pub const BOB_RATE: f32 = 2.0;
}

pub mod tint {
    use glam::Vec3;

    pub const NEUTRAL: Vec3 = Vec3::ONE;
    /// Fully exposed stalker.
    pub const EXPOSED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    /// Turned away by a closed door.
    pub const REJECTED: Vec3 = Vec3::new(0.45, 0.55, 1.0);
    /// Struck by a slammed door.
    pub const INJURED: Vec3 = Vec3::new(0.55, 0.1, 0.6);
}

pub mod effects {
    pub const BREACH_SHAKE_INTENSITY: f32 = 0.3;
    pub const BREACH_SHAKE_SECONDS: f32 = 0.4;
}
