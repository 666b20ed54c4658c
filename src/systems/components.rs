use bevy_ecs::resource::Resource;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::constants::{CAMERA_FORWARD, CAMERA_POSITION};

/// Seconds elapsed since the previous frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime(pub f32);

/// Whether the flashlight produces light this frame, published after the flashlight updates.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightState(pub bool);

/// The player's view, written by the presentation/input layer before each tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    /// Facing direction; need not be normalized.
    pub forward: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: CAMERA_POSITION,
            forward: CAMERA_FORWARD,
        }
    }
}

impl CameraPose {
    /// A camera at the default position facing `target`.
    pub fn looking_at(target: Vec3) -> Self {
        Self {
            position: CAMERA_POSITION,
            forward: (target - CAMERA_POSITION).normalize_or(CAMERA_FORWARD),
        }
    }

    /// Cosine of the angle between the view direction and the direction to `point`.
    pub fn alignment(&self, point: Vec3) -> f32 {
        let to_point = (point - self.position).normalize_or_zero();
        self.forward.normalize_or_zero().dot(to_point)
    }
}

/// Session randomness, seeded once so runs can be replayed.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
}
