//! The contract between the game core and whatever draws it.
//!
//! The core never renders. After each tick [`crate::game::Game::present`] pushes the current
//! state through a [`Presenter`]: plain setters for continuous state, and
//! [`Presenter::effect`] for one-shot effects such as camera shake.

use glam::Vec3;
use tracing::{debug, info, trace};

use crate::events::PresentationEvent;
use crate::systems::door::{DoorSide, DoorState};

pub trait Presenter {
    /// False until the ghost model has loaded and ticked at least once.
    fn ghost_visible(&mut self, visible: bool);
    /// `facing` is the yaw turning the ghost toward the camera, when it should billboard.
    fn ghost_transform(&mut self, position: Vec3, facing: Option<f32>);
    fn ghost_tint(&mut self, tint: Vec3);
    /// Flashlight beam intensity; zero when off.
    fn light(&mut self, intensity: f32);
    /// Flashlight button press feedback.
    fn button(&mut self, pressed: bool);
    fn battery(&mut self, bars: u8, fraction: f32, depleted: bool);
    fn door(&mut self, side: DoorSide, state: DoorState);
    fn effect(&mut self, event: PresentationEvent);
}

/// A presenter for headless runs: logs what a renderer would change.
#[derive(Debug, Default)]
pub struct TracingPresenter {
    visible: Option<bool>,
    light: Option<f32>,
    bars: Option<u8>,
    doors: [Option<DoorState>; 2],
}

impl Presenter for TracingPresenter {
    fn ghost_visible(&mut self, visible: bool) {
        if self.visible.replace(visible) != Some(visible) {
            debug!(visible, "Ghost visibility changed");
        }
    }

    fn ghost_transform(&mut self, position: Vec3, facing: Option<f32>) {
        trace!(?position, ?facing, "Ghost transform");
    }

    fn ghost_tint(&mut self, tint: Vec3) {
        trace!(?tint, "Ghost tint");
    }

    fn light(&mut self, intensity: f32) {
        if self.light.replace(intensity) != Some(intensity) {
            debug!(intensity, "Flashlight beam changed");
        }
    }

    fn button(&mut self, pressed: bool) {
        trace!(pressed, "Flashlight button");
    }

    fn battery(&mut self, bars: u8, fraction: f32, depleted: bool) {
        if self.bars.replace(bars) != Some(bars) {
            debug!(bars, fraction, depleted, "Battery gauge changed");
        }
    }

    fn door(&mut self, side: DoorSide, state: DoorState) {
        let slot = match side {
            DoorSide::Left => &mut self.doors[0],
            DoorSide::Right => &mut self.doors[1],
        };
        if slot.replace(state) != Some(state) {
            debug!(door = %side, open = state.is_open, broken = state.is_broken, "Door visual changed");
        }
    }

    fn effect(&mut self, event: PresentationEvent) {
        info!(?event, "Effect");
    }
}
