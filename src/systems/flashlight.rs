//! The player's flashlight: a six-unit battery that drains while lit, recharges while dark,
//! and locks out after running dry.

use bevy_ecs::{
    event::{EventReader, EventWriter},
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::{debug, info, trace};

use crate::constants::flashlight::{
    BEAM_INTENSITY, DRAIN_INTERVAL, MAX_BATTERY, MIN_SWITCH_ON, PASSIVE_RECHARGE_RATE, RECHARGE_DELAY, RECOVERY_CHARGE,
};
use crate::events::{GameCommand, GameEvent, PresentationEvent};
use crate::systems::components::{DeltaTime, LightState};
use crate::systems::state::GameStage;

/// Snapshot returned by [`Flashlight::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashlightStatus {
    pub is_on: bool,
    /// Battery level in `[0, 1]`.
    pub battery_fraction: f32,
    pub is_depleted: bool,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Flashlight {
    battery_units: f32,
    is_on: bool,
    is_depleted: bool,
    /// Seconds since the last unit was consumed while on.
    usage_timer: f32,
    /// Seconds since depletion, while depleted.
    recharge_timer: f32,
    /// Visual press feedback only.
    button_down: bool,
}

impl Default for Flashlight {
    fn default() -> Self {
        Self {
            battery_units: MAX_BATTERY,
            is_on: false,
            is_depleted: false,
            usage_timer: 0.0,
            recharge_timer: 0.0,
            button_down: false,
        }
    }
}

impl Flashlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// A flashlight holding the given charge, clamped into `[0, MAX_BATTERY]`. Off and not depleted.
    pub fn with_battery(units: f32) -> Self {
        Self {
            battery_units: units.clamp(0.0, MAX_BATTERY),
            ..Self::default()
        }
    }

    pub fn battery_units(&self) -> f32 {
        self.battery_units
    }

    pub fn battery_fraction(&self) -> f32 {
        self.battery_units / MAX_BATTERY
    }

    /// Whole bars shown on the battery gauge.
    pub fn battery_bars(&self) -> u8 {
        self.battery_units.ceil() as u8
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn is_depleted(&self) -> bool {
        self.is_depleted
    }

    pub fn is_button_down(&self) -> bool {
        self.button_down
    }

    /// Light emitted by the beam; zero whenever the flashlight is off.
    pub fn intensity(&self) -> f32 {
        if self.is_on {
            BEAM_INTENSITY
        } else {
            0.0
        }
    }

    pub fn status(&self) -> FlashlightStatus {
        FlashlightStatus {
            is_on: self.is_on,
            battery_fraction: self.battery_fraction(),
            is_depleted: self.is_depleted,
        }
    }

    pub fn press_button(&mut self) {
        self.button_down = true;
    }

    /// Releasing the button flips the flashlight, unless it is locked out by depletion.
    pub fn release_button(&mut self) {
        self.button_down = false;
        if !self.is_depleted {
            self.toggle();
        }
    }

    /// Switches the flashlight. Switching on costs one battery unit up front and is refused
    /// below [`MIN_SWITCH_ON`].
    pub fn toggle(&mut self) {
        if !self.is_on && self.battery_units < MIN_SWITCH_ON {
            debug!(battery = self.battery_units, "Not enough battery to switch on");
            return;
        }

        self.is_on = !self.is_on;
        if self.is_on {
            debug!(battery = self.battery_units, "Flashlight on");
            self.usage_timer = 0.0;
            self.consume_battery_step();
        } else {
            debug!(battery = self.battery_units, "Flashlight off");
        }
    }

    pub fn consume_battery_step(&mut self) {
        self.battery_units -= 1.0;
        trace!(battery = self.battery_units, "Consumed a battery unit");
        if self.battery_units <= 0.0 {
            self.battery_units = 0.0;
            self.trigger_depletion();
        }
    }

    pub fn trigger_depletion(&mut self) {
        info!("Flashlight battery depleted");
        self.is_on = false;
        self.is_depleted = true;
        self.recharge_timer = 0.0;
    }

    /// Advances battery timers by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> FlashlightStatus {
        if self.is_depleted {
            self.is_on = false;
            self.recharge_timer += dt;
            if self.recharge_timer >= RECHARGE_DELAY {
                info!(battery = RECOVERY_CHARGE, "Flashlight recovered from depletion");
                self.battery_units = RECOVERY_CHARGE;
                self.is_depleted = false;
                self.recharge_timer = 0.0;
            }
        } else if self.is_on {
            self.usage_timer += dt;
            if self.usage_timer >= DRAIN_INTERVAL {
                self.consume_battery_step();
                self.usage_timer = 0.0;
            }
        } else if self.battery_units < MAX_BATTERY {
            self.battery_units = (self.battery_units + PASSIVE_RECHARGE_RATE * dt).min(MAX_BATTERY);
        }

        self.status()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Applies mouse-button commands for the frame.
pub fn flashlight_control_system(
    mut events: EventReader<GameEvent>,
    mut flashlight: ResMut<Flashlight>,
    mut effects: EventWriter<PresentationEvent>,
    stage: Res<GameStage>,
) {
    if !stage.is_playing() {
        events.clear();
        return;
    }

    for event in events.read() {
        match *event {
            GameEvent::Command(GameCommand::PressFlashlight) => flashlight.press_button(),
            GameEvent::Command(GameCommand::ReleaseFlashlight) => {
                let was_depleted = flashlight.is_depleted();
                flashlight.release_button();
                // Switching on with exactly one unit left spends it all at once.
                if !was_depleted && flashlight.is_depleted() {
                    effects.write(PresentationEvent::FlashlightDepleted);
                }
            }
            _ => {}
        }
    }
}

/// Runs the battery model and publishes whether the beam is lit this frame.
pub fn flashlight_system(
    dt: Res<DeltaTime>,
    mut flashlight: ResMut<Flashlight>,
    mut light: ResMut<LightState>,
    mut effects: EventWriter<PresentationEvent>,
) {
    let was_depleted = flashlight.is_depleted();
    let status = flashlight.update(dt.0);

    match (was_depleted, status.is_depleted) {
        (false, true) => {
            effects.write(PresentationEvent::FlashlightDepleted);
        }
        (true, false) => {
            effects.write(PresentationEvent::FlashlightRecovered);
        }
        _ => {}
    }

    light.0 = status.is_on;
}
