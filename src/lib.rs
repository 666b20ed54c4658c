//! Doorwatch: the core of a two-door first-person horror game.

pub mod app;
pub mod autopilot;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod platform;
pub mod presentation;
pub mod systems;
