//! The Entity-Component-System (ECS) module.
//!
//! Each gameplay subsystem is a resource with plain methods holding the rules, plus a thin
//! system that feeds it the frame's inputs.

pub mod components;
pub mod door;
pub mod flashlight;
pub mod ghost;
pub mod state;

pub use self::components::*;
pub use self::door::*;
pub use self::flashlight::*;
pub use self::ghost::*;
pub use self::state::*;
