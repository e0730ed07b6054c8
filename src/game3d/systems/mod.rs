//! Systems for the Deathroll 3D scene
//!
//! This module is organized into submodules:
//! - `setup` - scene initialization (camera, lights, grid, starfield, die, HUD)
//! - `input` - keyboard/button input that drives the session
//! - `scoreboard` - HUD text and button visibility
//! - `animation` - die recolor/pulse/throw and background motion
//! - `camera` - orbit and zoom controls
//! - `history` - recording finished matches

pub mod animation;
pub mod camera;
pub mod history;
pub mod input;
pub mod scoreboard;
pub mod setup;

pub use animation::*;
pub use camera::*;
pub use history::*;
pub use input::*;
pub use scoreboard::*;
pub use setup::*;
