//! Type definitions for the Deathroll 3D scene
//!
//! This module is organized into submodules:
//! - `session` - the engine/state/rng resource and the outcome messages
//! - `scene` - scene configuration and 3D entity markers
//! - `ui` - scoreboard text and button markers
//! - `camera` - camera marker and orbit/zoom state
//! - `settings` - persisted application settings
//! - `database` - embedded SurrealDB store for settings and match history

pub mod camera;
pub mod database;
pub mod scene;
pub mod session;
pub mod settings;
pub mod ui;

pub use camera::*;
pub use database::*;
pub use scene::*;
pub use session::*;
pub use settings::*;
pub use ui::*;
