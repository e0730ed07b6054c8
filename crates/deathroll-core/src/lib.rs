//! Deathroll turn engine
//!
//! Two players take turns rolling between 1 and the previous roll. Whoever
//! rolls a 1 loses. This crate owns that rule and nothing else:
//! - `player` - the two seats at the table
//! - `state` - the `GameState` value and its `Phase` view
//! - `outcome` - what a single turn produced
//! - `random` - the `RandomSource` seam plus rand-backed and scripted sources
//! - `engine` - `RollEngine`, the only thing that mutates a `GameState`
//! - `error` - engine and random source errors
//!
//! Rendering, input handling and persistence live in the front ends.

pub mod engine;
pub mod error;
pub mod outcome;
pub mod player;
pub mod random;
pub mod state;

pub use engine::{RollEngine, DEFAULT_CEILING};
pub use error::{DeathrollError, RandomSourceError};
pub use outcome::RollOutcome;
pub use player::Player;
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use state::{GameState, Phase};
