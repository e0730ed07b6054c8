//! Deathroll 3D front end
//!
//! The turn rules live in `deathroll-core`; this crate renders them with Bevy
//! and keeps settings and finished matches in an embedded SurrealDB store.

pub mod game3d;

pub use deathroll_core as engine;
