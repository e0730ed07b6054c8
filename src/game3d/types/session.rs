//! Game session resource and outcome messages
//!
//! `DeathrollSession` is the one place the scene keeps game state. Input
//! systems drive it through the engine and announce the result as messages;
//! everything visual reacts to those messages.

use bevy::prelude::*;
use deathroll_core::{DeathrollError, GameState, RngSource, RollEngine, RollOutcome};
use rand::rngs::StdRng;

#[derive(Resource)]
pub struct DeathrollSession {
    engine: RollEngine,
    state: GameState,
    rng: RngSource<StdRng>,
}

impl Default for DeathrollSession {
    fn default() -> Self {
        Self::new(RollEngine::default(), RngSource::from_entropy())
    }
}

impl DeathrollSession {
    pub fn new(engine: RollEngine, rng: RngSource<StdRng>) -> Self {
        Self {
            state: engine.new_game(),
            engine,
            rng,
        }
    }

    pub fn engine(&self) -> &RollEngine {
        &self.engine
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn roll(&mut self) -> Result<RollOutcome, DeathrollError> {
        self.engine.roll(&mut self.state, &mut self.rng)
    }

    pub fn reset(&mut self) {
        self.engine.reset(&mut self.state);
    }
}

/// A turn was resolved by the engine.
#[derive(Message, Clone, Copy, Debug)]
pub struct RollResolved(pub RollOutcome);

/// The session was reset to a fresh game.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct GameRestarted;

/// A roll was refused because the game is already over.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct RollRejected;
