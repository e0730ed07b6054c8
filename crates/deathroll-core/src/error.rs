use thiserror::Error;

use crate::player::Player;

/// Failures produced by a `RandomSource`.
///
/// None of these touch the game state, so the roll can be retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomSourceError {
    #[error("random source has no values left")]
    Exhausted,

    #[error("cannot draw from empty range {low}..={high}")]
    EmptyRange { low: u32, high: u32 },

    #[error("random source produced {value}, outside {low}..={high}")]
    OutOfRange { value: u32, low: u32, high: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeathrollError {
    /// A roll was attempted after somebody already rolled a 1.
    #[error("the game is over: {loser} already lost; reset to play again")]
    InvalidState { loser: Player },

    #[error("starting ceiling must be at least 1, got {0}")]
    InvalidCeiling(u32),

    #[error("roll failed: {0}")]
    RandomSource(#[from] RandomSourceError),

    /// A saved game whose fields contradict each other.
    #[error("invalid game state: {0}")]
    CorruptState(&'static str),
}

impl DeathrollError {
    /// True for the "game already finished" rejection, which front ends
    /// surface as a refused action rather than a failure.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, DeathrollError::InvalidState { .. })
    }
}
