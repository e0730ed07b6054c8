use log::{debug, info};

use crate::error::{DeathrollError, RandomSourceError};
use crate::outcome::RollOutcome;
use crate::random::RandomSource;
use crate::state::GameState;

/// Ceiling of the very first roll.
pub const DEFAULT_CEILING: u32 = 500;

/// Resolves turns against a `GameState`.
///
/// The engine holds configuration only; the state it acts on is always passed
/// in by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollEngine {
    starting_ceiling: u32,
}

impl Default for RollEngine {
    fn default() -> Self {
        Self {
            starting_ceiling: DEFAULT_CEILING,
        }
    }
}

impl RollEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_starting_ceiling(starting_ceiling: u32) -> Result<Self, DeathrollError> {
        if starting_ceiling == 0 {
            return Err(DeathrollError::InvalidCeiling(starting_ceiling));
        }
        Ok(Self { starting_ceiling })
    }

    pub fn starting_ceiling(&self) -> u32 {
        self.starting_ceiling
    }

    /// Fresh game: Player 1 to roll against the starting ceiling.
    pub fn new_game(&self) -> GameState {
        GameState::new(self.starting_ceiling)
    }

    /// Resolve the active player's turn.
    ///
    /// Fails with `InvalidState` once the game is finished; nothing is drawn
    /// from `source` in that case. A source failure leaves `state` untouched.
    pub fn roll<S>(
        &self,
        state: &mut GameState,
        source: &mut S,
    ) -> Result<RollOutcome, DeathrollError>
    where
        S: RandomSource + ?Sized,
    {
        if state.is_over() {
            // A finished game never passes the turn, so the active player is the loser.
            let loser = state.loser().unwrap_or(state.active_player());
            return Err(DeathrollError::InvalidState { loser });
        }

        let high = state.ceiling();
        let roll = source.next_in_range(1, high)?;
        if !(1..=high).contains(&roll) {
            return Err(RandomSourceError::OutOfRange {
                value: roll,
                low: 1,
                high,
            }
            .into());
        }

        let outcome = state.apply(roll);
        debug!(
            "turn {}: {} rolled {} out of {}",
            state.turns(),
            outcome.player,
            outcome.roll,
            outcome.rolled_from
        );
        if outcome.game_over {
            info!(
                "{} loses after {} turns (started at {})",
                outcome.player,
                state.turns(),
                state.starting_ceiling()
            );
        }

        Ok(outcome)
    }

    /// Replace `state` with a fresh game, whatever it was doing.
    pub fn reset(&self, state: &mut GameState) {
        if state.turns() > 0 {
            info!("game reset after {} turns", state.turns());
        }
        *state = self.new_game();
    }

    /// Roll until somebody loses. Returns the losing turn.
    pub fn play_out<S>(
        &self,
        state: &mut GameState,
        source: &mut S,
    ) -> Result<RollOutcome, DeathrollError>
    where
        S: RandomSource + ?Sized,
    {
        loop {
            let outcome = self.roll(state, source)?;
            if outcome.game_over {
                return Ok(outcome);
            }
        }
    }
}
