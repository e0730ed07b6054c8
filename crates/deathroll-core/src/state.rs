//! Game state for a single deathroll match
//!
//! `GameState` is a plain value owned by whoever drives the game (a Bevy
//! resource, the CLI loop, a test). Its fields are private so that only
//! `RollEngine` can advance it, which keeps the ceiling and turn-order
//! invariants intact. Deserialization goes through the same checks, so a
//! loaded game is always one the engine could have produced.

use serde::{Deserialize, Serialize};

use crate::error::DeathrollError;
use crate::outcome::RollOutcome;
use crate::player::Player;

/// State machine view of a `GameState`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    InProgress { active: Player, ceiling: u32 },
    Finished { loser: Player },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    active_player: Player,
    ceiling: u32,
    last_roll: [Option<u32>; 2],
    is_over: bool,
    loser: Option<Player>,
    starting_ceiling: u32,
    history: Vec<RollOutcome>,
}

impl GameState {
    /// `starting_ceiling` is validated by `RollEngine`; this only runs on
    /// values the engine accepted.
    pub(crate) fn new(starting_ceiling: u32) -> Self {
        Self {
            active_player: Player::Player1,
            ceiling: starting_ceiling,
            last_roll: [None, None],
            is_over: false,
            loser: None,
            starting_ceiling,
            history: Vec::new(),
        }
    }

    pub fn active_player(&self) -> Player {
        self.active_player
    }

    /// Inclusive upper bound of the next roll.
    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    pub fn last_roll(&self, player: Player) -> Option<u32> {
        self.last_roll[player.index()]
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn loser(&self) -> Option<Player> {
        self.loser
    }

    pub fn starting_ceiling(&self) -> u32 {
        self.starting_ceiling
    }

    /// Every resolved turn, oldest first.
    pub fn history(&self) -> &[RollOutcome] {
        &self.history
    }

    pub fn turns(&self) -> usize {
        self.history.len()
    }

    pub fn last_outcome(&self) -> Option<&RollOutcome> {
        self.history.last()
    }

    pub fn phase(&self) -> Phase {
        match self.loser {
            Some(loser) if self.is_over => Phase::Finished { loser },
            _ => Phase::InProgress {
                active: self.active_player,
                ceiling: self.ceiling,
            },
        }
    }

    /// Apply a draw that the engine has already range-checked.
    pub(crate) fn apply(&mut self, roll: u32) -> RollOutcome {
        let player = self.active_player;
        let rolled_from = self.ceiling;

        self.last_roll[player.index()] = Some(roll);
        self.ceiling = roll;

        let game_over = roll == 1;
        if game_over {
            self.is_over = true;
            self.loser = Some(player);
        } else {
            self.active_player = player.other();
        }

        let outcome = RollOutcome {
            roll,
            player,
            rolled_from,
            game_over,
            next_ceiling: (!game_over).then_some(roll),
        };
        self.history.push(outcome);
        outcome
    }
}

/// Unchecked wire form of `GameState`.
#[derive(Deserialize)]
struct RawGameState {
    active_player: Player,
    ceiling: u32,
    last_roll: [Option<u32>; 2],
    is_over: bool,
    loser: Option<Player>,
    starting_ceiling: u32,
    history: Vec<RollOutcome>,
}

impl TryFrom<RawGameState> for GameState {
    type Error = DeathrollError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        let corrupt = |reason: &'static str| -> Result<Self, DeathrollError> {
            Err(DeathrollError::CorruptState(reason))
        };

        if raw.ceiling == 0 || raw.starting_ceiling == 0 {
            return corrupt("ceiling must be at least 1");
        }
        if raw.ceiling > raw.starting_ceiling {
            return corrupt("ceiling is above the starting ceiling");
        }
        if raw.loser.is_some() != raw.is_over {
            return corrupt("a game has a loser exactly when it is over");
        }

        match raw.history.last() {
            None => {
                if raw.is_over || raw.ceiling != raw.starting_ceiling {
                    return corrupt("a game with no turns must be fresh");
                }
                if raw.active_player != Player::Player1 {
                    return corrupt("player 1 always rolls first");
                }
            }
            Some(last) => {
                if last.roll != raw.ceiling {
                    return corrupt("ceiling does not match the last roll");
                }
                if last.game_over != raw.is_over {
                    return corrupt("only a roll of 1 ends the game");
                }
                let expected_active = if raw.is_over {
                    last.player
                } else {
                    last.player.other()
                };
                let loser_matches = !raw.is_over || raw.loser == Some(last.player);
                if raw.active_player != expected_active || !loser_matches {
                    return corrupt("turn order does not match the history");
                }
            }
        }

        for player in Player::ALL {
            let from_history = raw
                .history
                .iter()
                .rev()
                .find(|outcome| outcome.player == player)
                .map(|outcome| outcome.roll);
            if raw.last_roll[player.index()] != from_history {
                return corrupt("last rolls do not match the history");
            }
        }

        Ok(Self {
            active_player: raw.active_player,
            ceiling: raw.ceiling,
            last_roll: raw.last_roll,
            is_over: raw.is_over,
            loser: raw.loser,
            starting_ceiling: raw.starting_ceiling,
            history: raw.history,
        })
    }
}
