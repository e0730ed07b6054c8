use serde::{Deserialize, Serialize};
use std::fmt;

use crate::player::Player;

/// Result of one resolved turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub roll: u32,
    /// Who rolled (not who is up next).
    pub player: Player,
    /// Ceiling in effect when the value was drawn.
    pub rolled_from: u32,
    pub game_over: bool,
    /// `Some(roll)` while the game continues, `None` once it is over.
    pub next_ceiling: Option<u32>,
}

impl RollOutcome {
    /// The player who rolled the 1, if this turn ended the game.
    pub fn loser(&self) -> Option<Player> {
        self.game_over.then_some(self.player)
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rolled out of {} and got {}",
            self.player, self.rolled_from, self.roll
        )?;
        if self.game_over {
            write!(f, ". {} loses!", self.player)?;
        }
        Ok(())
    }
}
