use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two seats at the table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Player1, Player::Player2];

    /// The opponent
    pub fn other(self) -> Player {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::Player1 => 1,
            Player::Player2 => 2,
        }
    }

    /// Slot in per-player arrays.
    pub fn index(self) -> usize {
        match self {
            Player::Player1 => 0,
            Player::Player2 => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Player::Player1 => "Player 1",
            Player::Player2 => "Player 2",
        }
    }

    pub fn from_number(n: u8) -> Option<Player> {
        match n {
            1 => Some(Player::Player1),
            2 => Some(Player::Player2),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_is_an_involution() {
        for p in Player::ALL {
            assert_ne!(p.other(), p);
            assert_eq!(p.other().other(), p);
        }
    }

    #[test]
    fn test_number_and_index_agree() {
        for p in Player::ALL {
            assert_eq!(p.index() + 1, p.number() as usize);
            assert_eq!(Player::from_number(p.number()), Some(p));
        }
        assert_eq!(Player::from_number(0), None);
        assert_eq!(Player::from_number(3), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Player::Player1.label(), "Player 1");
        assert_eq!(Player::Player2.to_string(), "Player 2");
    }
}
