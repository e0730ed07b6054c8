//! UI components and scoreboard text
//!
//! Markers for the HUD text nodes and buttons, plus `Scoreboard`, the plain
//! text snapshot of a `GameState` that the HUD renders.

use bevy::prelude::*;
use deathroll_core::{GameState, Phase, Player};

/// Per-player panel showing that player's last roll
#[derive(Component)]
pub struct PlayerPanelText {
    pub player: Player,
}

/// "Rolling out of N" line
#[derive(Component)]
pub struct CeilingText;

/// "Turn: Player N"
#[derive(Component)]
pub struct TurnText;

/// Outcome of the most recent roll
#[derive(Component)]
pub struct ResultText;

/// Matches played / losses tally
#[derive(Component)]
pub struct HistoryText;

#[derive(Component)]
pub struct RollButton;

#[derive(Component)]
pub struct RestartButton;

/// Short red tint on the result line after a refused roll
#[derive(Resource, Default)]
pub struct RejectFlash {
    pub timer: f32,
}

impl RejectFlash {
    pub const DURATION: f32 = 0.4;
}

pub const HUD_TEXT_COLOR: Color = Color::WHITE;
pub const HUD_REJECT_COLOR: Color = Color::srgb(1.0, 0.3, 0.3);
pub const BUTTON_COLOR: Color = Color::srgb(0.15, 0.15, 0.2);
pub const BUTTON_HOVER_COLOR: Color = Color::srgb(0.3, 0.1, 0.35);

/// Text shown on the HUD for a given game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    pub player_panels: [String; 2],
    pub ceiling: String,
    pub turn: String,
    pub result: String,
    pub show_roll: bool,
    pub show_restart: bool,
}

impl Scoreboard {
    pub fn from_state(state: &GameState) -> Self {
        let player_panels = Player::ALL.map(|player| {
            let last = state
                .last_roll(player)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            format!("{}: {}\nLast Roll: {}", player, current_number(state, player), last)
        });

        let (turn, finished) = match state.phase() {
            Phase::InProgress { active, .. } => (format!("Turn: {}", active), false),
            Phase::Finished { loser } => (format!("{} loses!", loser), true),
        };

        let result = state
            .last_outcome()
            .map(|outcome| outcome.to_string())
            .unwrap_or_default();

        Self {
            player_panels,
            ceiling: format!("Rolling out of {}", state.ceiling()),
            turn,
            result,
            show_roll: !finished,
            show_restart: finished,
        }
    }
}

/// The number shown big on a player's panel: the ceiling they face while it
/// is their turn, otherwise what they last rolled (the start before that).
fn current_number(state: &GameState, player: Player) -> u32 {
    match state.phase() {
        Phase::InProgress { active, ceiling } if active == player => ceiling,
        _ => state.last_roll(player).unwrap_or(state.starting_ceiling()),
    }
}
