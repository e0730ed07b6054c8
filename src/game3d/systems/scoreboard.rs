//! Scoreboard systems
//!
//! Redraws the HUD from the session whenever it changes, and flashes the
//! result line when a roll is refused.

use bevy::prelude::*;

use crate::game3d::types::*;

type ScoreboardTextQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Text,
        AnyOf<(
            &'static PlayerPanelText,
            &'static CeilingText,
            &'static TurnText,
            &'static ResultText,
        )>,
    ),
>;

/// System to update the scoreboard text and which button is shown
pub fn update_scoreboard(
    session: Res<DeathrollSession>,
    mut texts: ScoreboardTextQuery,
    mut buttons: Query<(&mut Node, Has<RollButton>), Or<(With<RollButton>, With<RestartButton>)>>,
) {
    if !session.is_changed() {
        return;
    }

    let board = Scoreboard::from_state(session.state());

    for (mut text, (panel, ceiling, turn, result)) in texts.iter_mut() {
        let value = if let Some(panel) = panel {
            &board.player_panels[panel.player.index()]
        } else if ceiling.is_some() {
            &board.ceiling
        } else if turn.is_some() {
            &board.turn
        } else if result.is_some() {
            &board.result
        } else {
            continue;
        };
        if text.0 != *value {
            text.0 = value.clone();
        }
    }

    for (mut node, is_roll) in buttons.iter_mut() {
        let visible = if is_roll {
            board.show_roll
        } else {
            board.show_restart
        };
        node.display = if visible { Display::Flex } else { Display::None };
    }
}

/// Tint the result line red for a moment after a refused roll
pub fn flash_rejected_roll(
    mut rejected: MessageReader<RollRejected>,
    mut flash: ResMut<RejectFlash>,
    time: Res<Time>,
    mut result_text: Query<&mut TextColor, With<ResultText>>,
) {
    if rejected.read().count() > 0 {
        flash.timer = RejectFlash::DURATION;
    }

    if flash.timer <= 0.0 {
        return;
    }

    flash.timer = (flash.timer - time.delta_secs()).max(0.0);
    let color = if flash.timer > 0.0 {
        HUD_REJECT_COLOR
    } else {
        HUD_TEXT_COLOR
    };
    for mut text_color in result_text.iter_mut() {
        text_color.0 = color;
    }
}

/// Show the stored match tally
pub fn update_history_text(
    history: Res<MatchHistory>,
    mut texts: Query<&mut Text, With<HistoryText>>,
) {
    if !history.is_changed() {
        return;
    }

    let tally = history.tally;
    for mut text in texts.iter_mut() {
        text.0 = format!(
            "Matches: {}\nPlayer 1 lost {}\nPlayer 2 lost {}",
            tally.games, tally.player_one_losses, tally.player_two_losses
        );
    }
}
