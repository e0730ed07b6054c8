//! Match history systems

use bevy::prelude::*;

use crate::game3d::types::*;

/// Store every finished game. Storage failures are logged and otherwise
/// ignored; the game keeps running without history.
pub fn record_finished_match(
    mut resolved: MessageReader<RollResolved>,
    session: Res<DeathrollSession>,
    mut history: ResMut<MatchHistory>,
) {
    for RollResolved(outcome) in resolved.read() {
        if !outcome.game_over {
            continue;
        }
        match history.record(session.state()) {
            Ok(Some(record)) => info!(
                "Recorded match #{}: Player {} lost after {} turns",
                record.sid, record.loser, record.turns
            ),
            Ok(None) => {}
            Err(e) => warn!("Failed to record match: {}", e),
        }
    }
}
