//! Input handling systems
//!
//! Keyboard and button input is the only thing that drives the session.
//! Each resolved turn is announced as a message for the presentation systems.

use bevy::prelude::*;

use crate::game3d::types::*;

fn pressed<T: Component>(buttons: &Query<&Interaction, (Changed<Interaction>, With<T>)>) -> bool {
    buttons.iter().any(|i| *i == Interaction::Pressed)
}

/// Roll on SPACE or a Roll button click
pub fn handle_roll_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    roll_buttons: Query<&Interaction, (Changed<Interaction>, With<RollButton>)>,
    mut session: ResMut<DeathrollSession>,
    mut resolved: MessageWriter<RollResolved>,
    mut rejected: MessageWriter<RollRejected>,
) {
    if !keyboard.just_pressed(KeyCode::Space) && !pressed(&roll_buttons) {
        return;
    }

    match session.roll() {
        Ok(outcome) => {
            info!("{}", outcome);
            resolved.write(RollResolved(outcome));
        }
        Err(e) if e.is_invalid_state() => {
            info!("Roll ignored: {}", e);
            rejected.write(RollRejected);
        }
        Err(e) => warn!("Roll failed: {}", e),
    }
}

/// Start a new game on R or a Restart button click
pub fn handle_restart_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    restart_buttons: Query<&Interaction, (Changed<Interaction>, With<RestartButton>)>,
    mut session: ResMut<DeathrollSession>,
    mut restarted: MessageWriter<GameRestarted>,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) && !pressed(&restart_buttons) {
        return;
    }

    session.reset();
    info!(
        "New game: {} rolls out of {}",
        session.state().active_player(),
        session.state().ceiling()
    );
    restarted.write(GameRestarted);
}

/// Hover feedback for HUD buttons
pub fn update_button_colors(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut color) in buttons.iter_mut() {
        *color = match interaction {
            Interaction::Hovered | Interaction::Pressed => BackgroundColor(BUTTON_HOVER_COLOR),
            Interaction::None => BackgroundColor(BUTTON_COLOR),
        };
    }
}
