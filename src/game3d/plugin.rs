//! Plugins wiring the session and the scene into a Bevy app
//!
//! `DeathrollGamePlugin` is the rules side: messages, the session resource,
//! input and match recording. It needs no renderer, so it also runs under
//! `MinimalPlugins`. `DeathrollScenePlugin` is the swappable presentation
//! layer on top of it.

use bevy::prelude::*;

use crate::game3d::systems::*;
use crate::game3d::types::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeathrollSystems {
    /// Systems that call into the engine and emit outcome messages
    Input,
    /// Systems that react to outcomes
    Presentation,
}

pub struct DeathrollGamePlugin;

impl Plugin for DeathrollGamePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RollResolved>()
            .add_message::<GameRestarted>()
            .add_message::<RollRejected>()
            .init_resource::<DeathrollSession>()
            .init_resource::<MatchHistory>()
            .configure_sets(
                Update,
                (DeathrollSystems::Input, DeathrollSystems::Presentation).chain(),
            )
            .add_systems(
                Update,
                (handle_restart_input, handle_roll_input)
                    .chain()
                    .in_set(DeathrollSystems::Input),
            )
            .add_systems(
                Update,
                record_finished_match.in_set(DeathrollSystems::Presentation),
            );
    }
}

pub struct DeathrollScenePlugin;

impl Plugin for DeathrollScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>()
            .init_resource::<ZoomState>()
            .init_resource::<DieAnimation>()
            .init_resource::<RejectFlash>()
            .add_systems(Startup, setup)
            .add_systems(
                Update,
                (
                    update_button_colors,
                    update_scoreboard,
                    update_history_text,
                    flash_rejected_roll,
                    (animate_die_on_roll, pulse_die, spin_scene).chain(),
                    orbit_camera,
                )
                    .in_set(DeathrollSystems::Presentation),
            );
    }
}
