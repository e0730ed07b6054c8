//! Scene configuration and 3D entity markers

use bevy::prelude::*;
use deathroll_core::Player;

use super::settings::{AppSettings, ColorSetting};

/// Visual configuration for the scene, resolved from settings + CLI flags
#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    pub physics_enabled: bool,
    pub background_color: ColorSetting,
    pub player_colors: [ColorSetting; 2],
    pub particle_count: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::from_settings(&AppSettings::default())
    }
}

impl SceneConfig {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            physics_enabled: settings.physics_enabled,
            background_color: settings.background_color,
            player_colors: [settings.player_one_color, settings.player_two_color],
            particle_count: settings.particle_count,
        }
    }

    pub fn player_color(&self, player: Player) -> Color {
        self.player_colors[player.index()].to_color()
    }
}

/// The deathroll die
#[derive(Component)]
pub struct Die;

/// Parent of all starfield points; rotating it rotates the whole field
#[derive(Component)]
pub struct Starfield;

/// Floor grid / physics ground
#[derive(Component)]
pub struct Floor;

#[derive(Component)]
pub struct TitleText;

/// Scale pulse played after each roll
#[derive(Resource, Default)]
pub struct DieAnimation {
    /// Seconds left in the current pulse
    pub pulse_remaining: f32,
}

impl DieAnimation {
    pub const PULSE_SECONDS: f32 = 0.5;
    pub const PULSE_SCALE: f32 = 1.5;

    pub fn start_pulse(&mut self) {
        self.pulse_remaining = Self::PULSE_SECONDS;
    }

    /// Advance the pulse and return the scale to apply this frame.
    pub fn tick(&mut self, dt: f32) -> f32 {
        if self.pulse_remaining <= 0.0 {
            return 1.0;
        }
        self.pulse_remaining = (self.pulse_remaining - dt).max(0.0);
        if self.pulse_remaining > 0.0 {
            Self::PULSE_SCALE
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_holds_then_returns_to_rest() {
        let mut anim = DieAnimation::default();
        assert_eq!(anim.tick(0.016), 1.0);

        anim.start_pulse();
        assert_eq!(anim.tick(0.2), DieAnimation::PULSE_SCALE);
        assert_eq!(anim.tick(0.2), DieAnimation::PULSE_SCALE);
        assert_eq!(anim.tick(0.2), 1.0);
        assert_eq!(anim.tick(0.2), 1.0);
    }

    #[test]
    fn test_player_colors_follow_settings() {
        let config = SceneConfig::default();
        let red = config.player_color(Player::Player1).to_srgba();
        let blue = config.player_color(Player::Player2).to_srgba();
        assert_eq!((red.red, red.blue), (1.0, 0.0));
        assert_eq!((blue.red, blue.blue), (0.0, 1.0));
    }
}
