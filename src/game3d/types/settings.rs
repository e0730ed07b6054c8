//! Application settings types and persistence
//!
//! This module handles loading and saving application settings.

use bevy::log::info;
use bevy::prelude::*;
use deathroll_core::DEFAULT_CEILING;
use serde::{Deserialize, Serialize};

use super::database::GameDatabase;

/// Simple serializable RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSetting {
    #[serde(default)]
    pub a: f32,
    #[serde(default)]
    pub r: f32,
    #[serde(default)]
    pub g: f32,
    #[serde(default)]
    pub b: f32,
}

impl Default for ColorSetting {
    fn default() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

impl ColorSetting {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { a: 1.0, r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::srgba(self.r, self.g, self.b, self.a)
    }

    /// Parse any CSS color string: "#ff00ff", "rgb(0 255 255)", "navy", ...
    pub fn parse(input: &str) -> Result<Self, String> {
        let parsed = csscolorparser::parse(input.trim())
            .map_err(|e| format!("Invalid color '{}': {}", input, e))?;
        Ok(Self {
            a: parsed.a,
            r: parsed.r,
            g: parsed.g,
            b: parsed.b,
        })
    }

    pub fn to_hex(&self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// Application settings (persisted to SurrealDB).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Ceiling of the first roll of every game.
    #[serde(default = "default_starting_ceiling")]
    pub starting_ceiling: u32,

    /// Drop a rigid-body die onto a floor instead of spinning a cube.
    #[serde(default)]
    pub physics_enabled: bool,

    #[serde(default)]
    pub background_color: ColorSetting,

    #[serde(default = "default_player_one_color")]
    pub player_one_color: ColorSetting,

    #[serde(default = "default_player_two_color")]
    pub player_two_color: ColorSetting,

    /// Number of points in the background starfield.
    #[serde(default = "default_particle_count")]
    pub particle_count: usize,
}

fn default_starting_ceiling() -> u32 {
    DEFAULT_CEILING
}

fn default_player_one_color() -> ColorSetting {
    ColorSetting::rgb(1.0, 0.0, 0.0)
}

fn default_player_two_color() -> ColorSetting {
    ColorSetting::rgb(0.0, 0.0, 1.0)
}

fn default_particle_count() -> usize {
    1000
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            starting_ceiling: default_starting_ceiling(),
            physics_enabled: false,
            background_color: ColorSetting::default(),
            player_one_color: default_player_one_color(),
            player_two_color: default_player_two_color(),
            particle_count: default_particle_count(),
        }
    }
}

impl AppSettings {
    const SETTINGS_DB_KEY: &'static str = "app_settings";

    /// Load settings from the given database, falling back to defaults.
    pub fn load_from_db(db: &GameDatabase) -> Self {
        match db.get_setting::<AppSettings>(Self::SETTINGS_DB_KEY) {
            Ok(Some(settings)) => {
                info!("Loaded settings from SurrealDB");
                settings
            }
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Failed to load settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn save_to_db(&self, db: &GameDatabase) -> Result<(), String> {
        db.set_setting(Self::SETTINGS_DB_KEY, self)
    }
}
