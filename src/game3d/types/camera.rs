//! Camera-related types and components
//!
//! This module contains the main camera marker component and the orbit/zoom
//! state driven from the keyboard.

use bevy::prelude::*;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Resource tracking camera zoom
#[derive(Resource)]
pub struct ZoomState {
    /// Zoom level (0.0 = closest, 1.0 = farthest)
    pub level: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ZoomState {
    fn default() -> Self {
        // Default distance matches the classic (0, 10, 30) camera.
        let min_distance = 12.0;
        let max_distance = 60.0;
        let start = Vec3::new(0.0, 10.0, 30.0).length();
        Self {
            level: (start - min_distance) / (max_distance - min_distance),
            min_distance,
            max_distance,
        }
    }
}

impl ZoomState {
    /// Get the camera distance based on zoom level
    pub fn get_distance(&self) -> f32 {
        self.min_distance + self.level.clamp(0.0, 1.0) * (self.max_distance - self.min_distance)
    }
}
