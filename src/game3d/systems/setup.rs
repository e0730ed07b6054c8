//! Scene setup system
//!
//! This module contains the setup function that initializes the 3D scene:
//! camera, lights, grid floor, starfield, die, and the HUD.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::game3d::meshes::{
    create_die_mesh_and_collider, create_grid_line_mesh, create_particle_mesh, CUBE_DIE_SIZE,
};
use crate::game3d::types::*;
use deathroll_core::Player;

/// Height the physics die is dropped from.
pub const DIE_DROP_HEIGHT: f32 = 10.0;
const GRID_SIZE: f32 = 100.0;
const GRID_DIVISIONS: usize = 100;
const STARFIELD_EXTENT: f32 = 100.0;

/// Where the die sits at rest (or is dropped from) in the current mode.
pub fn die_home_position(physics: bool) -> Vec3 {
    if physics {
        Vec3::new(0.0, DIE_DROP_HEIGHT, 0.0)
    } else {
        Vec3::new(0.0, CUBE_DIE_SIZE, 0.0)
    }
}

/// Main setup system - initializes the entire 3D scene
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
    zoom_state: Res<ZoomState>,
) {
    // Camera - keep the classic (0, 10, 30) direction, distance from zoom state
    let camera_dir = Vec3::new(0.0, 10.0, 30.0).normalize();
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(camera_dir * zoom_state.get_distance())
            .looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));

    // 90s-style lights: dim ambient plus magenta and cyan point lights
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.25, 0.25, 0.25),
        brightness: 200.0,
        ..default()
    });
    for (color, position) in [
        (Color::srgb(1.0, 0.0, 1.0), Vec3::new(10.0, 10.0, 10.0)),
        (Color::srgb(0.0, 1.0, 1.0), Vec3::new(-10.0, -10.0, 10.0)),
    ] {
        commands.spawn((
            PointLight {
                color,
                intensity: 2_000_000.0,
                range: 100.0,
                shadows_enabled: config.physics_enabled,
                ..default()
            },
            Transform::from_translation(position),
        ));
    }
    if config.physics_enabled {
        commands.spawn((
            DirectionalLight {
                illuminance: 8000.0,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }

    spawn_grid(&mut commands, &mut meshes, &mut materials);

    if config.physics_enabled {
        // Floor - fixed body under the grid
        commands.spawn((
            Transform::from_xyz(0.0, -0.1, 0.0),
            Collider::cuboid(GRID_SIZE / 2.0, 0.1, GRID_SIZE / 2.0),
            RigidBody::Fixed,
            Restitution::coefficient(0.3),
            Friction::coefficient(0.8),
            Floor,
        ));
    }

    spawn_starfield(&mut commands, &mut meshes, &mut materials, config.particle_count);
    spawn_die(&mut commands, &mut meshes, &mut materials, &config);
    spawn_hud(&mut commands);
}

fn spawn_grid(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let line_mesh = meshes.add(create_grid_line_mesh(GRID_SIZE, 0.02));
    let line_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.35, 0.35),
        unlit: true,
        ..default()
    });

    let step = GRID_SIZE / GRID_DIVISIONS as f32;
    let half = GRID_SIZE / 2.0;
    for i in 0..=GRID_DIVISIONS {
        let offset = -half + i as f32 * step;
        // Lines along X
        commands.spawn((
            Mesh3d(line_mesh.clone()),
            MeshMaterial3d(line_mat.clone()),
            Transform::from_xyz(0.0, 0.0, offset),
            Floor,
        ));
        // Lines along Z
        commands.spawn((
            Mesh3d(line_mesh.clone()),
            MeshMaterial3d(line_mat.clone()),
            Transform::from_xyz(offset, 0.0, 0.0)
                .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
            Floor,
        ));
    }
}

fn spawn_starfield(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    count: usize,
) {
    let point_mesh = meshes.add(create_particle_mesh());
    let point_mat = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.8),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    let mut rng = rand::thread_rng();
    let half = STARFIELD_EXTENT / 2.0;
    commands
        .spawn((Transform::default(), Visibility::default(), Starfield))
        .with_children(|parent| {
            for _ in 0..count {
                parent.spawn((
                    Mesh3d(point_mesh.clone()),
                    MeshMaterial3d(point_mat.clone()),
                    Transform::from_xyz(
                        rng.gen_range(-half..half),
                        rng.gen_range(-half..half),
                        rng.gen_range(-half..half),
                    ),
                ));
            }
        });
}

/// Spawn the die for the configured mode
pub fn spawn_die(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    config: &SceneConfig,
) {
    let (mesh, collider) = create_die_mesh_and_collider(config.physics_enabled);
    let material = materials.add(StandardMaterial {
        base_color: config.player_color(Player::Player1),
        perceptual_roughness: 0.2,
        reflectance: 0.8,
        ..default()
    });

    let mut die = commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(material),
        Transform::from_translation(die_home_position(config.physics_enabled)),
        Die,
    ));

    if config.physics_enabled {
        die.insert((
            RigidBody::Dynamic,
            collider,
            Velocity::zero(),
            Restitution::coefficient(0.3),
            Friction::coefficient(0.8),
            ColliderMassProperties::Density(1.0),
        ));
    }
}

fn hud_text(value: impl Into<String>, font_size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(value),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(HUD_TEXT_COLOR),
    )
}

fn spawn_hud(commands: &mut Commands) {
    // Title
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((hud_text("DEATHROLL", 48.0), TitleText));
        });

    // Player panels
    for (player, left) in [(Player::Player1, true), (Player::Player2, false)] {
        let mut node = Node {
            position_type: PositionType::Absolute,
            top: Val::Px(90.0),
            padding: UiRect::all(Val::Px(12.0)),
            ..default()
        };
        if left {
            node.left = Val::Px(20.0);
        } else {
            node.right = Val::Px(20.0);
        }
        commands
            .spawn((node, BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5))))
            .with_children(|parent| {
                parent.spawn((hud_text(player.label(), 24.0), PlayerPanelText { player }));
            });
    }

    // Ceiling, turn, result, and buttons along the bottom
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(24.0),
            width: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            row_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((hud_text("", 36.0), CeilingText));
            parent.spawn((hud_text("", 24.0), TurnText));
            parent.spawn((hud_text("", 20.0), ResultText));

            for (label, is_roll) in [("Roll", true), ("Restart", false)] {
                let mut button = parent.spawn((
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(28.0), Val::Px(10.0)),
                        display: if is_roll { Display::Flex } else { Display::None },
                        ..default()
                    },
                    BackgroundColor(BUTTON_COLOR),
                ));
                if is_roll {
                    button.insert(RollButton);
                } else {
                    button.insert(RestartButton);
                }
                button.with_children(|b| {
                    b.spawn(hud_text(label, 24.0));
                });
            }

            parent.spawn(hud_text("SPACE to roll, R to restart, A/D orbit, W/S zoom", 14.0));
        });

    // Match tally
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            left: Val::Px(20.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((hud_text("", 14.0), HistoryText));
        });
}
