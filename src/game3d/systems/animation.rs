//! Die and background animation systems
//!
//! Purely cosmetic: nothing here feeds back into the session.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::game3d::types::*;
use deathroll_core::Player;

use super::setup::die_home_position;

/// Starfield rotation, radians per second on X and Y.
const STARFIELD_SPIN: f32 = 0.03;
/// Cube die rotation, radians per second on X and Y.
const DIE_SPIN: f32 = 0.6;

/// Random velocity kick for the physics die
pub fn throw_velocity(rng: &mut impl Rng) -> Velocity {
    Velocity {
        linvel: Vec3::new(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(0.0..10.0),
            rng.gen_range(-5.0..5.0),
        ),
        angvel: Vec3::new(
            rng.gen_range(0.0..5.0),
            rng.gen_range(0.0..5.0),
            rng.gen_range(0.0..5.0),
        ),
    }
}

/// React to engine outcomes: recolor the die, pulse it, and throw it.
#[allow(clippy::type_complexity)]
pub fn animate_die_on_roll(
    mut resolved: MessageReader<RollResolved>,
    mut restarted: MessageReader<GameRestarted>,
    config: Res<SceneConfig>,
    mut animation: ResMut<DieAnimation>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut dice: Query<
        (
            &MeshMaterial3d<StandardMaterial>,
            &mut Transform,
            Option<&mut Velocity>,
        ),
        With<Die>,
    >,
) {
    let mut rng = rand::thread_rng();

    for RollResolved(outcome) in resolved.read() {
        animation.start_pulse();
        for (material, _, velocity) in dice.iter_mut() {
            if let Some(mat) = materials.get_mut(&material.0) {
                mat.base_color = config.player_color(outcome.player);
            }
            if let Some(mut velocity) = velocity {
                *velocity = throw_velocity(&mut rng);
            }
        }
    }

    if restarted.read().count() > 0 {
        animation.pulse_remaining = 0.0;
        for (material, mut transform, velocity) in dice.iter_mut() {
            if let Some(mat) = materials.get_mut(&material.0) {
                mat.base_color = config.player_color(Player::Player1);
            }
            if let Some(mut velocity) = velocity {
                // Pick the die back up and drop it again.
                transform.translation = die_home_position(true);
                transform.rotation = Quat::IDENTITY;
                *velocity = Velocity::zero();
            }
        }
    }
}

/// Apply the post-roll scale pulse
pub fn pulse_die(
    time: Res<Time>,
    mut animation: ResMut<DieAnimation>,
    mut dice: Query<&mut Transform, With<Die>>,
) {
    let scale = animation.tick(time.delta_secs());
    for mut transform in dice.iter_mut() {
        transform.scale = Vec3::splat(scale);
    }
}

/// Slowly rotate the starfield; spin the cube die when physics is off.
pub fn spin_scene(
    time: Res<Time>,
    config: Res<SceneConfig>,
    mut starfield: Query<&mut Transform, (With<Starfield>, Without<Die>)>,
    mut dice: Query<&mut Transform, (With<Die>, Without<Starfield>)>,
) {
    let dt = time.delta_secs();

    for mut transform in starfield.iter_mut() {
        transform.rotate_x(STARFIELD_SPIN * dt);
        transform.rotate_y(STARFIELD_SPIN * dt);
    }

    if config.physics_enabled {
        return;
    }
    for mut transform in dice.iter_mut() {
        transform.rotate_x(DIE_SPIN * dt);
        transform.rotate_y(DIE_SPIN * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_throw_velocity_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let v = throw_velocity(&mut rng);
            assert!(v.linvel.x >= -5.0 && v.linvel.x < 5.0);
            assert!(v.linvel.y >= 0.0 && v.linvel.y < 10.0);
            assert!(v.linvel.z >= -5.0 && v.linvel.z < 5.0);
            for c in v.angvel.to_array() {
                assert!((0.0..5.0).contains(&c));
            }
        }
    }
}
