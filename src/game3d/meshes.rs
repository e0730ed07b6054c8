use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Edge length of the spinning cube die.
pub const CUBE_DIE_SIZE: f32 = 5.0;
/// Radius of the physics die.
pub const BALL_DIE_RADIUS: f32 = 3.0;
/// Icosphere subdivisions; high enough that the die reads as round.
const BALL_DIE_SUBDIVISIONS: u32 = 5;

/// Die mesh and collider for the current mode.
///
/// Without physics the die is a plain cube that spins in place. With physics
/// it is a heavily subdivided icosphere (a "d500") with a matching ball
/// collider.
pub fn create_die_mesh_and_collider(physics: bool) -> (Mesh, Collider) {
    if physics {
        let sphere = Sphere::new(BALL_DIE_RADIUS);
        let mesh = sphere
            .mesh()
            .ico(BALL_DIE_SUBDIVISIONS)
            .unwrap_or_else(|_| sphere.mesh().uv(64, 32));
        (mesh, Collider::ball(BALL_DIE_RADIUS))
    } else {
        let half = CUBE_DIE_SIZE / 2.0;
        (
            Mesh::from(Cuboid::new(CUBE_DIE_SIZE, CUBE_DIE_SIZE, CUBE_DIE_SIZE)),
            Collider::cuboid(half, half, half),
        )
    }
}

/// One grid line as a thin box lying on the XZ plane.
pub fn create_grid_line_mesh(length: f32, thickness: f32) -> Mesh {
    Mesh::from(Cuboid::new(length, thickness, thickness))
}

/// Tiny sphere used for every starfield point.
pub fn create_particle_mesh() -> Mesh {
    Sphere::new(0.05).mesh().uv(6, 4)
}
