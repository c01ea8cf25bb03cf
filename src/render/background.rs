//! Background rendering for the orrery.
//!
//! Provides starfield and lighting systems.

use bevy::prelude::*;
use rand::Rng;

use crate::camera::FAR_PLANE;
use crate::render::bodies::SceneEntity;
use crate::types::SYSTEM_CENTER;

/// Number of background stars.
pub const STAR_COUNT: usize = 5000;

/// Stars are placed on a shell between these radii.
pub const STAR_SHELL: (f32, f32) = (1500.0, 2500.0);

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_starfield, spawn_lighting));
    }
}

/// Random point on a spherical shell.
pub fn star_position(rng: &mut impl Rng, inner: f32, outer: f32) -> Vec3 {
    let direction = loop {
        let candidate = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        let length = candidate.length_squared();
        if length > 1e-4 && length <= 1.0 {
            break candidate.normalize();
        }
    };
    direction * rng.random_range(inner..outer)
}

/// Spawn a starfield shell around the system.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Material for stars - emissive white
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 0.5,
        unlit: true,
        ..default()
    });

    let star_mesh = meshes.add(Sphere::new(1.0));

    let mut rng = rand::rng();
    let (inner, outer) = STAR_SHELL;
    debug_assert!(outer < FAR_PLANE);

    for _ in 0..STAR_COUNT {
        let scale = rng.random_range(0.5..2.0);
        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::from_translation(star_position(&mut rng, inner, outer))
                .with_scale(Vec3::splat(scale)),
            SceneEntity,
        ));
    }

    info!("Spawned {STAR_COUNT} background stars");
}

/// Spawn lighting for the scene.
fn spawn_lighting(mut commands: Commands) {
    // Point light at the system centre, inside the primary
    commands.spawn((
        PointLight {
            intensity: 10_000_000.0,
            range: 300.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(SYSTEM_CENTER),
        SceneEntity,
    ));

    info!("Scene lighting initialized");
}
