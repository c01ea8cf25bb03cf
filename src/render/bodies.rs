//! Scene entity spawning.
//!
//! Handles the visual representation of bodies, their rings and the
//! asteroid field. Entities carry the name of the registry object they
//! mirror; `sync` copies positions and visibility onto them every frame.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::data::RingData;
use crate::orrery::Orrery;

/// Component marking an entity as the visual of a registry body.
#[derive(Component, Debug)]
pub struct BodyVisual {
    pub name: String,
}

/// Orbit ring of the named body, centred on the system origin.
#[derive(Component, Debug)]
pub struct OrbitRingVisual {
    pub body: String,
}

/// Planetary ring, spawned as a child of its body.
#[derive(Component, Debug)]
pub struct PlanetaryRingVisual {
    pub body: String,
}

/// Root of the asteroid field; rocks are its children.
#[derive(Component, Debug)]
pub struct AsteroidFieldVisual;

/// Everything spawned for the scene, despawned on teardown.
#[derive(Component, Debug)]
pub struct SceneEntity;

/// Plugin providing scene spawning functionality.
pub struct SceneSpawnPlugin;

impl Plugin for SceneSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_scene);
    }
}

/// Rotation laying a Bevy annulus (XY plane) flat onto the orbital plane.
pub fn flat_ring_rotation() -> Quat {
    Quat::from_rotation_x(-FRAC_PI_2)
}

/// Rotation of a planetary ring relative to its body.
pub fn planetary_ring_rotation(ring: &RingData) -> Quat {
    Quat::from_rotation_x(ring.tilt)
}

/// Spawn bodies, rings and the asteroid field from the registry.
pub fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    orrery: Res<Orrery>,
) {
    let registry = orrery.registry();

    let orbit_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.25),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    for body in registry.bodies() {
        let descriptor = body.descriptor();
        let color = descriptor.color;
        let material = materials.add(StandardMaterial {
            base_color: color,
            // Primary glows
            emissive: if body.is_primary() {
                color.to_linear() * 4.0
            } else {
                LinearRgba::BLACK
            },
            ..default()
        });

        let mut entity = commands.spawn((
            Mesh3d(meshes.add(Sphere::new(body.radius()))),
            MeshMaterial3d(material),
            Transform::from_translation(body.world_position()),
            Visibility::Inherited,
            BodyVisual {
                name: body.name().to_string(),
            },
            SceneEntity,
        ));

        if let Some(ring) = body.planetary_ring() {
            let data = ring.data();
            let ring_material = materials.add(StandardMaterial {
                base_color: color.with_alpha(0.7),
                alpha_mode: AlphaMode::Blend,
                double_sided: true,
                cull_mode: None,
                ..default()
            });
            entity.with_child((
                Mesh3d(meshes.add(Annulus::new(data.inner_radius, data.outer_radius))),
                MeshMaterial3d(ring_material),
                Transform::from_rotation(planetary_ring_rotation(data)),
                Visibility::Inherited,
                PlanetaryRingVisual {
                    body: body.name().to_string(),
                },
            ));
        }

        if let Some(orbit) = body.orbit_ring() {
            commands.spawn((
                Mesh3d(meshes.add(Annulus::new(orbit.inner_radius(), orbit.outer_radius()))),
                MeshMaterial3d(orbit_material.clone()),
                Transform::from_rotation(flat_ring_rotation()),
                Visibility::Inherited,
                OrbitRingVisual {
                    body: body.name().to_string(),
                },
                SceneEntity,
            ));
        }
    }

    if let Some(field) = registry.asteroid_field() {
        let rock_mesh = meshes.add(Sphere::new(1.0));
        let rock_material = materials.add(StandardMaterial {
            base_color: Color::srgb(0.45, 0.42, 0.4),
            perceptual_roughness: 1.0,
            ..default()
        });

        commands
            .spawn((
                Transform::from_rotation(Quat::from_rotation_y(field.angle())),
                Visibility::Inherited,
                AsteroidFieldVisual,
                SceneEntity,
            ))
            .with_children(|parent| {
                for rock in field.rocks() {
                    parent.spawn((
                        Mesh3d(rock_mesh.clone()),
                        MeshMaterial3d(rock_material.clone()),
                        Transform::from_translation(rock.position)
                            .with_scale(Vec3::splat(rock.radius)),
                    ));
                }
            });
    }

    info!(
        "Spawned {} bodies and {} asteroids",
        registry.bodies().len(),
        registry.asteroid_field().map_or(0, |field| field.rocks().len())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_ring_lies_in_orbital_plane() {
        // Annulus normal is +Z before rotation.
        let normal = flat_ring_rotation() * Vec3::Z;
        assert_relative_eq!(normal.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_upright_ring_keeps_normal() {
        let ring = RingData {
            inner_radius: 4.0,
            outer_radius: 6.0,
            texture: String::new(),
            tilt: 0.0,
        };
        let normal = planetary_ring_rotation(&ring) * Vec3::Z;
        assert_relative_eq!(normal.z, 1.0, epsilon = 1e-6);
    }
}
