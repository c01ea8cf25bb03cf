//! Synchronization from the scene registry to Bevy entities.
//!
//! Updates Transform positions and Visibility from registry state. Runs in
//! `FrameSet::Sync`, after rotation and the camera update.

use bevy::prelude::*;

use crate::orrery::Orrery;
use crate::render::bodies::{
    AsteroidFieldVisual, BodyVisual, OrbitRingVisual, PlanetaryRingVisual, SceneEntity,
};
use crate::scene::Decoration;

/// Map a registry visibility flag to a Bevy visibility.
pub fn visibility_for(shown: bool) -> Visibility {
    if shown {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

fn apply_visibility(visibility: &mut Visibility, shown: bool) {
    let target = visibility_for(shown);
    if *visibility != target {
        *visibility = target;
    }
}

/// Sync body positions and visibility.
pub fn sync_bodies(
    orrery: Res<Orrery>,
    mut query: Query<(&BodyVisual, &mut Transform, &mut Visibility)>,
) {
    let registry = orrery.registry();
    for (visual, mut transform, mut visibility) in &mut query {
        let Some(body) = registry.find_by_name(&visual.name) else {
            continue;
        };
        transform.translation = body.world_position();
        apply_visibility(&mut visibility, body.is_visible());
    }
}

/// Sync orbit and planetary ring visibility.
pub fn sync_rings(
    orrery: Res<Orrery>,
    mut orbits: Query<(&OrbitRingVisual, &mut Visibility), Without<PlanetaryRingVisual>>,
    mut rings: Query<(&PlanetaryRingVisual, &mut Visibility), Without<OrbitRingVisual>>,
) {
    let registry = orrery.registry();

    for (visual, mut visibility) in &mut orbits {
        let shown = registry
            .find_by_name(&visual.body)
            .and_then(|body| body.orbit_ring())
            .is_some_and(|ring| ring.is_visible());
        apply_visibility(&mut visibility, shown);
    }

    for (visual, mut visibility) in &mut rings {
        let shown = registry
            .find_by_name(&visual.body)
            .and_then(|body| body.planetary_ring())
            .is_some_and(|ring| ring.is_visible());
        apply_visibility(&mut visibility, shown);
    }
}

/// Sync asteroid field rotation and visibility.
pub fn sync_asteroid_field(
    orrery: Res<Orrery>,
    mut query: Query<(&mut Transform, &mut Visibility), With<AsteroidFieldVisual>>,
) {
    let Some(field) = orrery.registry().asteroid_field() else {
        return;
    };
    for (mut transform, mut visibility) in &mut query {
        transform.rotation = Quat::from_rotation_y(field.angle());
        apply_visibility(&mut visibility, field.is_visible());
    }
}

/// Despawn every scene entity once the registry has been disposed.
pub fn despawn_disposed_scene(
    mut commands: Commands,
    orrery: Res<Orrery>,
    query: Query<Entity, With<SceneEntity>>,
) {
    if !orrery.is_disposed() {
        return;
    }
    let mut count = 0;
    for entity in &query {
        commands.entity(entity).despawn();
        count += 1;
    }
    if count > 0 {
        info!("Despawned {count} scene entities");
    }
}
