//! Rendering systems for the orrery.
//!
//! This module spawns the Bevy entities that mirror the scene registry and
//! keeps their transforms and visibility in step with it.

mod background;
pub mod bodies;
pub mod sync;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::bodies::SceneSpawnPlugin;
use self::sync::{despawn_disposed_scene, sync_asteroid_field, sync_bodies, sync_rings};
use crate::orrery::dispose_on_exit;
use crate::types::FrameSet;

pub use self::bodies::{
    AsteroidFieldVisual, BodyVisual, OrbitRingVisual, PlanetaryRingVisual, SceneEntity,
};

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((SceneSpawnPlugin, BackgroundPlugin))
            .add_plugins(SyncPlugin);
    }
}

/// Registry-to-entity sync without any spawning; usable headless.
pub struct SyncPlugin;

impl Plugin for SyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (sync_bodies, sync_rings, sync_asteroid_field).in_set(FrameSet::Sync),
        )
        .add_systems(Last, despawn_disposed_scene.after(dispose_on_exit));
    }
}
