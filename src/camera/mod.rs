//! Camera for the orrery.
//!
//! The pose is owned by [`CameraController`] inside the [`Orrery`](crate::orrery::Orrery)
//! resource; this plugin spawns the Bevy camera and copies the pose into its
//! `Transform` once per frame.

mod controller;
pub mod orbit;
pub mod transition;

#[cfg(test)]
mod proptest_camera;

use bevy::prelude::*;

use crate::orrery::Orrery;
use crate::types::FrameSet;

pub use self::controller::{
    BodyLocator, CameraAnimationState, CameraController, CameraSettings, FocusTarget, MoveOptions,
    MoveOutcome, Viewpoints,
};
pub use self::orbit::SphericalState;
pub use self::transition::{CameraPose, CameraTransition, TransitionKind, ease_out_quad};

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEG: f32 = 45.0;

/// Near clip distance.
pub const NEAR_PLANE: f32 = 0.1;

/// Far clip distance; covers the starfield shell.
pub const FAR_PLANE: f32 = 5000.0;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Plugin providing the perspective camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, sync_camera_transform.in_set(FrameSet::Sync));
    }
}

/// Spawn the main camera at the controller's initial pose.
fn setup_camera(mut commands: Commands, orrery: Option<Res<Orrery>>) {
    let transform = orrery
        .map(|orrery| orrery.camera().pose().to_transform())
        .unwrap_or_else(|| Transform::from_xyz(0.0, 380.0, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z));

    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FIELD_OF_VIEW_DEG.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        transform,
        MainCamera,
    ));
}

/// Copy the controller pose into the camera transform.
pub fn sync_camera_transform(
    orrery: Res<Orrery>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    let pose = orrery.camera().pose();
    let target = pose.to_transform();
    if transform.translation != target.translation || transform.rotation != target.rotation {
        transform.translation = target.translation;
        transform.rotation = target.rotation;
    }
}
