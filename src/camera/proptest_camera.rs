//! Property-based tests for the orbit controller using proptest.

use bevy::prelude::*;
use proptest::prelude::*;

use super::{CameraController, CameraPose, CameraSettings, Viewpoints};
use crate::test_utils::fixtures;
use crate::types::ViewMode;

fn orbiting_controller() -> CameraController {
    let registry = fixtures::built_registry();
    let viewpoints = Viewpoints::default();
    let mut camera = CameraController::new(
        CameraSettings::default(),
        CameraPose::new(Vec3::new(0.0, 380.0, 0.0), Vec3::ZERO),
    );
    let _ = camera.switch_view(ViewMode::ThreeD, &viewpoints, 0.0);
    camera.update(5.0, &registry);
    camera
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Camera distance stays within bounds under any wheel sequence.
    #[test]
    fn prop_wheel_sequence_respects_distance_bounds(
        steps in prop::collection::vec(any::<bool>(), 1..300),
    ) {
        let registry = fixtures::built_registry();
        let mut camera = orbiting_controller();
        let settings = camera.settings().clone();

        for zoom_out in steps {
            if zoom_out {
                camera.zoom_out();
            } else {
                camera.zoom_in();
            }
            camera.update(5.0, &registry);

            let distance = camera.pose().position.distance(camera.target());
            prop_assert!(distance >= settings.min_distance - 1e-3);
            prop_assert!(distance <= settings.max_distance + 1e-2);
        }
    }

    /// Dragging never tips the camera over a pole.
    #[test]
    fn prop_drag_keeps_camera_off_poles(
        drags in prop::collection::vec((-400.0f32..400.0, -400.0f32..400.0), 1..50),
    ) {
        let registry = fixtures::built_registry();
        let mut camera = orbiting_controller();

        for (dx, dy) in drags {
            camera.rotate(Vec2::new(dx, dy));
            camera.update(5.0, &registry);

            let offset = (camera.pose().position - camera.target()).normalize();
            prop_assert!(offset.y.abs() < 0.999);
            prop_assert!(camera.pose().position.is_finite());
        }
    }

    /// Any sequence of view switches ends at the last requested view.
    #[test]
    fn prop_last_view_switch_wins(
        switches in prop::collection::vec((any::<bool>(), 0.0f64..0.5), 1..20),
    ) {
        let registry = fixtures::built_registry();
        let viewpoints = Viewpoints::default();
        let mut camera = orbiting_controller();
        let mut now = 10.0;
        let mut last = ViewMode::ThreeD;

        for (three_d, gap) in switches {
            last = if three_d { ViewMode::ThreeD } else { ViewMode::TwoD };
            let _ = camera.switch_view(last, &viewpoints, now);
            now += gap;
            camera.update(now, &registry);
        }
        camera.update(now + 2.0, &registry);

        prop_assert!(camera.is_idle());
        prop_assert_eq!(camera.view_mode(), last);
        prop_assert_eq!(Some(&camera.pose()), viewpoints.get(last));
        prop_assert_eq!(camera.pointer_orbit_enabled(), last.allows_pointer_orbit());
    }
}
