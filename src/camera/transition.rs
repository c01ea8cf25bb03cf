//! Camera poses, easing and scripted transitions.

use bevy::prelude::*;

use crate::types::ViewMode;

/// Quadratic ease-out: `t * (2 - t)` on `t` clamped to `[0, 1]`.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

/// Camera position plus Euler rotation (XYZ order, radians).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` aimed at `target` with +Y up.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let rotation = Transform::from_translation(position)
            .looking_at(target, Dir3::Y)
            .rotation;
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        Self {
            position,
            rotation: Vec3::new(x, y, z),
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Component-wise interpolation of position and of each Euler angle.
    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.lerp(other.rotation, t),
        }
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    pub fn to_transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: self.orientation(),
            ..default()
        }
    }
}

/// Framing parameters for a "frame this body" transition.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusFraming {
    /// Body being framed; its position is looked up every tick.
    pub body: String,
    /// Camera offset from the body's centre.
    pub offset: Vec3,
    /// Offset from the body's centre to the aim point.
    pub look_bias: Vec3,
    /// Last position the body was seen at.
    pub last_known: Vec3,
}

/// Destination of a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionKind {
    /// Fixed named viewpoint.
    View { mode: ViewMode, target: CameraPose },
    /// Follow and frame a body.
    Focus(FocusFraming),
}

/// In-flight scripted camera motion.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraTransition {
    pub start: CameraPose,
    pub started_at: f64,
    pub duration: f64,
    pub kind: TransitionKind,
}

impl CameraTransition {
    /// Normalised progress at `now`, clamped to `[0, 1]`.
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0) as f32
    }

    /// View mode this transition ends in.
    pub fn target_mode(&self) -> ViewMode {
        match &self.kind {
            TransitionKind::View { mode, .. } => *mode,
            TransitionKind::Focus(_) => ViewMode::ThreeD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_relative_eq!(ease_out_quad(0.5), 0.75);
    }

    #[test]
    fn test_ease_clamps_input() {
        assert_eq!(ease_out_quad(-1.0), 0.0);
        assert_eq!(ease_out_quad(3.0), 1.0);
    }

    #[test]
    fn test_ease_monotonic() {
        let samples: Vec<f32> = (0..=20).map(|i| ease_out_quad(i as f32 / 20.0)).collect();
        assert!(samples.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_looking_at_points_forward_at_target() {
        let pose = CameraPose::looking_at(Vec3::new(10.0, 5.0, 10.0), Vec3::ZERO);
        let expected = (Vec3::ZERO - pose.position).normalize();
        let forward = pose.forward();
        assert_relative_eq!(forward.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(forward.y, expected.y, epsilon = 1e-4);
        assert_relative_eq!(forward.z, expected.z, epsilon = 1e-4);
    }

    #[test]
    fn test_top_down_rotation_looks_down() {
        let pose = CameraPose::new(Vec3::new(0.0, 300.0, 0.0), Vec3::new(-FRAC_PI_2, 0.0, 0.0));
        assert_relative_eq!(pose.forward().y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_lerp_interpolates_angles_independently() {
        let a = CameraPose::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let b = CameraPose::new(Vec3::splat(10.0), Vec3::new(-1.0, 0.0, 2.0));
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.position, Vec3::splat(5.0));
        assert_eq!(mid.rotation, Vec3::new(-0.5, 0.5, 1.0));
    }

    #[test]
    fn test_progress_clamped() {
        let transition = CameraTransition {
            start: CameraPose::new(Vec3::ZERO, Vec3::ZERO),
            started_at: 10.0,
            duration: 2.0,
            kind: TransitionKind::View {
                mode: ViewMode::ThreeD,
                target: CameraPose::new(Vec3::ONE, Vec3::ZERO),
            },
        };
        assert_eq!(transition.progress(9.0), 0.0);
        assert_relative_eq!(transition.progress(11.0), 0.5);
        assert_eq!(transition.progress(20.0), 1.0);
    }
}
