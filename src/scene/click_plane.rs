//! Invisible hit surface used to detect clicks on empty space while focused.

use bevy::math::Ray3d;
use bevy::prelude::*;

/// Edge length of the square click-plane.
pub const CLICK_PLANE_SIZE: f32 = 2000.0;

/// How far behind the anchor point the plane is placed.
pub const CLICK_PLANE_DEPTH: f32 = 500.0;

/// A finite square plane that only takes part in picking while active.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickPlane {
    center: Vec3,
    normal: Dir3,
    half_extent: f32,
    active: bool,
}

impl Default for ClickPlane {
    fn default() -> Self {
        Self {
            center: Vec3::new(0.0, 0.0, -CLICK_PLANE_DEPTH),
            normal: Dir3::Z,
            half_extent: CLICK_PLANE_SIZE * 0.5,
            active: false,
        }
    }
}

impl ClickPlane {
    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn normal(&self) -> Dir3 {
        self.normal
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Place the plane behind `anchor` as seen from `eye`, facing the eye.
    ///
    /// Leaves the plane untouched when `eye` and `anchor` coincide.
    pub fn face(&mut self, eye: Vec3, anchor: Vec3) {
        let Ok(view) = Dir3::new(anchor - eye) else {
            return;
        };
        self.center = anchor + *view * CLICK_PLANE_DEPTH;
        self.normal = -view;
    }

    /// Distance along `ray` to the plane, if the ray hits inside its extent.
    pub fn intersect(&self, ray: Ray3d) -> Option<f32> {
        let normal = *self.normal;
        let denom = normal.dot(*ray.direction);
        if denom.abs() < 1e-6 {
            return None;
        }

        let t = (self.center - ray.origin).dot(normal) / denom;
        if t < 0.0 {
            return None;
        }

        let local = ray.get_point(t) - self.center;
        let (u, v) = normal.any_orthonormal_pair();
        (local.dot(u).abs() <= self.half_extent && local.dot(v).abs() <= self.half_extent)
            .then_some(t)
    }
}
