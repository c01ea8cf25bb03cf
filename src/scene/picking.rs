//! Ray intersection against scene proxies.

use bevy::math::Ray3d;
use bevy::prelude::*;

use super::BodyProxy;
use super::click_plane::ClickPlane;

/// Something a pointer ray may be tested against.
#[derive(Clone, Copy, Debug)]
pub enum Pickable<'a> {
    Body(&'a BodyProxy),
    ClickPlane(&'a ClickPlane),
}

/// What a ray hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Body(String),
    ClickPlane,
}

/// Nearest hit along a ray.
#[derive(Clone, Debug, PartialEq)]
pub struct RayHit {
    pub target: HitTarget,
    pub distance: f32,
}

impl RayHit {
    /// Name of the hit body, `None` for the click-plane.
    pub fn body_name(&self) -> Option<&str> {
        match &self.target {
            HitTarget::Body(name) => Some(name),
            HitTarget::ClickPlane => None,
        }
    }
}

/// Distance along `ray` to the first intersection with a sphere.
///
/// A ray starting inside the sphere reports the exit point.
pub fn ray_sphere(ray: Ray3d, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(*ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

/// Resolve the nearest hit among `candidates`.
///
/// Hidden bodies are not pickable, and any body hit wins over the
/// click-plane regardless of distance.
pub fn nearest_hit<'a>(
    ray: Ray3d,
    candidates: impl IntoIterator<Item = Pickable<'a>>,
) -> Option<RayHit> {
    let mut body_hit: Option<RayHit> = None;
    let mut plane_hit: Option<RayHit> = None;

    for candidate in candidates {
        match candidate {
            Pickable::Body(body) => {
                if !body.is_visible() {
                    continue;
                }
                let Some(distance) = ray_sphere(ray, body.world_position(), body.radius()) else {
                    continue;
                };
                if body_hit.as_ref().is_none_or(|hit| distance < hit.distance) {
                    body_hit = Some(RayHit {
                        target: HitTarget::Body(body.name().to_string()),
                        distance,
                    });
                }
            }
            Pickable::ClickPlane(plane) => {
                if let Some(distance) = plane.intersect(ray) {
                    plane_hit = Some(RayHit {
                        target: HitTarget::ClickPlane,
                        distance,
                    });
                }
            }
        }
    }

    body_hit.or(plane_hit)
}
