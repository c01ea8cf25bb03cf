//! Scene object registry.
//!
//! Owns the body proxies, their orbit and planetary rings, the asteroid
//! field and the click-plane. This is plain state: the render module copies
//! it into Bevy entities every frame.

pub mod asteroid_field;
pub mod click_plane;
pub mod decoration;
pub mod picking;

use std::collections::HashSet;

use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::camera::BodyLocator;
use crate::data::{AsteroidFieldSpec, CelestialBody};
use crate::error::OrreryError;
use crate::types::ASTEROID_FIELD_SPEED;

pub use self::asteroid_field::{AsteroidField, Rock};
pub use self::click_plane::ClickPlane;
pub use self::decoration::{Decoration, DecorationKind, OrbitRing, PlanetaryRing};
pub use self::picking::{HitTarget, Pickable, RayHit};

/// Seed used for the asteroid field when none is given.
pub const DEFAULT_FIELD_SEED: u64 = 0x0DE5_5A11;

/// Registry-side state of one celestial body.
#[derive(Clone, Debug)]
pub struct BodyProxy {
    body: CelestialBody,
    orbit_angle: f32,
    visible: bool,
    orbit_ring: Option<OrbitRing>,
    planetary_ring: Option<PlanetaryRing>,
}

impl BodyProxy {
    fn new(body: CelestialBody) -> Self {
        let orbit_ring = (!body.is_primary).then(|| OrbitRing::new(&body.name, body.distance));
        let planetary_ring = body
            .ring
            .clone()
            .map(|ring| PlanetaryRing::new(&body.name, ring));
        Self {
            body,
            orbit_angle: 0.0,
            visible: true,
            orbit_ring,
            planetary_ring,
        }
    }

    pub fn name(&self) -> &str {
        &self.body.name
    }

    pub fn descriptor(&self) -> &CelestialBody {
        &self.body
    }

    pub fn radius(&self) -> f32 {
        self.body.radius
    }

    pub fn is_primary(&self) -> bool {
        self.body.is_primary
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Accumulated orbit angle about the Y axis, in radians.
    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle
    }

    /// World position on the body's fixed circular orbit.
    pub fn world_position(&self) -> Vec3 {
        Quat::from_rotation_y(self.orbit_angle) * Vec3::new(self.body.distance, 0.0, 0.0)
    }

    pub fn orbit_ring(&self) -> Option<&OrbitRing> {
        self.orbit_ring.as_ref()
    }

    pub fn planetary_ring(&self) -> Option<&PlanetaryRing> {
        self.planetary_ring.as_ref()
    }

    pub fn decorations(&self) -> impl Iterator<Item = &dyn Decoration> {
        self.orbit_ring
            .iter()
            .map(|ring| ring as &dyn Decoration)
            .chain(self.planetary_ring.iter().map(|ring| ring as &dyn Decoration))
    }

    pub fn decorations_mut(&mut self) -> impl Iterator<Item = &mut dyn Decoration> {
        self.orbit_ring
            .iter_mut()
            .map(|ring| ring as &mut dyn Decoration)
            .chain(
                self.planetary_ring
                    .iter_mut()
                    .map(|ring| ring as &mut dyn Decoration),
            )
    }

    fn advance(&mut self, speed_multiplier: f32) {
        self.orbit_angle =
            (self.orbit_angle + self.body.orbit_speed * speed_multiplier).rem_euclid(std::f32::consts::TAU);
    }

    fn release_decorations(&mut self) {
        self.orbit_ring = None;
        self.planetary_ring = None;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Lifecycle {
    #[default]
    Empty,
    Built,
    Disposed,
}

/// Owner of every pickable and decorative scene object.
#[derive(Clone, Debug, Default)]
pub struct SceneRegistry {
    lifecycle: Lifecycle,
    seed: Option<u64>,
    bodies: Vec<BodyProxy>,
    asteroid_field: Option<AsteroidField>,
    click_plane: Option<ClickPlane>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose asteroid field is generated from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Instantiate bodies, rings, the asteroid field and the click-plane.
    ///
    /// Callable once; the primary body gets no orbit ring.
    pub fn build(
        &mut self,
        bodies: Vec<CelestialBody>,
        asteroid_field: AsteroidFieldSpec,
    ) -> Result<(), OrreryError> {
        if self.lifecycle != Lifecycle::Empty {
            return Err(OrreryError::AlreadyBuilt);
        }

        let mut seen = HashSet::new();
        for body in &bodies {
            if !seen.insert(body.name.as_str()) {
                return Err(OrreryError::DuplicateBody(body.name.clone()));
            }
        }

        self.bodies = bodies.into_iter().map(BodyProxy::new).collect();
        self.asteroid_field = Some(AsteroidField::generate(
            asteroid_field,
            self.seed.unwrap_or(DEFAULT_FIELD_SEED),
        ));
        self.click_plane = Some(ClickPlane::default());
        self.lifecycle = Lifecycle::Built;

        info!(
            "Built scene registry: {} bodies, {} asteroids",
            self.bodies.len(),
            asteroid_field.count
        );
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        self.lifecycle == Lifecycle::Built
    }

    /// Advance every orbit by its own speed times `speed_multiplier`.
    pub fn rotate_all(&mut self, speed_multiplier: f32) {
        if !self.is_built() {
            return;
        }
        for body in &mut self.bodies {
            body.advance(speed_multiplier);
        }
        if let Some(field) = &mut self.asteroid_field {
            field.rotate(ASTEROID_FIELD_SPEED * speed_multiplier);
        }
    }

    pub fn bodies(&self) -> &[BodyProxy] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [BodyProxy] {
        &mut self.bodies
    }

    pub fn find_by_name(&self, name: &str) -> Option<&BodyProxy> {
        self.bodies.iter().find(|body| body.name() == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut BodyProxy> {
        self.bodies.iter_mut().find(|body| body.name() == name)
    }

    pub fn asteroid_field(&self) -> Option<&AsteroidField> {
        self.asteroid_field.as_ref()
    }

    pub(crate) fn asteroid_field_mut(&mut self) -> Option<&mut AsteroidField> {
        self.asteroid_field.as_mut()
    }

    pub fn click_plane(&self) -> Option<&ClickPlane> {
        self.click_plane.as_ref()
    }

    pub(crate) fn click_plane_mut(&mut self) -> Option<&mut ClickPlane> {
        self.click_plane.as_mut()
    }

    /// Every body proxy, plus the click-plane iff a focus is active.
    pub fn hit_test_candidates(&self, focus_active: bool) -> Vec<Pickable<'_>> {
        let mut candidates: Vec<Pickable<'_>> = self.bodies.iter().map(Pickable::Body).collect();
        if focus_active {
            if let Some(plane) = &self.click_plane {
                candidates.push(Pickable::ClickPlane(plane));
            }
        }
        candidates
    }

    /// Nearest pickable hit along `ray`.
    pub fn ray_cast(&self, ray: Ray3d, focus_active: bool) -> Option<RayHit> {
        picking::nearest_hit(ray, self.hit_test_candidates(focus_active))
    }

    /// Keep the click-plane behind `anchor` as seen from `eye`.
    pub fn orient_click_plane(&mut self, eye: Vec3, anchor: Vec3) {
        if let Some(plane) = &mut self.click_plane {
            plane.face(eye, anchor);
        }
    }

    /// Release decorations, the asteroid field and the click-plane.
    pub fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        for body in &mut self.bodies {
            body.release_decorations();
        }
        self.bodies.clear();
        self.asteroid_field = None;
        self.click_plane = None;
        self.lifecycle = Lifecycle::Disposed;
        info!("Scene registry disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle == Lifecycle::Disposed
    }
}

impl BodyLocator for SceneRegistry {
    fn locate(&self, name: &str) -> Option<Vec3> {
        self.find_by_name(name).map(BodyProxy::world_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use approx::assert_relative_eq;
    use bevy::math::Ray3d;

    #[test]
    fn test_build_creates_rings_except_primary() {
        let registry = fixtures::built_registry();
        let sun = registry.find_by_name("Sun");
        assert!(sun.is_some_and(|b| b.orbit_ring().is_none()));
        let earth = registry.find_by_name("Earth");
        assert!(earth.is_some_and(|b| b.orbit_ring().is_some()));
        assert!(registry.asteroid_field().is_some());
        assert!(registry.click_plane().is_some_and(|p| !p.is_active()));
    }

    #[test]
    fn test_build_twice_rejected() {
        let mut registry = fixtures::built_registry();
        let result = registry.build(fixtures::three_bodies(), fixtures::small_field());
        assert_eq!(result, Err(OrreryError::AlreadyBuilt));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut registry = SceneRegistry::new();
        let mut bodies = fixtures::three_bodies();
        bodies.push(CelestialBody::planet("Mars", 1.0, 80.0, 0.01));
        assert_eq!(
            registry.build(bodies, fixtures::small_field()),
            Err(OrreryError::DuplicateBody("Mars".to_string()))
        );
        assert!(!registry.is_built());
    }

    #[test]
    fn test_rotate_all_noop_before_build() {
        let mut registry = SceneRegistry::new();
        registry.rotate_all(10.0);
        assert!(registry.bodies().is_empty());
    }

    #[test]
    fn test_rotate_all_scales_by_multiplier() {
        let mut registry = fixtures::built_registry();
        registry.rotate_all(2.0);
        let earth = registry.find_by_name("Earth").map(BodyProxy::orbit_angle);
        assert_relative_eq!(earth.unwrap_or_default(), 0.02, epsilon = 1e-6);
        let field = registry.asteroid_field().map(AsteroidField::angle);
        assert_relative_eq!(field.unwrap_or_default(), ASTEROID_FIELD_SPEED * 2.0, epsilon = 1e-7);
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut registry = fixtures::built_registry();
        for _ in 0..500 {
            registry.rotate_all(1.0);
        }
        let mars = registry.find_by_name("Mars").map(BodyProxy::world_position);
        assert_relative_eq!(mars.unwrap_or_default().length(), 55.0, epsilon = 1e-3);
    }

    #[test]
    fn test_find_by_name_miss() {
        let registry = fixtures::built_registry();
        assert!(registry.find_by_name("Pluto").is_none());
    }

    #[test]
    fn test_click_plane_candidate_only_when_focused() {
        let registry = fixtures::built_registry();
        let plane_count = |focus| {
            registry
                .hit_test_candidates(focus)
                .iter()
                .filter(|c| matches!(c, Pickable::ClickPlane(_)))
                .count()
        };
        assert_eq!(plane_count(false), 0);
        assert_eq!(plane_count(true), 1);
        assert_eq!(registry.hit_test_candidates(false).len(), 3);
    }

    #[test]
    fn test_ray_cast_picks_nearest_body() {
        let registry = fixtures::built_registry();
        let hit = registry.ray_cast(fixtures::ray_toward(Vec3::new(42.0, 0.0, 0.0)), false);
        assert_eq!(hit.map(|h| h.target), Some(HitTarget::Body("Earth".to_string())));
    }

    #[test]
    fn test_ray_cast_skips_hidden_body() {
        let mut registry = fixtures::built_registry();
        if let Some(earth) = registry.find_by_name_mut("Earth") {
            earth.set_visible(false);
        }
        let hit = registry.ray_cast(fixtures::ray_toward(Vec3::new(42.0, 0.0, 0.0)), false);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_body_beats_click_plane() {
        let mut registry = fixtures::built_registry();
        let eye = Vec3::new(42.0, 100.0, 0.0);
        registry.orient_click_plane(eye, Vec3::new(42.0, 0.0, 0.0));
        let ray = Ray3d::new(eye, Dir3::NEG_Y);
        let hit = registry.ray_cast(ray, true);
        assert_eq!(hit.map(|h| h.target), Some(HitTarget::Body("Earth".to_string())));
    }

    #[test]
    fn test_miss_hits_click_plane_when_focused() {
        let mut registry = fixtures::built_registry();
        let eye = Vec3::new(42.0, 100.0, 0.0);
        registry.orient_click_plane(eye, Vec3::new(42.0, 0.0, 0.0));
        let ray = Ray3d::new(eye + Vec3::new(20.0, 0.0, 20.0), Dir3::NEG_Y);
        assert_eq!(registry.ray_cast(ray, true).map(|h| h.target), Some(HitTarget::ClickPlane));
        assert_eq!(registry.ray_cast(ray, false), None);
    }

    #[test]
    fn test_dispose_idempotent() {
        let mut registry = fixtures::built_registry();
        registry.dispose();
        registry.dispose();
        assert!(registry.is_disposed());
        assert!(registry.click_plane().is_none());
        assert!(registry.asteroid_field().is_none());
        registry.rotate_all(1.0);
        assert!(registry.hit_test_candidates(true).is_empty());
    }

    #[test]
    fn test_locator_tracks_rotation() {
        let mut registry = fixtures::built_registry();
        registry.rotate_all(50.0);
        let located = registry.locate("Earth");
        let expected = registry.find_by_name("Earth").map(BodyProxy::world_position);
        assert_eq!(located, expected);
        assert_eq!(registry.locate("Pluto"), None);
    }
}
