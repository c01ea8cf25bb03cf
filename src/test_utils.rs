//! Test utilities for scene, focus and camera tests.
//!
//! Fixtures build small, deterministic planetary systems so tests can
//! reason about exact positions and visibility.

use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::camera::FocusTarget;
use crate::config::OrreryConfig;
use crate::data::{AsteroidFieldSpec, CelestialBody, RingData};
use crate::orrery::Orrery;
use crate::scene::SceneRegistry;

/// Fixtures for building test scenes.
pub mod fixtures {
    use super::*;

    /// Sun (primary), Earth and Mars, all starting on the +X axis.
    pub fn three_bodies() -> Vec<CelestialBody> {
        vec![
            CelestialBody::star("Sun", 10.0),
            CelestialBody::planet("Earth", 2.7, 42.0, 0.01),
            CelestialBody::planet("Mars", 2.0, 55.0, 0.008),
        ]
    }

    /// [`three_bodies`] plus a ringed Saturn.
    pub fn ringed_bodies() -> Vec<CelestialBody> {
        let mut bodies = three_bodies();
        bodies.push(CelestialBody::planet("Saturn", 5.0, 108.0, 0.0009).with_ring(RingData {
            inner_radius: 6.5,
            outer_radius: 10.0,
            texture: "textures/saturn_ring.png".to_string(),
            tilt: 0.0,
        }));
        bodies
    }

    /// A sparse asteroid field between Mars and Saturn.
    pub fn small_field() -> AsteroidFieldSpec {
        AsteroidFieldSpec {
            inner_radius: 62.0,
            outer_radius: 72.0,
            count: 16,
        }
    }

    pub fn built_registry() -> SceneRegistry {
        let mut registry = SceneRegistry::with_seed(7);
        registry
            .build(three_bodies(), small_field())
            .expect("fixture bodies have unique names");
        registry
    }

    pub fn ringed_registry() -> SceneRegistry {
        let mut registry = SceneRegistry::with_seed(7);
        registry
            .build(ringed_bodies(), small_field())
            .expect("fixture bodies have unique names");
        registry
    }

    /// Ray dropping straight down onto `point` from 100 units above.
    pub fn ray_toward(point: Vec3) -> Ray3d {
        Ray3d::new(point + Vec3::Y * 100.0, Dir3::NEG_Y)
    }

    /// Framing target for the named body at its current position.
    pub fn focus_target(registry: &SceneRegistry, name: &str) -> FocusTarget {
        let body = registry.find_by_name(name).expect("fixture body exists");
        FocusTarget {
            name: name.to_string(),
            position: body.world_position(),
            radius: body.radius(),
        }
    }

    /// Three-body configuration with the orbit toggle off.
    pub fn three_body_config() -> OrreryConfig {
        OrreryConfig {
            bodies: three_bodies(),
            asteroid_field: small_field(),
            seed: 7,
            show_orbits: false,
            ..OrreryConfig::default()
        }
    }

    pub fn three_body_orrery() -> Orrery {
        Orrery::new(three_body_config()).expect("fixture config is valid")
    }
}
