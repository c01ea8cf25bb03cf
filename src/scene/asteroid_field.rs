//! Decorative asteroid field rotating as a single rigid group.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::AsteroidFieldSpec;

/// One rock of the field, in the field's local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rock {
    pub position: Vec3,
    pub radius: f32,
}

/// Fixed set of rocks between two radii.
#[derive(Clone, Debug, PartialEq)]
pub struct AsteroidField {
    spec: AsteroidFieldSpec,
    rocks: Vec<Rock>,
    angle: f32,
    visible: bool,
}

impl AsteroidField {
    /// Scatter `spec.count` rocks using a deterministic seed.
    pub fn generate(spec: AsteroidFieldSpec, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let span = (spec.outer_radius - spec.inner_radius).max(0.0);

        let rocks = (0..spec.count)
            .map(|_| {
                let angle = rng.random_range(0.0..TAU);
                let distance = spec.inner_radius + rng.random::<f32>() * span;
                let height = rng.random_range(-1.0..1.0);
                Rock {
                    position: Vec3::new(distance * angle.cos(), height, distance * angle.sin()),
                    radius: rng.random_range(0.1..0.4),
                }
            })
            .collect();

        Self {
            spec,
            rocks,
            angle: 0.0,
            visible: true,
        }
    }

    pub fn spec(&self) -> AsteroidFieldSpec {
        self.spec
    }

    pub fn rocks(&self) -> &[Rock] {
        &self.rocks
    }

    /// Current rotation of the whole field about the Y axis.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn rotate(&mut self, delta: f32) {
        self.angle = (self.angle + delta).rem_euclid(TAU);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
