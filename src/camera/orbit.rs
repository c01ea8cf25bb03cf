//! Spherical-coordinate state for pointer-driven orbiting.
//!
//! Offsets use a Y-up convention: `x = r sin(polar) cos(azimuth)`,
//! `y = r cos(polar)`, `z = r sin(polar) sin(azimuth)`.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

/// Keeps the polar angle away from the poles to avoid flipping over.
pub const POLAR_EPSILON: f32 = 0.1;

/// Camera offset from the orbit target in spherical coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalState {
    pub azimuth: f32,
    pub polar: f32,
    pub radius: f32,
}

impl SphericalState {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return Self {
                azimuth: 0.0,
                polar: FRAC_PI_2,
                radius: 0.0,
            };
        }
        Self {
            azimuth: offset.z.atan2(offset.x),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            radius,
        }
    }

    pub fn to_offset(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        Vec3::new(
            self.radius * sin_polar * self.azimuth.cos(),
            self.radius * self.polar.cos(),
            self.radius * sin_polar * self.azimuth.sin(),
        )
    }

    /// Apply a drag delta; dragging up lowers the polar angle.
    pub fn rotate(&mut self, delta: Vec2, gain: f32) {
        self.azimuth += delta.x * gain;
        self.polar = (self.polar - delta.y * gain).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
    }

    /// Multiplicative dolly; `factor > 1` moves away.
    pub fn scale(&mut self, factor: f32) {
        self.radius *= factor;
    }

    pub fn clamp_radius(&mut self, min: f32, max: f32) {
        self.radius = self.radius.clamp(min, max);
    }
}
