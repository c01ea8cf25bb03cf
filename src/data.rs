//! Static descriptors for the bodies of the planetary system.
//!
//! Distances and radii are in render units and are deliberately not to
//! scale; orbit speeds are radians per frame at speed multiplier 1.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

/// Ring decoration attached to a body (e.g. a gas giant's rings).
#[derive(Clone, Debug, PartialEq)]
pub struct RingData {
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Texture reference for the ring surface.
    pub texture: String,
    /// Rotation about the X axis applied to the ring annulus.
    pub tilt: f32,
}

/// Descriptor for one celestial body.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    /// Unique display name.
    pub name: String,
    /// Visual radius in render units.
    pub radius: f32,
    /// Fixed orbital radius; the body starts on the +X axis.
    pub distance: f32,
    /// Angular orbit speed in radians per frame.
    pub orbit_speed: f32,
    /// The central star: no orbit ring, never hidden by focus.
    pub is_primary: bool,
    pub ring: Option<RingData>,
    pub color: Color,
}

impl CelestialBody {
    /// Create a non-primary body without rings.
    pub fn planet(name: &str, radius: f32, distance: f32, orbit_speed: f32) -> Self {
        Self {
            name: name.to_string(),
            radius,
            distance,
            orbit_speed,
            is_primary: false,
            ring: None,
            color: Color::srgb(0.7, 0.7, 0.7),
        }
    }

    /// Create the primary body at the system centre.
    pub fn star(name: &str, radius: f32) -> Self {
        Self {
            is_primary: true,
            color: Color::srgb(1.0, 0.95, 0.4),
            ..Self::planet(name, radius, 0.0, 0.0)
        }
    }

    pub fn with_ring(mut self, ring: RingData) -> Self {
        self.ring = Some(ring);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Parameters of the decorative asteroid field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsteroidFieldSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub count: usize,
}

impl Default for AsteroidFieldSpec {
    fn default() -> Self {
        Self {
            inner_radius: 62.0,
            outer_radius: 72.0,
            count: 400,
        }
    }
}

/// The Sun and the eight planets.
pub fn solar_system() -> Vec<CelestialBody> {
    vec![
        CelestialBody::star("Sun", 10.0),
        CelestialBody::planet("Mercury", 1.5, 20.0, 0.040).with_color(Color::srgb(0.6, 0.6, 0.6)),
        CelestialBody::planet("Venus", 2.5, 30.0, 0.015).with_color(Color::srgb(0.9, 0.85, 0.7)),
        CelestialBody::planet("Earth", 2.7, 42.0, 0.010).with_color(Color::srgb(0.2, 0.5, 0.8)),
        CelestialBody::planet("Mars", 2.0, 55.0, 0.008).with_color(Color::srgb(0.8, 0.4, 0.2)),
        CelestialBody::planet("Jupiter", 6.0, 85.0, 0.002).with_color(Color::srgb(0.8, 0.7, 0.6)),
        CelestialBody::planet("Saturn", 5.0, 108.0, 0.0009)
            .with_color(Color::srgb(0.9, 0.85, 0.6))
            .with_ring(RingData {
                inner_radius: 6.5,
                outer_radius: 10.0,
                texture: "textures/saturn_ring.png".to_string(),
                tilt: -FRAC_PI_2,
            }),
        // Uranus' rings stand upright.
        CelestialBody::planet("Uranus", 3.5, 130.0, 0.0004)
            .with_color(Color::srgb(0.6, 0.8, 0.9))
            .with_ring(RingData {
                inner_radius: 4.0,
                outer_radius: 6.0,
                texture: "textures/uranus_ring.png".to_string(),
                tilt: 0.0,
            }),
        CelestialBody::planet("Neptune", 3.4, 148.0, 0.0001).with_color(Color::srgb(0.3, 0.5, 0.9)),
    ]
}
