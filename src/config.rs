//! Startup configuration for the orrery.

use crate::camera::{CameraSettings, Viewpoints};
use crate::data::{AsteroidFieldSpec, CelestialBody, solar_system};
use crate::input::InputSettings;
use crate::scene::DEFAULT_FIELD_SEED;

/// Ambient rotation settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackSettings {
    /// Initial speed multiplier.
    pub speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Whether bodies rotate at startup.
    pub running: bool,
    /// Pause rotation while a body is focused.
    pub pause_on_focus: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            min_speed: 0.125,
            max_speed: 32.0,
            running: true,
            pause_on_focus: false,
        }
    }
}

impl PlaybackSettings {
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        if speed.is_finite() {
            speed.clamp(self.min_speed, self.max_speed)
        } else {
            self.speed
        }
    }
}

/// Everything needed to build an [`Orrery`](crate::orrery::Orrery).
#[derive(Clone, Debug)]
pub struct OrreryConfig {
    pub bodies: Vec<CelestialBody>,
    pub asteroid_field: AsteroidFieldSpec,
    /// Seed for the asteroid field layout.
    pub seed: u64,
    pub camera: CameraSettings,
    pub viewpoints: Viewpoints,
    pub input: InputSettings,
    pub playback: PlaybackSettings,
    /// Initial state of the orbit-ring toggle.
    pub show_orbits: bool,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            bodies: solar_system(),
            asteroid_field: AsteroidFieldSpec::default(),
            seed: DEFAULT_FIELD_SEED,
            camera: CameraSettings::default(),
            viewpoints: Viewpoints::default(),
            input: InputSettings::default(),
            playback: PlaybackSettings::default(),
            show_orbits: true,
        }
    }
}
