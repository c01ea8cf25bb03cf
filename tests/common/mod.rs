//! Common test utilities for integration tests.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use orrery::config::OrreryConfig;
use orrery::content::ContentPlugin;
use orrery::data::{AsteroidFieldSpec, CelestialBody};
use orrery::orrery::{Orrery, OrreryPlugin};
use orrery::render::SyncPlugin;

/// Simulated time per `app.update()`.
pub const FRAME: Duration = Duration::from_millis(100);

/// Sun, Earth and Mars with a small asteroid field and orbit rings hidden.
pub fn three_body_config() -> OrreryConfig {
    OrreryConfig {
        bodies: vec![
            CelestialBody::star("Sun", 10.0),
            CelestialBody::planet("Earth", 2.7, 42.0, 0.01),
            CelestialBody::planet("Mars", 2.0, 55.0, 0.008),
        ],
        asteroid_field: AsteroidFieldSpec {
            inner_radius: 62.0,
            outer_radius: 72.0,
            count: 16,
        },
        seed: 7,
        show_orbits: false,
        ..OrreryConfig::default()
    }
}

/// Headless app running the orrery schedule without windows or rendering.
///
/// Every update advances time by [`FRAME`].
pub fn headless_app() -> App {
    let orrery = Orrery::new(three_body_config()).expect("test config is valid");

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(orrery)
        .add_plugins((OrreryPlugin, SyncPlugin, ContentPlugin));
    app
}

/// Run `frames` updates.
pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}
