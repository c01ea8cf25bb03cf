//! Orrery - Interactive Planetary System
//!
//! A desktop application showing the Sun and its planets, with click-to-focus
//! camera flights and a free orbit camera.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::camera::CameraPlugin;
use orrery::config::OrreryConfig;
use orrery::content::ContentPlugin;
use orrery::input::InputPlugin;
use orrery::orrery::{Orrery, OrreryPlugin};
use orrery::render::RenderPlugin;
use orrery::ui::UiPlugin;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orrery".to_string(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(EguiPlugin::default());

    // Logging is up once DefaultPlugins are added
    let orrery = match Orrery::new(OrreryConfig::default()) {
        Ok(orrery) => orrery,
        Err(err) => {
            error!("Failed to build the planetary system: {err}");
            return;
        }
    };

    app
        // Insert resources before plugins that depend on them
        .insert_resource(orrery)
        .add_plugins((
            OrreryPlugin,
            CameraPlugin,
            InputPlugin,
            RenderPlugin,
            ContentPlugin,
            UiPlugin,
        ))
        .run();
}
