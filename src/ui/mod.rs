//! UI module providing the egui-based interface.
//!
//! Widgets read the `Orrery` resource and never mutate it directly; every
//! action goes out as an `OrreryCommand` message.

mod dock;
pub mod icons;
mod info_panel;
mod tooltip;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass};

use crate::input::PointerCapture;

pub use dock::{DOCK_HEIGHT, HelpTooltipState};

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HelpTooltipState>()
            .init_resource::<PointerCapture>()
            .init_resource::<icons::FontsInitialized>()
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    dock::dock_system,
                    info_panel::info_panel,
                    tooltip::hover_tooltip_system,
                    capture_pointer,
                )
                    .chain()
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}

/// Record whether egui wants the pointer, after all panels are laid out.
fn capture_pointer(mut contexts: EguiContexts, mut capture: ResMut<PointerCapture>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let over_ui = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
    if capture.over_ui != over_ui {
        capture.over_ui = over_ui;
    }
}
