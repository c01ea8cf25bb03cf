//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

/// Icon rendered at `size` in `color`.
pub fn icon_colored(icon: &str, size: f32, color: egui::Color32) -> egui::RichText {
    egui::RichText::new(icon).size(size).color(color)
}

// Browse all icons at https://phosphoricons.com/

pub const PLAY: &str = egui_phosphor::regular::PLAY;
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
pub const CLOSE: &str = egui_phosphor::regular::X;
pub const HELP: &str = egui_phosphor::regular::QUESTION;
pub const RETRY: &str = egui_phosphor::regular::ARROW_CLOCKWISE;

/// Leave focus and return to the overview.
pub const EXIT_FOCUS: &str = egui_phosphor::regular::ARROWS_OUT;
/// Reopen a closed info panel.
pub const INFO: &str = egui_phosphor::regular::INFO;
pub const LINK: &str = egui_phosphor::regular::ARROW_SQUARE_OUT;

// View and scene toggles
pub const VIEW_2D: &str = egui_phosphor::regular::SQUARE;
pub const VIEW_3D: &str = egui_phosphor::regular::CUBE;
pub const ORBIT: &str = egui_phosphor::regular::CIRCLE_DASHED;
pub const SPEED: &str = egui_phosphor::regular::GAUGE;

// Celestial body icons
pub const SUN: &str = egui_phosphor::regular::SUN;
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
pub const WARNING: &str = egui_phosphor::regular::WARNING;
pub const LOADING: &str = egui_phosphor::regular::HOURGLASS;
