//! Dock (bottom bar) for the primary controls.
//!
//! The dock provides a single horizontal strip with:
//! - Play/Pause toggle
//! - Speed slider
//! - 2D/3D view buttons
//! - Orbit ring toggle
//! - Focused body name with an exit button
//! - Help button with shortcuts tooltip

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::orrery::{Orrery, OrreryCommand};
use crate::types::ViewMode;
use crate::ui::icons;

/// Colors for the dock UI.
mod colors {
    use bevy_egui::egui::Color32;

    pub const DOCK_BG: Color32 = Color32::from_rgba_premultiplied(26, 26, 36, 240);
    pub const ACTIVE: Color32 = Color32::from_rgb(85, 221, 136);
    pub const INACTIVE: Color32 = Color32::from_rgb(120, 120, 130);
    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
}

/// Height of the dock, shared with overlays that must stay above it.
pub const DOCK_HEIGHT: f32 = 56.0;

/// Resource for help tooltip visibility.
#[derive(Resource, Default)]
pub struct HelpTooltipState {
    pub visible: bool,
}

/// System that renders the dock at the bottom.
pub fn dock_system(
    mut contexts: EguiContexts,
    orrery: Res<Orrery>,
    mut commands: MessageWriter<OrreryCommand>,
    mut help_state: ResMut<HelpTooltipState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::bottom("dock")
        .exact_height(DOCK_HEIGHT)
        .frame(
            egui::Frame::NONE
                .fill(colors::DOCK_BG)
                .inner_margin(egui::Margin::symmetric(20, 10)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 16.0;

                render_play_pause(ui, &orrery, &mut commands);
                ui.separator();

                render_speed_slider(ui, &orrery, &mut commands);
                ui.separator();

                render_view_buttons(ui, orrery.view_mode(), &mut commands);
                ui.separator();

                render_orbit_toggle(ui, orrery.orbits_visible(), &mut commands);

                if let Some(name) = orrery.focus_state().name() {
                    ui.separator();
                    render_focus_label(ui, name, orrery.focus_panel_open(), &mut commands);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    render_help_button(ui, &mut help_state);
                });
            });
        });

    if help_state.visible {
        render_help_overlay(ctx);
    }
}

fn render_play_pause(
    ui: &mut egui::Ui,
    orrery: &Orrery,
    commands: &mut MessageWriter<OrreryCommand>,
) {
    let running = orrery.animation_running();
    let (icon, color, tooltip) = if running {
        (icons::PAUSE, colors::PAUSE_ICON, "Pause (Space)")
    } else {
        (icons::PLAY, colors::PLAY_ICON, "Play (Space)")
    };

    let button = egui::Button::new(icons::icon_colored(icon, 22.0, color))
        .min_size(egui::vec2(40.0, 36.0));

    if ui.add(button).on_hover_text(tooltip).clicked() {
        commands.write(OrreryCommand::SetAnimationRunning(!running));
    }
}

/// Logarithmic speed slider over the configured multiplier range.
fn render_speed_slider(
    ui: &mut egui::Ui,
    orrery: &Orrery,
    commands: &mut MessageWriter<OrreryCommand>,
) {
    let playback = orrery.playback();
    let mut speed = orrery.speed();

    ui.label(icons::icon_colored(icons::SPEED, 18.0, colors::TEXT));
    let response = ui
        .add(
            egui::Slider::new(&mut speed, playback.min_speed..=playback.max_speed)
                .logarithmic(true)
                .suffix("x")
                .max_decimals(3),
        )
        .on_hover_text("Rotation speed ([ and ])");

    if response.changed() {
        commands.write(OrreryCommand::SetSpeed(speed));
    }
}

fn render_view_buttons(
    ui: &mut egui::Ui,
    current: ViewMode,
    commands: &mut MessageWriter<OrreryCommand>,
) {
    let views = [
        (ViewMode::TwoD, icons::VIEW_2D, "2D", "Top-down view (2)"),
        (ViewMode::ThreeD, icons::VIEW_3D, "3D", "Perspective view (3)"),
    ];

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        for (mode, icon, label, tooltip) in views {
            let is_active = mode == current;
            let color = if is_active { colors::ACTIVE } else { colors::INACTIVE };

            let text = egui::RichText::new(format!("{icon} {label}")).size(14.0).color(color);
            let text = if is_active { text.strong() } else { text };

            if ui
                .add(
                    egui::Button::new(text)
                        .frame(is_active)
                        .min_size(egui::vec2(52.0, 28.0)),
                )
                .on_hover_text(tooltip)
                .clicked()
            {
                commands.write(OrreryCommand::SwitchView(mode));
            }
        }
    });
}

fn render_orbit_toggle(
    ui: &mut egui::Ui,
    visible: bool,
    commands: &mut MessageWriter<OrreryCommand>,
) {
    let color = if visible { colors::ACTIVE } else { colors::INACTIVE };
    let button = egui::Button::new(
        egui::RichText::new(format!("{} Orbits", icons::ORBIT))
            .size(14.0)
            .color(color),
    )
    .frame(visible);

    if ui.add(button).on_hover_text("Show orbit rings (O)").clicked() {
        commands.write(OrreryCommand::SetOrbitsVisible(!visible));
    }
}

/// Name of the focused body, with buttons to reopen its panel and leave focus.
fn render_focus_label(
    ui: &mut egui::Ui,
    name: &str,
    panel_open: bool,
    commands: &mut MessageWriter<OrreryCommand>,
) {
    ui.label(
        egui::RichText::new(format!("{} {name}", icons::PLANET))
            .size(14.0)
            .color(colors::TEXT)
            .strong(),
    );

    if !panel_open
        && ui
            .add(egui::Button::new(egui::RichText::new(icons::INFO).size(16.0)).frame(false))
            .on_hover_text("Show details")
            .clicked()
    {
        commands.write(OrreryCommand::SetFocusPanelOpen(true));
    }

    if ui
        .add(egui::Button::new(egui::RichText::new(icons::EXIT_FOCUS).size(16.0)))
        .on_hover_text("Back to overview (Esc)")
        .clicked()
    {
        commands.write(OrreryCommand::ExitFocus);
    }
}

fn render_help_button(ui: &mut egui::Ui, help_state: &mut HelpTooltipState) {
    let button = egui::Button::new(egui::RichText::new(icons::HELP).size(18.0))
        .min_size(egui::vec2(32.0, 32.0));

    let response = ui.add(button);

    if response.hovered() || help_state.visible {
        help_state.visible = response.hovered();
    }

    if response.clicked() {
        help_state.visible = !help_state.visible;
    }
}

/// Render the help overlay showing controls.
fn render_help_overlay(ctx: &egui::Context) {
    egui::Window::new("Controls")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-70.0, -70.0))
        .frame(
            egui::Frame::NONE
                .fill(egui::Color32::from_rgba_premultiplied(26, 26, 36, 245))
                .inner_margin(egui::Margin::same(16))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(60, 60, 80))),
        )
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 6.0;

            let shortcuts = [
                ("Click", "Focus a body / exit focus"),
                ("Drag", "Orbit the camera (3D)"),
                ("Wheel", "Zoom"),
                ("Space", "Play/Pause"),
                ("[ ]", "Slower / faster"),
                ("2 / 3", "2D / 3D view"),
                ("O", "Toggle orbit rings"),
                ("Esc", "Exit focus"),
            ];

            egui::Grid::new("shortcuts_grid")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .show(ui, |ui| {
                    for (key, action) in shortcuts {
                        ui.label(egui::RichText::new(key).strong().monospace().size(14.0));
                        ui.label(egui::RichText::new(action).size(14.0));
                        ui.end_row();
                    }
                });
        });
}
