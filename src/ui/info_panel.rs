//! Info panel showing content for the focused body.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::content::{BodyContent, ContentLibrary, ContentState, RetryContent};
use crate::orrery::{Orrery, OrreryCommand};
use crate::ui::icons;

mod colors {
    use bevy_egui::egui::Color32;

    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(20, 20, 30, 220);
    pub const MUTED: Color32 = Color32::from_rgb(150, 150, 165);
    pub const DANGER: Color32 = Color32::from_rgb(224, 85, 85);
}

/// Fixed panel width in logical pixels.
const PANEL_WIDTH: f32 = 280.0;

/// System that renders the info panel while a body is focused.
pub fn info_panel(
    mut contexts: EguiContexts,
    orrery: Res<Orrery>,
    library: Res<ContentLibrary>,
    mut commands: MessageWriter<OrreryCommand>,
    mut retry: MessageWriter<RetryContent>,
) {
    let Some(focused) = orrery.focus_state().name() else {
        return;
    };
    if !orrery.focus_panel_open() {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::right("info_panel")
        .resizable(false)
        .exact_width(PANEL_WIDTH)
        .frame(
            egui::Frame::NONE
                .fill(colors::PANEL_BG)
                .inner_margin(egui::Margin::same(12)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let icon = if orrery
                    .registry()
                    .find_by_name(focused)
                    .is_some_and(|body| body.is_primary())
                {
                    icons::SUN
                } else {
                    icons::PLANET
                };
                ui.heading(format!("{icon} {focused}"));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .small_button(icons::CLOSE)
                        .on_hover_text("Hide panel")
                        .clicked()
                    {
                        commands.write(OrreryCommand::SetFocusPanelOpen(false));
                    }
                });
            });

            ui.separator();

            match library.state() {
                ContentState::Idle => {}
                ContentState::Loading(body) => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(
                            egui::RichText::new(format!("{} Loading {body}...", icons::LOADING))
                                .color(colors::MUTED),
                        );
                    });
                }
                ContentState::Ready(content) => render_content(ui, content),
                ContentState::Failed { error, .. } => {
                    ui.label(icons::icon_colored(icons::WARNING, 18.0, colors::DANGER));
                    ui.label(egui::RichText::new(error.to_string()).color(colors::DANGER));
                    ui.add_space(8.0);
                    if ui.button(format!("{} Retry", icons::RETRY)).clicked() {
                        retry.write(RetryContent);
                    }
                }
            }

            ui.add_space(12.0);
            if ui
                .button(format!("{} Back to overview", icons::EXIT_FOCUS))
                .clicked()
            {
                commands.write(OrreryCommand::ExitFocus);
            }
        });
}

fn render_content(ui: &mut egui::Ui, content: &BodyContent) {
    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 48.0)
        .show(ui, |ui| {
            ui.label(egui::RichText::new(&content.title).strong().size(15.0));
            ui.add_space(4.0);
            ui.label(&content.description);

            if !content.facts.is_empty() {
                ui.add_space(8.0);
                for fact in &content.facts {
                    ui.label(egui::RichText::new(format!("\u{2022} {fact}")).size(13.0));
                }
            }

            if !content.url.is_empty() {
                ui.add_space(8.0);
                ui.hyperlink_to(format!("{} Learn more", icons::LINK), &content.url);
            }
        });
}
