//! Hover tooltip naming the body under the pointer.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::orrery::Orrery;

/// Offset from the cursor so the label does not sit under it.
const CURSOR_OFFSET: egui::Vec2 = egui::vec2(14.0, 14.0);

pub fn hover_tooltip_system(mut contexts: EguiContexts, orrery: Res<Orrery>) {
    let Some(hover) = orrery.hover() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let anchor = egui::pos2(hover.screen_position.x, hover.screen_position.y) + CURSOR_OFFSET;

    egui::Area::new(egui::Id::new("hover_tooltip"))
        .fixed_pos(anchor)
        .interactable(false)
        .order(egui::Order::Tooltip)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(egui::Color32::from_rgba_premultiplied(26, 26, 36, 230))
                .inner_margin(egui::Margin::symmetric(8, 4))
                .corner_radius(egui::CornerRadius::same(4))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(&hover.body)
                            .size(13.0)
                            .color(egui::Color32::WHITE),
                    );
                });
        });
}
