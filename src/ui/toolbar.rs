// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the photo, caption and zoom controls.

use crate::models::scene::{SceneState, ZOOM_MAX, ZOOM_MIN};

/// Action requested from the toolbar, handled by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    Reroll,
    OpenImage,
    Export,
}

/// Display the toolbar. Returns the requested action and whether the
/// scene was edited (caption or zoom) and needs recompositing.
pub fn show(ui: &mut egui::Ui, scene: &mut SceneState) -> (ToolbarAction, bool) {
    let mut action = ToolbarAction::None;
    let mut changed = false;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("🎲 Random photo").clicked() {
            action = ToolbarAction::Reroll;
        }
        if ui.button("🖼 Open image…").clicked() {
            action = ToolbarAction::OpenImage;
        }

        ui.separator();

        changed |= ui.checkbox(&mut scene.show_text, "Caption").changed();
        let text_edit = ui.add(
            egui::TextEdit::singleline(&mut scene.text).hint_text("Caption text"),
        );
        changed |= text_edit.changed();

        ui.separator();

        let mut zoom = scene.zoom_percent;
        let slider = ui.add(
            egui::Slider::new(&mut zoom, ZOOM_MIN..=ZOOM_MAX)
                .text("Zoom %")
                .fixed_decimals(0),
        );
        if slider.changed() {
            scene.apply_zoom(zoom);
            changed = true;
        }

        ui.separator();

        if ui.button("💾 Export JPEG…").clicked() {
            action = ToolbarAction::Export;
        }
    });

    (action, changed)
}
