// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preview canvas.
//!
//! Displays the composited texture fit to the available space and acts
//! as the platform adapter for the gesture interpreter: egui mouse drags
//! and touch events are translated into [`PointerEvent`]s; all transform
//! math lives in the `input` module.

use crate::input::{PointerEvent, PointerKind};
use crate::models::overlay::OverlayState;
use crate::util::geometry::CanvasFrame;

/// Pointer id reserved for the mouse; touch contacts use their own ids.
const MOUSE_POINTER_ID: u64 = u64::MAX;

/// What the canvas observed this frame.
pub struct CanvasOutput {
    /// Display mapping of the preview, when a preview was shown.
    pub frame: Option<CanvasFrame>,
    /// Pointer events to feed to the gesture controller, in order.
    pub events: Vec<PointerEvent>,
}

/// Display the preview and collect pointer events.
pub fn show(
    ui: &mut egui::Ui,
    texture: &Option<egui::TextureHandle>,
    overlay: &OverlayState,
) -> CanvasOutput {
    let mut output = CanvasOutput {
        frame: None,
        events: Vec::new(),
    };

    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);
    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let Some(texture) = texture else {
            welcome(ui);
            return;
        };

        // Square preview, as large as fits, centered.
        let available = ui.available_size();
        let side = available.x.min(available.y).max(1.0);
        let offset = egui::vec2((available.x - side) / 2.0, (available.y - side) / 2.0);
        let image_rect =
            egui::Rect::from_min_size(ui.min_rect().min + offset, egui::vec2(side, side));

        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let frame = CanvasFrame::new(image_rect.min.x, image_rect.min.y, image_rect.width());
        output.frame = Some(frame);

        let response = ui.allocate_rect(image_rect, egui::Sense::click_and_drag());

        // Mouse drags become a single synthetic pointer.
        let mut mouse_events = Vec::new();
        if let Some(pos) = response.interact_pointer_pos() {
            if response.drag_started() {
                mouse_events.push(PointerEvent::new(PointerKind::Down, MOUSE_POINTER_ID, pos.x, pos.y));
            }
            if response.dragged() {
                mouse_events.push(PointerEvent::new(PointerKind::Move, MOUSE_POINTER_ID, pos.x, pos.y));
            }
            if response.drag_stopped() {
                mouse_events.push(PointerEvent::new(PointerKind::Up, MOUSE_POINTER_ID, pos.x, pos.y));
            }
        }

        // Touch contacts pass through with their platform ids, which is
        // what makes the two-finger pinch visible to the controller.
        let (touch_events, touch_active) = ui.input(|input| {
            let mut events = Vec::new();
            for event in &input.events {
                if let egui::Event::Touch { id, phase, pos, .. } = event {
                    let kind = match phase {
                        egui::TouchPhase::Start => PointerKind::Down,
                        egui::TouchPhase::Move => PointerKind::Move,
                        egui::TouchPhase::End => PointerKind::Up,
                        egui::TouchPhase::Cancel => PointerKind::Cancel,
                    };
                    events.push(PointerEvent::new(kind, id.0, pos.x, pos.y));
                }
            }
            (events, input.any_touches())
        });

        output.events = merge_mouse_and_touch(mouse_events, touch_events, touch_active);

        // Pointer cursor over the overlay, like hovering a draggable thing.
        if let Some(hover) = response.hover_pos() {
            if overlay.contains(hover.x, hover.y, &frame) {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
        }
    });

    output
}

/// Combine the mouse and touch streams for one frame.
///
/// On touch hardware egui mirrors the primary finger as pointer/drag
/// events; feeding both streams through would track that finger under
/// two ids and a two-finger pinch would fill the session with three
/// entries, so it never counts as exactly two contacts. While any touch
/// is active the mouse stream is dropped and its pointer id cancelled.
fn merge_mouse_and_touch(
    mouse: Vec<PointerEvent>,
    touch: Vec<PointerEvent>,
    touch_active: bool,
) -> Vec<PointerEvent> {
    if touch_active || !touch.is_empty() {
        let mut events = vec![PointerEvent::new(
            PointerKind::Cancel,
            MOUSE_POINTER_ID,
            0.0,
            0.0,
        )];
        events.extend(touch);
        events
    } else {
        mouse
    }
}


/// Shown before the first photo has loaded.
fn welcome(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("MemeStamp")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("Fetching a random photo…")
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("You can also drop an image file anywhere in the window")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
        });
    });
}
