// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer session tracking and gesture-to-transform mapping.
//!
//! A pointer session maps pointer ids to their last known screen
//! position; at most two concurrent entries matter. Dragging starts on a
//! pointer-down that hits the overlay and translates it by the pointer
//! delta converted to logical units. With exactly two tracked pointers,
//! the absolute horizontal separation acts as a pinch distance: growing
//! separation bumps the zoom percentage up one step, shrinking bumps it
//! down one step.

use crate::models::scene::SceneState;
use crate::util::geometry::CanvasFrame;

/// Zoom percentage change per detected pinch movement.
const PINCH_STEP: f32 = 1.0;

/// Kind of raw pointer event, mirroring the platform's pointer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
    Out,
    Leave,
}

/// A raw pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Identifier disambiguating simultaneous contacts.
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, id: u64, x: f32, y: f32) -> Self {
        Self { kind, id, x, y }
    }
}

/// An active drag bound to the pointer that started it.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    pointer: u64,
    last_x: f32,
    last_y: f32,
}

/// Consumes pointer events and mutates the scene's overlay transform.
///
/// Owns no scene data itself; all state here is transient per-gesture
/// bookkeeping. Mutation happens only from the UI thread.
#[derive(Debug, Default)]
pub struct GestureController {
    /// Pointer id -> last known position.
    pointers: Vec<(u64, f32, f32)>,
    /// Pinch distance from the previous two-pointer move; `None` until a
    /// two-pointer move has established a baseline.
    prev_pinch: Option<f32>,
    drag: Option<DragSession>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag session is active (used for the hover cursor).
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Dispatch one pointer event. Returns `true` when the scene changed
    /// and needs recompositing.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        frame: &CanvasFrame,
        scene: &mut SceneState,
    ) -> bool {
        match event.kind {
            PointerKind::Down => self.on_down(event, frame, scene),
            PointerKind::Move => self.on_move(event, frame, scene),
            // Up, cancel, out and leave all end the contact the same way.
            PointerKind::Up | PointerKind::Cancel | PointerKind::Out | PointerKind::Leave => {
                self.on_up(event)
            }
        }
    }

    fn on_down(&mut self, event: PointerEvent, frame: &CanvasFrame, scene: &mut SceneState) -> bool {
        self.track(event.id, event.x, event.y);

        if scene.overlay.contains(event.x, event.y, frame) {
            self.drag = Some(DragSession {
                pointer: event.id,
                last_x: event.x,
                last_y: event.y,
            });
        }
        false
    }

    fn on_move(&mut self, event: PointerEvent, frame: &CanvasFrame, scene: &mut SceneState) -> bool {
        self.track(event.id, event.x, event.y);
        let mut changed = false;

        // Pinch check: only meaningful with exactly two contacts.
        if self.pointers.len() == 2 {
            let cur = (self.pointers[0].1 - self.pointers[1].1).abs();
            if let Some(prev) = self.prev_pinch {
                if cur > prev {
                    scene.apply_zoom(scene.zoom_percent + PINCH_STEP);
                    changed = true;
                } else if cur < prev {
                    scene.apply_zoom(scene.zoom_percent - PINCH_STEP);
                    changed = true;
                }
            }
            self.prev_pinch = Some(cur);
        }

        if let Some(ref mut drag) = self.drag {
            if drag.pointer == event.id {
                let (dx, dy) =
                    frame.delta_to_logical(event.x - drag.last_x, event.y - drag.last_y);
                scene.overlay.translate(dx, dy);
                drag.last_x = event.x;
                drag.last_y = event.y;
                changed = true;
            }
        }

        changed
    }

    fn on_up(&mut self, event: PointerEvent) -> bool {
        // Removing an id that is not tracked is a no-op.
        self.pointers.retain(|&(id, _, _)| id != event.id);

        if self.pointers.len() < 2 {
            self.prev_pinch = None;
        }

        if self.drag.map_or(false, |d| d.pointer == event.id) {
            self.drag = None;
        }
        false
    }

    fn track(&mut self, id: u64, x: f32, y: f32) {
        if let Some(entry) = self.pointers.iter_mut().find(|(pid, _, _)| *pid == id) {
            entry.1 = x;
            entry.2 = y;
        } else {
            self.pointers.push((id, x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::overlay::OverlayRect;

    fn scene_with_overlay_at(x: f32, y: f32, w: f32, h: f32) -> SceneState {
        let mut scene = SceneState::new();
        scene
            .overlay
            .restore_rect(OverlayRect { x, y, width: w, height: h });
        scene
    }

    fn ev(kind: PointerKind, id: u64, x: f32, y: f32) -> PointerEvent {
        PointerEvent::new(kind, id, x, y)
    }

    #[test]
    fn test_drag_translates_by_logical_delta() {
        let frame = CanvasFrame::new(0.0, 0.0, 800.0); // scale 1.0
        let mut scene = scene_with_overlay_at(50.0, 50.0, 300.0, 300.0);
        let mut gestures = GestureController::new();

        gestures.handle(ev(PointerKind::Down, 1, 100.0, 100.0), &frame, &mut scene);
        assert!(gestures.is_dragging());

        let changed = gestures.handle(ev(PointerKind::Move, 1, 150.0, 130.0), &frame, &mut scene);
        assert!(changed);
        assert_eq!(scene.overlay.rect.x, 100.0);
        assert_eq!(scene.overlay.rect.y, 80.0);
    }

    #[test]
    fn test_drag_scales_delta_by_frame() {
        // Preview displayed at half size: screen deltas count double.
        let frame = CanvasFrame::new(0.0, 0.0, 400.0);
        let mut scene = scene_with_overlay_at(0.0, 0.0, 800.0, 800.0);
        let mut gestures = GestureController::new();

        gestures.handle(ev(PointerKind::Down, 1, 10.0, 10.0), &frame, &mut scene);
        gestures.handle(ev(PointerKind::Move, 1, 30.0, 10.0), &frame, &mut scene);
        assert_eq!(scene.overlay.rect.x, 40.0);
    }

    #[test]
    fn test_down_outside_overlay_does_not_drag() {
        let frame = CanvasFrame::default();
        let mut scene = scene_with_overlay_at(500.0, 500.0, 100.0, 100.0);
        let mut gestures = GestureController::new();

        gestures.handle(ev(PointerKind::Down, 1, 10.0, 10.0), &frame, &mut scene);
        assert!(!gestures.is_dragging());

        gestures.handle(ev(PointerKind::Move, 1, 60.0, 40.0), &frame, &mut scene);
        assert_eq!(scene.overlay.rect.x, 500.0);
        assert_eq!(scene.overlay.rect.y, 500.0);
    }

    #[test]
    fn test_first_two_pointer_move_only_records_baseline() {
        let frame = CanvasFrame::default();
        let mut scene = scene_with_overlay_at(500.0, 500.0, 100.0, 100.0);
        let zoom = scene.zoom_percent;
        let mut gestures = GestureController::new();

        gestures.handle(ev(PointerKind::Down, 1, 100.0, 100.0), &frame, &mut scene);
        gestures.handle(ev(PointerKind::Down, 2, 200.0, 100.0), &frame, &mut scene);

        // Baseline not yet established: no zoom applied.
        let changed = gestures.handle(ev(PointerKind::Move, 2, 220.0, 100.0), &frame, &mut scene);
        assert!(!changed);
        assert_eq!(scene.zoom_percent, zoom);

        // Second move compares against the baseline and zooms in.
        let changed = gestures.handle(ev(PointerKind::Move, 2, 240.0, 100.0), &frame, &mut scene);
        assert!(changed);
        assert_eq!(scene.zoom_percent, zoom + 1.0);
    }

    #[test]
    fn test_pinch_in_zooms_out() {
        let frame = CanvasFrame::default();
        let mut scene = scene_with_overlay_at(500.0, 500.0, 100.0, 100.0);
        let zoom = scene.zoom_percent;
        let mut gestures = GestureController::new();

        gestures.handle(ev(PointerKind::Down, 1, 100.0, 100.0), &frame, &mut scene);
        gestures.handle(ev(PointerKind::Down, 2, 300.0, 100.0), &frame, &mut scene);
        gestures.handle(ev(PointerKind::Move, 2, 280.0, 100.0), &frame, &mut scene);
        gestures.handle(ev(PointerKind::Move, 2, 250.0, 100.0), &frame, &mut scene);

        assert_eq!(scene.zoom_percent, zoom - 1.0);
    }

    #[test]
    fn test_baseline_resets_when_a_pointer_lifts() {
        let frame = CanvasFrame::default();
        let mut scene = scene_with_overlay_at(500.0, 500.0, 100.0, 100.0);
        let mut gestures = GestureController::new();

        gestures.handle(ev(PointerKind::Down, 1, 100.0, 100.0), &frame, &mut scene);
        gestures.handle(ev(PointerKind::Down, 2, 200.0, 100.0), &frame, &mut scene);
        gestures.handle(ev(PointerKind::Move, 2, 220.0, 100.0), &frame, &mut scene);
        gestures.handle(ev(PointerKind::Up, 2, 220.0, 100.0), &frame, &mut scene);

        // New second contact: the old baseline must not leak through.
        gestures.handle(ev(PointerKind::Down, 3, 400.0, 100.0), &frame, &mut scene);
        let zoom = scene.zoom_percent;
        let changed = gestures.handle(ev(PointerKind::Move, 3, 380.0, 100.0), &frame, &mut scene);
        assert!(!changed);
        assert_eq!(scene.zoom_percent, zoom);
    }

    #[test]
    fn test_removing_unknown_pointer_is_noop() {
        let frame = CanvasFrame::default();
        let mut scene = SceneState::new();
        let mut gestures = GestureController::new();

        gestures.handle(ev(PointerKind::Down, 1, 100.0, 100.0), &frame, &mut scene);
        gestures.handle(ev(PointerKind::Up, 99, 0.0, 0.0), &frame, &mut scene);
        gestures.handle(ev(PointerKind::Cancel, 1, 0.0, 0.0), &frame, &mut scene);
    }

    #[test]
    fn test_leave_ends_drag_session() {
        let frame = CanvasFrame::default();
        let mut scene = SceneState::new();
        let mut gestures = GestureController::new();

        let (cx, cy) = scene.overlay.rect.center();
        gestures.handle(ev(PointerKind::Down, 1, cx, cy), &frame, &mut scene);
        assert!(gestures.is_dragging());
        gestures.handle(ev(PointerKind::Leave, 1, cx, cy), &frame, &mut scene);
        assert!(!gestures.is_dragging());

        let x = scene.overlay.rect.x;
        gestures.handle(ev(PointerKind::Move, 1, cx + 40.0, cy), &frame, &mut scene);
        assert_eq!(scene.overlay.rect.x, x);
    }
}
