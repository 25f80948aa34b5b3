// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Overlay transform state.
//!
//! This module defines the position and size of the decorative overlay
//! layer and the operations the gesture handlers apply to it: unclamped
//! translation and center-anchored zoom by percentage.

use crate::util::geometry::CanvasFrame;
use serde::{Deserialize, Serialize};

/// Intrinsic pixel size of the bundled overlay graphic.
pub const BASE_WIDTH: f32 = 493.0;
pub const BASE_HEIGHT: f32 = 897.0;

/// Shrink factor applied to the asset for the initial placement.
const INITIAL_DESCALE: f32 = 1.8;

/// Zoom slider value matching the initial placement.
pub const INITIAL_ZOOM_PERCENT: f32 = 100.0 / INITIAL_DESCALE;

/// Position and size of the overlay layer, in logical canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl OverlayRect {
    /// Center point of the rect.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Overlay rect plus the previous-size snapshot used to anchor zooming
/// at the rect center instead of its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayState {
    pub rect: OverlayRect,
    /// Size before the most recent zoom, the anchor for re-centering.
    prev_width: f32,
    prev_height: f32,
    /// Intrinsic size of the overlay asset; zoom percent is relative to it.
    base_width: f32,
    base_height: f32,
}

impl OverlayState {
    /// State for the bundled overlay asset at its initial placement.
    pub fn new() -> Self {
        let width = BASE_WIDTH / INITIAL_DESCALE;
        let height = BASE_HEIGHT / INITIAL_DESCALE;
        Self::with_rect(
            OverlayRect {
                x: 500.0,
                y: 800.0 - height,
                width,
                height,
            },
            BASE_WIDTH,
            BASE_HEIGHT,
        )
    }

    /// State for an arbitrary starting rect and asset size.
    pub fn with_rect(rect: OverlayRect, base_width: f32, base_height: f32) -> Self {
        Self {
            rect,
            prev_width: rect.width,
            prev_height: rect.height,
            base_width,
            base_height,
        }
    }

    /// Move the overlay by a logical-unit delta. Intentionally unclamped:
    /// the overlay may be dragged fully off-canvas.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.rect.x += dx;
        self.rect.y += dy;
    }

    /// Resize to `percent` of the asset's intrinsic size, shifting the
    /// origin by half the size delta so the rect center stays put.
    pub fn set_zoom_percent(&mut self, percent: f32) {
        let new_width = self.base_width * percent / 100.0;
        let new_height = self.base_height * percent / 100.0;

        self.rect.x += (self.prev_width - new_width) / 2.0;
        self.rect.y += (self.prev_height - new_height) / 2.0;
        self.rect.width = new_width;
        self.rect.height = new_height;

        self.prev_width = new_width;
        self.prev_height = new_height;
    }

    /// Restore a saved rect, resetting the zoom anchor to it.
    pub fn restore_rect(&mut self, rect: OverlayRect) {
        self.rect = rect;
        self.prev_width = rect.width;
        self.prev_height = rect.height;
    }

    /// Hit-test a screen position against the overlay as displayed.
    pub fn contains(&self, screen_x: f32, screen_y: f32, frame: &CanvasFrame) -> bool {
        let mx = screen_x - frame.offset_x;
        let my = screen_y - frame.offset_y;

        let ix = self.rect.x * frame.scale;
        let iy = self.rect.y * frame.scale;
        let iw = self.rect.width * frame.scale;
        let ih = self.rect.height * frame.scale;

        mx > ix && mx < ix + iw && my > iy && my < iy + ih
    }
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_sets_exact_size() {
        let mut overlay = OverlayState::new();
        overlay.set_zoom_percent(50.0);
        assert_eq!(overlay.rect.width, BASE_WIDTH * 0.5);
        assert_eq!(overlay.rect.height, BASE_HEIGHT * 0.5);
    }

    #[test]
    fn test_zoom_preserves_center() {
        let mut overlay = OverlayState::new();
        let before = overlay.rect.center();
        overlay.set_zoom_percent(75.0);
        let after = overlay.rect.center();
        assert!((before.0 - after.0).abs() < 1e-3);
        assert!((before.1 - after.1).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_from_reference_rect() {
        // Reference scenario: slider at 50 from a 274x498 rect.
        let mut overlay = OverlayState::with_rect(
            OverlayRect {
                x: 500.0,
                y: 111.0,
                width: 274.0,
                height: 498.0,
            },
            BASE_WIDTH,
            BASE_HEIGHT,
        );
        overlay.set_zoom_percent(50.0);

        assert_eq!(overlay.rect.width, 246.5);
        assert_eq!(overlay.rect.height, 448.5);
        assert_eq!(overlay.rect.x, 500.0 + (274.0 - 246.5) / 2.0);
        assert_eq!(overlay.rect.y, 111.0 + (498.0 - 448.5) / 2.0);
    }

    #[test]
    fn test_consecutive_zooms_anchor_on_previous_size() {
        let mut overlay = OverlayState::new();
        overlay.set_zoom_percent(50.0);
        let center = overlay.rect.center();
        overlay.set_zoom_percent(100.0);
        let after = overlay.rect.center();
        assert!((center.0 - after.0).abs() < 1e-3);
        assert!((center.1 - after.1).abs() < 1e-3);
    }

    #[test]
    fn test_translate_is_unclamped() {
        let mut overlay = OverlayState::new();
        overlay.translate(-2000.0, -2000.0);
        assert!(overlay.rect.x < 0.0);
        assert!(overlay.rect.y < 0.0);
    }

    #[test]
    fn test_hit_test_respects_frame_scale() {
        let overlay = OverlayState::with_rect(
            OverlayRect {
                x: 100.0,
                y: 100.0,
                width: 200.0,
                height: 200.0,
            },
            BASE_WIDTH,
            BASE_HEIGHT,
        );
        // Preview shown at half size, shifted by (10, 20) on screen.
        let frame = CanvasFrame::new(10.0, 20.0, 400.0);

        // Logical (200, 200) is screen (10 + 100, 20 + 100).
        assert!(overlay.contains(110.0, 120.0, &frame));
        // Logical (99, 99) is outside.
        assert!(!overlay.contains(10.0 + 49.0, 20.0 + 49.0, &frame));
    }
}
