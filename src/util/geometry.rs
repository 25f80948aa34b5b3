// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the logical canvas frame and the coordinate
//! transformations between display (screen) pixels and logical canvas
//! units, plus the cover-fit scale used by the compositor.

/// Logical edge length of the square drawing surface, in canvas units.
pub const LOGICAL_SIZE: f32 = 800.0;

/// Mapping between the on-screen preview rectangle and logical canvas units.
///
/// Rebuilt every frame from the preview's bounding box, which covers
/// viewport resizes for free. Invariant: `scale > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFrame {
    /// Screen position of the preview's top-left corner.
    pub offset_x: f32,
    pub offset_y: f32,
    /// Display pixels per logical unit.
    pub scale: f32,
}

impl CanvasFrame {
    /// Build a frame from the preview's top-left corner and displayed width.
    pub fn new(offset_x: f32, offset_y: f32, display_width: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            scale: (display_width / LOGICAL_SIZE).max(f32::EPSILON),
        }
    }

    /// Convert a screen position to logical canvas units.
    pub fn to_logical(&self, screen_x: f32, screen_y: f32) -> (f32, f32) {
        (
            (screen_x - self.offset_x) / self.scale,
            (screen_y - self.offset_y) / self.scale,
        )
    }

    /// Convert a screen-space delta to a logical delta.
    pub fn delta_to_logical(&self, dx: f32, dy: f32) -> (f32, f32) {
        (dx / self.scale, dy / self.scale)
    }
}

impl Default for CanvasFrame {
    fn default() -> Self {
        Self::new(0.0, 0.0, LOGICAL_SIZE)
    }
}

/// Uniform scale at which an image of `img_w` x `img_h` fully covers a
/// `frame_w` x `frame_h` frame on both axes (overflow is cropped, never
/// letterboxed).
pub fn cover_fit_scale(frame_w: u32, frame_h: u32, img_w: u32, img_h: u32) -> f32 {
    let scale_x = frame_w as f32 / img_w as f32;
    let scale_y = frame_h as f32 / img_h as f32;
    scale_x.max(scale_y)
}
