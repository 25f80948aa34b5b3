// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scene state management.
//!
//! This module holds everything the compositor reads: the background
//! photo, the overlay transform, the caption text, and the current zoom
//! percentage. A serializable subset can be saved and restored as a
//! composition file.

use super::overlay::{OverlayRect, OverlayState, INITIAL_ZOOM_PERCENT};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Range of the zoom slider, percent of the overlay asset's intrinsic size.
pub const ZOOM_MIN: f32 = 10.0;
pub const ZOOM_MAX: f32 = 150.0;

/// Full in-memory scene. The background is replaced wholesale on reroll
/// or upload; no history is kept.
pub struct SceneState {
    pub overlay: OverlayState,
    /// Caption string; empty means "render the placeholder".
    pub text: String,
    pub show_text: bool,
    /// Current zoom slider value, percent of the asset's intrinsic size.
    pub zoom_percent: f32,
    /// Decoded background photo, if one has loaded.
    pub background: Option<RgbaImage>,
}

impl SceneState {
    pub fn new() -> Self {
        Self {
            overlay: OverlayState::new(),
            text: String::new(),
            show_text: false,
            zoom_percent: INITIAL_ZOOM_PERCENT,
            background: None,
        }
    }

    /// Apply a zoom percentage to the overlay and remember it for the slider.
    pub fn apply_zoom(&mut self, percent: f32) {
        self.zoom_percent = percent.clamp(ZOOM_MIN, ZOOM_MAX);
        self.overlay.set_zoom_percent(self.zoom_percent);
    }

    /// Snapshot the serializable part of the scene.
    pub fn to_data(&self) -> SceneData {
        SceneData {
            overlay: self.overlay.rect,
            zoom_percent: self.zoom_percent,
            text: self.text.clone(),
            show_text: self.show_text,
        }
    }

    /// Restore a saved composition. The background photo is not part of
    /// the saved data and is left untouched. A hand-edited zoom value is
    /// clamped to the slider range, like any other zoom input.
    pub fn restore(&mut self, data: SceneData) {
        self.overlay.restore_rect(data.overlay);
        self.zoom_percent = data.zoom_percent.clamp(ZOOM_MIN, ZOOM_MAX);
        self.text = data.text;
        self.show_text = data.show_text;
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable composition: overlay placement and caption, without the
/// background pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneData {
    pub overlay: OverlayRect,
    pub zoom_percent: f32,
    pub text: String,
    pub show_text: bool,
}
