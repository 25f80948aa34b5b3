// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption font resolution and measurement.
//!
//! The caption is rasterized with `ab_glyph` against egui's default
//! embedded proportional font, so no font file has to be shipped or
//! fetched at runtime.

use ab_glyph::{Font, ScaleFont};

/// A font usable for measuring and rasterizing caption text.
pub struct CaptionFont {
    font: ab_glyph::FontArc,
    tweak: egui::FontTweak,
}

impl CaptionFont {
    /// Resolve egui's default proportional font as an `ab_glyph` font.
    pub fn default_proportional() -> Option<Self> {
        let definitions = egui::FontDefinitions::default();
        let family = definitions.families.get(&egui::FontFamily::Proportional)?;
        let font_name = family.first()?;
        let data = definitions.font_data.get(font_name)?.clone();
        let tweak = data.tweak;

        let font = match data.font {
            std::borrow::Cow::Borrowed(bytes) => {
                ab_glyph::FontRef::try_from_slice_and_index(bytes, data.index)
                    .map(ab_glyph::FontArc::from)
                    .ok()
            }
            std::borrow::Cow::Owned(bytes) => {
                ab_glyph::FontVec::try_from_vec_and_index(bytes, data.index)
                    .map(ab_glyph::FontArc::from)
                    .ok()
            }
        }?;

        Some(Self { font, tweak })
    }

    pub(crate) fn scaled(&self, size: f32) -> ab_glyph::PxScaleFont<&ab_glyph::FontArc> {
        self.font.as_scaled(size * self.tweak.scale)
    }

    pub(crate) fn y_offset(&self, size: f32) -> f32 {
        self.tweak.y_offset + self.tweak.y_offset_factor * size
    }

    /// Advance width of `text` at the given pixel size, matching the
    /// caret math used when drawing.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let scaled = self.scaled(size);
        text.chars()
            .map(|ch| scaled.h_advance(scaled.glyph_id(ch)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font_resolves() {
        let font = CaptionFont::default_proportional();
        assert!(font.is_some());
    }

    #[test]
    fn test_measure_grows_with_text() {
        let font = CaptionFont::default_proportional().unwrap();
        let short = font.measure("hi", 95.0);
        let long = font.measure("hi there", 95.0);
        assert!(long > short);
        assert!(short > 0.0);
    }

    #[test]
    fn test_measure_empty_is_zero() {
        let font = CaptionFont::default_proportional().unwrap();
        assert_eq!(font.measure("", 95.0), 0.0);
    }
}
