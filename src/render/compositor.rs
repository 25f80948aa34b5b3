// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The compositor.
//!
//! Pure functions from scene inputs to an 800x800 pixel buffer: fill an
//! opaque background color, cover-fit the background photo, alpha-blend
//! the overlay at its rect, and lay out the wrapped caption. Safe to
//! call repeatedly for the same inputs.

use crate::models::overlay::OverlayRect;
use crate::render::font::CaptionFont;
use crate::util::geometry::{cover_fit_scale, LOGICAL_SIZE};
use image::{imageops, Rgba, RgbaImage};

/// Pixel size of the composited surface.
pub const FRAME_SIZE: u32 = LOGICAL_SIZE as u32;

/// Fill behind the background photo; shows through transparent photos.
const FILL_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Caption accent color (#f9dc4d).
const CAPTION_COLOR: Rgba<u8> = Rgba([0xf9, 0xdc, 0x4d, 255]);

/// Rendered when the caption is enabled but the text field is empty.
pub const CAPTION_PLACEHOLDER: &str = "Tohle s memy";

const CAPTION_SIZE: f32 = 95.0;
const CAPTION_LINE_HEIGHT: f32 = 95.0;
const CAPTION_MAX_WIDTH: f32 = 750.0;
const CAPTION_X: f32 = 50.0;
const CAPTION_Y: f32 = 350.0;

/// Scale a background photo so it fully covers the frame, anchored at
/// the origin with overflow cropped.
///
/// The caller must pass a decoded image with nonzero dimensions.
pub fn cover_fit(background: &RgbaImage) -> RgbaImage {
    debug_assert!(background.width() > 0 && background.height() > 0);

    let scale = cover_fit_scale(FRAME_SIZE, FRAME_SIZE, background.width(), background.height());
    let scaled_w = (background.width() as f32 * scale).ceil() as u32;
    let scaled_h = (background.height() as f32 * scale).ceil() as u32;
    let resized = imageops::resize(
        background,
        scaled_w.max(FRAME_SIZE),
        scaled_h.max(FRAME_SIZE),
        imageops::FilterType::Triangle,
    );

    let mut fitted = RgbaImage::from_pixel(FRAME_SIZE, FRAME_SIZE, FILL_COLOR);
    imageops::overlay(&mut fitted, &resized, 0, 0);
    fitted
}

/// Composite one frame.
///
/// `background` is the cover-fitted photo (or `None` before the first
/// photo has decoded), `overlay_asset` the stamp graphic at its
/// intrinsic size, `caption` the text to lay out (`None` = disabled,
/// empty = placeholder).
pub fn compose(
    background: Option<&RgbaImage>,
    overlay_asset: &RgbaImage,
    rect: OverlayRect,
    caption: Option<&str>,
    font: Option<&CaptionFont>,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(FRAME_SIZE, FRAME_SIZE, FILL_COLOR);

    if let Some(fitted) = background {
        imageops::overlay(&mut canvas, fitted, 0, 0);
    }

    draw_overlay(&mut canvas, overlay_asset, rect);

    if let (Some(text), Some(font)) = (caption, font) {
        let text = if text.trim().is_empty() {
            CAPTION_PLACEHOLDER
        } else {
            text
        };
        draw_caption(&mut canvas, text, font);
    }

    canvas
}

/// Alpha-blend the overlay asset, resized to its rect, onto the canvas.
/// Off-canvas coordinates clip; a degenerate rect draws nothing.
fn draw_overlay(canvas: &mut RgbaImage, asset: &RgbaImage, rect: OverlayRect) {
    let width = rect.width.round() as i64;
    let height = rect.height.round() as i64;
    if width < 1 || height < 1 {
        return;
    }

    let scaled = imageops::resize(
        asset,
        width as u32,
        height as u32,
        imageops::FilterType::Triangle,
    );
    imageops::overlay(canvas, &scaled, rect.x.round() as i64, rect.y.round() as i64);
}

/// Greedy word-wrap: accumulate words while the measured line stays
/// within `max_width`; an overflowing word starts the next line. A word
/// wider than `max_width` still occupies a line of its own.
pub fn wrap_words(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn draw_caption(canvas: &mut RgbaImage, text: &str, font: &CaptionFont) {
    let lines = wrap_words(text, CAPTION_MAX_WIDTH, |s| font.measure(s, CAPTION_SIZE));

    let mut y = CAPTION_Y;
    for line in &lines {
        draw_text(canvas, font, CAPTION_X, y, line, CAPTION_COLOR, CAPTION_SIZE);
        y += CAPTION_LINE_HEIGHT;
    }
}

/// Rasterize one line of text, top-aligned at (x, y).
fn draw_text(
    canvas: &mut RgbaImage,
    font: &CaptionFont,
    x: f32,
    y: f32,
    text: &str,
    color: Rgba<u8>,
    size: f32,
) {
    use ab_glyph::{point, Font, ScaleFont};

    if text.is_empty() {
        return;
    }

    let scaled = font.scaled(size);
    let mut caret = point(x, y + scaled.ascent() + font.y_offset(size));
    for ch in text.chars() {
        let mut glyph = scaled.scaled_glyph(ch);
        glyph.position = caret;
        caret.x += scaled.h_advance(glyph.id);
        if let Some(outlined) = scaled.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = gx as i32 + bounds.min.x as i32;
                let py = gy as i32 + bounds.min.y as i32;
                if px >= 0 && py >= 0 && (px as u32) < canvas.width() && (py as u32) < canvas.height()
                {
                    let alpha = (color.0[3] as f32 * coverage).round().clamp(0.0, 255.0) as u8;
                    blend_pixel(
                        canvas,
                        px as u32,
                        py as u32,
                        Rgba([color.0[0], color.0[1], color.0[2], alpha]),
                    );
                }
            });
        }
    }
}

/// Source-over blend of one pixel.
fn blend_pixel(canvas: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) {
    let [r, g, b, a] = color.0;
    if a == 0 {
        return;
    }
    let dst = canvas.get_pixel(x, y).0;
    let src_a = a as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }
    let blend = |src: u8, dst: u8| {
        let src_f = src as f32 / 255.0;
        let dst_f = dst as f32 / 255.0;
        ((src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a * 255.0)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    canvas.put_pixel(
        x,
        y,
        Rgba([
            blend(r, dst[0]),
            blend(g, dst[1]),
            blend(b, dst[2]),
            (out_a * 255.0) as u8,
        ]),
    );
}
