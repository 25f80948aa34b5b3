// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Export of the composited surface.
//!
//! Encodes the rendered pixel buffer as a JPEG file. JPEG has no alpha
//! channel, so the buffer is flattened to RGB first; the compositor
//! always fills the frame with an opaque color, so nothing is lost.

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Default file name offered in the save dialog.
pub const DEFAULT_FILE_NAME: &str = "memestamp.jpg";

/// JPEG quality used for exports.
const JPEG_QUALITY: u8 = 90;

/// Encode `surface` as a JPEG at `path`.
pub fn export_jpeg(surface: &RgbaImage, path: &Path) -> Result<()> {
    let rgb = DynamicImage::ImageRgba8(surface.clone()).to_rgb8();

    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
    encoder
        .encode_image(&rgb)
        .with_context(|| format!("failed to encode {}", path.display()))?;

    log::info!("Exported composition to {}", path.display());
    Ok(())
}
