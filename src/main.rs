// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! MemeStamp
//!
//! A cross-platform desktop application that composites a stamp graphic
//! and an optional caption onto a background photo, with drag and
//! pinch-to-zoom placement, and exports the result as a JPEG.

mod app;
mod input;
mod io;
mod models;
mod render;
mod ui;
mod util;

use anyhow::Result;
use app::MemeStampApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([700.0, 600.0])
            .with_title("MemeStamp"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "MemeStamp",
        options,
        Box::new(|_cc| Ok(Box::new(MemeStampApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
