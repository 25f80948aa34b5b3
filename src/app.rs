// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns the scene, coordinates the background photo loader
//! threads, drives the gesture controller with events from the canvas,
//! and recomposites the preview texture whenever the scene changes.

use crate::input::GestureController;
use crate::io::source;
use crate::models::scene::SceneState;
use crate::render::compositor::{self, FRAME_SIZE};
use crate::render::font::CaptionFont;
use crate::ui::{canvas, toolbar};
use image::{Rgba, RgbaImage};
use std::sync::mpsc::{channel, Receiver};

/// The bundled overlay graphic.
const OVERLAY_ASSET: &[u8] = include_bytes!("../assets/overlay.png");

/// Main application state.
pub struct MemeStampApp {
    /// Everything the compositor reads.
    scene: SceneState,

    /// Pointer session and pinch/drag interpretation.
    gestures: GestureController,

    /// Decoded overlay graphic at its intrinsic size.
    overlay_asset: RgbaImage,

    /// Font for the caption; `None` disables caption rendering.
    caption_font: Option<CaptionFont>,

    /// Background photo pre-scaled to cover the frame, cached per photo.
    fitted_background: Option<RgbaImage>,

    /// Composited preview texture.
    composited: Option<egui::TextureHandle>,

    /// Set whenever the scene changed and the preview must be redrawn.
    needs_recompose: bool,

    /// Receiver for the in-flight background photo load, if any.
    /// Starting a new load replaces this, so a superseded result is
    /// discarded when its channel is dropped.
    photo_loader: Option<Receiver<Result<RgbaImage, String>>>,

    /// Loading state message.
    loading_message: Option<String>,

    /// Last user-visible status or error line.
    status: Option<String>,
}

impl Default for MemeStampApp {
    fn default() -> Self {
        Self::new()
    }
}

impl MemeStampApp {
    /// Create the application and kick off the initial random photo.
    pub fn new() -> Self {
        let overlay_asset = match image::load_from_memory(OVERLAY_ASSET) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                log::error!("Failed to decode bundled overlay asset: {}", e);
                RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]))
            }
        };

        let caption_font = CaptionFont::default_proportional();
        if caption_font.is_none() {
            log::error!("No proportional font available, captions disabled");
        }

        let mut app = Self {
            scene: SceneState::new(),
            gestures: GestureController::new(),
            overlay_asset,
            caption_font,
            fitted_background: None,
            composited: None,
            needs_recompose: true,
            photo_loader: None,
            loading_message: None,
            status: None,
        };
        app.reroll();
        app
    }

    /// Fetch a new random background photo on a background thread.
    fn reroll(&mut self) {
        let (sender, receiver) = channel();
        self.photo_loader = Some(receiver);
        self.loading_message = Some("Fetching random photo...".to_string());

        std::thread::spawn(move || {
            let result = source::fetch_random(&source::default_generators())
                .map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
    }

    /// Decode a user-selected background image on a background thread.
    fn load_background_file(&mut self, path: std::path::PathBuf) {
        let (sender, receiver) = channel();
        self.photo_loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());

        std::thread::spawn(move || {
            let result = source::load_file(&path).map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
    }

    /// Composite the current scene into a fresh pixel buffer.
    fn compose_current(&self) -> RgbaImage {
        compositor::compose(
            self.fitted_background.as_ref(),
            &self.overlay_asset,
            self.scene.overlay.rect,
            self.scene.show_text.then(|| self.scene.text.as_str()),
            self.caption_font.as_ref(),
        )
    }

    /// Export the composited surface to a user-chosen JPEG path.
    fn export(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JPEG", &["jpg", "jpeg"])
            .set_file_name(crate::io::export::DEFAULT_FILE_NAME)
            .save_file()
        {
            let surface = self.compose_current();
            match crate::io::export::export_jpeg(&surface, &path) {
                Ok(_) => self.status = Some(format!("Exported {}", path.display())),
                Err(e) => {
                    log::error!("Export failed: {:#}", e);
                    self.status = Some(format!("Export failed: {e:#}"));
                }
            }
        }
    }

    /// Save the composition (overlay placement + caption) to a file.
    fn save_composition(&mut self, path: std::path::PathBuf) {
        let data = self.scene.to_data();
        let extension = path.extension().and_then(|s| s.to_str());
        let result = match extension {
            Some("yaml") | Some("yml") => crate::io::serialization::export_yaml(&data, &path),
            Some("json") => crate::io::serialization::export_json(&data, &path),
            _ => {
                log::error!("Unsupported file extension: {:?}", extension);
                self.status = Some("Unsupported composition format".to_string());
                return;
            }
        };

        match result {
            Ok(_) => self.status = Some(format!("Saved composition to {}", path.display())),
            Err(e) => {
                log::error!("Failed to save composition: {:#}", e);
                self.status = Some(format!("Save failed: {e:#}"));
            }
        }
    }

    /// Restore a composition from a file.
    fn load_composition(&mut self, path: std::path::PathBuf) {
        let extension = path.extension().and_then(|s| s.to_str());
        let result = match extension {
            Some("yaml") | Some("yml") => crate::io::serialization::import_yaml(&path),
            Some("json") => crate::io::serialization::import_json(&path),
            _ => {
                self.status = Some("Unsupported composition format".to_string());
                return;
            }
        };

        match result {
            Ok(data) => {
                self.scene.restore(data);
                self.needs_recompose = true;
                self.status = Some(format!("Loaded composition from {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to load composition: {:#}", e);
                self.status = Some(format!("Load failed: {e:#}"));
            }
        }
    }

    /// Poll the loader channel; on success the previous photo is
    /// replaced wholesale, on failure it is kept.
    fn poll_photo_loader(&mut self) {
        let Some(ref receiver) = self.photo_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.photo_loader = None;
        self.loading_message = None;

        match result {
            Ok(photo) => {
                self.fitted_background = Some(compositor::cover_fit(&photo));
                self.scene.background = Some(photo);
                self.needs_recompose = true;
                self.status = None;
            }
            Err(e) => {
                log::error!("Background photo load failed: {}", e);
                self.status = Some(e);
            }
        }
    }
}

impl eframe::App for MemeStampApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_photo_loader();

        // Request repaint while a load is in flight (spinner + try_recv).
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // A dropped image file becomes the background, like the original
        // drag-and-drop target.
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|f| f.path.clone())
        });
        if let Some(path) = dropped {
            self.load_background_file(path);
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Random Photo").clicked() {
                        self.reroll();
                        ui.close_menu();
                    }
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif"])
                            .pick_file()
                        {
                            self.load_background_file(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.menu_button("Save Composition", |ui| {
                        if ui.button("As YAML...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("composition.yaml")
                                .save_file()
                            {
                                self.save_composition(path);
                            }
                            ui.close_menu();
                        }
                        if ui.button("As JSON...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("composition.json")
                                .save_file()
                            {
                                self.save_composition(path);
                            }
                            ui.close_menu();
                        }
                    });
                    if ui.button("Load Composition...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Compositions", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.load_composition(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Export JPEG...").clicked() {
                        self.export();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        let (toolbar_action, scene_edited) = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &mut self.scene))
            .inner;
        if scene_edited {
            self.needs_recompose = true;
        }
        match toolbar_action {
            toolbar::ToolbarAction::Reroll => self.reroll(),
            toolbar::ToolbarAction::OpenImage => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif"])
                    .pick_file()
                {
                    self.load_background_file(path);
                }
            }
            toolbar::ToolbarAction::Export => self.export(),
            toolbar::ToolbarAction::None => {}
        }

        // Status line
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(ref message) = self.loading_message {
                    ui.spinner();
                    ui.label(message);
                } else if let Some(ref status) = self.status {
                    ui.label(status);
                } else if let Some(ref photo) = self.scene.background {
                    ui.label(format!("Photo {}x{}", photo.width(), photo.height()));
                } else {
                    ui.label("No photo loaded");
                }
            });
        });

        // Main canvas (center)
        let canvas_output = egui::CentralPanel::default()
            .show(ctx, |ui| {
                canvas::show(ui, &self.composited, &self.scene.overlay)
            })
            .inner;

        if let Some(frame) = canvas_output.frame {
            for event in canvas_output.events {
                if self.gestures.handle(event, &frame, &mut self.scene) {
                    self.needs_recompose = true;
                }
            }
        }

        if self.needs_recompose {
            let surface = self.compose_current();
            let size = [FRAME_SIZE as usize, FRAME_SIZE as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, surface.as_raw());
            self.composited = Some(ctx.load_texture(
                "composited",
                color_image,
                egui::TextureOptions::LINEAR,
            ));
            self.needs_recompose = false;
        }
    }
}
