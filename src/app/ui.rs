use super::{UploadPhase, UploaderApp};
use crate::dropzone::{ZoneMode, MAX_FILE_SIZE, ODM_SUFFIX};
use crate::upload::DroppedFile;
use crate::utils::file_size::format_size;
use eframe::egui::{self, Align, Color32, RichText};
use rfd::FileDialog;
use std::time::Instant;
use tracing::error;

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const OK_GREEN: Color32 = Color32::from_rgb(0, 180, 0);
const ERROR_RED: Color32 = Color32::from_rgb(220, 50, 50);

impl UploaderApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 40.0;
            let content_height = total_height - footer_height;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("ODM Uploader");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Send an OverDrive .odm file to your godm server")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);

                    match self.zone.mode() {
                        ZoneMode::DragAndDrop => self.render_drop_surface(ui),
                        ZoneMode::FallbackForm => self.render_fallback_form(ui),
                    }

                    if !matches!(self.state.phase, UploadPhase::NotStarted) {
                        ui.add_space(20.0);
                        self.render_progress(ui);
                    }

                    ui.add_space(20.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(10.0);
                self.render_footer(ui);
            });
        });
    }

    fn render_drop_surface(&mut self, ui: &mut egui::Ui) {
        let hovered = self.zone.is_hovered();
        let stroke = if hovered {
            egui::Stroke::new(2.0, ACCENT)
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke
        };

        egui::Frame::none()
            .stroke(stroke)
            .fill(ui.style().visuals.extreme_bg_color)
            .inner_margin(egui::Margin::same(30.0))
            .rounding(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    let status = self.zone.status();
                    if status.is_error() {
                        ui.colored_label(ERROR_RED, status.text());
                    } else if hovered {
                        ui.label(RichText::new(status.text()).strong());
                    } else {
                        ui.label(status.text());
                    }
                    ui.add_space(20.0);
                });
            });

        ui.add_space(5.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(format!(
                    "One '{}' file, up to {} bytes",
                    ODM_SUFFIX, MAX_FILE_SIZE
                ))
                .color(ui.visuals().text_color().gamma_multiply(0.5))
                .small(),
            );
        });
    }

    fn render_fallback_form(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label("Drag and drop is unavailable. Pick the file to upload instead.");
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button("📁 Select .odm File").clicked() {
                    let picked = FileDialog::new()
                        .add_filter("ODM", &[ODM_SUFFIX.trim_start_matches('.')])
                        .pick_file();
                    if let Some(path) = picked {
                        match DroppedFile::from_path(path) {
                            Ok(file) => self.picked_file = Some(file),
                            Err(e) => self
                                .zone
                                .show_error(format!("Could not read file: {}", e), Instant::now()),
                        }
                    }
                }
                if let Some(file) = &self.picked_file {
                    ui.label(format!("Selected: {} ({})", file.name, format_size(file.len)));
                }
            });

            ui.add_space(10.0);

            let can_upload = self.picked_file.is_some() && !self.state.is_uploading();
            ui.add_enabled_ui(can_upload, |ui| {
                if ui.button("📤 Upload").clicked() {
                    if let Some(file) = self.picked_file.take() {
                        self.handle_drop(vec![file]);
                    }
                }
            });

            if self.zone.status().is_error() {
                ui.add_space(5.0);
                ui.colored_label(ERROR_RED, self.zone.status().text());
            }
        });
    }

    fn render_progress(&mut self, ui: &mut egui::Ui) {
        let phase = self.state.phase.clone();
        ui.group(|ui| {
            match &phase {
                UploadPhase::NotStarted => {}
                UploadPhase::Uploading { name } => {
                    ui.horizontal(|ui| {
                        ui.add(egui::Spinner::new());
                        ui.label(format!("📤 Uploading: {}", name));
                    });
                }
                UploadPhase::Completed { name, status_url } => {
                    ui.horizontal(|ui| {
                        ui.label("✅");
                        ui.colored_label(OK_GREEN, format!("Uploaded: {}", name));
                    });
                    if let Some(url) = status_url {
                        if ui.link("Open download status").clicked() {
                            if let Err(e) = open::that(url) {
                                error!(url = %url, error = %e, "failed to open status page");
                            }
                        }
                    }
                    ui.add_space(5.0);
                    if ui.button("🔄 Upload Another").clicked() {
                        self.state.clear();
                        self.picked_file = None;
                    }
                }
                UploadPhase::Failed { name, error } => {
                    ui.horizontal(|ui| {
                        ui.label("❌");
                        ui.colored_label(ERROR_RED, format!("{} - {}", name, error));
                    });
                    ui.add_space(5.0);
                    if ui.button("🔄 Try Again").clicked() {
                        self.state.clear();
                    }
                }
            }
        });
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let text = match self.zone.submitter() {
                Some(submitter) => format!("Uploading to {}", submitter.endpoint()),
                None => "Queuing drops for later upload".to_string(),
            };
            ui.label(
                RichText::new(text)
                    .color(ui.visuals().text_color().gamma_multiply(0.5))
                    .small(),
            );
        });
    }
}
