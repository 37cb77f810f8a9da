mod state;
mod ui;

use crate::dropzone::{DropAction, DropZone, ZoneMode};
use crate::upload::{DroppedFile, FileStatus, UploadStatus};
use crate::utils::file_size::format_size;
use eframe::{egui, App};
use std::sync::mpsc as std_mpsc;
use std::time::Instant;
use tracing::{error, info};

pub use state::{UploadPhase, UploadState};

pub struct UploaderApp {
    zone: DropZone,
    picked_file: Option<DroppedFile>,
    state: UploadState,
}

impl UploaderApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, zone: DropZone) -> Self {
        info!("initializing ODM uploader");
        Self {
            zone,
            picked_file: None,
            state: UploadState::default(),
        }
    }

    /// Translates egui's native file-drag input into drop zone events.
    fn pump_drag_events(&mut self, ctx: &egui::Context) {
        if self.zone.mode() != ZoneMode::DragAndDrop {
            return;
        }

        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });

        if !dropped.is_empty() {
            match convert_dropped(&dropped) {
                Ok(files) => self.handle_drop(files),
                Err(e) => self.zone.show_error(e, Instant::now()),
            }
        } else if hovering {
            if self.zone.is_hovered() {
                self.zone.on_drag_over();
            } else {
                self.zone.on_drag_enter();
            }
        } else if self.zone.is_hovered() {
            self.zone.on_drag_leave();
        }
    }

    pub(crate) fn handle_drop(&mut self, files: Vec<DroppedFile>) {
        match self.zone.on_drop(files, Instant::now()) {
            DropAction::Submit(file) => self.start_upload(file),
            DropAction::None => {}
        }
    }

    fn start_upload(&mut self, file: DroppedFile) {
        let Some(submitter) = self.zone.submitter().cloned() else {
            return;
        };
        info!(name = %file.name, size = %format_size(file.len), "starting upload");

        let (sender, receiver) = std_mpsc::channel();
        self.state.status_receiver = Some(receiver);
        self.state.phase = UploadPhase::Uploading {
            name: file.name.clone(),
        };

        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!(error = %e, "failed to start the upload runtime");
                    let status = FileStatus {
                        name: file.name.clone(),
                        status: UploadStatus::Error(format!("Failed to start upload: {}", e)),
                    };
                    sender.send(status).unwrap_or_default();
                    return;
                }
            };
            rt.block_on(async {
                if let Err(e) = submitter.submit(&file, &sender).await {
                    error!(name = %file.name, error = %e, "upload failed");
                }
            });
        });
    }

    fn update_state(&mut self, ctx: &egui::Context) {
        ctx.request_repaint();

        if let Some(receiver) = &self.state.status_receiver {
            let mut done = false;
            while let Ok(status) = receiver.try_recv() {
                match status.status {
                    UploadStatus::Processing => {
                        self.state.phase = UploadPhase::Uploading { name: status.name };
                    }
                    UploadStatus::Success { status_url } => {
                        info!(name = %status.name, "upload complete");
                        if let Some(url) = &status_url {
                            // The server redirects to the download status
                            // page; show it the way a form post would have.
                            if let Err(e) = open::that(url) {
                                error!(url = %url, error = %e, "failed to open status page");
                            }
                        }
                        self.state.phase = UploadPhase::Completed {
                            name: status.name,
                            status_url,
                        };
                        done = true;
                    }
                    UploadStatus::Error(message) => {
                        self.state.phase = UploadPhase::Failed {
                            name: status.name,
                            error: message,
                        };
                        done = true;
                    }
                }
            }
            if done {
                self.state.status_receiver = None;
            }
        }

        self.zone.tick(Instant::now());
    }
}

impl App for UploaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.pump_drag_events(ctx);
        self.render(ctx);
    }
}

fn convert_dropped(dropped: &[egui::DroppedFile]) -> Result<Vec<DroppedFile>, String> {
    dropped
        .iter()
        .map(|file| {
            if let Some(path) = &file.path {
                DroppedFile::from_path(path.clone())
                    .map_err(|e| format!("Could not read dropped file: {}", e))
            } else if let Some(bytes) = &file.bytes {
                Ok(DroppedFile::from_bytes(file.name.clone(), bytes.clone()))
            } else {
                Err("Could not read dropped file".to_string())
            }
        })
        .collect()
}
