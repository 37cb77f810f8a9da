use crate::dropzone::status::StatusLine;
use crate::dropzone::validation;
use crate::upload::{DroppedFile, FormSubmitter, SpoolQueue, UploadQueue};
use reqwest::Url;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Text shown in the zone while no error is displayed.
pub const DROP_PROMPT: &str = "Drop your .odm file here";

#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid upload endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("cannot prepare queue directory '{dir}': {source}")]
    QueueDir {
        dir: String,
        #[source]
        source: std::io::Error,
    },
}

/// How the zone disposes of dropped files.
pub enum DropPolicy {
    /// Validate, then hand the single accepted file back for upload.
    Submit(FormSubmitter),
    /// Hand the whole drop to the queuing collaborator, unvalidated.
    Queue(Box<dyn UploadQueue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneMode {
    DragAndDrop,
    /// Drag support is unavailable; only the picker form is shown and no
    /// drag events are delivered.
    FallbackForm,
}

/// What the host must do after a drop.
#[derive(Debug)]
pub enum DropAction {
    None,
    Submit(DroppedFile),
}

/// The upload widget. Owns hover state, the status line, and the drop
/// policy; the host UI forwards drag events and renders from the getters.
pub struct DropZone {
    mode: ZoneMode,
    policy: DropPolicy,
    hover: bool,
    status: StatusLine,
}

impl DropZone {
    /// Zone that validates drops and submits them to the given endpoint.
    pub fn submit_to(endpoint: &str, drag_and_drop: bool) -> Result<Self, InitError> {
        let url = Url::parse(endpoint).map_err(|e| InitError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::with_policy(
            DropPolicy::Submit(FormSubmitter::new(url)),
            drag_and_drop,
        ))
    }

    /// Zone that spools every drop into the given directory.
    pub fn queue_into(dir: &Path, drag_and_drop: bool) -> Result<Self, InitError> {
        let queue = SpoolQueue::new(dir).map_err(|source| InitError::QueueDir {
            dir: dir.display().to_string(),
            source,
        })?;
        Ok(Self::with_policy(
            DropPolicy::Queue(Box::new(queue)),
            drag_and_drop,
        ))
    }

    pub fn with_policy(policy: DropPolicy, drag_and_drop: bool) -> Self {
        Self {
            mode: if drag_and_drop {
                ZoneMode::DragAndDrop
            } else {
                ZoneMode::FallbackForm
            },
            policy,
            hover: false,
            status: StatusLine::new(DROP_PROMPT),
        }
    }

    pub fn mode(&self) -> ZoneMode {
        self.mode
    }

    pub fn is_hovered(&self) -> bool {
        self.hover
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn submitter(&self) -> Option<&FormSubmitter> {
        match &self.policy {
            DropPolicy::Submit(submitter) => Some(submitter),
            DropPolicy::Queue(_) => None,
        }
    }

    pub fn show_error(&mut self, message: impl Into<String>, now: Instant) {
        self.status.show_error(message, now);
    }

    pub fn on_drag_enter(&mut self) {
        self.hover = true;
    }

    pub fn on_drag_leave(&mut self) {
        self.hover = false;
    }

    /// Keeps the target armed; no visual effect.
    pub fn on_drag_over(&mut self) {}

    pub fn on_drop(&mut self, files: Vec<DroppedFile>, now: Instant) -> DropAction {
        self.hover = false;
        if files.is_empty() {
            return DropAction::None;
        }

        match &self.policy {
            DropPolicy::Queue(queue) => {
                match queue.queue(&files) {
                    Ok(()) => info!(count = files.len(), "handed drop to the upload queue"),
                    Err(e) => {
                        warn!(error = %e, "queue collaborator failed");
                        self.status.show_error(e.to_string(), now);
                    }
                }
                DropAction::None
            }
            DropPolicy::Submit(_) => match validation::validate(&files) {
                Ok(file) => DropAction::Submit(file.clone()),
                Err(e) => {
                    warn!(error = %e, "rejected dropped files");
                    self.status.show_error(e.to_string(), now);
                    DropAction::None
                }
            },
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.status.tick(now);
    }
}
