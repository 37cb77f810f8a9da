use crate::upload::FileStatus;
use std::sync::mpsc::Receiver;

#[derive(Clone, Default)]
pub enum UploadPhase {
    #[default]
    NotStarted,
    Uploading {
        name: String,
    },
    Completed {
        name: String,
        status_url: Option<String>,
    },
    Failed {
        name: String,
        error: String,
    },
}

#[derive(Default)]
pub struct UploadState {
    pub phase: UploadPhase,
    pub status_receiver: Option<Receiver<FileStatus>>,
}

impl UploadState {
    pub fn clear(&mut self) {
        *self = UploadState::default();
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.phase, UploadPhase::Uploading { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_the_phase() {
        let mut state = UploadState {
            phase: UploadPhase::Failed {
                name: "book.odm".into(),
                error: "boom".into(),
            },
            status_receiver: None,
        };
        state.clear();
        assert!(matches!(state.phase, UploadPhase::NotStarted));
        assert!(!state.is_uploading());
    }

    #[test]
    fn uploading_is_the_only_busy_phase() {
        let mut state = UploadState::default();
        assert!(!state.is_uploading());

        state.phase = UploadPhase::Uploading {
            name: "book.odm".into(),
        };
        assert!(state.is_uploading());

        state.phase = UploadPhase::Completed {
            name: "book.odm".into(),
            status_url: None,
        };
        assert!(!state.is_uploading());
    }
}
