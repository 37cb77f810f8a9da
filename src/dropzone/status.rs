use std::time::{Duration, Instant};

/// How long an error message stays on the status line.
pub const ERROR_DISPLAY: Duration = Duration::from_millis(20_000);

/// The text shown inside the drop zone. An error temporarily replaces the
/// base text; `tick` restores it once the display window has passed.
/// At most one revert is pending: a newer error replaces the older one's
/// deadline instead of stacking a second timer.
#[derive(Debug, Clone)]
pub struct StatusLine {
    base: String,
    error: Option<ErrorDisplay>,
}

#[derive(Debug, Clone)]
struct ErrorDisplay {
    message: String,
    shown_at: Instant,
}

impl StatusLine {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            error: None,
        }
    }

    pub fn show_error(&mut self, message: impl Into<String>, now: Instant) {
        self.error = Some(ErrorDisplay {
            message: message.into(),
            shown_at: now,
        });
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(error) = &self.error {
            if now.duration_since(error.shown_at) >= ERROR_DISPLAY {
                self.error = None;
            }
        }
    }

    pub fn text(&self) -> &str {
        match &self.error {
            Some(error) => &error.message,
            None => &self.base,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
