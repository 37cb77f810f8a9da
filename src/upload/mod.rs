mod queue;
mod submitter;
mod types;

pub use queue::{QueueError, SpoolQueue, UploadQueue};
pub use submitter::FormSubmitter;
pub use types::{DroppedFile, FileStatus, UploadStatus};
