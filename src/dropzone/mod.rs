mod status;
mod validation;
mod zone;

pub use validation::{MAX_FILE_SIZE, ODM_SUFFIX};
pub use zone::{DropAction, DropZone, ZoneMode};
