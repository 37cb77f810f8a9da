use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a dropped file's content lives. Native drops carry a filesystem
/// path; some backends deliver the bytes directly.
#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// One file handed over by a drop or by the fallback picker.
#[derive(Debug, Clone)]
pub struct DroppedFile {
    pub name: String,
    pub len: u64,
    pub source: FileSource,
}

impl DroppedFile {
    pub fn from_path(path: PathBuf) -> io::Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let len = std::fs::metadata(&path)?.len();
        Ok(Self {
            name,
            len,
            source: FileSource::Path(path),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        Self {
            name: name.into(),
            len: bytes.len() as u64,
            source: FileSource::Bytes(bytes),
        }
    }

    pub fn read(&self) -> io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => std::fs::read(path),
            FileSource::Bytes(bytes) => Ok(bytes.to_vec()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum UploadStatus {
    Processing,
    Success { status_url: Option<String> },
    Error(String),
}

#[derive(Debug, Clone)]
pub struct FileStatus {
    pub name: String,
    pub status: UploadStatus,
}
