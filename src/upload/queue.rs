use crate::upload::types::DroppedFile;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("could not queue '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Collaborator that accepts dropped files for later upload. The zone hands
/// the full drop over unvalidated; whatever happens next is the
/// implementation's business.
pub trait UploadQueue: Send {
    fn queue(&self, files: &[DroppedFile]) -> Result<(), QueueError>;
}

#[derive(Serialize)]
struct QueueManifest<'a> {
    file_name: &'a str,
    size: u64,
}

/// Spools queued files into a directory: one content file plus one JSON
/// manifest per entry.
pub struct SpoolQueue {
    dir: PathBuf,
}

impl SpoolQueue {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Picks a spool path that does not collide with an earlier entry of
    /// the same name.
    fn spool_path(&self, name: &str) -> PathBuf {
        let mut candidate = self.dir.join(name);
        let mut counter = 1;
        while candidate.exists() {
            candidate = self.dir.join(format!("{}-{}", counter, name));
            counter += 1;
        }
        candidate
    }
}

impl UploadQueue for SpoolQueue {
    fn queue(&self, files: &[DroppedFile]) -> Result<(), QueueError> {
        for file in files {
            let io_err = |source: io::Error| QueueError::Io {
                name: file.name.clone(),
                source,
            };

            let content = file.read().map_err(io_err)?;
            let path = self.spool_path(&file.name);
            fs::write(&path, &content).map_err(io_err)?;

            let manifest = QueueManifest {
                file_name: &file.name,
                size: file.len,
            };
            let json = serde_json::to_vec_pretty(&manifest)
                .map_err(io::Error::from)
                .map_err(io_err)?;
            let manifest_path = PathBuf::from(format!("{}.json", path.display()));
            fs::write(&manifest_path, json).map_err(io_err)?;

            info!(name = %file.name, size = file.len, path = %path.display(), "queued file");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn file(name: &str, content: &[u8]) -> DroppedFile {
        DroppedFile::from_bytes(name, Arc::from(content))
    }

    #[test]
    fn queue_writes_content_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let queue = SpoolQueue::new(dir.path()).unwrap();

        queue.queue(&[file("book.odm", b"<odm/>")]).unwrap();

        let content = fs::read(dir.path().join("book.odm")).unwrap();
        assert_eq!(content, b"<odm/>");

        let manifest = fs::read_to_string(dir.path().join("book.odm.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(value["file_name"], "book.odm");
        assert_eq!(value["size"], 6);
    }

    #[test]
    fn queue_accepts_multiple_files_at_once() {
        let dir = tempfile::tempdir().unwrap();
        let queue = SpoolQueue::new(dir.path()).unwrap();

        queue
            .queue(&[file("a.odm", b"a"), file("b.txt", b"b")])
            .unwrap();

        assert!(dir.path().join("a.odm").exists());
        assert!(dir.path().join("b.txt").exists());
    }

    #[test]
    fn colliding_names_get_a_numeric_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let queue = SpoolQueue::new(dir.path()).unwrap();

        queue.queue(&[file("book.odm", b"first")]).unwrap();
        queue.queue(&[file("book.odm", b"second")]).unwrap();

        assert_eq!(fs::read(dir.path().join("book.odm")).unwrap(), b"first");
        assert_eq!(fs::read(dir.path().join("1-book.odm")).unwrap(), b"second");
    }

    #[test]
    fn new_creates_the_spool_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("spool").join("odms");

        let queue = SpoolQueue::new(&nested).unwrap();
        queue.queue(&[file("book.odm", b"x")]).unwrap();

        assert!(nested.is_dir());
        assert!(nested.join("book.odm").exists());
    }
}
