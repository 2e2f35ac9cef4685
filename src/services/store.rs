use crate::utils::validation::sanitize_filename;
use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// Flat-file store for uploaded documents. Holds no state beyond its root
/// directory; every write produces an independently named file.
pub struct DocumentStore {
    root: PathBuf,
}

/// Outcome of a successful write.
#[derive(Debug)]
pub struct StoredDocument {
    /// Filename (without directory) the payload was saved under
    pub saved_as: String,
    /// Full path on disk
    pub path: PathBuf,
    /// Size of the file as re-read from disk after the write
    pub size_on_disk: u64,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the upload root if it does not exist yet.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Persists `data` under `<timestamp>_<safe_path>_<safe_filename>`.
    ///
    /// The timestamp has second resolution, so identical path/filename
    /// pairs arriving within the same second overwrite each other
    /// (last write wins; this fixture does not deduplicate or guard
    /// against that).
    pub async fn store(
        &self,
        doc_path: &str,
        filename: &str,
        data: &[u8],
    ) -> std::io::Result<StoredDocument> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");

        // Slashes in the logical document path become underscores before
        // general sanitization so the whole path survives as one component.
        let safe_path = sanitize_filename(&doc_path.replace('/', "_"));
        let safe_filename = sanitize_filename(filename);

        let saved_as = format!("{timestamp}_{safe_path}_{safe_filename}");
        let path = self.root.join(&saved_as);

        fs::write(&path, data).await?;

        // Re-read the size to catch a short write. Non-fatal: the upload
        // already succeeded from the client's point of view.
        let size_on_disk = fs::metadata(&path).await?.len();
        if size_on_disk != data.len() as u64 {
            warn!(
                "[UPLOAD] File size mismatch for {}: wrote {} bytes, found {} on disk",
                saved_as,
                data.len(),
                size_on_disk
            );
        }

        Ok(StoredDocument {
            saved_as,
            path,
            size_on_disk,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_round_trips_binary_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());

        let payload = [0u8, 1, 2, 3, 0xFF, 0x00, b'\n'];
        let stored = store
            .store("/Notes/daily", "page.rm", &payload)
            .await
            .unwrap();

        assert_eq!(stored.size_on_disk, payload.len() as u64);
        let on_disk = std::fs::read(&stored.path).unwrap();
        assert_eq!(on_disk, payload);
    }

    #[tokio::test]
    async fn test_stored_name_is_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());

        let stored = store
            .store("/Notes/א:report?", "we<ird>.rm", b"x")
            .await
            .unwrap();

        for c in ['/', '\\', ':', '<', '>', '?', '*', '"', '|'] {
            assert!(
                !stored.saved_as.contains(c),
                "saved_as {:?} contains {:?}",
                stored.saved_as,
                c
            );
        }
        assert!(stored.saved_as.contains("_Notes_א_report"));
    }
}
