//! Local filesystem corpus storage.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── stats.json            # Summary of the last collection run
//! ├── news/                 # One directory per section name
//! │   └── <sanitized-id>.txt
//! └── sport/
//!     └── <sanitized-id>.txt
//! ```
//!
//! Records are immutable once written: a key that already exists is never
//! overwritten, and key presence is the only existence check. Writes go
//! through a temp file and rename, so an interrupted run never leaves a
//! partial record behind and collection can resume cleanly.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::CollectOutcome;

/// File extension for stored records.
const RECORD_EXT: &str = "txt";

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Root directory of the corpus.
    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    fn section_dir(&self, section: &str) -> PathBuf {
        self.root_dir.join(section)
    }

    fn record_path(&self, section: &str, key: &str) -> PathBuf {
        self.section_dir(section).join(format!("{key}.{RECORD_EXT}"))
    }

    /// Create the section directory if absent. Idempotent.
    pub async fn ensure_section(&self, section: &str) -> Result<()> {
        tokio::fs::create_dir_all(self.section_dir(section)).await?;
        Ok(())
    }

    /// Whether a record with this key is already stored for the section.
    pub async fn contains(&self, section: &str, key: &str) -> bool {
        tokio::fs::try_exists(self.record_path(section, key))
            .await
            .unwrap_or(false)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Write one record, refusing to overwrite an existing key.
    ///
    /// Returns `false` if the key was already present and nothing was
    /// written.
    pub async fn write_record(&self, section: &str, key: &str, text: &str) -> Result<bool> {
        let path = self.record_path(section, key);
        if tokio::fs::try_exists(&path).await? {
            return Ok(false);
        }

        self.write_bytes(&path, text.as_bytes()).await?;
        Ok(true)
    }

    /// Read one stored record.
    pub async fn read_record(&self, path: &Path) -> Result<String> {
        Ok(tokio::fs::read_to_string(path).await?)
    }

    /// Number of records stored for a section. A missing directory is 0.
    pub async fn record_count(&self, section: &str) -> Result<usize> {
        let mut entries = match tokio::fs::read_dir(self.section_dir(section)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(AppError::Io(e)),
        };

        let mut count = 0;
        while let Some(entry) = entries.next_entry().await? {
            if entry.path().extension().and_then(|e| e.to_str()) == Some(RECORD_EXT) {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Walk every stored record under the root.
    ///
    /// Yields `(label, path)` pairs where the label is the record's
    /// immediate parent directory name. Sorted for deterministic order.
    pub async fn walk(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut records = Vec::new();

        let mut sections = match tokio::fs::read_dir(&self.root_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(AppError::Io(e)),
        };

        while let Some(section) = sections.next_entry().await? {
            if !section.file_type().await?.is_dir() {
                continue;
            }
            let label = section.file_name().to_string_lossy().into_owned();

            let mut files = tokio::fs::read_dir(section.path()).await?;
            while let Some(file) = files.next_entry().await? {
                let path = file.path();
                if path.extension().and_then(|e| e.to_str()) == Some(RECORD_EXT) {
                    records.push((label.clone(), path));
                }
            }
        }

        records.sort();
        Ok(records)
    }

    /// Persist the summary of a collection run at the corpus root.
    pub async fn write_stats(&self, outcome: &CollectOutcome) -> Result<()> {
        tokio::fs::create_dir_all(&self.root_dir).await?;
        let bytes = serde_json::to_vec_pretty(outcome)?;
        self.write_bytes(&self.root_dir.join("stats.json"), &bytes)
            .await
    }
}
