use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use herald_types::{PublishError, PublishedUpdate};

/// Cap on retained feed entries, newest first.
pub const MAX_LOG_ENTRIES: usize = 20;

/// The append-only published-update log.
///
/// The one shared resource in the core. Appends are serialized by the
/// implementation; reads see a consistent prefix.
#[async_trait]
pub trait StatusLog: Send + Sync {
    async fn append(&self, update: PublishedUpdate) -> Result<(), PublishError>;

    /// Entries newest first.
    async fn read(&self) -> Result<Vec<PublishedUpdate>, PublishError>;
}

/// In-memory status log.
#[derive(Debug, Default)]
pub struct MemoryStatusLog {
    entries: Mutex<Vec<PublishedUpdate>>,
}

impl MemoryStatusLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatusLog for MemoryStatusLog {
    async fn append(&self, update: PublishedUpdate) -> Result<(), PublishError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PublishError::Store("status log poisoned".to_string()))?;
        entries.insert(0, update);
        entries.truncate(MAX_LOG_ENTRIES);
        Ok(())
    }

    async fn read(&self) -> Result<Vec<PublishedUpdate>, PublishError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| PublishError::Store("status log poisoned".to_string()))?;
        Ok(entries.clone())
    }
}

/// Status log mirrored to a JSON file, loaded on startup.
#[derive(Debug)]
pub struct FileStatusLog {
    path: PathBuf,
    entries: tokio::sync::Mutex<Vec<PublishedUpdate>>,
}

impl FileStatusLog {
    /// Open the log, loading any existing entries from `path`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, PublishError> {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| PublishError::Store(format!("corrupt status log: {e}")))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(PublishError::Store(err.to_string())),
        };
        Ok(Self {
            path,
            entries: tokio::sync::Mutex::new(entries),
        })
    }
}

#[async_trait]
impl StatusLog for FileStatusLog {
    async fn append(&self, update: PublishedUpdate) -> Result<(), PublishError> {
        let mut entries = self.entries.lock().await;
        entries.insert(0, update);
        entries.truncate(MAX_LOG_ENTRIES);

        let serialized = serde_json::to_string_pretty(&*entries)
            .map_err(|e| PublishError::Store(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PublishError::Store(e.to_string()))?;
        }
        tokio::fs::write(&self.path, serialized)
            .await
            .map_err(|e| PublishError::Store(e.to_string()))
    }

    async fn read(&self) -> Result<Vec<PublishedUpdate>, PublishError> {
        Ok(self.entries.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_log_is_newest_first() {
        let log = MemoryStatusLog::new();
        log.append(PublishedUpdate::new("first")).await.unwrap();
        log.append(PublishedUpdate::new("second")).await.unwrap();

        let entries = log.read().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "second");
        assert_eq!(entries[1].text, "first");
    }

    #[tokio::test]
    async fn memory_log_caps_entries() {
        let log = MemoryStatusLog::new();
        for i in 0..25 {
            log.append(PublishedUpdate::new(format!("update {i}")))
                .await
                .unwrap();
        }
        let entries = log.read().await.unwrap();
        assert_eq!(entries.len(), MAX_LOG_ENTRIES);
        assert_eq!(entries[0].text, "update 24");
    }

    #[tokio::test]
    async fn file_log_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status_data.json");

        {
            let log = FileStatusLog::open(&path).await.unwrap();
            log.append(PublishedUpdate::new("persisted update"))
                .await
                .unwrap();
        }

        let reopened = FileStatusLog::open(&path).await.unwrap();
        let entries = reopened.read().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "persisted update");
    }

    #[tokio::test]
    async fn file_log_starts_empty_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileStatusLog::open(dir.path().join("missing.json"))
            .await
            .unwrap();
        assert!(log.read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_log_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status_data.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStatusLog::open(&path).await.unwrap_err();
        assert!(matches!(err, PublishError::Store(_)));
    }
}
