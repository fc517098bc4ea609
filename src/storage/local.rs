//! Local filesystem storage implementation.
//!
//! Files are written atomically (temp file, then rename) so a reader never
//! observes a half-written result.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{BatchResult, DrawRecord, OutputConfig};
use crate::storage::{DrawStorage, WriteSummary};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    results_file: String,
    latest_file: String,
    numbers_file: String,
}

impl LocalStorage {
    /// Create storage from the output configuration.
    pub fn new(output: &OutputConfig) -> Self {
        Self {
            root_dir: PathBuf::from(&output.dir),
            results_file: output.results_file.clone(),
            latest_file: output.latest_file.clone(),
            numbers_file: output.numbers_file.clone(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }

    /// Write pretty-printed JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl DrawStorage for LocalStorage {
    async fn write_batch(&self, batch: &BatchResult) -> Result<WriteSummary> {
        let path = self.write_json(&self.results_file, batch).await?;
        log::debug!("Wrote {} draws to {}", batch.len(), path.display());

        Ok(WriteSummary {
            location: path.display().to_string(),
            count: batch.len(),
            timestamp: Utc::now(),
        })
    }

    /// Writes the numbers file first, then the record. Each rename is atomic
    /// but the pair is not: if the record write fails, the numbers file is
    /// already newer than the record file.
    async fn write_latest(&self, record: &DrawRecord) -> Result<WriteSummary> {
        let numbers = self
            .write_json(&self.numbers_file, &record.winning_numbers())
            .await?;
        let path = self.write_json(&self.latest_file, record).await?;
        log::debug!(
            "Wrote latest draw to {} and {}",
            path.display(),
            numbers.display()
        );

        Ok(WriteSummary {
            location: path.display().to_string(),
            count: 1,
            timestamp: Utc::now(),
        })
    }

    async fn load_batch(&self) -> Result<BatchResult> {
        match self.read_json(&self.results_file).await? {
            Some(batch) => Ok(batch),
            None => {
                log::warn!("No {} found", self.results_file);
                Ok(BatchResult::new())
            }
        }
    }

    async fn load_latest(&self) -> Result<Option<DrawRecord>> {
        self.read_json(&self.latest_file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage(tmp: &TempDir) -> LocalStorage {
        LocalStorage::new(&OutputConfig {
            dir: tmp.path().join("out").display().to_string(),
            ..OutputConfig::default()
        })
    }

    fn record(first: &str) -> DrawRecord {
        DrawRecord {
            first_prize: first.to_string(),
            second_prize: "2222".to_string(),
            third_prize: "3333".to_string(),
            starter_prizes: vec!["0100".to_string()],
            consolation_prizes: vec!["0200".to_string()],
            ..DrawRecord::default()
        }
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        storage.write_bytes("test.txt", b"hello").await.unwrap();
        let data = storage.read_bytes("test.txt").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
        assert!(!storage.path("test.tmp").exists());
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        assert!(storage.read_bytes("nope.txt").await.unwrap().is_none());
        assert!(storage.load_batch().await.unwrap().is_empty());
        assert!(storage.load_latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_batch_round_trip() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        let batch = BatchResult::from(vec![record("1111"), record("9999")]);

        let summary = storage.write_batch(&batch).await.unwrap();
        assert_eq!(summary.count, 2);
        assert!(summary.location.ends_with("4d_results.json"));

        let loaded = storage.load_batch().await.unwrap();
        assert_eq!(loaded, batch);
    }

    #[tokio::test]
    async fn test_empty_batch_written_as_empty_array() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        storage.write_batch(&BatchResult::new()).await.unwrap();
        let text = std::fs::read_to_string(storage.path("4d_results.json")).unwrap();
        assert_eq!(text.trim(), "[]");
    }

    #[tokio::test]
    async fn test_write_latest_writes_record_and_numbers() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        let latest = record("1111");

        storage.write_latest(&latest).await.unwrap();

        assert_eq!(storage.load_latest().await.unwrap(), Some(latest));
        let numbers: Vec<String> = storage.read_json("4d.json").await.unwrap().unwrap();
        assert_eq!(numbers, vec!["1111", "2222", "3333", "0100", "0200"]);
    }

    #[tokio::test]
    async fn test_unwritable_target_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();
        let storage = LocalStorage::new(&OutputConfig {
            dir: blocker.display().to_string(),
            ..OutputConfig::default()
        });

        let err = storage.write_batch(&BatchResult::new()).await.unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[tokio::test]
    async fn test_failed_numbers_write_leaves_record_untouched() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        std::fs::create_dir_all(storage.path("4d.json")).unwrap();

        let err = storage.write_latest(&record("1111")).await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(storage.load_latest().await.unwrap().is_none());
    }
}
