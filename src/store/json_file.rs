// ABOUTME: JSON file result store used by the command-line tool
// ABOUTME: Keeps the full history in one file, rewritten atomically on each append
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ResultStore;
use crate::errors::{AppError, AppResult};
use crate::models::SessionResult;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// Result history stored as a JSON array, most recent first
#[derive(Debug)]
pub struct JsonFileResultStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileResultStore {
    /// Store backed by `path`; the file is created on first append
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// File holding the history
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> AppResult<Vec<SessionResult>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                ))
                .with_source(e))
            }
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    async fn write_all(&self, results: &[SessionResult]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(results)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json).await?;
        fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ResultStore for JsonFileResultStore {
    async fn append(&self, result: &SessionResult) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut results = self.read_all().await?;
        results.insert(0, result.clone());
        self.write_all(&results).await?;
        debug!(
            path = %self.path.display(),
            result_id = %result.id,
            total = results.len(),
            "appended session result"
        );
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<SessionResult>> {
        self.read_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use crate::models::{SessionStatus, TestType};
    use chrono::Utc;
    use tempfile::TempDir;

    fn result(reps: u32) -> SessionResult {
        let now = Utc::now();
        SessionResult::new(TestType::Situp, reps, SessionStatus::Valid, 20_000, now, now)
    }

    #[tokio::test]
    async fn test_missing_file_lists_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileResultStore::new(dir.path().join("results.json"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("results.json");
        let store = JsonFileResultStore::new(&path);

        store.append(&result(6)).await.unwrap();
        assert!(path.exists());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        fs::write(&path, "not json").await.unwrap();

        let err = JsonFileResultStore::new(&path).list().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SerializationError);
    }
}
