use crate::utils::{CsvEnumeratorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub input_file: String,
    pub cursor: Option<u64>,
    pub rows_processed: u64,
    pub created_at: u64,
    pub updated_at: u64,
    pub status: RunStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Running => write!(f, "running"),
            RunStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Persists one job's cursor as a JSON document, keyed by input file.
pub struct CursorStore {
    path: PathBuf,
}

impl CursorStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    pub fn load(&self, input_file: &str) -> Result<Option<Checkpoint>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = std::fs::read(&self.path)?;
        let checkpoint: Checkpoint = serde_json::from_slice(&data)?;

        if checkpoint.input_file != input_file {
            return Err(CsvEnumeratorError::CheckpointError(format!(
                "checkpoint belongs to {}, not {}",
                checkpoint.input_file, input_file
            )));
        }

        Ok(Some(checkpoint))
    }

    pub fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        let data = serde_json::to_vec_pretty(checkpoint)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }

    pub fn update_progress(
        &self,
        input_file: &str,
        cursor: u64,
        rows_in_step: u64,
    ) -> Result<Checkpoint> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let mut checkpoint = match self.load(input_file)? {
            Some(checkpoint) => checkpoint,
            None => Checkpoint {
                input_file: input_file.to_string(),
                cursor: None,
                rows_processed: 0,
                created_at: now,
                updated_at: now,
                status: RunStatus::Running,
            },
        };

        checkpoint.cursor = Some(cursor);
        checkpoint.rows_processed += rows_in_step;
        checkpoint.updated_at = now;

        self.save(&checkpoint)?;
        Ok(checkpoint)
    }

    pub fn mark_completed(&self, input_file: &str) -> Result<()> {
        if let Some(mut checkpoint) = self.load(input_file)? {
            checkpoint.status = RunStatus::Completed;
            checkpoint.updated_at = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_secs();
            self.save(&checkpoint)?;
        }
        Ok(())
    }

    pub fn delete(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
