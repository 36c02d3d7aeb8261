use super::dump::Dumper;
use crate::error::{BackupError, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// `{database}-{YYYYMMDD-HHMMSS}.sql`
pub fn backup_file_name(database: &str, at: NaiveDateTime) -> String {
    format!("{}-{}.sql", database, at.format(TIMESTAMP_FORMAT))
}

/// A dump written into its own temporary directory. The directory and
/// everything in it is removed when the artifact is dropped.
#[derive(Debug)]
pub struct BackupArtifact {
    dir: TempDir,
    path: PathBuf,
    file_name: String,
    size: u64,
}

impl BackupArtifact {
    pub async fn produce(
        dumper: &dyn Dumper,
        temp_root: &Path,
        database: &str,
        file_name: &str,
    ) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("backup")
            .tempdir_in(temp_root)
            .map_err(BackupError::TempDir)?;

        let bytes = dumper.dump(database).await?;

        let path = dir.path().join(file_name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(BackupError::WriteFile)?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());

        Ok(Self {
            dir,
            path,
            file_name: file_name.to_string(),
            size: bytes.len() as u64,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Removes the temporary directory now, logging instead of failing.
    pub fn discard(self) {
        let dir = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!("Failed to remove temp directory {}: {}", dir.display(), e);
        }
    }
}
