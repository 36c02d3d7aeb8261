use super::artifact::{backup_file_name, BackupArtifact};
use super::dump::Dumper;
use crate::config::AppConfig;
use crate::error::{BackupError, Result};
use crate::notify::Notifier;
use crate::upload::BackupUploader;
use chrono::Local;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

#[derive(Debug)]
pub struct BackupResult {
    pub database: String,

    pub file_name: String,

    pub key: Option<String>,

    pub success: bool,

    pub file_size: Option<u64>,

    pub duration_secs: u64,

    pub error: Option<String>,
}

struct Uploaded {
    key: String,
    size: u64,
}

/// Runs dump, upload and notify for each configured database in turn.
/// A failure only ends the pipeline of the database it happened in.
pub struct BackupRunner<'a> {
    config: &'a AppConfig,
    dumper: &'a dyn Dumper,
    uploader: &'a dyn BackupUploader,
    notifier: &'a dyn Notifier,
    temp_root: PathBuf,
}

impl<'a> BackupRunner<'a> {
    pub fn new(
        config: &'a AppConfig,
        dumper: &'a dyn Dumper,
        uploader: &'a dyn BackupUploader,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            config,
            dumper,
            uploader,
            notifier,
            temp_root: std::env::temp_dir(),
        }
    }

    /// Parent directory for the per-database scratch directories.
    #[cfg(test)]
    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.temp_root = temp_root.into();
        self
    }

    pub async fn run_all(&self) -> Vec<BackupResult> {
        let mut results = Vec::with_capacity(self.config.databases.len());

        for database in &self.config.databases {
            results.push(self.run_database(database).await);
        }

        results
    }

    pub async fn run_database(&self, database: &str) -> BackupResult {
        let start = Instant::now();
        let file_name = backup_file_name(database, Local::now().naive_local());

        info!("Backing up database {} as {}", database, file_name);

        let outcome = self.backup_and_upload(database, &file_name).await;
        let duration_secs = start.elapsed().as_secs();

        match outcome {
            Ok(uploaded) => {
                info!(
                    "Backup of {} stored in {} as {} ({} bytes, {} sec)",
                    database,
                    self.uploader.name(),
                    uploaded.key,
                    uploaded.size,
                    duration_secs
                );
                let message = format!(
                    "Backup successful for database: {} (file: {})",
                    database, file_name
                );
                self.notifier.notify(&message, None, &file_name).await;

                BackupResult {
                    database: database.to_string(),
                    file_name,
                    key: Some(uploaded.key),
                    success: true,
                    file_size: Some(uploaded.size),
                    duration_secs,
                    error: None,
                }
            }
            Err(e) => {
                error!("Backup of {} failed: {}", database, e);
                let message = format!(
                    "Backup failed for database: {} (file: {})",
                    database, file_name
                );
                self.notifier.notify(&message, Some(&e), &file_name).await;

                BackupResult {
                    database: database.to_string(),
                    file_name,
                    key: None,
                    success: false,
                    file_size: None,
                    duration_secs,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn backup_and_upload(&self, database: &str, file_name: &str) -> Result<Uploaded> {
        let artifact =
            BackupArtifact::produce(self.dumper, &self.temp_root, database, file_name).await?;

        let uploaded = self
            .uploader
            .upload(artifact.file_name(), artifact.path())
            .await
            .map(|key| Uploaded {
                key,
                size: artifact.size(),
            });

        artifact.discard();
        uploaded
    }
}

/// Sends the one notification for a failure that stops the run before
/// any database is attempted.
pub async fn report_fatal(notifier: &dyn Notifier, message: &str, err: &BackupError) {
    error!("{}: {}", message, err);
    notifier.notify(message, Some(err), "").await;
}
