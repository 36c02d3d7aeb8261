use super::uploader::{object_key, BackupUploader};
use crate::config::S3Config;
use crate::error::{BackupError, Result};
use async_trait::async_trait;
use s3::creds::Credentials;
use s3::region::Region;
use s3::Bucket;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// Stores backups with a single PUT per file. Built once per run and
/// reused for every database.
pub struct S3Uploader {
    bucket: Box<Bucket>,
    prefix: Option<String>,
}

impl S3Uploader {
    /// Uses the default AWS credential chain.
    pub fn new(config: &S3Config) -> Result<Self> {
        let credentials =
            Credentials::default().map_err(|e| BackupError::Storage(e.to_string()))?;
        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(config: &S3Config, credentials: Credentials) -> Result<Self> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse::<Region>()
                .map_err(|e| BackupError::Storage(e.to_string()))?,
        };

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| BackupError::Storage(e.to_string()))?;
        if config.endpoint.is_some() {
            bucket = bucket.with_path_style();
        }

        debug!("S3 client ready for bucket {}", config.bucket);
        Ok(Self {
            bucket,
            prefix: config.prefix.clone(),
        })
    }

    pub fn key_for(&self, file_name: &str) -> String {
        object_key(self.prefix.as_deref(), file_name)
    }
}

#[async_trait]
impl BackupUploader for S3Uploader {
    async fn upload(&self, file_name: &str, file_path: &Path) -> Result<String> {
        let key = self.key_for(file_name);

        let mut content = Vec::new();
        {
            let mut file = File::open(file_path).await.map_err(BackupError::OpenFile)?;
            file.read_to_end(&mut content)
                .await
                .map_err(BackupError::OpenFile)?;
        }

        info!(
            "Uploading {} ({} bytes) to s3://{}/{}",
            file_name,
            content.len(),
            self.bucket.name(),
            key
        );

        // non-2xx replies come back as S3Error
        self.bucket.put_object(&key, &content).await?;

        Ok(key)
    }

    fn name(&self) -> &'static str {
        "S3"
    }
}
