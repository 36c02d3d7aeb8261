use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait BackupUploader: Send + Sync {
    /// Uploads the file at `file_path` and returns the object key it was stored under.
    async fn upload(&self, file_name: &str, file_path: &Path) -> Result<String>;
    fn name(&self) -> &'static str;
}

/// Destination key for `file_name`: `{prefix}/{file_name}`, or the bare
/// name when no prefix is set. Trailing slashes on the prefix are dropped.
pub fn object_key(prefix: Option<&str>, file_name: &str) -> String {
    match prefix.map(|p| p.trim_end_matches('/')) {
        Some(p) if !p.is_empty() => format!("{}/{}", p, file_name),
        _ => file_name.to_string(),
    }
}
