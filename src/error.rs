use std::fmt;
use std::io;

#[derive(Debug)]
pub enum BackupError {
    Config(String),
    Storage(String),
    TempDir(io::Error),
    Dump(String),
    WriteFile(io::Error),
    OpenFile(io::Error),
    Upload(String),
    Notify(String),
}

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupError::Config(msg) => write!(f, "configuration error: {}", msg),
            BackupError::Storage(msg) => write!(f, "S3 client error: {}", msg),
            BackupError::TempDir(err) => write!(f, "failed to create temp directory: {}", err),
            BackupError::Dump(msg) => write!(f, "failed to execute mysqldump: {}", msg),
            BackupError::WriteFile(err) => write!(f, "failed to write backup file: {}", err),
            BackupError::OpenFile(err) => {
                write!(f, "failed to upload backup to S3: failed to open file: {}", err)
            }
            BackupError::Upload(msg) => write!(f, "failed to upload backup to S3: {}", msg),
            BackupError::Notify(msg) => write!(f, "failed to send Discord notification: {}", msg),
        }
    }
}

impl std::error::Error for BackupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackupError::TempDir(err) | BackupError::WriteFile(err) | BackupError::OpenFile(err) => {
                Some(err)
            }
            _ => None,
        }
    }
}

impl From<s3::error::S3Error> for BackupError {
    fn from(err: s3::error::S3Error) -> Self {
        BackupError::Upload(err.to_string())
    }
}

impl From<reqwest::Error> for BackupError {
    fn from(err: reqwest::Error) -> Self {
        BackupError::Notify(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BackupError>;
