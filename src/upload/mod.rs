mod bucket;
pub mod uploader;

pub use bucket::S3Uploader;
pub use uploader::BackupUploader;
