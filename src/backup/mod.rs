pub mod artifact;
pub mod dump;
pub mod job;

pub use dump::MysqlDump;
pub use job::{report_fatal, BackupRunner};
