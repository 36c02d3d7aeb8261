use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_MYSQLDUMP: &str = "mysqldump";

#[derive(Clone, PartialEq)]
pub struct MysqlConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for MysqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MysqlConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Key prefix; stored without trailing slashes.
    pub prefix: Option<String>,
    /// Custom endpoint for S3-compatible stores.
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscordConfig {
    pub webhook_url: String,
}

/// Everything a run needs, read once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub databases: Vec<String>,
    pub mysql: MysqlConfig,
    pub s3: S3Config,
    pub discord: DiscordConfig,
    pub mysqldump_path: PathBuf,
}
