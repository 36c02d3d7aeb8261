mod types;

pub use types::*;

use crate::error::{BackupError, Result};
use std::path::PathBuf;
use tracing::debug;

pub const ENV_DATABASES: &str = "DATABASES";
pub const ENV_S3_BUCKET: &str = "S3_BUCKET";
pub const ENV_S3_REGION: &str = "S3_REGION";
pub const ENV_S3_PREFIX: &str = "S3_PREFIX";
pub const ENV_S3_ENDPOINT: &str = "S3_ENDPOINT";
pub const ENV_DISCORD_URL: &str = "DISCORD_URL";
pub const ENV_MYSQL_USER: &str = "MYSQL_USER";
pub const ENV_MYSQL_PASSWORD: &str = "MYSQL_PASSWORD";
pub const ENV_MYSQL_HOST: &str = "MYSQL_HOST";
pub const ENV_MYSQL_PORT: &str = "MYSQL_PORT";
pub const ENV_MYSQLDUMP_PATH: &str = "MYSQLDUMP_PATH";

pub const REQUIRED_VARS: [&str; 8] = [
    ENV_DATABASES,
    ENV_S3_BUCKET,
    ENV_S3_REGION,
    ENV_DISCORD_URL,
    ENV_MYSQL_USER,
    ENV_MYSQL_PASSWORD,
    ENV_MYSQL_HOST,
    ENV_MYSQL_PORT,
];

pub fn load() -> Result<AppConfig> {
    load_from(|name| std::env::var(name).ok())
}

/// Builds the configuration from `lookup`. Every missing or invalid
/// variable is collected so the diagnostic lists them all at once.
pub fn load_from<F>(lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let missing: Vec<&str> = REQUIRED_VARS
        .iter()
        .copied()
        .filter(|name| get(*name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(BackupError::Config(format!(
            "missing required environment variables: {}",
            missing.join(", ")
        )));
    }

    let required = |name: &str| get(name).unwrap_or_default();
    let mut invalid = Vec::new();

    let databases = parse_databases(&required(ENV_DATABASES));
    if databases.is_empty() {
        invalid.push(format!("{} contains no database names", ENV_DATABASES));
    }

    let port = required(ENV_MYSQL_PORT);
    let port = match port.parse::<u16>() {
        Ok(p) => p,
        Err(_) => {
            invalid.push(format!("{} is not a valid port: {}", ENV_MYSQL_PORT, port));
            0
        }
    };

    let webhook_url = required(ENV_DISCORD_URL);
    if reqwest::Url::parse(&webhook_url).is_err() {
        invalid.push(format!("{} is not a valid URL", ENV_DISCORD_URL));
    }

    if !invalid.is_empty() {
        return Err(BackupError::Config(invalid.join("; ")));
    }

    let prefix = get(ENV_S3_PREFIX)
        .map(|p| p.trim_end_matches('/').to_string())
        .filter(|p| !p.is_empty());

    let config = AppConfig {
        databases,
        mysql: MysqlConfig {
            host: required(ENV_MYSQL_HOST),
            port,
            username: required(ENV_MYSQL_USER),
            password: required(ENV_MYSQL_PASSWORD),
        },
        s3: S3Config {
            bucket: required(ENV_S3_BUCKET),
            region: required(ENV_S3_REGION),
            prefix,
            endpoint: get(ENV_S3_ENDPOINT),
        },
        discord: DiscordConfig { webhook_url },
        mysqldump_path: get(ENV_MYSQLDUMP_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MYSQLDUMP)),
    };

    debug!(
        "Loaded configuration for {} database(s): {:?}",
        config.databases.len(),
        config.databases
    );
    Ok(config)
}

fn parse_databases(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
