use crate::config::{AppConfig, MysqlConfig};
use crate::error::{BackupError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Produces the full dump of one database as bytes.
#[async_trait]
pub trait Dumper: Send + Sync {
    async fn dump(&self, database: &str) -> Result<Vec<u8>>;
}

/// Runs the external `mysqldump` tool and buffers its stdout.
pub struct MysqlDump {
    program: PathBuf,
    mysql: MysqlConfig,
}

impl MysqlDump {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_program(config.mysqldump_path.clone(), &config.mysql)
    }

    pub fn with_program(program: impl Into<PathBuf>, mysql: &MysqlConfig) -> Self {
        Self {
            program: program.into(),
            mysql: mysql.clone(),
        }
    }

    fn command(&self, database: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-u")
            .arg(&self.mysql.username)
            .arg("-h")
            .arg(&self.mysql.host)
            .arg("-P")
            .arg(self.mysql.port.to_string())
            .arg(database)
            // keeps the password out of the process listing
            .env("MYSQL_PWD", &self.mysql.password)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Dumper for MysqlDump {
    async fn dump(&self, database: &str) -> Result<Vec<u8>> {
        debug!(
            "Running {} for {} on {}:{}",
            self.program.display(),
            database,
            self.mysql.host,
            self.mysql.port
        );

        let output = self
            .command(database)
            .output()
            .await
            .map_err(|e| BackupError::Dump(e.to_string()))?;

        if !output.status.success() {
            return Err(BackupError::Dump(output.status.to_string()));
        }

        debug!("Dump of {} produced {} bytes", database, output.stdout.len());
        Ok(output.stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn mysql() -> MysqlConfig {
        MysqlConfig {
            host: "db.internal".to_string(),
            port: 3307,
            username: "backup".to_string(),
            password: "s3cret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_dump_captures_stdout_and_passes_connection_args() {
        let dumper = MysqlDump::with_program("echo", &mysql());
        let bytes = dumper.dump("orders").await.unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "-u backup -h db.internal -P 3307 orders\n"
        );
    }

    #[tokio::test]
    async fn test_password_is_not_passed_as_argument() {
        let dumper = MysqlDump::with_program("echo", &mysql());
        let bytes = dumper.dump("orders").await.unwrap();
        assert!(!String::from_utf8_lossy(&bytes).contains("s3cret"));
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_a_dump_error() {
        let dumper = MysqlDump::with_program("false", &mysql());
        let err = dumper.dump("users").await.unwrap_err();

        assert!(matches!(err, BackupError::Dump(_)));
        assert!(err.to_string().starts_with("failed to execute mysqldump: exit status"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_dump_error() {
        let dumper = MysqlDump::with_program("/nonexistent/mysqldump", &mysql());
        assert!(matches!(dumper.dump("orders").await, Err(BackupError::Dump(_))));
    }
}
