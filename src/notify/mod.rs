mod discord;

pub use discord::DiscordWebhook;

use crate::error::BackupError;
use async_trait::async_trait;

/// Reports the outcome of a backup. Delivery problems are logged by the
/// implementation and never returned to the caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str, error: Option<&BackupError>, file_name: &str);
}

/// `message`, or `message: error` when an error is attached.
pub fn compose_content(message: &str, error: Option<&BackupError>) -> String {
    match error {
        Some(err) => format!("{}: {}", message, err),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_content() {
        assert_eq!(
            compose_content("Backup successful for database: orders", None),
            "Backup successful for database: orders"
        );

        let err = BackupError::Dump("exit status: 1".to_string());
        assert_eq!(
            compose_content("Backup failed for database: users", Some(&err)),
            "Backup failed for database: users: failed to execute mysqldump: exit status: 1"
        );
    }
}
