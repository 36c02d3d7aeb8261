mod backup;
mod config;
mod error;
mod log;
mod notify;
mod upload;

use backup::{report_fatal, BackupRunner, MysqlDump};
use notify::DiscordWebhook;
use tracing::{error, info, warn};
use upload::S3Uploader;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    log::init();

    info!("MySQL S3 backup starting...");

    let config = match config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let notifier = match DiscordWebhook::new(&config.discord) {
        Ok(n) => n,
        Err(e) => {
            error!("Failed to create webhook client: {}", e);
            std::process::exit(1);
        }
    };

    let uploader = match S3Uploader::new(&config.s3) {
        Ok(u) => u,
        Err(e) => {
            report_fatal(&notifier, "Failed to create S3 client", &e).await;
            std::process::exit(1);
        }
    };

    let dumper = MysqlDump::new(&config);
    let results = BackupRunner::new(&config, &dumper, &uploader, &notifier)
        .run_all()
        .await;

    for result in &results {
        match (&result.key, &result.error) {
            (Some(key), _) => info!(
                "  {} -> {} ({} bytes, {} sec)",
                result.database,
                key,
                result.file_size.unwrap_or(0),
                result.duration_secs
            ),
            (None, error) => warn!(
                "  {} ({}) failed: {}",
                result.database,
                result.file_name,
                error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    let failed = results.iter().filter(|r| !r.success).count();
    if failed > 0 {
        warn!(
            "Backup run finished: {} succeeded, {} failed",
            results.len() - failed,
            failed
        );
    } else {
        info!("Backup run finished: {} succeeded", results.len());
    }
}
