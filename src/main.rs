//! cpms-sync entry point
//!
//! One invocation = one full sweep of the dashboard into the
//! spreadsheet. All failures are logged and swallowed: operators key
//! off the log output, and the invoking CI host treats any completed
//! process as done.

use tracing::{error, info};

use cpms_sync::config::JobConfig;

#[tokio::main]
async fn main() {
    let _guard = cpms_sync::init_logging();

    info!("Starting cpms-sync");
    if let Some(dir) = cpms_sync::log_dir() {
        info!("Log files saved to: {}", dir.display());
    }

    // Credential presence is checked before anything talks to the
    // network or launches a browser
    let config = match JobConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    match cpms_sync::job::run(&config).await {
        Ok(summary) => {
            info!(
                "Sync complete: {} row(s) across {} page(s)",
                summary.rows_uploaded, summary.pages
            );
        }
        Err(e) => {
            error!("Sync failed: {}", e);
        }
    }
}
