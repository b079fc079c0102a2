//! The sync job
//!
//! Runs the four phases in order: spreadsheet connect, dashboard login,
//! pagination harvest, publish. Each phase returns a typed result and
//! the runner decides what a failure aborts; the browser session is
//! torn down on every path once it exists.

use tracing::{info, warn};

use crate::browser::{self, BrowserError, BrowserSession, BrowserSessionConfig};
use crate::config::{ConfigError, JobConfig};
use crate::harvest::{self, HarvestEnd};
use crate::sheets::{SheetsClient, SheetsError};

/// Run-level errors
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Spreadsheet error: {0}")]
    Sheets(#[from] SheetsError),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),
}

/// What a completed run did
#[derive(Debug)]
pub struct RunSummary {
    /// Pages visited during the harvest
    pub pages: u32,
    /// Data rows written to the worksheet (0 = nothing published)
    pub rows_uploaded: usize,
    /// Why harvesting ended
    pub end: HarvestEnd,
}

/// Execute one full sync run.
pub async fn run(config: &JobConfig) -> Result<RunSummary, RunError> {
    info!("Step 1: Connecting to Google Sheets");
    let sheets = SheetsClient::connect(&config.credentials_file).await?;
    let worksheet = sheets.open_first_worksheet(&config.sheet_name).await?;

    info!("Step 2: Opening the dashboard (headless: {})", config.headless);
    let session_config = BrowserSessionConfig::for_run()
        .headless(config.headless)
        .chrome_path(config.chrome_path.clone());
    let session = BrowserSession::launch(session_config).await?;

    let harvested = drive_dashboard(&session, config).await;

    // Teardown happens before the outcome is inspected so no failure
    // path can leak the Chrome process
    if let Err(e) = session.close().await {
        warn!("Browser teardown reported: {}", e);
    }

    let outcome = harvested?;
    info!(
        "Harvest finished after {} page(s): {:?}, {} rows collected",
        outcome.pages,
        outcome.end,
        outcome.accumulator.row_count()
    );

    let pages = outcome.pages;
    let end = outcome.end;

    match outcome.accumulator.into_combined() {
        Some(table) => {
            info!("Step 4: Writing all data into the spreadsheet");
            let total = table.row_count();
            worksheet.clear().await?;
            worksheet.update(table.into_values()).await?;
            info!("Success! Total {} rows are uploaded.", total);
            Ok(RunSummary {
                pages,
                rows_uploaded: total,
                end,
            })
        }
        None => {
            // Zero rows harvested: no clear, no write
            info!("No data found; worksheet left untouched");
            Ok(RunSummary {
                pages,
                rows_uploaded: 0,
                end,
            })
        }
    }
}

/// Phases 2b and 3: authenticate the session, then walk the listing.
async fn drive_dashboard(
    session: &BrowserSession,
    config: &JobConfig,
) -> Result<harvest::HarvestOutcome, BrowserError> {
    browser::login(session, config).await?;
    harvest::harvest_all(session, config).await
}
