//! Pagination harvester
//!
//! Walks the dashboard's paginated listing: parse the rendered table,
//! accumulate its rows, advance through the next-page control until it
//! reports no further pages. Transient page-state problems (no table,
//! missing control, never-ready page) end the harvest gracefully; the
//! publisher still gets everything collected up to that point.

use tracing::{info, warn};

use crate::browser::{BrowserError, BrowserSession};
use crate::config::JobConfig;

use super::accumulator::TableAccumulator;
use super::table;

/// Marker class the dashboard's pager puts on an exhausted control
const DISABLED_CLASS: &str = "Mui-disabled";

/// Why harvesting stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestEnd {
    /// The next-page control reported a disabled state
    NextDisabled,
    /// The next-page control was absent or could not be driven
    NextMissing,
    /// The page rendered no parseable table
    NoTable,
    /// The page never presented its table within the readiness deadline
    NotReady,
    /// A page-state error interrupted the harvest
    PageError,
    /// The safety bound on pagination iterations was hit
    PageCap,
}

/// Result of a completed harvest sweep
#[derive(Debug)]
pub struct HarvestOutcome {
    pub accumulator: TableAccumulator,
    /// Pages visited (including the page that ended the sweep)
    pub pages: u32,
    pub end: HarvestEnd,
}

/// Harvest every page of the data listing.
///
/// Only the initial navigation can fail the run; once the listing is
/// open, every problem degrades to an end-of-data outcome.
pub async fn harvest_all(
    session: &BrowserSession,
    config: &JobConfig,
) -> Result<HarvestOutcome, BrowserError> {
    info!("Directing to data page: {}", config.data_url);
    session.navigate(config.data_url.as_str()).await?;

    let mut accumulator = TableAccumulator::new();
    let mut page_number: u32 = 1;

    // First page readiness: give the listing its initial render window
    if let Err(e) = session
        .wait_for_element("table", config.page_ready_timeout, config.poll_interval)
        .await
    {
        warn!("Data listing never presented a table: {}", e);
        return Ok(HarvestOutcome {
            accumulator,
            pages: page_number,
            end: HarvestEnd::NotReady,
        });
    }

    let end = loop {
        info!("Scraping page {}", page_number);

        let html = match session.page_source().await {
            Ok(html) => html,
            Err(e) => {
                warn!("Error reading page {}: {}", page_number, e);
                break HarvestEnd::PageError;
            }
        };

        match table::parse_first_table(&html) {
            Some(page) => {
                info!("Page {}: {} rows found", page_number, page.row_count());
                accumulator.push_page(page);
            }
            None => {
                info!("No table data on page {}", page_number);
                break HarvestEnd::NoTable;
            }
        }

        if page_number >= config.max_pages {
            warn!(
                "Page cap of {} reached; stopping harvest with {} rows collected",
                config.max_pages,
                accumulator.row_count()
            );
            break HarvestEnd::PageCap;
        }

        match next_control_state(session, &config.next_selector).await {
            NextControl::Disabled => {
                info!("Reached the last page, stopping");
                break HarvestEnd::NextDisabled;
            }
            NextControl::Missing => {
                info!("No next-page control found, stopping");
                break HarvestEnd::NextMissing;
            }
            NextControl::Enabled => {}
        }

        // Direct JS click: the pager sits below the fold and a native
        // click would fail its visibility checks
        if let Err(e) = session.click_element_js(&config.next_selector).await {
            warn!("Could not advance to page {}: {}", page_number + 1, e);
            break HarvestEnd::NextMissing;
        }

        // The old table stays in the DOM while the next page renders,
        // so presence alone is not enough: give the click a settle
        // period first, then hold the bounded readiness probe
        tokio::time::sleep(config.page_settle).await;
        if let Err(e) = session
            .wait_for_element("table", config.page_ready_timeout, config.poll_interval)
            .await
        {
            warn!("Page {} never became ready: {}", page_number + 1, e);
            break HarvestEnd::NotReady;
        }

        page_number += 1;
    };

    Ok(HarvestOutcome {
        accumulator,
        pages: page_number,
        end,
    })
}

enum NextControl {
    Enabled,
    Disabled,
    Missing,
}

/// Inspect the next-page control. Any failure to locate or read it is
/// treated the same as an absent control.
async fn next_control_state(session: &BrowserSession, selector: &str) -> NextControl {
    let class = match session.element_attribute(selector, "class").await {
        Ok(class) => class,
        Err(_) => return NextControl::Missing,
    };
    let disabled = session
        .element_attribute(selector, "disabled")
        .await
        .unwrap_or(None);
    let aria_disabled = session
        .element_attribute(selector, "aria-disabled")
        .await
        .unwrap_or(None);

    if next_control_is_disabled(class.as_deref(), disabled.as_deref(), aria_disabled.as_deref()) {
        NextControl::Disabled
    } else {
        NextControl::Enabled
    }
}

/// Disabled-state detection for the pager control: the framework's
/// disabled marker class, the native disabled attribute, or an
/// aria-disabled assertion.
fn next_control_is_disabled(
    class: Option<&str>,
    disabled: Option<&str>,
    aria_disabled: Option<&str>,
) -> bool {
    if class.map(|c| c.contains(DISABLED_CLASS)).unwrap_or(false) {
        return true;
    }
    if disabled.is_some() {
        return true;
    }
    aria_disabled.map(|v| v == "true").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_marker_class() {
        assert!(next_control_is_disabled(
            Some("MuiButtonBase-root Mui-disabled MuiPaginationItem-root"),
            None,
            None
        ));
    }

    #[test]
    fn test_disabled_by_native_attribute() {
        // A bare `disabled` attribute reads as an empty string
        assert!(next_control_is_disabled(Some("MuiButtonBase-root"), Some(""), None));
    }

    #[test]
    fn test_disabled_by_aria_state() {
        assert!(next_control_is_disabled(None, None, Some("true")));
    }

    #[test]
    fn test_aria_false_is_enabled() {
        assert!(!next_control_is_disabled(Some("MuiButtonBase-root"), None, Some("false")));
    }

    #[test]
    fn test_plain_control_is_enabled() {
        assert!(!next_control_is_disabled(Some("MuiButtonBase-root"), None, None));
        assert!(!next_control_is_disabled(None, None, None));
    }
}
