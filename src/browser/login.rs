//! Dashboard login flow
//!
//! Fills the login form with the configured selectors and submits it.
//! The selectors are deliberately structural (first generic input,
//! input-type and button-type attributes): the dashboard exposes no
//! stable ids, so stable page structure is an accepted external
//! dependency, adjustable through configuration.

use tracing::{debug, info};

use crate::config::JobConfig;

use super::{BrowserError, BrowserSession};

/// Log in to the dashboard. Leaves the session authenticated and
/// positioned wherever the application redirects after login.
pub async fn login(session: &BrowserSession, config: &JobConfig) -> Result<(), BrowserError> {
    session.navigate(config.login_url.as_str()).await?;

    // The form is ready once the credential input is present
    session
        .wait_for_element(
            &config.email_selector,
            config.page_ready_timeout,
            config.poll_interval,
        )
        .await
        .map_err(|e| BrowserError::LoginFailed(format!("login form never appeared: {}", e)))?;

    info!("Entering login details");
    session
        .type_into(&config.email_selector, &config.login_email)
        .await?;
    session
        .type_into(&config.password_selector, &config.login_password)
        .await?;
    session.click(&config.submit_selector).await?;

    settle_after_submit(session, config).await;
    Ok(())
}

/// Wait for the post-login redirect, bounded by the settle period.
/// Some deployments render the dashboard in place without navigating,
/// so an unchanged URL is not an error.
async fn settle_after_submit(session: &BrowserSession, config: &JobConfig) {
    let deadline = tokio::time::Instant::now() + config.login_settle;

    loop {
        match session.current_url().await {
            Ok(url) if url.trim_end_matches('/') != config.login_url.as_str().trim_end_matches('/') => {
                info!("Login redirect landed on: {}", url);
                return;
            }
            Ok(_) => {}
            Err(e) => {
                debug!("URL probe during login settle failed: {}", e);
            }
        }

        if tokio::time::Instant::now() >= deadline {
            debug!("No post-login navigation within settle period, continuing");
            return;
        }

        tokio::time::sleep(config.poll_interval).await;
    }
}
