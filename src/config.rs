//! Job configuration
//!
//! Everything the run needs comes from the process environment: the two
//! required dashboard credentials plus optional overrides for URLs,
//! selectors and timing. Selectors are configuration so operators can
//! follow dashboard markup changes without a rebuild.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Required environment variables
pub const ENV_LOGIN_EMAIL: &str = "LOGIN_EMAIL";
pub const ENV_LOGIN_PASSWORD: &str = "LOGIN_PASSWORD";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid URL in {var}: {message}")]
    InvalidUrl { var: &'static str, message: String },

    #[error("Invalid value in {var}: {message}")]
    InvalidValue { var: &'static str, message: String },
}

/// Full configuration for one sync run
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Dashboard login email
    pub login_email: String,
    /// Dashboard login password
    pub login_password: String,

    /// Login page URL
    pub login_url: Url,
    /// Paginated data listing URL
    pub data_url: Url,

    /// Destination spreadsheet title
    pub sheet_name: String,
    /// Service-account key file path
    pub credentials_file: String,

    /// CSS selector for the email field (first generic input by default)
    pub email_selector: String,
    /// CSS selector for the password field
    pub password_selector: String,
    /// CSS selector for the submit control
    pub submit_selector: String,
    /// CSS selector for the next-page control (accessible label)
    pub next_selector: String,

    /// Deadline for a page to present its table after navigation/click
    pub page_ready_timeout: Duration,
    /// Interval between readiness probes
    pub poll_interval: Duration,
    /// Settle period after submitting the login form
    pub login_settle: Duration,
    /// Settle period after clicking the next-page control, before the
    /// readiness probe (the old table stays in the DOM while the next
    /// page renders)
    pub page_settle: Duration,

    /// Safety bound on pagination iterations
    pub max_pages: u32,

    /// Run Chrome headless
    pub headless: bool,
    /// Explicit Chrome executable path (auto-detected when unset)
    pub chrome_path: Option<String>,
}

impl JobConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an injected variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let login_email = var(ENV_LOGIN_EMAIL)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar(ENV_LOGIN_EMAIL))?;
        let login_password = var(ENV_LOGIN_PASSWORD)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar(ENV_LOGIN_PASSWORD))?;

        let login_url = parse_url(
            "CPMS_LOGIN_URL",
            var("CPMS_LOGIN_URL").unwrap_or_else(|| "https://cpms.plugtrail.in/login".to_string()),
        )?;
        let data_url = parse_url(
            "CPMS_DATA_URL",
            var("CPMS_DATA_URL").unwrap_or_else(|| "https://cpms.plugtrail.in/users".to_string()),
        )?;

        let page_ready_timeout = Duration::from_secs(parse_num(
            "CPMS_PAGE_TIMEOUT_SECS",
            var("CPMS_PAGE_TIMEOUT_SECS"),
            15,
        )?);
        let poll_interval = Duration::from_millis(parse_num(
            "CPMS_POLL_INTERVAL_MS",
            var("CPMS_POLL_INTERVAL_MS"),
            250,
        )?);
        let login_settle = Duration::from_secs(parse_num(
            "CPMS_LOGIN_SETTLE_SECS",
            var("CPMS_LOGIN_SETTLE_SECS"),
            5,
        )?);
        let page_settle = Duration::from_millis(parse_num(
            "CPMS_PAGE_SETTLE_MS",
            var("CPMS_PAGE_SETTLE_MS"),
            2000,
        )?);
        let max_pages = parse_num("CPMS_MAX_PAGES", var("CPMS_MAX_PAGES"), 1000)?;

        // Headless unless explicitly disabled (the job targets display-less hosts)
        let headless = var("CPMS_HEADLESS")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Ok(Self {
            login_email,
            login_password,
            login_url,
            data_url,
            sheet_name: var("CPMS_SHEET_NAME").unwrap_or_else(|| "Customer_Data".to_string()),
            credentials_file: var("CPMS_CREDENTIALS_FILE")
                .unwrap_or_else(|| "credentials.json".to_string()),
            email_selector: var("CPMS_EMAIL_SELECTOR").unwrap_or_else(|| "input".to_string()),
            password_selector: var("CPMS_PASSWORD_SELECTOR")
                .unwrap_or_else(|| "input[type='password']".to_string()),
            submit_selector: var("CPMS_SUBMIT_SELECTOR")
                .unwrap_or_else(|| "button[type='submit']".to_string()),
            next_selector: var("CPMS_NEXT_SELECTOR")
                .unwrap_or_else(|| "button[aria-label='Go to next page']".to_string()),
            page_ready_timeout,
            poll_interval,
            login_settle,
            page_settle,
            max_pages,
            headless,
            chrome_path: var("CPMS_CHROME_PATH").filter(|v| !v.is_empty()),
        })
    }
}

fn parse_url(var: &'static str, value: String) -> Result<Url, ConfigError> {
    Url::parse(&value).map_err(|e| ConfigError::InvalidUrl {
        var,
        message: e.to_string(),
    })
}

fn parse_num<T: std::str::FromStr>(
    var: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            var,
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_email_is_fatal() {
        let map = vars(&[(ENV_LOGIN_PASSWORD, "secret")]);
        let err = JobConfig::from_vars(|k| map.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ENV_LOGIN_EMAIL)));
    }

    #[test]
    fn test_missing_password_is_fatal() {
        let map = vars(&[(ENV_LOGIN_EMAIL, "ops@example.com")]);
        let err = JobConfig::from_vars(|k| map.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ENV_LOGIN_PASSWORD)));
    }

    #[test]
    fn test_empty_credential_treated_as_missing() {
        let map = vars(&[(ENV_LOGIN_EMAIL, ""), (ENV_LOGIN_PASSWORD, "secret")]);
        let err = JobConfig::from_vars(|k| map.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ENV_LOGIN_EMAIL)));
    }

    #[test]
    fn test_defaults() {
        let map = vars(&[
            (ENV_LOGIN_EMAIL, "ops@example.com"),
            (ENV_LOGIN_PASSWORD, "secret"),
        ]);
        let config = JobConfig::from_vars(|k| map.get(k).cloned()).unwrap();

        assert_eq!(config.sheet_name, "Customer_Data");
        assert_eq!(config.credentials_file, "credentials.json");
        assert_eq!(config.login_url.as_str(), "https://cpms.plugtrail.in/login");
        assert_eq!(config.next_selector, "button[aria-label='Go to next page']");
        assert_eq!(config.max_pages, 1000);
        assert!(config.headless);
    }

    #[test]
    fn test_overrides() {
        let map = vars(&[
            (ENV_LOGIN_EMAIL, "ops@example.com"),
            (ENV_LOGIN_PASSWORD, "secret"),
            ("CPMS_SHEET_NAME", "Staging_Customers"),
            ("CPMS_MAX_PAGES", "25"),
            ("CPMS_HEADLESS", "false"),
            ("CPMS_PAGE_TIMEOUT_SECS", "30"),
        ]);
        let config = JobConfig::from_vars(|k| map.get(k).cloned()).unwrap();

        assert_eq!(config.sheet_name, "Staging_Customers");
        assert_eq!(config.max_pages, 25);
        assert!(!config.headless);
        assert_eq!(config.page_ready_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let map = vars(&[
            (ENV_LOGIN_EMAIL, "ops@example.com"),
            (ENV_LOGIN_PASSWORD, "secret"),
            ("CPMS_LOGIN_URL", "not a url"),
        ]);
        let err = JobConfig::from_vars(|k| map.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { var: "CPMS_LOGIN_URL", .. }));
    }
}
