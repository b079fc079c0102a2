//! Browser automation module
//!
//! Handles launching and controlling the headless Chrome instance that
//! drives the dashboard login and data-page harvest.

mod errors;
mod login;
mod session;

pub use errors::BrowserError;
pub use login::login;
pub use session::{BrowserSession, BrowserSessionConfig};
