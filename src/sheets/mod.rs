//! Spreadsheet service module
//!
//! Service-account authentication and the Drive/Sheets REST calls the
//! publisher needs: open by title, clear, bulk write from the origin.

mod auth;
mod client;
mod types;

pub use client::{SheetsClient, Worksheet};
pub use types::{ServiceAccountKey, SheetsError};
