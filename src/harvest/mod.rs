//! Pagination harvest module
//!
//! Parses the rendered listing table page by page and accumulates the
//! rows the publisher uploads.

mod accumulator;
mod paginator;
mod table;

pub use accumulator::{CombinedTable, TableAccumulator};
pub use paginator::{harvest_all, HarvestEnd, HarvestOutcome};
pub use table::{parse_first_table, PageTable};
