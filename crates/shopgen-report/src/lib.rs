//! Customer order report over a loaded shopgen database.
//!
//! Joins all five tables for orders placed in the 90 days before the most
//! recent order, then renders the rows and summary statistics as text.

pub mod errors;
pub mod model;
pub mod query;
pub mod render;

pub use errors::ReportError;
pub use model::{CustomerOrderReport, ReportRow, ReportSummary};
pub use query::{
    REPORT_WINDOW_DAYS, build_report, cutoff_from, fetch_report_rows, fetch_summary,
    resolve_cutoff,
};
pub use render::render_report;
