//! Report rendering for the compensation pipeline.

mod cleaning;
mod stats;

pub use cleaning::{CleaningReportInputs, render_cleaning_report};
pub use stats::{Summary, format_money};
