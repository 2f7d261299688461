//! Workbook date parsing.
//!
//! The source workbook mixes ISO dates with US-style slash dates and
//! occasionally carries a time component. Everything downstream works
//! on `NaiveDate`.

use chrono::NaiveDate;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%Y/%m/%d"];

/// Parse a raw workbook date value. Returns `None` for blank or
/// unrecognized input; a trailing time component is ignored.
pub fn parse_workbook_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed.split_whitespace().next().unwrap_or(trimmed);
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Canonical ISO rendering used in every artifact.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
