//! Tenure bucketing for active employees.

use chrono::NaiveDate;

use comp_model::TenureRange;
use comp_model::dates::parse_workbook_date;

/// Bucket a raw start-date field against a reference day.
///
/// Missing and unparseable dates land in distinct defect buckets;
/// everything else is bucketed by elapsed calendar days.
pub fn tenure_range(start_date: Option<&str>, today: NaiveDate) -> TenureRange {
    let Some(raw) = start_date else {
        return TenureRange::Unknown;
    };
    let Some(start) = parse_workbook_date(raw) else {
        return TenureRange::InvalidDate;
    };
    TenureRange::from_elapsed_days((today - start).num_days())
}
