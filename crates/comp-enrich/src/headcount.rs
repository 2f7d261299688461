//! Historical monthly headcount reconstruction.
//!
//! Rebuilds, for every month from the earliest start date through one
//! month past the latest current-employee start, the list of people
//! active at month end: current employees who had started by then,
//! plus exited employees whose last day fell after month end.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use comp_model::dates::parse_workbook_date;
use comp_model::{EmployeeRecord, ExitRecord};

/// Month-end tenure buckets used by the historical view. These are
/// finer at the short end than the active-comp buckets.
pub fn historical_tenure(days: i64) -> &'static str {
    if days <= 30 {
        "1-30 days"
    } else if days <= 90 {
        "1-3 months"
    } else if days <= 180 {
        "3-6 months"
    } else if days <= 365 {
        "6 months-1 year"
    } else if days <= 1825 {
        "1-5 years"
    } else {
        "5+ years"
    }
}

/// Employment status at the sampled month end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeadcountStatus {
    Active,
    LaterExited,
}

impl HeadcountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadcountStatus::Active => "Active",
            HeadcountStatus::LaterExited => "Active (Later Exited)",
        }
    }
}

/// One employee-month observation.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyHeadcountRow {
    pub employee_name: String,
    pub month_label: String,
    pub year: i32,
    pub month: u32,
    pub start_date: NaiveDate,
    pub tenure_days: i64,
    pub tenure_range: &'static str,
    pub department: Option<String>,
    pub org: Option<String>,
    pub manager: Option<String>,
    pub level_distinction: Option<String>,
    pub country: Option<String>,
    pub status: HeadcountStatus,
}

struct EmploymentWindow {
    name: String,
    start: NaiveDate,
    /// Exclusive-after bound: the person counts in a month when their
    /// last day falls after that month's end. `None` = still active.
    last: Option<NaiveDate>,
    department: Option<String>,
    org: Option<String>,
    manager: Option<String>,
    level_distinction: Option<String>,
    country: Option<String>,
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).map(|first| first.pred_opt().unwrap_or(first))
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

/// Build the month-by-month headcount. Rows come back sorted by year,
/// month, then employee name. Records with unparseable start dates are
/// skipped with a warning.
pub fn build_historical_headcount(
    employees: &[EmployeeRecord],
    exits: &[ExitRecord],
) -> Vec<MonthlyHeadcountRow> {
    let mut windows: Vec<EmploymentWindow> = Vec::new();
    let mut latest_current: Option<NaiveDate> = None;

    for employee in employees {
        let Some(start) = employee.start_date.as_deref().and_then(parse_workbook_date) else {
            warn!(employee = %employee.name, "unparseable start date, excluded from history");
            continue;
        };
        latest_current = Some(latest_current.map_or(start, |latest| latest.max(start)));
        windows.push(EmploymentWindow {
            name: employee.name.clone(),
            start,
            last: None,
            department: employee.department.clone(),
            org: employee.org.clone(),
            manager: employee.manager.clone(),
            level_distinction: employee.level_distinction.clone(),
            country: employee.country.clone(),
        });
    }
    for exit in exits {
        let Some(start) = exit.start_date.as_deref().and_then(parse_workbook_date) else {
            warn!(employee = %exit.name, "unparseable exit start date, excluded from history");
            continue;
        };
        let Some(last) = exit.last_date.as_deref().and_then(parse_workbook_date) else {
            warn!(employee = %exit.name, "unparseable last date, excluded from history");
            continue;
        };
        windows.push(EmploymentWindow {
            name: exit.name.clone(),
            start,
            last: Some(last),
            department: exit.department.clone(),
            org: exit.org.clone(),
            manager: exit.manager.clone(),
            level_distinction: exit.level_distinction.clone(),
            country: exit.country.clone(),
        });
    }

    let Some(earliest) = windows.iter().map(|window| window.start).min() else {
        return Vec::new();
    };
    // One month past the latest current hire, so their full first
    // month is covered.
    let latest = latest_current.unwrap_or(earliest);
    let (end_year, end_month) = next_month(latest.year(), latest.month());

    let mut rows = Vec::new();
    let (mut year, mut month) = (earliest.year(), earliest.month());
    loop {
        let Some(month_end) = last_day_of_month(year, month) else {
            break;
        };
        let month_label = format!("{} {year}", month_end.format("%B"));
        for window in &windows {
            if window.start > month_end {
                continue;
            }
            let status = match window.last {
                None => HeadcountStatus::Active,
                Some(last) if last > month_end => HeadcountStatus::LaterExited,
                Some(_) => continue,
            };
            let tenure_days = (month_end - window.start).num_days();
            rows.push(MonthlyHeadcountRow {
                employee_name: window.name.clone(),
                month_label: month_label.clone(),
                year,
                month,
                start_date: window.start,
                tenure_days,
                tenure_range: historical_tenure(tenure_days),
                department: window.department.clone(),
                org: window.org.clone(),
                manager: window.manager.clone(),
                level_distinction: window.level_distinction.clone(),
                country: window.country.clone(),
                status,
            });
        }
        if (year, month) == (end_year, end_month) {
            break;
        }
        (year, month) = next_month(year, month);
    }

    rows.sort_by(|a, b| {
        (a.year, a.month, a.employee_name.as_str()).cmp(&(b.year, b.month, b.employee_name.as_str()))
    });
    debug!(rows = rows.len(), "historical headcount built");
    rows
}

#[cfg(test)]
mod tests {
    use super::{build_historical_headcount, historical_tenure, HeadcountStatus};
    use comp_model::{EmployeeRecord, ExitRecord};

    fn employee(name: &str, start: &str) -> EmployeeRecord {
        EmployeeRecord {
            name: name.to_string(),
            start_date: Some(start.to_string()),
            ..EmployeeRecord::default()
        }
    }

    fn exit(name: &str, start: &str, last: &str) -> ExitRecord {
        ExitRecord {
            name: name.to_string(),
            start_date: Some(start.to_string()),
            last_date: Some(last.to_string()),
            ..ExitRecord::default()
        }
    }

    #[test]
    fn historical_bucket_boundaries() {
        assert_eq!(historical_tenure(30), "1-30 days");
        assert_eq!(historical_tenure(31), "1-3 months");
        assert_eq!(historical_tenure(90), "1-3 months");
        assert_eq!(historical_tenure(180), "3-6 months");
        assert_eq!(historical_tenure(365), "6 months-1 year");
        assert_eq!(historical_tenure(1825), "1-5 years");
        assert_eq!(historical_tenure(1826), "5+ years");
    }

    #[test]
    fn exited_employees_count_until_their_exit_month() {
        let employees = vec![employee("Alice Prieto", "2024-01-10")];
        // Evan leaves mid-March: present for January and February
        // month ends, absent from March onward.
        let exits = vec![exit("Evan Holt", "2024-01-05", "2024-03-15")];
        let rows = build_historical_headcount(&employees, &exits);

        let months_for = |name: &str| -> Vec<u32> {
            rows.iter()
                .filter(|row| row.employee_name == name)
                .map(|row| row.month)
                .collect()
        };
        // Coverage runs January through February (one month past the
        // latest current hire).
        assert_eq!(months_for("Alice Prieto"), vec![1, 2]);
        assert_eq!(months_for("Evan Holt"), vec![1, 2]);

        let evan_jan = rows
            .iter()
            .find(|row| row.employee_name == "Evan Holt" && row.month == 1)
            .unwrap();
        assert_eq!(evan_jan.status, HeadcountStatus::LaterExited);
        assert_eq!(evan_jan.tenure_days, 26);
        assert_eq!(evan_jan.tenure_range, "1-30 days");
    }

    #[test]
    fn rows_are_sorted_by_month_then_name() {
        let employees = vec![
            employee("Zoe Park", "2024-01-01"),
            employee("Ben Ito", "2024-02-10"),
        ];
        let rows = build_historical_headcount(&employees, &[]);
        assert!(!rows.is_empty());
        for pair in rows.windows(2) {
            let a = (&pair[0].year, &pair[0].month, &pair[0].employee_name);
            let b = (&pair[1].year, &pair[1].month, &pair[1].employee_name);
            assert!(a <= b);
        }
        // Ben only appears from February.
        assert!(
            rows.iter()
                .filter(|row| row.employee_name == "Ben Ito")
                .all(|row| row.month >= 2)
        );
    }

    #[test]
    fn empty_inputs_produce_no_rows() {
        assert!(build_historical_headcount(&[], &[]).is_empty());
    }
}
