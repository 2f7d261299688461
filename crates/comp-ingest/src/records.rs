//! Typed readers for the flat workbook sheets.
//!
//! Each reader resolves its columns by header name, tolerating the
//! workbook's long descriptive headers via fragment matching, and
//! produces the record types consumed by the enrichment stage. Only
//! the candidate date is parsed eagerly; employee and exit dates stay
//! raw so tenure bucketing can tell "missing" from "unparseable".

use anyhow::{Context, Result, bail};
use tracing::debug;

use comp_model::dates::parse_workbook_date;
use comp_model::{CandidateRecord, EmployeeRecord, ExitRecord, GeoFactorEntry};

use crate::sheet::Workbook;
use crate::table::RecordTable;

pub const CANDIDATE_SHEET: &str = "Candidate Comp Data";
pub const GEO_SHEET: &str = "GeoFactors";
pub const PAYBAND_SHEET: &str = "Paybands";
pub const HEADCOUNT_SHEET: &str = "Current Headcount";
pub const EXITS_SHEET: &str = "Exits";

/// Parse a money-ish field: strips `$`, commas, and whitespace.
fn parse_money(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !matches!(ch, '$' | ',' | ' '))
        .collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn read_candidates(workbook: &Workbook) -> Result<Vec<CandidateRecord>> {
    let grid = workbook
        .read_sheet(CANDIDATE_SHEET)
        .context("load candidate sheet")?;
    let table = RecordTable::from_grid(&grid);

    let name_col = table.column_containing("candidate name");
    if name_col.is_none() {
        bail!("candidate sheet has no 'Candidate Name' column");
    }
    let date_col = table.column("Date");
    let location_col = table.column("Location");
    let role_type_col = table.column_containing("tech/non-tech");
    let high_potential_col = table.column_containing("high potential");
    let comp_type_col = table.column("Comp Type");
    let current_level_col = table.column("Current Level");
    let target_level_col = table.column("Target Level");
    let pay_band_col = table.column_containing("final pay band");
    let base_comp_col = table.column_containing("base comp");
    let geo_factor_col = table.column("Geo Factor");
    let target_cash_col = table.column_containing("target cash");

    let mut records = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let Some(name) = table.value_owned(row, name_col) else {
            continue;
        };
        records.push(CandidateRecord {
            name,
            candidate_number: None,
            date: table
                .value(row, date_col)
                .and_then(parse_workbook_date),
            location: table.value_owned(row, location_col),
            role_type: table.value_owned(row, role_type_col),
            high_potential: table.value_owned(row, high_potential_col),
            comp_type: table.value_owned(row, comp_type_col),
            current_level: table.value_owned(row, current_level_col),
            target_level: table.value_owned(row, target_level_col),
            pay_band: table.value_owned(row, pay_band_col),
            base_comp: table.value_owned(row, base_comp_col),
            geo_factor: table
                .value(row, geo_factor_col)
                .and_then(|raw| raw.parse::<f64>().ok()),
            target_cash: table.value(row, target_cash_col).and_then(parse_money),
            target_level_cash: None,
            comp_delta: None,
        });
    }
    debug!(candidates = records.len(), "candidate sheet read");
    Ok(records)
}

pub fn read_geo_entries(workbook: &Workbook) -> Result<Vec<GeoFactorEntry>> {
    let grid = workbook
        .read_sheet(GEO_SHEET)
        .context("load geo factor sheet")?;
    let table = RecordTable::from_grid(&grid);

    let country_col = table.column("Country");
    if country_col.is_none() {
        bail!("geo factor sheet has no 'Country' column");
    }
    let tech_col = table.column_containing("for tech roles");
    let non_tech_col = table.column_containing("for non-tech roles");
    if tech_col.is_none() || non_tech_col.is_none() {
        bail!("geo factor sheet is missing a tech or non-tech factor column");
    }
    let region_col = table.column_containing("us or non us");

    let mut entries = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let Some(country) = table.value_owned(row, country_col) else {
            continue;
        };
        let tech_factor = table
            .value(row, tech_col)
            .and_then(|raw| raw.parse::<f64>().ok());
        let non_tech_factor = table
            .value(row, non_tech_col)
            .and_then(|raw| raw.parse::<f64>().ok());
        let (Some(tech_factor), Some(non_tech_factor)) = (tech_factor, non_tech_factor) else {
            debug!(%country, "geo row skipped: non-numeric factor");
            continue;
        };
        entries.push(GeoFactorEntry {
            country,
            tech_factor,
            non_tech_factor,
            region_flag: table
                .value_owned(row, region_col)
                .unwrap_or_else(|| "Unknown".to_string()),
        });
    }
    debug!(countries = entries.len(), "geo factor sheet read");
    Ok(entries)
}

pub fn read_employees(workbook: &Workbook) -> Result<Vec<EmployeeRecord>> {
    let grid = workbook
        .read_sheet(HEADCOUNT_SHEET)
        .context("load current headcount sheet")?;
    let table = RecordTable::from_grid(&grid);

    let name_col = table.column_containing("employee name");
    if name_col.is_none() {
        bail!("headcount sheet has no 'Employee Name' column");
    }
    let columns = EmployeeColumns::resolve(&table);
    let base_comp_col = table.column_containing("base annual compensation");
    let equity_col = table.column_containing("equity");
    let perf_col = table.column_containing("perf score");
    let pay_band_col = table.column_containing("payband");

    let mut records = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let Some(name) = table.value_owned(row, name_col) else {
            continue;
        };
        records.push(EmployeeRecord {
            name,
            department: table.value_owned(row, columns.department),
            org: table.value_owned(row, columns.org),
            manager: table.value_owned(row, columns.manager),
            country: table.value_owned(row, columns.country),
            start_date: table.value_owned(row, columns.start_date),
            level_distinction: table.value_owned(row, columns.level_distinction),
            pay_band: table.value_owned(row, pay_band_col),
            base_comp: table.value(row, base_comp_col).and_then(parse_money),
            equity_value: table.value(row, equity_col).and_then(parse_money),
            perf_score: table.value_owned(row, perf_col),
        });
    }
    debug!(employees = records.len(), "headcount sheet read");
    Ok(records)
}

pub fn read_exits(workbook: &Workbook) -> Result<Vec<ExitRecord>> {
    let grid = workbook.read_sheet(EXITS_SHEET).context("load exits sheet")?;
    let table = RecordTable::from_grid(&grid);

    let name_col = table.column_containing("employee name");
    if name_col.is_none() {
        bail!("exits sheet has no 'Employee Name' column");
    }
    let columns = EmployeeColumns::resolve(&table);
    let last_date_col = table.column_containing("last date");

    let mut records = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let Some(name) = table.value_owned(row, name_col) else {
            continue;
        };
        records.push(ExitRecord {
            name,
            department: table.value_owned(row, columns.department),
            org: table.value_owned(row, columns.org),
            manager: table.value_owned(row, columns.manager),
            country: table.value_owned(row, columns.country),
            level_distinction: table.value_owned(row, columns.level_distinction),
            start_date: table.value_owned(row, columns.start_date),
            last_date: table.value_owned(row, last_date_col),
        });
    }
    debug!(exits = records.len(), "exits sheet read");
    Ok(records)
}

/// Columns shared by the headcount and exits sheets.
struct EmployeeColumns {
    department: Option<usize>,
    org: Option<usize>,
    manager: Option<usize>,
    country: Option<usize>,
    start_date: Option<usize>,
    level_distinction: Option<usize>,
}

impl EmployeeColumns {
    fn resolve(table: &RecordTable) -> Self {
        Self {
            department: table.column("Department"),
            org: table.column("Org"),
            manager: table.column("Manager"),
            country: table.column("Country"),
            start_date: table.column_containing("start date"),
            level_distinction: table.column_containing("level distinction"),
        }
    }
}
