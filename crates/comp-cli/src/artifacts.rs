//! CSV and text artifact writers.
//!
//! Every tabular artifact goes through the `csv` crate; the payband
//! table also reads back in so the clean stage can run standalone
//! against a previously extracted table.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::info;

use comp_enrich::{ActiveCompRecord, MonthlyHeadcountRow};
use comp_model::dates::format_iso_date;
use comp_model::{CandidateRecord, GeoFactorTable, PaybandRecord, Seniority};

pub const PAYBAND_TABLE_FILE: &str = "payband_table.csv";
pub const GEO_FACTORS_FILE: &str = "geo_factors.csv";
pub const CANDIDATES_RAW_FILE: &str = "candidate_data.csv";
pub const CANDIDATES_COMPLETE_FILE: &str = "candidates_complete.csv";
pub const CANDIDATES_INCOMPLETE_FILE: &str = "candidates_incomplete.csv";
pub const CLEANING_REPORT_FILE: &str = "cleaning_report.txt";
pub const ACTIVE_COMPENSATION_FILE: &str = "active_compensation.csv";
pub const HISTORICAL_HEADCOUNT_FILE: &str = "historical_headcount.csv";
pub const RUN_SUMMARY_FILE: &str = "run_summary.json";

/// Wire row of the payband table artifact. `comp_id` is assigned
/// 1-based in emission order at write time.
#[derive(Debug, Serialize, Deserialize)]
struct PaybandRow {
    comp_id: usize,
    role_category: String,
    level_id: u32,
    level_code: String,
    seniority_id: u8,
    seniority_name: String,
    cash_base: i64,
    equity_value: i64,
    equity_units: i64,
    annual_total: i64,
}

pub fn write_payband_table(path: &Path, records: &[PaybandRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create payband artifact: {}", path.display()))?;
    for (index, record) in records.iter().enumerate() {
        writer
            .serialize(PaybandRow {
                comp_id: index + 1,
                role_category: record.role_category.clone(),
                level_id: record.level_id,
                level_code: record.level_code.clone(),
                seniority_id: record.seniority.id(),
                seniority_name: record.seniority.to_string(),
                cash_base: record.cash_base,
                equity_value: record.equity_value,
                equity_units: record.equity_units,
                annual_total: record.annual_total,
            })
            .context("write payband row")?;
    }
    writer.flush().context("flush payband artifact")?;
    info!(records = records.len(), path = %path.display(), "payband table written");
    Ok(())
}

/// Read a previously written payband table. Missing file is fatal:
/// the clean stage cannot run without it.
pub fn read_payband_table(path: &Path) -> Result<Vec<PaybandRecord>> {
    if !path.is_file() {
        bail!(
            "payband table not found: {} (run the extract stage first)",
            path.display()
        );
    }
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open payband artifact: {}", path.display()))?;
    let mut records = Vec::new();
    for row in reader.deserialize::<PaybandRow>() {
        let row = row.context("read payband row")?;
        let seniority = row.seniority_name.parse::<Seniority>()?;
        records.push(PaybandRecord {
            role_category: row.role_category,
            level_id: row.level_id,
            level_code: row.level_code,
            seniority,
            cash_base: row.cash_base,
            equity_value: row.equity_value,
            equity_units: row.equity_units,
            annual_total: row.annual_total,
        });
    }
    Ok(records)
}

pub fn write_geo_factors(path: &Path, table: &GeoFactorTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create geo artifact: {}", path.display()))?;
    writer
        .write_record([
            "Country",
            "Geo Factor for non-tech roles",
            "Geo Factor for tech roles",
            "Us or Non US",
        ])
        .context("write geo header")?;
    // Real countries in source order, then the synthesized average row.
    for entry in table.entries().iter().chain([table.unknown()]) {
        writer
            .write_record([
                entry.country.as_str(),
                &entry.non_tech_factor.to_string(),
                &entry.tech_factor.to_string(),
                entry.region_flag.as_str(),
            ])
            .context("write geo row")?;
    }
    writer.flush().context("flush geo artifact")?;
    info!(countries = table.len(), path = %path.display(), "geo factors written");
    Ok(())
}

pub fn write_candidates(path: &Path, records: &[CandidateRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create candidate artifact: {}", path.display()))?;
    writer
        .write_record([
            "Candidate Name",
            "Candidate Number",
            "Date",
            "Location",
            "Role Type",
            "High Potential?",
            "Comp Type",
            "Current Level",
            "Target Level",
            "Final Pay Band",
            "Base Comp",
            "Geo Factor",
            "Target Cash",
            "Target Level Cash",
            "Compensation Delta",
        ])
        .context("write candidate header")?;
    for record in records {
        writer
            .write_record([
                record.name.clone(),
                opt_display(record.candidate_number),
                record.date.map(format_iso_date).unwrap_or_default(),
                record.location.clone().unwrap_or_default(),
                record.role_type.clone().unwrap_or_default(),
                record.high_potential.clone().unwrap_or_default(),
                record.comp_type.clone().unwrap_or_default(),
                record.current_level.clone().unwrap_or_default(),
                record.target_level.clone().unwrap_or_default(),
                record.pay_band.clone().unwrap_or_default(),
                record.base_comp.clone().unwrap_or_default(),
                opt_display(record.geo_factor),
                opt_money(record.target_cash),
                opt_money(record.target_level_cash),
                opt_money(record.comp_delta),
            ])
            .context("write candidate row")?;
    }
    writer.flush().context("flush candidate artifact")?;
    info!(records = records.len(), path = %path.display(), "candidate records written");
    Ok(())
}

pub fn write_active_compensation(path: &Path, records: &[ActiveCompRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create active comp artifact: {}", path.display()))?;
    writer
        .write_record([
            "Employee Name",
            "Department",
            "Org",
            "Country",
            "Start Date",
            "Tenure Range",
            "Level Distinction",
            "Parsed Level Code",
            "Parsed Seniority",
            "Matched Seniority",
            "Payband",
            "Tech Classification",
            "Current Base Comp",
            "Current Equity Value",
            "Raw Band Cash",
            "Raw Band Equity",
            "Geo Factor",
            "Target Base Comp",
            "Target Equity Value",
            "Perf Score",
            "Match Status",
        ])
        .context("write active comp header")?;
    for record in records {
        writer
            .write_record([
                record.employee_name.clone(),
                record.department.clone().unwrap_or_default(),
                record.org.clone().unwrap_or_default(),
                record.country.clone().unwrap_or_default(),
                record.start_date.clone().unwrap_or_default(),
                record.tenure_range.to_string(),
                record.level_distinction.clone().unwrap_or_default(),
                record.parsed_level_code.clone().unwrap_or_default(),
                opt_seniority(record.parsed_seniority),
                opt_seniority(record.matched_seniority),
                record.pay_band.clone().unwrap_or_default(),
                record
                    .tech_classification
                    .map(|role| role.to_string())
                    .unwrap_or_default(),
                opt_money(record.current_base_comp),
                opt_money(record.current_equity_value),
                opt_display(record.raw_band_cash),
                opt_display(record.raw_band_equity),
                record.geo_factor.to_string(),
                opt_money(record.target_base_comp),
                opt_money(record.target_equity_value),
                record.perf_score.clone().unwrap_or_default(),
                if record.matched { "Matched" } else { "No Match" }.to_string(),
            ])
            .context("write active comp row")?;
    }
    writer.flush().context("flush active comp artifact")?;
    info!(records = records.len(), path = %path.display(), "active compensation written");
    Ok(())
}

pub fn write_historical_headcount(path: &Path, rows: &[MonthlyHeadcountRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create headcount artifact: {}", path.display()))?;
    writer
        .write_record([
            "Employee Name",
            "Month",
            "Year",
            "Month Number",
            "Start Date",
            "Tenure Days",
            "Tenure Range",
            "Department",
            "Org",
            "Manager",
            "Level Distinction",
            "Country",
            "Status",
        ])
        .context("write headcount header")?;
    for row in rows {
        writer
            .write_record([
                row.employee_name.clone(),
                row.month_label.clone(),
                row.year.to_string(),
                row.month.to_string(),
                format_iso_date(row.start_date),
                row.tenure_days.to_string(),
                row.tenure_range.to_string(),
                row.department.clone().unwrap_or_default(),
                row.org.clone().unwrap_or_default(),
                row.manager.clone().unwrap_or_default(),
                row.level_distinction.clone().unwrap_or_default(),
                row.country.clone().unwrap_or_default(),
                row.status.as_str().to_string(),
            ])
            .context("write headcount row")?;
    }
    writer.flush().context("flush headcount artifact")?;
    info!(rows = rows.len(), path = %path.display(), "historical headcount written");
    Ok(())
}

pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "report written");
    Ok(())
}

fn opt_display<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|inner| inner.to_string()).unwrap_or_default()
}

fn opt_money(value: Option<f64>) -> String {
    value.map(|inner| format!("{inner:.2}")).unwrap_or_default()
}

fn opt_seniority(value: Option<Seniority>) -> String {
    value.map(|tier| tier.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{read_payband_table, write_payband_table};
    use comp_model::{PaybandRecord, Seniority};
    use tempfile::TempDir;

    fn record(seniority: Seniority, cash: i64) -> PaybandRecord {
        PaybandRecord {
            role_category: "Engineering".to_string(),
            level_id: 4,
            level_code: "L4".to_string(),
            seniority,
            cash_base: cash,
            equity_value: 10,
            equity_units: 5,
            annual_total: cash,
        }
    }

    #[test]
    fn payband_round_trip_preserves_order_and_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("payband_table.csv");
        let records = vec![
            record(Seniority::Early, 90_000),
            record(Seniority::Seasoned, 120_000),
        ];
        write_payband_table(&path, &records).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("comp_id,"));
        assert!(lines.next().unwrap().starts_with("1,Engineering,4,L4,1,Early"));
        assert!(lines.next().unwrap().starts_with("2,Engineering,4,L4,2,Seasoned"));

        assert_eq!(read_payband_table(&path).unwrap(), records);
    }

    #[test]
    fn missing_payband_table_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = read_payband_table(&dir.path().join("payband_table.csv")).unwrap_err();
        assert!(err.to_string().contains("extract stage"));
    }
}
