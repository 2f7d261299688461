//! Pipeline stages with explicit typed results.
//!
//! Stages run in strict dependency order:
//! 1. **Extract**: payband sheet -> blocks -> normalized table
//! 2. **Geo**: geo factor sheet -> lookup table with the Unknown entry
//! 3. **Clean**: candidate records -> enriched, partitioned, reported
//! 4. **Active**: current headcount -> geo-adjusted compensation
//! 5. **Headcount**: headcount + exits -> monthly history
//!
//! Each stage takes the prior stage's completed output; nothing
//! streams partial results.

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{Level, info, info_span, trace};

use crate::logging::redact_value;

use comp_enrich::{
    ActiveCompRecord, ActiveStats, EnrichStats, MonthlyHeadcountRow, SeasonedBands,
    build_active_compensation, build_historical_headcount, enrich_candidates,
    partition_by_completeness,
};
use comp_ingest::{
    PAYBAND_SHEET, Workbook, read_candidates, read_employees, read_exits, read_geo_entries,
};
use comp_model::{CandidateRecord, GeoFactorTable, PaybandRecord};
use comp_payband::{BlockDetection, NormalizedTable, extract_blocks, normalize_blocks};
use comp_report::{CleaningReportInputs, render_cleaning_report};

/// Result of the payband extract stage.
#[derive(Debug)]
pub struct PaybandStage {
    pub blocks: usize,
    pub table: NormalizedTable,
}

/// Reconstruct the payband table from the payband sheet.
pub fn extract_paybands(workbook: &Workbook, detection: BlockDetection) -> Result<PaybandStage> {
    let span = info_span!("extract_paybands");
    let _guard = span.enter();
    let start = Instant::now();

    let grid = workbook
        .read_sheet(PAYBAND_SHEET)
        .context("load payband sheet")?;
    let blocks = extract_blocks(&grid, detection);
    let table = normalize_blocks(&grid, &blocks);

    info!(
        blocks = blocks.len(),
        records = table.records.len(),
        defaulted_cells = table.defaulted_cells,
        duration_ms = start.elapsed().as_millis() as u64,
        "payband table reconstructed"
    );
    Ok(PaybandStage {
        blocks: blocks.len(),
        table,
    })
}

/// Build the geo factor lookup, including the synthetic Unknown entry.
pub fn build_geo_table(workbook: &Workbook) -> Result<GeoFactorTable> {
    let span = info_span!("build_geo_table");
    let _guard = span.enter();
    let start = Instant::now();

    let entries = read_geo_entries(workbook)?;
    let table = GeoFactorTable::from_entries(entries);

    info!(
        countries = table.len(),
        unknown_tech_factor = table.unknown().tech_factor,
        duration_ms = start.elapsed().as_millis() as u64,
        "geo factor table built"
    );
    Ok(table)
}

/// Result of the candidate cleaning stage.
#[derive(Debug)]
pub struct CleanStage {
    pub complete: Vec<CandidateRecord>,
    pub incomplete: Vec<CandidateRecord>,
    pub stats: EnrichStats,
    pub original_count: usize,
    pub report: String,
}

/// Enrich candidates against the payband and geo tables, partition by
/// completeness, and render the cleaning report.
pub fn clean_candidates(
    workbook: &Workbook,
    paybands: &[PaybandRecord],
    geo: &GeoFactorTable,
    today: NaiveDate,
) -> Result<CleanStage> {
    let span = info_span!("clean_candidates");
    let _guard = span.enter();
    let start = Instant::now();

    let mut records = read_candidates(workbook)?;
    let original_count = records.len();
    let bands = SeasonedBands::from_records(paybands);
    let stats = enrich_candidates(&mut records, geo, &bands);
    let (complete, incomplete) = partition_by_completeness(records);
    if tracing::enabled!(Level::TRACE) {
        // Pay figures stay redacted unless --log-data was passed.
        for record in &complete {
            let target_cash = record
                .target_cash
                .map(|value| format!("{value:.2}"))
                .unwrap_or_default();
            trace!(
                candidate = %record.name,
                base_comp = redact_value(record.base_comp.as_deref().unwrap_or("")),
                target_cash = redact_value(&target_cash),
                "candidate row cleaned"
            );
        }
    }
    let report = render_cleaning_report(&CleaningReportInputs {
        complete: &complete,
        original_count,
        incomplete_count: incomplete.len(),
        stats: &stats,
        generated: today,
    });

    info!(
        records = original_count,
        complete = complete.len(),
        incomplete = incomplete.len(),
        missing_countries = stats.missing_countries.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "candidates cleaned"
    );
    Ok(CleanStage {
        complete,
        incomplete,
        stats,
        original_count,
        report,
    })
}

/// Geo-adjusted compensation for the current headcount.
pub fn active_compensation(
    workbook: &Workbook,
    paybands: &[PaybandRecord],
    geo: &GeoFactorTable,
    today: NaiveDate,
) -> Result<(Vec<ActiveCompRecord>, ActiveStats)> {
    let span = info_span!("active_compensation");
    let _guard = span.enter();
    let start = Instant::now();

    let employees = read_employees(workbook)?;
    let (records, stats) = build_active_compensation(&employees, paybands, geo, today);
    if tracing::enabled!(Level::TRACE) {
        for record in &records {
            let target_base = record
                .target_base_comp
                .map(|value| format!("{value:.2}"))
                .unwrap_or_default();
            trace!(
                employee = %record.employee_name,
                target_base_comp = redact_value(&target_base),
                "active compensation row"
            );
        }
    }

    info!(
        employees = stats.employees,
        matched = stats.matched,
        unmatched = stats.unmatched,
        duration_ms = start.elapsed().as_millis() as u64,
        "active compensation calculated"
    );
    Ok((records, stats))
}

/// Month-by-month headcount from current employees and exits.
pub fn historical_headcount(workbook: &Workbook) -> Result<Vec<MonthlyHeadcountRow>> {
    let span = info_span!("historical_headcount");
    let _guard = span.enter();
    let start = Instant::now();

    let employees = read_employees(workbook)?;
    let exits = read_exits(workbook)?;
    let rows = build_historical_headcount(&employees, &exits);

    info!(
        employees = employees.len(),
        exits = exits.len(),
        rows = rows.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "historical headcount rebuilt"
    );
    Ok(rows)
}
