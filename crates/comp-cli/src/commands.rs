//! Command handlers wiring pipeline stages to artifact writers.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::warn;

use comp_ingest::Workbook;
use comp_model::{GeoFactorTable, PaybandRecord};
use comp_payband::BlockDetection;

use crate::artifacts::{
    ACTIVE_COMPENSATION_FILE, CANDIDATES_COMPLETE_FILE, CANDIDATES_INCOMPLETE_FILE,
    CANDIDATES_RAW_FILE, CLEANING_REPORT_FILE, GEO_FACTORS_FILE, HISTORICAL_HEADCOUNT_FILE,
    PAYBAND_TABLE_FILE, RUN_SUMMARY_FILE, read_payband_table, write_active_compensation,
    write_candidates, write_geo_factors, write_historical_headcount, write_payband_table,
    write_text,
};
use crate::cli::WorkbookArgs;
use crate::pipeline::{
    active_compensation, build_geo_table, clean_candidates, extract_paybands,
    historical_headcount,
};
use crate::types::RunResult;

/// Resolve and create the output directory for a command.
pub fn prepare_output_dir(args: &WorkbookArgs) -> Result<PathBuf> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.workbook_dir.join("output"));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output directory: {}", output_dir.display()))?;
    Ok(output_dir)
}

/// Extract the payband table and geo factors into standalone artifacts.
pub fn run_extract(args: &WorkbookArgs) -> Result<RunResult> {
    let workbook = Workbook::open(&args.workbook_dir)?;
    let output_dir = prepare_output_dir(args)?;
    let mut result = RunResult::new(output_dir.clone());

    extract_stage(&workbook, args.detection.into(), &output_dir, &mut result)?;
    write_run_summary(&output_dir, &result)?;
    Ok(result)
}

/// Clean and enrich candidates against a previously extracted payband
/// table. The payband artifact must exist; a missing table is fatal.
pub fn run_clean(args: &WorkbookArgs, today: NaiveDate) -> Result<RunResult> {
    let workbook = Workbook::open(&args.workbook_dir)?;
    let output_dir = prepare_output_dir(args)?;
    let mut result = RunResult::new(output_dir.clone());

    let paybands = read_payband_table(&output_dir.join(PAYBAND_TABLE_FILE))?;
    let geo = build_geo_table(&workbook)?;
    clean_stage(&workbook, &paybands, &geo, today, &output_dir, &mut result)?;
    write_run_summary(&output_dir, &result)?;
    Ok(result)
}

/// Geo-adjusted compensation for the current headcount.
pub fn run_active(args: &WorkbookArgs, today: NaiveDate) -> Result<RunResult> {
    let workbook = Workbook::open(&args.workbook_dir)?;
    let output_dir = prepare_output_dir(args)?;
    let mut result = RunResult::new(output_dir.clone());

    let paybands = read_payband_table(&output_dir.join(PAYBAND_TABLE_FILE))?;
    let geo = build_geo_table(&workbook)?;
    active_stage(&workbook, &paybands, &geo, today, &output_dir, &mut result)?;
    write_run_summary(&output_dir, &result)?;
    Ok(result)
}

/// Rebuild the monthly headcount history.
pub fn run_headcount(args: &WorkbookArgs) -> Result<RunResult> {
    let workbook = Workbook::open(&args.workbook_dir)?;
    let output_dir = prepare_output_dir(args)?;
    let mut result = RunResult::new(output_dir.clone());

    headcount_stage(&workbook, &output_dir, &mut result)?;
    write_run_summary(&output_dir, &result)?;
    Ok(result)
}

/// Run every stage in dependency order, passing the payband and geo
/// tables along in memory instead of re-reading artifacts.
pub fn run_all(args: &WorkbookArgs, today: NaiveDate) -> Result<RunResult> {
    let workbook = Workbook::open(&args.workbook_dir)?;
    let output_dir = prepare_output_dir(args)?;
    let mut result = RunResult::new(output_dir.clone());

    let (paybands, geo) =
        extract_stage(&workbook, args.detection.into(), &output_dir, &mut result)?;
    clean_stage(&workbook, &paybands, &geo, today, &output_dir, &mut result)?;
    active_stage(&workbook, &paybands, &geo, today, &output_dir, &mut result)?;
    headcount_stage(&workbook, &output_dir, &mut result)?;
    write_run_summary(&output_dir, &result)?;
    Ok(result)
}

fn extract_stage(
    workbook: &Workbook,
    detection: BlockDetection,
    output_dir: &Path,
    result: &mut RunResult,
) -> Result<(Vec<PaybandRecord>, GeoFactorTable)> {
    let stage = extract_paybands(workbook, detection)?;
    if stage.table.duplicate_keys > 0 {
        result.warnings.push(format!(
            "{} payband record(s) dropped as duplicate keys",
            stage.table.duplicate_keys
        ));
    }
    if stage.table.empty_bands > 0 {
        result.warnings.push(format!(
            "{} payband tier(s) dropped with no meaningful figures",
            stage.table.empty_bands
        ));
    }

    let payband_path = output_dir.join(PAYBAND_TABLE_FILE);
    write_payband_table(&payband_path, &stage.table.records)?;
    result.record_artifact("Payband table", stage.table.records.len(), payband_path);

    let geo = build_geo_table(workbook)?;
    let geo_path = output_dir.join(GEO_FACTORS_FILE);
    write_geo_factors(&geo_path, &geo)?;
    result.record_artifact("Geo factors", geo.len(), geo_path);

    // Raw candidate rows, before enrichment touches them.
    let candidates = comp_ingest::read_candidates(workbook)?;
    let raw_path = output_dir.join(CANDIDATES_RAW_FILE);
    write_candidates(&raw_path, &candidates)?;
    result.record_artifact("Candidate data (raw)", candidates.len(), raw_path);

    Ok((stage.table.records, geo))
}

fn clean_stage(
    workbook: &Workbook,
    paybands: &[PaybandRecord],
    geo: &GeoFactorTable,
    today: NaiveDate,
    output_dir: &Path,
    result: &mut RunResult,
) -> Result<()> {
    let stage = clean_candidates(workbook, paybands, geo, today)?;
    for country in &stage.stats.missing_countries {
        result
            .warnings
            .push(format!("no geo factor for location '{country}'"));
    }

    let complete_path = output_dir.join(CANDIDATES_COMPLETE_FILE);
    write_candidates(&complete_path, &stage.complete)?;
    result.record_artifact("Candidates (complete)", stage.complete.len(), complete_path);

    let incomplete_path = output_dir.join(CANDIDATES_INCOMPLETE_FILE);
    write_candidates(&incomplete_path, &stage.incomplete)?;
    result.record_artifact(
        "Candidates (incomplete)",
        stage.incomplete.len(),
        incomplete_path,
    );

    let report_path = output_dir.join(CLEANING_REPORT_FILE);
    write_text(&report_path, &stage.report)?;
    result.record_artifact("Cleaning report", 1, report_path);
    Ok(())
}

fn active_stage(
    workbook: &Workbook,
    paybands: &[PaybandRecord],
    geo: &GeoFactorTable,
    today: NaiveDate,
    output_dir: &Path,
    result: &mut RunResult,
) -> Result<()> {
    let (records, stats) = active_compensation(workbook, paybands, geo, today)?;
    if stats.unmatched > 0 {
        warn!(unmatched = stats.unmatched, "employees without a payband match");
        result.warnings.push(format!(
            "{} of {} employees have no payband match",
            stats.unmatched, stats.employees
        ));
    }
    for country in &stats.missing_countries {
        result
            .warnings
            .push(format!("no geo factor for country '{country}'"));
    }

    let path = output_dir.join(ACTIVE_COMPENSATION_FILE);
    write_active_compensation(&path, &records)?;
    result.record_artifact("Active compensation", records.len(), path);
    Ok(())
}

fn headcount_stage(workbook: &Workbook, output_dir: &Path, result: &mut RunResult) -> Result<()> {
    let rows = historical_headcount(workbook)?;
    let path = output_dir.join(HISTORICAL_HEADCOUNT_FILE);
    write_historical_headcount(&path, &rows)?;
    result.record_artifact("Historical headcount", rows.len(), path);
    Ok(())
}

fn write_run_summary(output_dir: &Path, result: &RunResult) -> Result<()> {
    let path = output_dir.join(RUN_SUMMARY_FILE);
    let json = serde_json::to_string_pretty(result).context("serialize run summary")?;
    fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
