//! Plain-text cleaning summary report.
//!
//! Fixed section headers, aggregate numbers derived from the complete
//! partition. Pure function of its inputs; the generation date comes
//! from the caller so renders are reproducible.

use std::fmt::Write as _;

use chrono::NaiveDate;

use comp_enrich::EnrichStats;
use comp_model::CandidateRecord;
use comp_model::dates::format_iso_date;

use crate::stats::{Summary, format_money};

/// Two cash figures within a cent of each other count as aligned.
const CASH_ALIGNMENT_TOLERANCE: f64 = 0.01;

/// Everything the report needs, gathered by the pipeline.
#[derive(Debug, Clone)]
pub struct CleaningReportInputs<'a> {
    /// Records in the complete partition, post-enrichment.
    pub complete: &'a [CandidateRecord],
    /// Record count before the completeness filter.
    pub original_count: usize,
    pub incomplete_count: usize,
    pub stats: &'a EnrichStats,
    pub generated: NaiveDate,
}

/// Render the cleaning summary report.
pub fn render_cleaning_report(inputs: &CleaningReportInputs<'_>) -> String {
    let complete = inputs.complete;
    let completeness_rate = if inputs.original_count == 0 {
        0.0
    } else {
        complete.len() as f64 / inputs.original_count as f64 * 100.0
    };

    let deltas: Vec<f64> = complete.iter().filter_map(|record| record.comp_delta).collect();
    let delta_summary = Summary::compute(&deltas);

    let level_gaps: Vec<f64> = complete
        .iter()
        .filter_map(|record| {
            let (cash, level_cash) = (record.target_cash?, record.target_level_cash?);
            Some(level_cash - cash)
        })
        .collect();
    let aligned = level_gaps
        .iter()
        .filter(|gap| gap.abs() < CASH_ALIGNMENT_TOLERANCE)
        .count();
    let misaligned = level_gaps.len() - aligned;

    let date_range = date_range(complete);
    let stats = inputs.stats;

    let mut report = String::new();
    let _ = writeln!(report, "CANDIDATE COMPENSATION DATA - CLEANING SUMMARY REPORT");
    let _ = writeln!(report, "=====================================================");
    let _ = writeln!(report, "Generated: {}", format_iso_date(inputs.generated));
    let _ = writeln!(report);
    let _ = writeln!(report, "OVERVIEW");
    let _ = writeln!(report, "--------");
    let _ = writeln!(report, "Input records: {}", inputs.original_count);
    let _ = writeln!(report, "Complete records: {}", complete.len());
    let _ = writeln!(report, "Incomplete records: {}", inputs.incomplete_count);
    let _ = writeln!(report, "Completeness rate: {completeness_rate:.1}%");
    let _ = writeln!(report);
    let _ = writeln!(report, "DATA FILTERING");
    let _ = writeln!(report, "--------------");
    let _ = writeln!(report, "Records were filtered out when any critical field was blank");
    let _ = writeln!(report, "or the location was 'Unknown':");
    let _ = writeln!(report, "- Location");
    let _ = writeln!(report, "- High Potential?");
    let _ = writeln!(report, "- Geo Factor");
    let _ = writeln!(report, "- Comp Type");
    let _ = writeln!(report, "- Current Level");
    let _ = writeln!(report, "- Base Comp");
    let _ = writeln!(report);
    let _ = writeln!(report, "CLEANING OPERATIONS");
    let _ = writeln!(report, "-------------------");
    let _ = writeln!(
        report,
        "1. Candidate numbers parsed: {}/{}",
        stats.numbered, stats.records
    );
    let _ = writeln!(
        report,
        "2. Missing dates filled by interpolation: {}",
        stats.dates_interpolated
    );
    let _ = writeln!(
        report,
        "3. Geo factors updated: {} (unmatched locations: {})",
        stats.geo_updates,
        missing_countries_line(stats)
    );
    let _ = writeln!(
        report,
        "4. Target cash matched from paybands: {} ({} without a payband match)",
        stats.target_cash_matches, stats.target_cash_misses
    );
    let _ = writeln!(
        report,
        "5. Target level cash calculated: {} ({} without a payband match)",
        stats.target_level_matches, stats.target_level_misses
    );
    let _ = writeln!(
        report,
        "6. Compensation deltas computed: {} ({} with unparseable base comp)",
        stats.deltas_computed, stats.deltas_unparseable
    );
    let _ = writeln!(report);
    let _ = writeln!(report, "FINAL DATASET");
    let _ = writeln!(report, "-------------");
    let _ = writeln!(report, "Date range: {date_range}");
    let _ = writeln!(
        report,
        "Unique locations: {}",
        unique_locations(complete)
    );
    let _ = writeln!(report);
    let _ = writeln!(report, "COMPENSATION ANALYSIS");
    let _ = writeln!(report, "---------------------");
    match delta_summary {
        Some(summary) => {
            let _ = writeln!(report, "Compensation delta (target cash - base comp):");
            let _ = writeln!(report, "- Mean: {}", format_money(summary.mean));
            let _ = writeln!(report, "- Median: {}", format_money(summary.median));
            let _ = writeln!(report, "- Minimum: {}", format_money(summary.min));
            let _ = writeln!(report, "- Maximum: {}", format_money(summary.max));
            let _ = writeln!(
                report,
                "- Records calculated: {}/{}",
                summary.count,
                complete.len()
            );
        }
        None => {
            let _ = writeln!(report, "No compensation deltas could be computed.");
        }
    }
    let _ = writeln!(report);
    let _ = writeln!(report, "Target level cash vs target cash:");
    let _ = writeln!(report, "- Records at their target level: {aligned}");
    let _ = writeln!(report, "- Records with a level gap: {misaligned}");
    let _ = writeln!(report);
    let _ = writeln!(report, "=====================================================");
    let _ = writeln!(report, "End of Report");
    report
}

fn missing_countries_line(stats: &EnrichStats) -> String {
    if stats.missing_countries.is_empty() {
        "none".to_string()
    } else {
        stats
            .missing_countries
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn date_range(records: &[CandidateRecord]) -> String {
    let dates: Vec<NaiveDate> = records.iter().filter_map(|record| record.date).collect();
    match (dates.iter().min(), dates.iter().max()) {
        (Some(first), Some(last)) => {
            format!("{} to {}", format_iso_date(*first), format_iso_date(*last))
        }
        _ => "no dates".to_string(),
    }
}

fn unique_locations(records: &[CandidateRecord]) -> usize {
    records
        .iter()
        .filter_map(|record| record.location.as_deref())
        .collect::<std::collections::BTreeSet<_>>()
        .len()
}
