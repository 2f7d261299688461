//! Snapshot test for the rendered cleaning summary report.

use chrono::NaiveDate;

use comp_enrich::EnrichStats;
use comp_model::CandidateRecord;
use comp_report::{CleaningReportInputs, render_cleaning_report};

fn record(
    number: u32,
    date: &str,
    location: &str,
    delta: f64,
    target_cash: f64,
    target_level_cash: f64,
) -> CandidateRecord {
    CandidateRecord {
        name: format!("Candidate {number} (url)"),
        candidate_number: Some(number),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
        location: Some(location.to_string()),
        comp_delta: Some(delta),
        target_cash: Some(target_cash),
        target_level_cash: Some(target_level_cash),
        ..CandidateRecord::default()
    }
}

#[test]
fn cleaning_report_layout_is_stable() {
    let complete = vec![
        record(1, "2025-01-10", "Spain", -1000.0, 96_000.0, 96_000.0),
        record(2, "2025-01-15", "Spain", 2000.0, 96_000.0, 120_000.0),
        record(3, "2025-01-20", "Japan", 5000.0, 100_000.0, 100_000.0),
    ];
    let mut stats = EnrichStats {
        records: 5,
        numbered: 5,
        dates_interpolated: 1,
        unknown_locations: 1,
        geo_updates: 4,
        target_cash_matches: 3,
        target_cash_misses: 1,
        target_level_matches: 3,
        target_level_misses: 0,
        deltas_computed: 3,
        deltas_unparseable: 1,
        ..EnrichStats::default()
    };
    stats.missing_countries.insert("Atlantis".to_string());

    let report = render_cleaning_report(&CleaningReportInputs {
        complete: &complete,
        original_count: 5,
        incomplete_count: 2,
        stats: &stats,
        generated: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
    });

    insta::assert_snapshot!(report, @r"
    CANDIDATE COMPENSATION DATA - CLEANING SUMMARY REPORT
    =====================================================
    Generated: 2025-06-30

    OVERVIEW
    --------
    Input records: 5
    Complete records: 3
    Incomplete records: 2
    Completeness rate: 60.0%

    DATA FILTERING
    --------------
    Records were filtered out when any critical field was blank
    or the location was 'Unknown':
    - Location
    - High Potential?
    - Geo Factor
    - Comp Type
    - Current Level
    - Base Comp

    CLEANING OPERATIONS
    -------------------
    1. Candidate numbers parsed: 5/5
    2. Missing dates filled by interpolation: 1
    3. Geo factors updated: 4 (unmatched locations: Atlantis)
    4. Target cash matched from paybands: 3 (1 without a payband match)
    5. Target level cash calculated: 3 (0 without a payband match)
    6. Compensation deltas computed: 3 (1 with unparseable base comp)

    FINAL DATASET
    -------------
    Date range: 2025-01-10 to 2025-01-20
    Unique locations: 2

    COMPENSATION ANALYSIS
    ---------------------
    Compensation delta (target cash - base comp):
    - Mean: $2,000.00
    - Median: $2,000.00
    - Minimum: -$1,000.00
    - Maximum: $5,000.00
    - Records calculated: 3/3

    Target level cash vs target cash:
    - Records at their target level: 2
    - Records with a level gap: 1

    =====================================================
    End of Report
    ");
}

#[test]
fn empty_input_still_renders_all_sections() {
    let stats = EnrichStats::default();
    let report = render_cleaning_report(&CleaningReportInputs {
        complete: &[],
        original_count: 0,
        incomplete_count: 0,
        stats: &stats,
        generated: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
    });
    assert!(report.contains("Completeness rate: 0.0%"));
    assert!(report.contains("No compensation deltas could be computed."));
    assert!(report.contains("Date range: no dates"));
    assert!(report.contains("End of Report"));
}
