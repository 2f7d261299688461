//! End-to-end run over a small workbook fixture.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;

use comp_cli::artifacts::{
    ACTIVE_COMPENSATION_FILE, CANDIDATES_COMPLETE_FILE, CANDIDATES_INCOMPLETE_FILE,
    CANDIDATES_RAW_FILE, CLEANING_REPORT_FILE, GEO_FACTORS_FILE, HISTORICAL_HEADCOUNT_FILE,
    PAYBAND_TABLE_FILE, RUN_SUMMARY_FILE,
};
use comp_cli::cli::{BlockDetectionArg, WorkbookArgs};
use comp_cli::commands::{run_all, run_clean};

fn write_sheet(dir: &Path, sheet: &str, contents: &str) {
    fs::write(dir.join(format!("{sheet}.csv")), contents).unwrap();
}

fn workbook_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_sheet(
        dir.path(),
        "Paybands",
        "Engineering,,,,\n\
         ,,Early,Seasoned,Veteran\n\
         L4,Cash Base,90000,120000,150000\n\
         ,Equity Value,10000,20000,30000\n\
         ,Equity Units,100,200,300\n\
         ,Annual Total,100000,140000,180000\n",
    );
    write_sheet(
        dir.path(),
        "GeoFactors",
        "Country,Geo Factor for non-tech roles,Geo Factor for tech roles,Us or Non US\n\
         United States,1.0,1.0,US\n\
         Germany,0.85,0.9,Non US\n",
    );
    write_sheet(
        dir.path(),
        "Candidate Comp Data",
        "Candidate Name,Date,Location,Tech/Non-Tech,High Potential?,Comp Type,\
         Current Level,Target Level,Final Pay Band,Base Comp,Geo Factor,Target Cash\n\
         Candidate 1,2025-01-05,Germany,Tech,Yes,New Hire,L4,L4,Engineering,100000,,\n\
         Candidate 2,2025-02-10,,Tech,No,New Hire,L4,L4,Engineering,TBD,,\n",
    );
    write_sheet(
        dir.path(),
        "Current Headcount",
        "Employee Name,Department,Org,Manager,Country,Start Date,Level Distinction,\
         Payband,Base Annual Compensation,Equity,Perf Score\n\
         Alice Example,Engineering,R&D,Bob Boss,United States,2024-03-15,L4 Seasoned,\
         Engineering,130000,20000,3\n",
    );
    write_sheet(
        dir.path(),
        "Exits",
        "Employee Name,Department,Org,Manager,Country,Start Date,Last Date,Level Distinction\n\
         Carol Gone,Engineering,R&D,Bob Boss,Germany,2024-01-10,2024-06-30,L4 Early\n",
    );
    dir
}

fn args(workbook_dir: &Path) -> WorkbookArgs {
    WorkbookArgs {
        workbook_dir: workbook_dir.to_path_buf(),
        output_dir: None,
        detection: BlockDetectionArg::HeaderAnchor,
    }
}

#[test]
fn full_run_writes_every_artifact() {
    let workbook = workbook_fixture();
    let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

    let result = run_all(&args(workbook.path()), today).unwrap();

    let output_dir = workbook.path().join("output");
    assert_eq!(result.output_dir, output_dir);
    for file in [
        PAYBAND_TABLE_FILE,
        GEO_FACTORS_FILE,
        CANDIDATES_RAW_FILE,
        CANDIDATES_COMPLETE_FILE,
        CANDIDATES_INCOMPLETE_FILE,
        CLEANING_REPORT_FILE,
        ACTIVE_COMPENSATION_FILE,
        HISTORICAL_HEADCOUNT_FILE,
        RUN_SUMMARY_FILE,
    ] {
        assert!(output_dir.join(file).is_file(), "missing artifact: {file}");
    }

    // One block, one level, three tiers, in fixed emission order.
    let paybands = fs::read_to_string(output_dir.join(PAYBAND_TABLE_FILE)).unwrap();
    let mut lines = paybands.lines().skip(1);
    assert!(lines.next().unwrap().starts_with("1,Engineering,4,L4,1,Early"));
    assert!(lines.next().unwrap().starts_with("2,Engineering,4,L4,2,Seasoned"));
    assert!(lines.next().unwrap().starts_with("3,Engineering,4,L4,3,Veteran"));

    // Candidate 2 has no location, so it lands in the incomplete split.
    let complete = fs::read_to_string(output_dir.join(CANDIDATES_COMPLETE_FILE)).unwrap();
    let incomplete = fs::read_to_string(output_dir.join(CANDIDATES_INCOMPLETE_FILE)).unwrap();
    assert!(complete.contains("Candidate 1"));
    assert!(!complete.contains("Candidate 2"));
    assert!(incomplete.contains("Candidate 2"));

    // Germany tech factor applied to the Seasoned L4 cash base.
    assert!(complete.contains("108000.00"));

    let summary = fs::read_to_string(output_dir.join(RUN_SUMMARY_FILE)).unwrap();
    assert!(summary.contains("\"artifacts\""));
    assert_eq!(result.artifacts.len(), 8);
}

#[test]
fn active_employee_matches_seasoned_band() {
    let workbook = workbook_fixture();
    let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

    run_all(&args(workbook.path()), today).unwrap();

    let active = fs::read_to_string(
        workbook.path().join("output").join(ACTIVE_COMPENSATION_FILE),
    )
    .unwrap();
    let row = active
        .lines()
        .find(|line| line.starts_with("Alice Example"))
        .unwrap();
    assert!(row.contains("Matched"));
    assert!(row.contains("Seasoned"));
    // US factor 1.0 keeps the band cash unscaled.
    assert!(row.contains("120000.00"));
}

#[test]
fn historical_headcount_flags_later_exits() {
    let workbook = workbook_fixture();
    let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

    run_all(&args(workbook.path()), today).unwrap();

    let headcount = fs::read_to_string(
        workbook.path().join("output").join(HISTORICAL_HEADCOUNT_FILE),
    )
    .unwrap();
    // Carol's last day is after every covered month end.
    assert!(headcount.lines().any(|line| {
        line.starts_with("Carol Gone") && line.ends_with("Active (Later Exited)")
    }));
    assert!(headcount
        .lines()
        .any(|line| line.starts_with("Alice Example") && line.contains(",March 2024,2024,3,")));
    // Coverage stops one month past the latest current hire (March 2024).
    assert!(headcount.contains("April 2024"));
    assert!(!headcount.contains("May 2024"));
}

#[test]
fn clean_without_payband_artifact_is_fatal() {
    let workbook = workbook_fixture();
    let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

    let err = run_clean(&args(workbook.path()), today).unwrap_err();
    assert!(err.to_string().contains("payband table not found"));
}
