//! Per-person records: candidates, active employees, and exits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One candidate row from the compensation sheet.
///
/// Source fields are populated by the reader; the derived fields
/// (candidate number, geo factor, target figures, delta) are written
/// by the enricher and never mutated after output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Raw name field, e.g. "Candidate 12 (https://...)".
    pub name: String,
    /// Sequence number parsed from the name field.
    pub candidate_number: Option<u32>,
    /// Offer date; filled by interpolation when missing.
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    /// Raw role-type label: "Tech", "Non-Tech", or "Quota Carrying".
    pub role_type: Option<String>,
    pub high_potential: Option<String>,
    pub comp_type: Option<String>,
    /// Current level with descriptor, e.g. "L4 (Senior)".
    pub current_level: Option<String>,
    /// Level the candidate is targeted at, same format.
    pub target_level: Option<String>,
    /// Assigned pay band (role category for payband matching).
    pub pay_band: Option<String>,
    /// Raw base compensation; may hold sentinels like "DNP".
    pub base_comp: Option<String>,
    pub geo_factor: Option<f64>,
    /// Band-derived target cash (current level x geo factor).
    pub target_cash: Option<f64>,
    /// Band-derived target cash using the target level instead.
    pub target_level_cash: Option<f64>,
    /// target_cash - parsed base comp; null when base comp does not
    /// parse as a plain number.
    pub comp_delta: Option<f64>,
}

/// One active-employee row from the current headcount sheet.
///
/// The start date is kept raw so tenure bucketing can distinguish a
/// missing date from one that fails to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub name: String,
    pub department: Option<String>,
    pub org: Option<String>,
    pub manager: Option<String>,
    pub country: Option<String>,
    pub start_date: Option<String>,
    /// Level plus optional seniority, e.g. "L4 Seasoned" or "M3".
    pub level_distinction: Option<String>,
    /// Granular payband (role category for payband matching).
    pub pay_band: Option<String>,
    pub base_comp: Option<f64>,
    pub equity_value: Option<f64>,
    pub perf_score: Option<String>,
}

/// One exit row (2024 onwards): employment window for the historical
/// headcount reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExitRecord {
    pub name: String,
    pub department: Option<String>,
    pub org: Option<String>,
    pub manager: Option<String>,
    pub country: Option<String>,
    pub level_distinction: Option<String>,
    pub start_date: Option<String>,
    pub last_date: Option<String>,
}
