//! Active-employee compensation matching.
//!
//! For each current-headcount row: parse the level distinction,
//! classify tech vs non-tech from the granular payband, bucket tenure,
//! match the payband table, and apply the geo factor. Headcount rows
//! with no usable geo entry fall back to a neutral factor of 1.0 (the
//! country is tallied), unlike candidates where the prior value is
//! kept.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use comp_model::{EmployeeRecord, GeoFactorTable, PaybandRecord, RoleType, Seniority, TenureRange};

use crate::tenure::tenure_range;

static LEVEL_WITH_SENIORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([LM]\d+)\s+(Early|Seasoned|Veteran)$").expect("level pattern is valid")
});
static LEVEL_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([LM]\d+)$").expect("level pattern is valid"));

/// Granular paybands treated as non-tech; everything else is tech.
const NON_TECH_BANDS: &[&str] = &[
    "Operations - Finance - Accounting - Mgmt",
    "Operations - Finance - FP&A - Mgmt",
];

/// Parse a level distinction like "L4 Seasoned" or "M3" into a level
/// code and optional seniority tier.
pub fn parse_level_distinction(raw: &str) -> Option<(String, Option<Seniority>)> {
    let trimmed = raw.trim();
    if let Some(caps) = LEVEL_WITH_SENIORITY.captures(trimmed) {
        let seniority = caps[2].parse::<Seniority>().ok()?;
        return Some((caps[1].to_string(), Some(seniority)));
    }
    LEVEL_ONLY
        .captures(trimmed)
        .map(|caps| (caps[1].to_string(), None))
}

/// Tech classification from the granular payband; `None` when the
/// band is missing.
pub fn classify_band(pay_band: Option<&str>) -> Option<RoleType> {
    let band = pay_band?.trim();
    if NON_TECH_BANDS.contains(&band) {
        Some(RoleType::NonTech)
    } else {
        Some(RoleType::Tech)
    }
}

/// One enriched active-employee row, ready for the artifact writer.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveCompRecord {
    pub employee_name: String,
    pub department: Option<String>,
    pub org: Option<String>,
    pub country: Option<String>,
    pub start_date: Option<String>,
    pub tenure_range: TenureRange,
    pub level_distinction: Option<String>,
    pub parsed_level_code: Option<String>,
    pub parsed_seniority: Option<Seniority>,
    pub matched_seniority: Option<Seniority>,
    pub pay_band: Option<String>,
    pub tech_classification: Option<RoleType>,
    pub current_base_comp: Option<f64>,
    pub current_equity_value: Option<f64>,
    pub raw_band_cash: Option<i64>,
    pub raw_band_equity: Option<i64>,
    pub geo_factor: f64,
    pub target_base_comp: Option<f64>,
    pub target_equity_value: Option<f64>,
    pub perf_score: Option<String>,
    pub matched: bool,
}

/// Tallies for the active-comp run summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveStats {
    pub employees: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub missing_countries: BTreeSet<String>,
}

/// Match every employee against the payband table and geo factors.
pub fn build_active_compensation(
    employees: &[EmployeeRecord],
    paybands: &[PaybandRecord],
    geo: &GeoFactorTable,
    today: NaiveDate,
) -> (Vec<ActiveCompRecord>, ActiveStats) {
    let mut stats = ActiveStats {
        employees: employees.len(),
        ..ActiveStats::default()
    };
    let mut records = Vec::with_capacity(employees.len());

    for employee in employees {
        let parsed = employee
            .level_distinction
            .as_deref()
            .and_then(parse_level_distinction);
        let (parsed_level_code, parsed_seniority) = match &parsed {
            Some((code, seniority)) => (Some(code.clone()), *seniority),
            None => (None, None),
        };
        let tech_classification = classify_band(employee.pay_band.as_deref());

        let band_match = parsed.as_ref().and_then(|(code, seniority)| {
            let pay_band = employee.pay_band.as_deref()?;
            match_band(paybands, pay_band, code, *seniority)
        });
        let geo_factor = resolve_geo_factor(
            employee.country.as_deref(),
            tech_classification,
            geo,
            &mut stats,
        );

        let (raw_band_cash, raw_band_equity, matched_seniority) = match band_match {
            Some(band) => (
                Some(band.cash_base),
                Some(band.equity_value),
                Some(band.seniority),
            ),
            None => (None, None, None),
        };
        let matched = raw_band_cash.is_some();
        if matched {
            stats.matched += 1;
        } else {
            stats.unmatched += 1;
        }

        records.push(ActiveCompRecord {
            employee_name: employee.name.clone(),
            department: employee.department.clone(),
            org: employee.org.clone(),
            country: employee.country.clone(),
            start_date: employee.start_date.clone(),
            tenure_range: tenure_range(employee.start_date.as_deref(), today),
            level_distinction: employee.level_distinction.clone(),
            parsed_level_code,
            parsed_seniority,
            matched_seniority,
            pay_band: employee.pay_band.clone(),
            tech_classification,
            current_base_comp: employee.base_comp,
            current_equity_value: employee.equity_value,
            raw_band_cash,
            raw_band_equity,
            geo_factor,
            target_base_comp: raw_band_cash.map(|cash| cash as f64 * geo_factor),
            target_equity_value: raw_band_equity.map(|equity| equity as f64 * geo_factor),
            perf_score: employee.perf_score.clone(),
            matched,
        });
    }

    debug!(
        employees = stats.employees,
        matched = stats.matched,
        unmatched = stats.unmatched,
        "active compensation matched"
    );
    (records, stats)
}

/// Payband match for an employee. With an explicit seniority the match
/// is exact; without one, Seasoned is preferred, then the first record
/// for that (role, level).
fn match_band<'a>(
    paybands: &'a [PaybandRecord],
    pay_band: &str,
    level_code: &str,
    seniority: Option<Seniority>,
) -> Option<&'a PaybandRecord> {
    let mut candidates = paybands
        .iter()
        .filter(|record| record.role_category == pay_band && record.level_code == level_code);
    match seniority {
        Some(tier) => candidates.find(|record| record.seniority == tier),
        None => {
            let matches: Vec<&PaybandRecord> = candidates.collect();
            matches
                .iter()
                .find(|record| record.seniority == Seniority::Seasoned)
                .copied()
                .or_else(|| matches.first().copied())
        }
    }
}

/// Geo factor with a neutral 1.0 fallback when the country or the
/// classification is unusable; missing countries are tallied.
fn resolve_geo_factor(
    country: Option<&str>,
    classification: Option<RoleType>,
    geo: &GeoFactorTable,
    stats: &mut ActiveStats,
) -> f64 {
    let (Some(country), Some(role_type)) = (country, classification) else {
        return 1.0;
    };
    match geo.factor_for(country, role_type) {
        Some(factor) => factor,
        None => {
            stats.missing_countries.insert(country.trim().to_string());
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{build_active_compensation, classify_band, parse_level_distinction};
    use chrono::NaiveDate;
    use comp_model::{
        EmployeeRecord, GeoFactorEntry, GeoFactorTable, PaybandRecord, RoleType, Seniority,
        TenureRange,
    };

    fn band(role: &str, level: &str, seniority: Seniority, cash: i64, equity: i64) -> PaybandRecord {
        PaybandRecord {
            role_category: role.to_string(),
            level_id: 4,
            level_code: level.to_string(),
            seniority,
            cash_base: cash,
            equity_value: equity,
            equity_units: 0,
            annual_total: cash,
        }
    }

    fn paybands() -> Vec<PaybandRecord> {
        vec![
            band("Engineering", "L4", Seniority::Early, 90_000, 30_000),
            band("Engineering", "L4", Seniority::Seasoned, 120_000, 40_000),
            band("Engineering", "L4", Seniority::Veteran, 140_000, 50_000),
        ]
    }

    fn geo_table() -> GeoFactorTable {
        GeoFactorTable::from_entries(vec![GeoFactorEntry {
            country: "Spain".to_string(),
            tech_factor: 0.8,
            non_tech_factor: 0.7,
            region_flag: "Non US".to_string(),
        }])
    }

    fn employee(level: &str) -> EmployeeRecord {
        EmployeeRecord {
            name: "Alice Prieto".to_string(),
            country: Some("Spain".to_string()),
            start_date: Some("2024-01-15".to_string()),
            level_distinction: Some(level.to_string()),
            pay_band: Some("Engineering".to_string()),
            base_comp: Some(95_000.0),
            ..EmployeeRecord::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    #[test]
    fn level_distinction_parsing() {
        assert_eq!(
            parse_level_distinction("L4 Seasoned"),
            Some(("L4".to_string(), Some(Seniority::Seasoned)))
        );
        assert_eq!(parse_level_distinction("M3"), Some(("M3".to_string(), None)));
        assert_eq!(parse_level_distinction("Director"), None);
        assert_eq!(parse_level_distinction("L4 Principal"), None);
    }

    #[test]
    fn finance_management_bands_are_non_tech() {
        assert_eq!(
            classify_band(Some("Operations - Finance - Accounting - Mgmt")),
            Some(RoleType::NonTech)
        );
        assert_eq!(classify_band(Some("Engineering")), Some(RoleType::Tech));
        assert_eq!(classify_band(None), None);
    }

    #[test]
    fn exact_seniority_match() {
        let (records, stats) = build_active_compensation(
            &[employee("L4 Veteran")],
            &paybands(),
            &geo_table(),
            today(),
        );
        assert_eq!(stats.matched, 1);
        let record = &records[0];
        assert_eq!(record.matched_seniority, Some(Seniority::Veteran));
        assert_eq!(record.raw_band_cash, Some(140_000));
        assert_eq!(record.geo_factor, 0.8);
        assert_eq!(record.target_base_comp, Some(112_000.0));
        assert_eq!(record.target_equity_value, Some(40_000.0));
        assert_eq!(record.tenure_range, TenureRange::OneToTwoYears);
    }

    #[test]
    fn missing_seniority_prefers_seasoned() {
        let (records, _) =
            build_active_compensation(&[employee("L4")], &paybands(), &geo_table(), today());
        assert_eq!(records[0].matched_seniority, Some(Seniority::Seasoned));
        assert_eq!(records[0].raw_band_cash, Some(120_000));
    }

    #[test]
    fn unmatched_levels_get_no_target_figures() {
        let (records, stats) =
            build_active_compensation(&[employee("L9")], &paybands(), &geo_table(), today());
        assert_eq!(stats.unmatched, 1);
        assert!(!records[0].matched);
        assert_eq!(records[0].target_base_comp, None);
    }

    #[test]
    fn unknown_country_falls_back_to_neutral_factor() {
        let mut emp = employee("L4 Seasoned");
        emp.country = Some("Atlantis".to_string());
        let (records, stats) =
            build_active_compensation(&[emp], &paybands(), &geo_table(), today());
        assert_eq!(records[0].geo_factor, 1.0);
        assert_eq!(records[0].target_base_comp, Some(120_000.0));
        assert!(stats.missing_countries.contains("Atlantis"));
    }
}
