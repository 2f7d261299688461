//! Candidate record enrichment.
//!
//! Runs the derivation steps in a fixed order: candidate numbering,
//! date interpolation, location defaulting, geo factor resolution,
//! band-derived target cash figures, and the compensation delta.
//! Lookup misses never abort; they leave the prior value in place and
//! accumulate into [`EnrichStats`].

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use comp_model::{CandidateRecord, GeoFactorTable, PaybandRecord, RoleType, Seniority, UNKNOWN_COUNTRY};

use crate::dates::interpolate_dates;

static CANDIDATE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Candidate\s+(\d+)").expect("candidate number pattern is valid"));

/// Base-comp strings that mean "no usable figure".
const BASE_COMP_SENTINELS: &[&str] = &["DNP", "N/A", "TBD"];

/// Per-run enrichment tallies surfaced in the summary and the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichStats {
    pub records: usize,
    pub numbered: usize,
    pub dates_interpolated: usize,
    pub unknown_locations: usize,
    pub geo_updates: usize,
    /// Locations absent from the geo table, deduplicated.
    pub missing_countries: BTreeSet<String>,
    pub target_cash_matches: usize,
    pub target_cash_misses: usize,
    pub target_level_matches: usize,
    pub target_level_misses: usize,
    pub deltas_computed: usize,
    pub deltas_unparseable: usize,
}

/// Candidate-side payband lookup: Seasoned-tier cash base keyed by
/// (role category, level code). Candidates are banded against the
/// Seasoned tier only.
#[derive(Debug, Clone)]
pub struct SeasonedBands {
    cash_base: HashMap<(String, String), i64>,
}

impl SeasonedBands {
    pub fn from_records(records: &[PaybandRecord]) -> Self {
        let mut cash_base = HashMap::new();
        for record in records {
            if record.seniority != Seniority::Seasoned {
                continue;
            }
            cash_base
                .entry((record.role_category.clone(), record.level_code.clone()))
                .or_insert(record.cash_base);
        }
        Self { cash_base }
    }

    pub fn cash_base(&self, role_category: &str, level_code: &str) -> Option<i64> {
        self.cash_base
            .get(&(role_category.to_string(), level_code.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.cash_base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cash_base.is_empty()
    }
}

/// Level code for band matching: the first two characters of a level
/// field like "L4 (Senior)".
pub fn level_code_prefix(level: &str) -> Option<String> {
    let trimmed = level.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(2).collect())
}

/// Parse the numeric sequence from a name like "Candidate 12 (url)".
pub fn parse_candidate_number(name: &str) -> Option<u32> {
    CANDIDATE_NUMBER
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Actual base compensation as a plain number; sentinel strings and
/// anything unparseable are `None`.
pub fn parse_base_comp(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || BASE_COMP_SENTINELS.contains(&trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Enrich candidates in place. The slice is re-ordered by candidate
/// number (unnumbered records last) before interpolation.
pub fn enrich_candidates(
    records: &mut Vec<CandidateRecord>,
    geo: &GeoFactorTable,
    bands: &SeasonedBands,
) -> EnrichStats {
    let mut stats = EnrichStats {
        records: records.len(),
        ..EnrichStats::default()
    };

    for record in records.iter_mut() {
        record.candidate_number = parse_candidate_number(&record.name);
        if record.candidate_number.is_some() {
            stats.numbered += 1;
        }
    }
    records.sort_by_key(|record| record.candidate_number.unwrap_or(u32::MAX));
    stats.dates_interpolated = interpolate_dates(records);

    for record in records.iter_mut() {
        if record.location.is_none() {
            record.location = Some(UNKNOWN_COUNTRY.to_string());
            stats.unknown_locations += 1;
        }
        resolve_geo_factor(record, geo, &mut stats);
        compute_target_figures(record, bands, &mut stats);
        compute_delta(record, &mut stats);
    }

    debug!(
        records = stats.records,
        geo_updates = stats.geo_updates,
        missing_countries = stats.missing_countries.len(),
        target_cash_matches = stats.target_cash_matches,
        "candidate enrichment complete"
    );
    stats
}

/// Step 2: geo factor by (location, tech/non-tech). A location absent
/// from the table leaves the prior factor and is recorded once.
fn resolve_geo_factor(record: &mut CandidateRecord, geo: &GeoFactorTable, stats: &mut EnrichStats) {
    let Some(role_type) = record.role_type.as_deref() else {
        return;
    };
    let Some(location) = record.location.as_deref() else {
        return;
    };
    match geo.factor_for(location, RoleType::classify(role_type)) {
        Some(factor) => {
            if record.geo_factor != Some(factor) {
                record.geo_factor = Some(factor);
                stats.geo_updates += 1;
            }
        }
        None => {
            stats.missing_countries.insert(location.trim().to_string());
        }
    }
}

/// Steps 3 and 5: band-derived cash for the current and target levels.
/// A miss leaves the prior value untouched.
fn compute_target_figures(
    record: &mut CandidateRecord,
    bands: &SeasonedBands,
    stats: &mut EnrichStats,
) {
    let (Some(pay_band), Some(geo_factor)) = (record.pay_band.clone(), record.geo_factor) else {
        return;
    };

    if let Some(level_code) = record.current_level.as_deref().and_then(level_code_prefix) {
        match bands.cash_base(&pay_band, &level_code) {
            Some(cash_base) => {
                record.target_cash = Some(cash_base as f64 * geo_factor);
                stats.target_cash_matches += 1;
            }
            None => stats.target_cash_misses += 1,
        }
    }

    if let Some(level_code) = record.target_level.as_deref().and_then(level_code_prefix) {
        match bands.cash_base(&pay_band, &level_code) {
            Some(cash_base) => {
                record.target_level_cash = Some(cash_base as f64 * geo_factor);
                stats.target_level_matches += 1;
            }
            None => stats.target_level_misses += 1,
        }
    }
}

/// Step 4: delta = target cash - parsed base comp. Unparseable base
/// comp means a null delta, never zero.
fn compute_delta(record: &mut CandidateRecord, stats: &mut EnrichStats) {
    let (Some(target_cash), Some(raw)) = (record.target_cash, record.base_comp.as_deref()) else {
        record.comp_delta = None;
        return;
    };
    match parse_base_comp(raw) {
        Some(base) => {
            record.comp_delta = Some(target_cash - base);
            stats.deltas_computed += 1;
        }
        None => {
            record.comp_delta = None;
            stats.deltas_unparseable += 1;
        }
    }
}
