//! Geographic pay-adjustment factor table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::RoleType;

/// Synthetic country key carrying the averaged factors.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Per-country adjustment factors for tech and non-tech roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFactorEntry {
    pub country: String,
    pub tech_factor: f64,
    pub non_tech_factor: f64,
    /// US / Non-US region flag, "Unknown" for the synthetic entry.
    pub region_flag: String,
}

impl GeoFactorEntry {
    pub fn factor(&self, role_type: RoleType) -> f64 {
        match role_type {
            RoleType::Tech => self.tech_factor,
            RoleType::NonTech => self.non_tech_factor,
        }
    }
}

/// Lookup table keyed by trimmed country name.
///
/// Always contains exactly one synthetic [`UNKNOWN_COUNTRY`] entry
/// whose factors are the unweighted arithmetic means over the real
/// countries, rounded to 3 decimal places. A miss on any other key is
/// the caller's to report; nothing is inferred per-country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoFactorTable {
    entries: Vec<GeoFactorEntry>,
    unknown: GeoFactorEntry,
    index: BTreeMap<String, usize>,
}

impl GeoFactorTable {
    pub fn from_entries(entries: Vec<GeoFactorEntry>) -> Self {
        let count = entries.len();
        let (tech_sum, non_tech_sum) = entries.iter().fold((0.0, 0.0), |(tech, non_tech), entry| {
            (tech + entry.tech_factor, non_tech + entry.non_tech_factor)
        });
        let (tech_avg, non_tech_avg) = if count == 0 {
            (0.0, 0.0)
        } else {
            (tech_sum / count as f64, non_tech_sum / count as f64)
        };
        let unknown = GeoFactorEntry {
            country: UNKNOWN_COUNTRY.to_string(),
            tech_factor: round3(tech_avg),
            non_tech_factor: round3(non_tech_avg),
            region_flag: UNKNOWN_COUNTRY.to_string(),
        };
        let mut index = BTreeMap::new();
        for (position, entry) in entries.iter().enumerate() {
            // First row wins when a country repeats in the source.
            index
                .entry(entry.country.trim().to_string())
                .or_insert(position);
        }
        Self {
            entries,
            unknown,
            index,
        }
    }

    /// Exact-match lookup after trimming; resolves the synthetic
    /// Unknown entry as well.
    pub fn get(&self, country: &str) -> Option<&GeoFactorEntry> {
        let key = country.trim();
        if key == UNKNOWN_COUNTRY {
            return Some(&self.unknown);
        }
        self.index.get(key).map(|position| &self.entries[*position])
    }

    /// Factor for a country and role type; `None` is a reportable
    /// miss.
    pub fn factor_for(&self, country: &str, role_type: RoleType) -> Option<f64> {
        self.get(country).map(|entry| entry.factor(role_type))
    }

    /// Real country rows in source order, without the Unknown entry.
    pub fn entries(&self) -> &[GeoFactorEntry] {
        &self.entries
    }

    pub fn unknown(&self) -> &GeoFactorEntry {
        &self.unknown
    }

    /// Number of real countries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::{GeoFactorEntry, GeoFactorTable, UNKNOWN_COUNTRY};
    use crate::enums::RoleType;

    fn entry(country: &str, tech: f64, non_tech: f64) -> GeoFactorEntry {
        GeoFactorEntry {
            country: country.to_string(),
            tech_factor: tech,
            non_tech_factor: non_tech,
            region_flag: "Non US".to_string(),
        }
    }

    #[test]
    fn unknown_entry_averages_real_countries() {
        let table = GeoFactorTable::from_entries(vec![
            entry("Spain", 0.8, 0.7),
            entry("Brazil", 0.6, 0.5),
            entry("Japan", 0.9, 0.85),
        ]);
        let unknown = table.get(UNKNOWN_COUNTRY).unwrap();
        assert_eq!(unknown.tech_factor, 0.767);
        assert_eq!(unknown.non_tech_factor, 0.683);
    }

    #[test]
    fn lookup_trims_whitespace_and_reports_misses() {
        let table = GeoFactorTable::from_entries(vec![entry("Spain", 0.8, 0.7)]);
        assert_eq!(table.factor_for(" Spain ", RoleType::Tech), Some(0.8));
        assert_eq!(table.factor_for("Spain", RoleType::NonTech), Some(0.7));
        assert_eq!(table.factor_for("Atlantis", RoleType::Tech), None);
    }

    #[test]
    fn empty_table_still_has_unknown() {
        let table = GeoFactorTable::from_entries(Vec::new());
        let unknown = table.get(UNKNOWN_COUNTRY).unwrap();
        assert_eq!(unknown.tech_factor, 0.0);
        assert_eq!(unknown.non_tech_factor, 0.0);
    }
}
