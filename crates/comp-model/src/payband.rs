//! Payband block descriptors and normalized payband records.

use serde::{Deserialize, Serialize};

use crate::enums::Seniority;

/// A role's region within the payband sheet, located by the block
/// extractor before any values are read.
///
/// `data_start_col..=data_end_col` holds the seniority sub-columns;
/// the span may be narrower than three columns for ragged sheets, in
/// which case the missing tiers read as no-data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaybandBlock {
    /// Role category name taken from the header anchor cell.
    pub role_name: String,
    /// Column of the header anchor.
    pub role_anchor_col: usize,
    /// First data column (Early tier).
    pub data_start_col: usize,
    /// Last data column, inclusive.
    pub data_end_col: usize,
}

impl PaybandBlock {
    /// Data column for a seniority tier, `None` when the block is too
    /// narrow to carry that tier.
    pub fn seniority_col(&self, seniority: Seniority) -> Option<usize> {
        let col = self.data_start_col + seniority.column_offset();
        (col <= self.data_end_col).then_some(col)
    }

    /// Number of usable data columns.
    pub fn data_width(&self) -> usize {
        self.data_end_col.saturating_sub(self.data_start_col) + 1
    }
}

/// One normalized payband row: compensation figures for a single
/// (role, level, seniority) tuple.
///
/// Identity key is `(role_category, level_code, seniority)`; the
/// normalizer guarantees uniqueness with first-occurrence-wins
/// semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaybandRecord {
    pub role_category: String,
    /// Numeric suffix of the level code ("L12" -> 12).
    pub level_id: u32,
    /// Short level code such as "L4" or "M2".
    pub level_code: String,
    pub seniority: Seniority,
    pub cash_base: i64,
    pub equity_value: i64,
    pub equity_units: i64,
    pub annual_total: i64,
}

impl PaybandRecord {
    /// Identity key within the payband table.
    pub fn key(&self) -> (&str, &str, Seniority) {
        (
            self.role_category.as_str(),
            self.level_code.as_str(),
            self.seniority,
        )
    }

    /// Retention rule: a record is a real band only when at least one
    /// headline figure is positive. Equity units alone do not qualify.
    pub fn has_meaningful_data(&self) -> bool {
        self.cash_base > 0 || self.equity_value > 0 || self.annual_total > 0
    }
}

#[cfg(test)]
mod tests {
    use super::{PaybandBlock, PaybandRecord};
    use crate::enums::Seniority;

    #[test]
    fn narrow_block_pads_missing_tiers() {
        let block = PaybandBlock {
            role_name: "Engineering".to_string(),
            role_anchor_col: 0,
            data_start_col: 2,
            data_end_col: 3,
        };
        assert_eq!(block.seniority_col(Seniority::Early), Some(2));
        assert_eq!(block.seniority_col(Seniority::Seasoned), Some(3));
        assert_eq!(block.seniority_col(Seniority::Veteran), None);
        assert_eq!(block.data_width(), 2);
    }

    #[test]
    fn retention_ignores_units_only_rows() {
        let record = PaybandRecord {
            role_category: "Engineering".to_string(),
            level_id: 4,
            level_code: "L4".to_string(),
            seniority: Seniority::Early,
            cash_base: 0,
            equity_value: 0,
            equity_units: 250,
            annual_total: 0,
        };
        assert!(!record.has_meaningful_data());
    }
}
