pub mod dates;
pub mod enums;
pub mod error;
pub mod geo;
pub mod grid;
pub mod payband;
pub mod person;

pub use enums::{RoleType, Seniority, TenureRange};
pub use error::{CompError, Result};
pub use geo::{GeoFactorEntry, GeoFactorTable, UNKNOWN_COUNTRY};
pub use grid::{Cell, CellGrid};
pub use payband::{PaybandBlock, PaybandRecord};
pub use person::{CandidateRecord, EmployeeRecord, ExitRecord};

#[cfg(test)]
mod tests {
    use super::{PaybandRecord, Seniority};

    #[test]
    fn payband_record_serializes() {
        let record = PaybandRecord {
            role_category: "Engineering".to_string(),
            level_id: 4,
            level_code: "L4".to_string(),
            seniority: Seniority::Seasoned,
            cash_base: 120_000,
            equity_value: 40_000,
            equity_units: 300,
            annual_total: 160_000,
        };
        let json = serde_json::to_string(&record).expect("serialize record");
        let round: PaybandRecord = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round, record);
        assert_eq!(round.key(), ("Engineering", "L4", Seniority::Seasoned));
    }
}
