//! Derived-field computation over ingested records.
//!
//! Candidate enrichment (geo factors, band-derived targets, deltas,
//! date interpolation), the completeness partition, active-employee
//! payband matching with tenure bucketing, and the historical monthly
//! headcount reconstruction.

pub mod active;
pub mod completeness;
pub mod dates;
pub mod enrich;
pub mod headcount;
pub mod tenure;

pub use active::{ActiveCompRecord, ActiveStats, build_active_compensation};
pub use completeness::{is_complete, partition_by_completeness};
pub use dates::interpolate_dates;
pub use enrich::{EnrichStats, SeasonedBands, enrich_candidates};
pub use headcount::{MonthlyHeadcountRow, build_historical_headcount};
pub use tenure::tenure_range;
