//! Workbook ingestion.
//!
//! Loads per-sheet CSV exports into positional cell grids and converts
//! the flat sheets into typed records. The payband sheet stays a raw
//! grid; its irregular block layout is handled downstream.

pub mod records;
pub mod sheet;
pub mod table;

pub use records::{
    CANDIDATE_SHEET, EXITS_SHEET, GEO_SHEET, HEADCOUNT_SHEET, PAYBAND_SHEET, read_candidates,
    read_employees, read_exits, read_geo_entries,
};
pub use sheet::{Workbook, read_grid};
pub use table::RecordTable;
