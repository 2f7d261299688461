//! Payband sheet reconstruction.
//!
//! Turns the visually-formatted payband sheet into a normalized table
//! of (role, level, seniority) compensation records, in two passes:
//! block extraction locates structure, normalization reads values.

pub mod blocks;
pub mod normalize;

pub use blocks::{BlockDetection, extract_blocks};
pub use normalize::{CleanedNumber, NormalizedTable, clean_numeric, normalize_blocks};
