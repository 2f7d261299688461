//! Type-safe enumerations shared across the pipeline.
//!
//! These enums replace the bare strings the source workbook uses for
//! seniority tiers, role classification, and tenure buckets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CompError;

/// Seniority tier sub-dividing a level's pay band.
///
/// Tiers always appear left-to-right as Early, Seasoned, Veteran in
/// the payband sheet, and carry stable 1-based ids in the payband
/// artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Seniority {
    Early,
    Seasoned,
    Veteran,
}

impl Seniority {
    /// All tiers in sub-column order.
    pub const ALL: [Seniority; 3] = [Seniority::Early, Seniority::Seasoned, Seniority::Veteran];

    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Early => "Early",
            Seniority::Seasoned => "Seasoned",
            Seniority::Veteran => "Veteran",
        }
    }

    /// Stable 1-based id used in the payband artifact.
    pub fn id(&self) -> u8 {
        match self {
            Seniority::Early => 1,
            Seniority::Seasoned => 2,
            Seniority::Veteran => 3,
        }
    }

    /// Column offset within a block's data span (Early first).
    pub fn column_offset(&self) -> usize {
        self.id() as usize - 1
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Seniority {
    type Err = CompError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Early" => Ok(Seniority::Early),
            "Seasoned" => Ok(Seniority::Seasoned),
            "Veteran" => Ok(Seniority::Veteran),
            other => Err(CompError::UnknownSeniority(other.to_string())),
        }
    }
}

/// Tech vs non-tech classification driving geo factor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleType {
    Tech,
    NonTech,
}

impl RoleType {
    /// Classify a free-text role-type label. Only the literal "tech"
    /// (case-insensitive) selects the tech factor; everything else,
    /// including quota-carrying roles, uses the non-tech factor.
    pub fn classify(label: &str) -> RoleType {
        if label.trim().eq_ignore_ascii_case("tech") {
            RoleType::Tech
        } else {
            RoleType::NonTech
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::Tech => "Tech",
            RoleType::NonTech => "Non-Tech",
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bucketed categorization of elapsed employment duration.
///
/// Bucket boundaries are inclusive on the upper bound: exactly 90
/// elapsed days is still "0-90 days".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenureRange {
    ZeroToNinetyDays,
    ThreeToSixMonths,
    SixToTwelveMonths,
    OneToTwoYears,
    TwoToFiveYears,
    FivePlusYears,
    FutureStartDate,
    InvalidDate,
    Unknown,
}

impl TenureRange {
    /// Bucket elapsed calendar days. Negative values mean the start
    /// date lies in the future.
    pub fn from_elapsed_days(days: i64) -> TenureRange {
        if days < 0 {
            TenureRange::FutureStartDate
        } else if days <= 90 {
            TenureRange::ZeroToNinetyDays
        } else if days <= 180 {
            TenureRange::ThreeToSixMonths
        } else if days <= 365 {
            TenureRange::SixToTwelveMonths
        } else if days <= 730 {
            TenureRange::OneToTwoYears
        } else if days <= 1825 {
            TenureRange::TwoToFiveYears
        } else {
            TenureRange::FivePlusYears
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TenureRange::ZeroToNinetyDays => "0-90 days",
            TenureRange::ThreeToSixMonths => "3-6 months",
            TenureRange::SixToTwelveMonths => "6-12 months",
            TenureRange::OneToTwoYears => "1-2 years",
            TenureRange::TwoToFiveYears => "2-5 years",
            TenureRange::FivePlusYears => "5+ years",
            TenureRange::FutureStartDate => "Future Start Date",
            TenureRange::InvalidDate => "Invalid Date",
            TenureRange::Unknown => "Unknown",
        }
    }

    /// Display order for breakdowns: real buckets shortest-first, then
    /// the defect buckets.
    pub fn sort_order(&self) -> u8 {
        match self {
            TenureRange::ZeroToNinetyDays => 1,
            TenureRange::ThreeToSixMonths => 2,
            TenureRange::SixToTwelveMonths => 3,
            TenureRange::OneToTwoYears => 4,
            TenureRange::TwoToFiveYears => 5,
            TenureRange::FivePlusYears => 6,
            TenureRange::Unknown => 7,
            TenureRange::InvalidDate => 8,
            TenureRange::FutureStartDate => 9,
        }
    }
}

impl fmt::Display for TenureRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
