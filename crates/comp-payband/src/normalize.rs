//! Payband table normalization.
//!
//! Level rows are located once per sheet: a level marker ("L4", "M2")
//! sits in one of the sheet's leftmost columns with a "... cash ..."
//! description next to it, and drives every role block on that row.
//! The four stacked rows below and including it carry cash base,
//! equity value, equity units, and annual total, replicated across
//! each block's seniority sub-columns.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use comp_model::{Cell, CellGrid, PaybandBlock, PaybandRecord, Seniority};

/// First data row: below the header and sub-header rows.
const DATA_START_ROW: usize = 2;
/// Stacked value rows per level: cash base, equity value, equity
/// units, annual total.
const ROWS_PER_LEVEL: usize = 4;
/// Leftmost columns scanned for the shared level marker.
const LEVEL_SCAN_COLS: usize = 5;

static LEVEL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[LM]{1,2}\d+$").expect("level code pattern is valid"));

/// Outcome of cleaning one raw cell into an integer amount.
///
/// `defaulted` distinguishes a genuine zero in the sheet from a blank
/// or unparseable cell coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanedNumber {
    pub value: i64,
    pub defaulted: bool,
}

/// Clean a raw payband cell: strip currency symbols and thousands
/// separators, parse, truncate to integer. Missing or unparseable
/// cells default to zero.
pub fn clean_numeric(cell: &Cell) -> CleanedNumber {
    match cell {
        Cell::Empty => CleanedNumber {
            value: 0,
            defaulted: true,
        },
        Cell::Number(value) => CleanedNumber {
            value: *value as i64,
            defaulted: false,
        },
        Cell::Text(raw) => {
            let cleaned: String = raw
                .chars()
                .filter(|ch| !matches!(ch, ',' | '$' | ' '))
                .collect();
            match cleaned.parse::<f64>() {
                Ok(value) if value.is_finite() => CleanedNumber {
                    value: value as i64,
                    defaulted: false,
                },
                _ => CleanedNumber {
                    value: 0,
                    defaulted: true,
                },
            }
        }
    }
}

/// Normalized payband table plus the cleaning tallies the run summary
/// reports.
#[derive(Debug, Clone, Default)]
pub struct NormalizedTable {
    pub records: Vec<PaybandRecord>,
    /// Cells coerced to zero during cleaning.
    pub defaulted_cells: usize,
    /// Records dropped because their identity key already existed.
    pub duplicate_keys: usize,
    /// Records dropped because no headline figure was positive.
    pub empty_bands: usize,
}

/// Normalize all blocks into one payband table.
///
/// Records are emitted block by block, levels top-to-bottom, tiers in
/// Early/Seasoned/Veteran order, so a re-run over the same grid is
/// byte-identical. First occurrence wins on duplicate keys.
pub fn normalize_blocks(grid: &CellGrid, blocks: &[PaybandBlock]) -> NormalizedTable {
    let mut table = NormalizedTable::default();
    let mut seen_keys: HashSet<(String, String, Seniority)> = HashSet::new();
    let levels = detect_level_rows(grid);

    for block in blocks {
        for (level_row, level_code) in &levels {
            normalize_level(grid, block, *level_row, level_code, &mut table, &mut seen_keys);
        }
    }
    debug!(
        records = table.records.len(),
        defaulted_cells = table.defaulted_cells,
        duplicate_keys = table.duplicate_keys,
        empty_bands = table.empty_bands,
        "payband table normalized"
    );
    table
}

/// Locate the level rows once for the whole sheet. The marker column
/// is shared by every role block; only the values differ per block.
fn detect_level_rows(grid: &CellGrid) -> Vec<(usize, String)> {
    let mut levels = Vec::new();
    let mut row = DATA_START_ROW;
    while row < grid.height() {
        let Some(level_code) = level_marker(grid, row) else {
            row += 1;
            continue;
        };
        // Partial levels at the sheet bottom are dropped, not errors.
        if row + ROWS_PER_LEVEL > grid.height() {
            warn!(
                level = %level_code,
                "level rows run past the sheet edge, level dropped"
            );
            break;
        }
        levels.push((row, level_code));
        row += ROWS_PER_LEVEL;
    }
    levels
}

fn normalize_level(
    grid: &CellGrid,
    block: &PaybandBlock,
    level_row: usize,
    level_code: &str,
    table: &mut NormalizedTable,
    seen_keys: &mut HashSet<(String, String, Seniority)>,
) {
    let level_id = parse_level_id(level_code);
    for seniority in Seniority::ALL {
        let record = read_tier(grid, block, level_row, level_code, level_id, seniority, table);
        if !record.has_meaningful_data() {
            table.empty_bands += 1;
            continue;
        }
        let key = (
            record.role_category.clone(),
            record.level_code.clone(),
            record.seniority,
        );
        if seen_keys.insert(key) {
            table.records.push(record);
        } else {
            table.duplicate_keys += 1;
        }
    }
}

/// A level row carries a level code somewhere in the sheet's first few
/// columns with a description mentioning "cash" in the column next to
/// it. Blocks anchored further right share the marker.
fn level_marker(grid: &CellGrid, row: usize) -> Option<String> {
    for col in 0..LEVEL_SCAN_COLS.min(grid.width()) {
        let Some(code) = grid.text(row, col) else {
            continue;
        };
        if !LEVEL_CODE.is_match(code) {
            continue;
        }
        if let Some(description) = grid.text(row, col + 1)
            && description.to_lowercase().contains("cash")
        {
            return Some(code.to_string());
        }
    }
    None
}

fn read_tier(
    grid: &CellGrid,
    block: &PaybandBlock,
    level_row: usize,
    level_code: &str,
    level_id: u32,
    seniority: Seniority,
    table: &mut NormalizedTable,
) -> PaybandRecord {
    let mut figure = |offset: usize| -> i64 {
        // Tiers past the block's edge read as missing cells.
        let Some(col) = block.seniority_col(seniority) else {
            return 0;
        };
        let cleaned = clean_numeric(grid.cell(level_row + offset, col));
        if cleaned.defaulted {
            table.defaulted_cells += 1;
        }
        cleaned.value
    };
    PaybandRecord {
        role_category: block.role_name.clone(),
        level_id,
        level_code: level_code.to_string(),
        seniority,
        cash_base: figure(0),
        equity_value: figure(1),
        equity_units: figure(2),
        annual_total: figure(3),
    }
}

/// Numeric suffix of a level code ("L12" -> 12). The marker regex
/// guarantees the suffix exists.
fn parse_level_id(level_code: &str) -> u32 {
    level_code
        .chars()
        .skip_while(|ch| ch.is_ascii_alphabetic())
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}
