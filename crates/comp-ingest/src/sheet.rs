//! Sheet loading: one named sheet of the workbook into a [`CellGrid`].
//!
//! The workbook collaborator contract is deliberately thin: a
//! directory holding one CSV file per sheet, named `<Sheet Name>.csv`.
//! Nothing downstream depends on the file format, only on the grid.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use tracing::debug;

use comp_model::{Cell, CellGrid, CompError};

/// A workbook exported as per-sheet CSV files in one directory.
#[derive(Debug, Clone)]
pub struct Workbook {
    dir: PathBuf,
}

impl Workbook {
    pub fn open(dir: impl Into<PathBuf>) -> comp_model::Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(CompError::WorkbookDirMissing(dir));
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn sheet_path(&self, sheet_name: &str) -> PathBuf {
        self.dir.join(format!("{sheet_name}.csv"))
    }

    pub fn has_sheet(&self, sheet_name: &str) -> bool {
        self.sheet_path(sheet_name).is_file()
    }

    /// Read a named sheet into an immutable cell grid. Missing sheets
    /// are fatal; the caller owns the message taxonomy.
    pub fn read_sheet(&self, sheet_name: &str) -> Result<CellGrid> {
        let path = self.sheet_path(sheet_name);
        if !path.is_file() {
            bail!("sheet '{sheet_name}' not found: {}", path.display());
        }
        let grid = read_grid(&path)?;
        debug!(
            sheet = %sheet_name,
            rows = grid.height(),
            columns = grid.width(),
            "sheet loaded"
        );
        Ok(grid)
    }
}

/// Read a CSV file positionally into a grid, preserving blank rows so
/// row offsets match the source sheet.
pub fn read_grid(path: &Path) -> Result<CellGrid> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read sheet: {}", path.display()))?;
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        rows.push(record.iter().map(classify_cell).collect());
    }
    Ok(CellGrid::new(rows))
}

/// Classify a raw CSV field: blank -> Empty, numeric -> Number,
/// anything else -> trimmed Text. Thousands separators are left to
/// the payband cleaner; "1,200" stays text here.
fn classify_cell(raw: &str) -> Cell {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Cell::Number(value),
        _ => Cell::Text(trimmed.to_string()),
    }
}
