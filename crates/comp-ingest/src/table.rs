//! Header-keyed view over a cell grid.
//!
//! The flat sheets (candidates, geo factors, headcount, exits) all
//! follow the same shape: header row first, one record per row below.
//! `RecordTable` resolves columns by normalized header name so the
//! readers never touch raw column offsets.

use comp_model::CellGrid;

#[derive(Debug, Clone)]
pub struct RecordTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

impl RecordTable {
    /// Treat row 0 of the grid as headers and the rest as records.
    /// Fully blank rows are skipped; ragged rows are padded.
    pub fn from_grid(grid: &CellGrid) -> Self {
        if grid.is_empty() {
            return Self {
                headers: Vec::new(),
                rows: Vec::new(),
            };
        }
        let headers: Vec<String> = (0..grid.width())
            .map(|col| normalize_header(&grid.cell(0, col).display()))
            .collect();
        let mut rows = Vec::new();
        for row_idx in 1..grid.height() {
            let row: Vec<String> = (0..headers.len())
                .map(|col| grid.cell(row_idx, col).display().trim().to_string())
                .collect();
            if row.iter().all(std::string::String::is_empty) {
                continue;
            }
            rows.push(row);
        }
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Exact header match, case-insensitive.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }

    /// First header containing the fragment, case-insensitive. Used
    /// for the workbook's long descriptive headers.
    pub fn column_containing(&self, fragment: &str) -> Option<usize> {
        let needle = fragment.to_lowercase();
        self.headers
            .iter()
            .position(|header| header.to_lowercase().contains(&needle))
    }

    /// Non-blank value at (row, column); `None` for blanks.
    pub fn value(&self, row: usize, col: Option<usize>) -> Option<&str> {
        let col = col?;
        let value = self.rows.get(row)?.get(col)?.as_str();
        if value.is_empty() { None } else { Some(value) }
    }

    pub fn value_owned(&self, row: usize, col: Option<usize>) -> Option<String> {
        self.value(row, col).map(str::to_string)
    }
}
