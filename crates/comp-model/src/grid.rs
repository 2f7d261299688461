//! Raw cell grid produced by the sheet reader.
//!
//! A `CellGrid` is the immutable, positionally-indexed view of one
//! workbook sheet. It carries no layout knowledge; the payband
//! extractor and the record builders interpret positions on top of it.

use serde::{Deserialize, Serialize};

/// A single raw cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Missing or blank cell.
    #[default]
    Empty,
    /// Textual content, already trimmed by the reader.
    Text(String),
    /// Numeric content.
    Number(f64),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Textual view of the cell, `None` when empty.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Numeric view of the cell, `None` when empty or non-numeric text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            Cell::Text(value) => value.trim().parse::<f64>().ok(),
            Cell::Empty => None,
        }
    }

    /// Renders the cell the way it appeared in the source: numbers
    /// without a trailing `.0`, empty cells as an empty string.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(value) => value.clone(),
            Cell::Number(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{}", *value as i64)
                } else {
                    format!("{value}")
                }
            }
        }
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

/// Immutable 2-D grid of raw cells indexed by `(row, column)`.
///
/// Out-of-range reads return [`Cell::Empty`] rather than panicking;
/// the normalizer relies on this when a block's sub-columns run past
/// the sheet edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellGrid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl CellGrid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(std::vec::Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Trimmed textual content at `(row, col)`; `None` when the cell
    /// is empty or whitespace-only.
    pub fn text(&self, row: usize, col: usize) -> Option<&str> {
        let text = self.cell(row, col).as_text()?;
        let trimmed = text.trim();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }

    pub fn number(&self, row: usize, col: usize) -> Option<f64> {
        self.cell(row, col).as_number()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, CellGrid};

    #[test]
    fn out_of_range_reads_are_empty() {
        let grid = CellGrid::new(vec![vec![Cell::Text("a".to_string())]]);
        assert!(grid.cell(0, 5).is_empty());
        assert!(grid.cell(9, 0).is_empty());
        assert_eq!(grid.text(0, 0), Some("a"));
    }

    #[test]
    fn width_is_widest_row() {
        let grid = CellGrid::new(vec![
            vec![Cell::Empty, Cell::Empty],
            vec![Cell::Number(1.0), Cell::Number(2.0), Cell::Number(3.0)],
        ]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn numeric_text_coerces() {
        assert_eq!(Cell::Text(" 42 ".to_string()).as_number(), Some(42.0));
        assert_eq!(Cell::Text("n/a".to_string()).as_number(), None);
        assert_eq!(Cell::Number(120000.0).display(), "120000");
    }
}
