//! Payband block extraction.
//!
//! The payband sheet lays roles out side by side: a role-name anchor
//! in the header row, one separator column, then up to three seniority
//! sub-columns (Early, Seasoned, Veteran). Two detection strategies
//! exist because the sheet's authors were not consistent about merged
//! header cells; both produce the same [`PaybandBlock`] descriptors on
//! well-formed sheets.

use tracing::warn;

use comp_model::{CellGrid, PaybandBlock};

/// Header row carrying the role-name anchors.
const HEADER_ROW: usize = 0;
/// Row carrying the Early/Seasoned/Veteran sub-headers.
const SUBHEADER_ROW: usize = 1;
/// Columns between a role anchor and its first data column.
const ANCHOR_TO_DATA_OFFSET: usize = 2;

/// How role blocks are located within the payband sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockDetection {
    /// Anchor on non-placeholder header cells, span to the next anchor.
    #[default]
    HeaderAnchor,
    /// Anchor on "Early" cells in the sub-header row, fixed triad span.
    TriadScan,
}

impl BlockDetection {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockDetection::HeaderAnchor => "header-anchor",
            BlockDetection::TriadScan => "triad-scan",
        }
    }
}

/// Spreadsheet-export artifacts ("Unnamed: 3") and blanks are not
/// role anchors.
fn is_placeholder(text: Option<&str>) -> bool {
    match text {
        None => true,
        Some(value) => value.starts_with("Unnamed"),
    }
}

/// Extract role blocks with the configured strategy.
///
/// Both strategies always run; when they disagree on block boundaries
/// the divergence is logged and the configured strategy's answer is
/// used. Blocks come back in left-to-right column order with disjoint
/// data ranges.
pub fn extract_blocks(grid: &CellGrid, detection: BlockDetection) -> Vec<PaybandBlock> {
    let by_anchor = extract_by_header_anchor(grid);
    let by_triad = extract_by_triad_scan(grid);
    if by_anchor != by_triad {
        warn!(
            header_anchor_blocks = by_anchor.len(),
            triad_scan_blocks = by_triad.len(),
            chosen = detection.as_str(),
            "block detection strategies disagree on this sheet"
        );
    }
    match detection {
        BlockDetection::HeaderAnchor => by_anchor,
        BlockDetection::TriadScan => by_triad,
    }
}

/// Header-anchor strategy: every non-placeholder header cell starts a
/// role; its data span runs from two columns right of the anchor up to
/// the column before the next anchor (or the sheet edge).
fn extract_by_header_anchor(grid: &CellGrid) -> Vec<PaybandBlock> {
    if grid.is_empty() {
        return Vec::new();
    }
    let anchors: Vec<(usize, String)> = (0..grid.width())
        .filter_map(|col| {
            let text = grid.text(HEADER_ROW, col);
            if is_placeholder(text) {
                None
            } else {
                text.map(|name| (col, name.to_string()))
            }
        })
        .collect();

    let mut blocks = Vec::with_capacity(anchors.len());
    for (idx, (anchor_col, role_name)) in anchors.iter().enumerate() {
        let data_start_col = anchor_col + ANCHOR_TO_DATA_OFFSET;
        let next_anchor = anchors.get(idx + 1).map(|(col, _)| *col);
        let data_end_col = match next_anchor {
            Some(col) => col.saturating_sub(1),
            None => grid.width().saturating_sub(1),
        };
        if data_start_col > data_end_col {
            warn!(role = %role_name, "role anchor has no data columns, skipped");
            continue;
        }
        blocks.push(PaybandBlock {
            role_name: role_name.clone(),
            role_anchor_col: *anchor_col,
            data_start_col,
            data_end_col,
        });
    }
    blocks
}

/// Triad-scan strategy: every "Early" cell in the sub-header row marks
/// a block's first data column; the role name comes from the header
/// cell two columns to the left.
fn extract_by_triad_scan(grid: &CellGrid) -> Vec<PaybandBlock> {
    if grid.height() <= SUBHEADER_ROW {
        return Vec::new();
    }
    let early_cols: Vec<usize> = (0..grid.width())
        .filter(|col| {
            grid.text(SUBHEADER_ROW, *col)
                .is_some_and(|text| text.eq_ignore_ascii_case("Early"))
        })
        .collect();

    let mut blocks = Vec::with_capacity(early_cols.len());
    for (idx, data_start_col) in early_cols.iter().copied().enumerate() {
        let Some(role_anchor_col) = data_start_col.checked_sub(ANCHOR_TO_DATA_OFFSET) else {
            warn!(column = data_start_col, "Early sub-header too far left, skipped");
            continue;
        };
        let role_name = match grid.text(HEADER_ROW, role_anchor_col) {
            Some(name) if !is_placeholder(Some(name)) => name.to_string(),
            _ => {
                warn!(column = role_anchor_col, "Early triad has no role anchor, skipped");
                continue;
            }
        };
        // The triad is nominally three wide but never crosses into the
        // next block or past the sheet edge.
        let mut data_end_col = (data_start_col + 2).min(grid.width().saturating_sub(1));
        if let Some(next_start) = early_cols.get(idx + 1) {
            data_end_col = data_end_col.min(next_start.saturating_sub(ANCHOR_TO_DATA_OFFSET + 1));
        }
        if data_start_col > data_end_col {
            continue;
        }
        blocks.push(PaybandBlock {
            role_name,
            role_anchor_col,
            data_start_col,
            data_end_col,
        });
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::{BlockDetection, extract_blocks};
    use comp_model::{Cell, CellGrid};

    fn text(value: &str) -> Cell {
        Cell::Text(value.to_string())
    }

    fn sheet() -> CellGrid {
        // Two roles: anchor, separator, then the seniority triad.
        CellGrid::new(vec![
            vec![
                text("Engineering"),
                Cell::Empty,
                text("Unnamed: 2"),
                Cell::Empty,
                Cell::Empty,
                text("Finance"),
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
            ],
            vec![
                Cell::Empty,
                Cell::Empty,
                text("Early"),
                text("Seasoned"),
                text("Veteran"),
                Cell::Empty,
                Cell::Empty,
                text("Early"),
                text("Seasoned"),
                text("Veteran"),
            ],
        ])
    }

    #[test]
    fn header_anchor_finds_both_roles() {
        let blocks = extract_blocks(&sheet(), BlockDetection::HeaderAnchor);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].role_name, "Engineering");
        assert_eq!(blocks[0].data_start_col, 2);
        assert_eq!(blocks[0].data_end_col, 4);
        assert_eq!(blocks[1].role_name, "Finance");
        assert_eq!(blocks[1].data_start_col, 7);
        assert_eq!(blocks[1].data_end_col, 9);
    }

    #[test]
    fn strategies_agree_on_well_formed_sheets() {
        let grid = sheet();
        assert_eq!(
            extract_blocks(&grid, BlockDetection::HeaderAnchor),
            extract_blocks(&grid, BlockDetection::TriadScan)
        );
    }

    #[test]
    fn blocks_never_overlap() {
        let blocks = extract_blocks(&sheet(), BlockDetection::HeaderAnchor);
        for pair in blocks.windows(2) {
            assert!(pair[0].data_end_col < pair[1].data_start_col);
        }
    }

    #[test]
    fn narrow_trailing_block_is_kept() {
        // Finance only has one usable data column before the edge.
        let grid = CellGrid::new(vec![
            vec![text("Engineering"), Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty, text("Finance"), Cell::Empty, Cell::Empty],
            vec![Cell::Empty, Cell::Empty, text("Early"), text("Seasoned"), text("Veteran"), Cell::Empty, Cell::Empty, text("Early")],
        ]);
        let blocks = extract_blocks(&grid, BlockDetection::HeaderAnchor);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].data_start_col, 7);
        assert_eq!(blocks[1].data_end_col, 7);
        assert_eq!(blocks[1].data_width(), 1);
    }

    #[test]
    fn empty_grid_yields_no_blocks() {
        let grid = CellGrid::new(Vec::new());
        assert!(extract_blocks(&grid, BlockDetection::HeaderAnchor).is_empty());
        assert!(extract_blocks(&grid, BlockDetection::TriadScan).is_empty());
    }
}
