//! Rectangular range computation between two cell positions.

use crate::cell_key::{CellKey, CellPosition};
use crate::cell_set::CellSet;
use crate::grid_index::GridIndex;

/// Resolve a position to (row, col) indices. An unresolved axis falls back
/// to index 0 independently of the other axis.
pub fn resolve_or_origin(grid: &GridIndex, pos: &CellPosition) -> (usize, usize) {
    (
        grid.row_index(&pos.row).unwrap_or(0),
        grid.col_index(&pos.col).unwrap_or(0),
    )
}

/// All cells in the rectangle spanned by `start` and `end`, inclusive,
/// inserted in row-major order.
///
/// Indices that no longer map back to an id are skipped, so the result can
/// be smaller than the rectangle when the grid shrank since `start` was set.
pub fn compute_range(grid: &GridIndex, start: &CellPosition, end: &CellPosition) -> CellSet {
    let (r1, c1) = resolve_or_origin(grid, start);
    let (r2, c2) = resolve_or_origin(grid, end);
    let (min_row, max_row) = (r1.min(r2), r1.max(r2));
    let (min_col, max_col) = (c1.min(c2), c1.max(c2));

    let cols: Vec<&str> = (min_col..=max_col).filter_map(|c| grid.col_id_at(c)).collect();

    let mut cells = CellSet::new();
    for row in (min_row..=max_row).filter_map(|r| grid.row_id_at(r)) {
        cells.extend(cols.iter().map(|col| CellKey::new(row, *col)));
    }
    cells
}
