//! Row-level selection on top of the cell selection.
//!
//! One reserved column id marks "row selected": the cell (row, overlay
//! column) is in the selection iff the row is. Row questions are answered
//! by scanning those cells; the row id list is memoized per store version.

use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::cell_key::CellKey;
use crate::cell_set::CellSet;
use crate::store::SelectionStore;

/// The reserved row-selection column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOverlayPolicy {
    column: String,
}

impl RowOverlayPolicy {
    pub fn new(column: impl Into<String>) -> Self {
        Self { column: column.into() }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    #[inline]
    pub fn is_overlay(&self, cell: &CellKey) -> bool {
        cell.col == self.column
    }

    /// The overlay cell standing for `row`.
    pub fn cell_for(&self, row: &str) -> CellKey {
        CellKey::new(row, self.column.as_str())
    }

    /// Row ids of the overlay cells in `selected`, in discovery order.
    pub fn row_ids(&self, selected: &CellSet) -> Vec<String> {
        selected
            .iter_ordered()
            .filter(|cell| self.is_overlay(cell))
            .map(|cell| cell.row.clone())
            .collect()
    }
}

/// Memoized `selected_row_ids` result.
#[derive(Debug)]
pub(crate) struct RowCache {
    /// Store version the cached list was checked against
    checked_at: Option<u64>,
    rows: Rc<[String]>,
    /// Bumped only when the row set really changed
    generation: u64,
}

impl Default for RowCache {
    fn default() -> Self {
        Self { checked_at: None, rows: Rc::from(Vec::new()), generation: 0 }
    }
}

/// Same elements regardless of order.
fn same_rows(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let seen: FxHashSet<&str> = a.iter().map(String::as_str).collect();
    b.iter().all(|row| seen.contains(row.as_str()))
}

impl SelectionStore {
    pub fn row_overlay(&self) -> &RowOverlayPolicy {
        &self.overlay
    }

    pub fn is_row_selected(&self, row: &str) -> bool {
        self.selected.contains(&self.overlay.cell_for(row))
    }

    /// Selected row ids in discovery order.
    ///
    /// The returned `Rc` stays the same allocation as long as the set of
    /// selected rows is unchanged, even across unrelated cell mutations or
    /// reorderings, so consumers can skip work with `Rc::ptr_eq`.
    pub fn selected_row_ids(&self) -> Rc<[String]> {
        let mut cache = self.row_cache.borrow_mut();
        if cache.checked_at == Some(self.version) {
            return Rc::clone(&cache.rows);
        }

        let fresh = self.overlay.row_ids(&self.selected);
        if !same_rows(&cache.rows, &fresh) {
            cache.rows = Rc::from(fresh);
            cache.generation += 1;
        }
        cache.checked_at = Some(self.version);
        Rc::clone(&cache.rows)
    }

    /// Changes only when the set of selected rows changes.
    pub fn row_selection_version(&self) -> u64 {
        self.selected_row_ids();
        self.row_cache.borrow().generation
    }

    /// Number of rows of the current grid that are selected. Stale rows
    /// that are no longer registered do not count.
    fn registered_selected_rows(&self) -> usize {
        self.selected_row_ids()
            .iter()
            .filter(|row| self.grid().row_index(row).is_some())
            .count()
    }

    /// Compared against distinct row ids, so a duplicated id counts once.
    pub fn are_all_rows_selected(&self) -> bool {
        let total = self.grid().distinct_row_count();
        total > 0 && self.registered_selected_rows() >= total
    }

    pub fn are_some_rows_selected(&self) -> bool {
        let count = self.registered_selected_rows();
        count > 0 && count < self.grid().distinct_row_count()
    }

    /// Select every registered row; anchor and focus move to the first row.
    pub fn select_all_rows(&mut self) {
        let Some(first) = self.grid().row_id_at(0).map(|row| self.overlay.cell_for(row)) else {
            return;
        };
        let focus_before = self.focused().cloned();

        let cells: Vec<CellKey> =
            self.grid().row_ids().iter().map(|row| self.overlay.cell_for(row)).collect();
        for cell in cells {
            self.insert_cell(cell);
        }
        self.set_anchor(Some(first.clone()));
        self.set_focus(Some(first));

        self.finish(focus_before);
    }

    /// Remove only row-overlay cells.
    pub fn clear_row_selection(&mut self) {
        let focus_before = self.focused().cloned();
        let overlay = self.overlay.clone();
        self.remove_cells(|cell| overlay.is_overlay(cell));
        self.finish(focus_before);
    }
}
