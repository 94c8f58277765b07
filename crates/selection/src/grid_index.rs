//! Bidirectional row/column id ↔ position mapping for the current layout.
//!
//! Rebuilt by the owning view whenever the visible row or column set
//! changes (expand/collapse, filter, page load). Registration replaces all
//! four maps at once; there is no partial update.

use rustc_hash::FxHashMap;

use crate::cell_key::CellKey;

#[derive(Clone, Debug, Default)]
pub struct GridIndex {
    row_to_index: FxHashMap<String, usize>,
    index_to_row: Vec<String>,
    col_to_index: FxHashMap<String, usize>,
    index_to_col: Vec<String>,
}

impl GridIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from ordered row and column ids.
    pub fn from_ids<R, C>(rows: R, cols: C) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut index = Self::new();
        index.register(rows, cols);
        index
    }

    /// Replace the whole layout.
    ///
    /// Callers are expected to supply unique ids. With duplicates, id→index
    /// keeps the last position while index→id stays positional.
    pub fn register<R, C>(&mut self, rows: R, cols: C)
    where
        R: IntoIterator,
        R::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let index_to_row: Vec<String> = rows.into_iter().map(Into::into).collect();
        let index_to_col: Vec<String> = cols.into_iter().map(Into::into).collect();

        let row_to_index = Self::build_lookup(&index_to_row, "row");
        let col_to_index = Self::build_lookup(&index_to_col, "column");

        *self = Self { row_to_index, index_to_row, col_to_index, index_to_col };
    }

    fn build_lookup(ids: &[String], axis: &str) -> FxHashMap<String, usize> {
        let mut lookup = FxHashMap::with_capacity_and_hasher(ids.len(), Default::default());
        for (i, id) in ids.iter().enumerate() {
            if lookup.insert(id.clone(), i).is_some() {
                log::warn!("duplicate {} id {:?} registered; last position wins", axis, id);
            }
        }
        lookup
    }

    /// (row index, col index) of a cell, or None if either id is unknown.
    pub fn position_of(&self, cell: &CellKey) -> Option<(usize, usize)> {
        Some((self.row_index(&cell.row)?, self.col_index(&cell.col)?))
    }

    #[inline]
    pub fn row_index(&self, row: &str) -> Option<usize> {
        self.row_to_index.get(row).copied()
    }

    #[inline]
    pub fn col_index(&self, col: &str) -> Option<usize> {
        self.col_to_index.get(col).copied()
    }

    #[inline]
    pub fn row_id_at(&self, index: usize) -> Option<&str> {
        self.index_to_row.get(index).map(String::as_str)
    }

    #[inline]
    pub fn col_id_at(&self, index: usize) -> Option<&str> {
        self.index_to_col.get(index).map(String::as_str)
    }

    pub fn row_count(&self) -> usize {
        self.index_to_row.len()
    }

    /// Number of distinct row ids; smaller than `row_count` with duplicates.
    pub fn distinct_row_count(&self) -> usize {
        self.row_to_index.len()
    }

    pub fn col_count(&self) -> usize {
        self.index_to_col.len()
    }

    pub fn row_ids(&self) -> &[String] {
        &self.index_to_row
    }

    pub fn col_ids(&self) -> &[String] {
        &self.index_to_col
    }

    pub fn is_empty(&self) -> bool {
        self.index_to_row.is_empty() || self.index_to_col.is_empty()
    }

    /// Key for the cell at (row index, col index), if both are in range.
    pub fn key_at(&self, row: usize, col: usize) -> Option<CellKey> {
        Some(CellKey::new(self.row_id_at(row)?, self.col_id_at(col)?))
    }
}
