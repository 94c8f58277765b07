//! SelectionStore: the authoritative selection state for one grid view.
//!
//! ## State
//!
//! ```text
//! selected ── set of selected cells (insertion ordered)
//! anchor ──── fixed end of the current/most recent range gesture
//! focused ─── keyboard cell; always a member of `selected` when set
//! in_progress ── true between start_selection and end_selection
//! ```
//!
//! Every public mutation runs to completion, re-establishes the focus
//! invariant, bumps `version` if anything observable changed and then
//! notifies subscribers. Callbacks receive only the event, so they cannot
//! re-enter the store during a mutation.
//!
//! Row-overlay cells (the reserved row-selection column) survive any
//! operation that replaces the selection for another column; only
//! `clear_selection` and `clear_row_selection` remove them.

use std::cell::RefCell;

use crate::border::{borders_of, BorderMask};
use crate::cell_key::{CellKey, CellPosition};
use crate::cell_set::CellSet;
use crate::events::{SelectionCallback, SelectionEvent, SubscriptionId};
use crate::grid_index::GridIndex;
use crate::range::{compute_range, resolve_or_origin};
use crate::rows::{RowCache, RowOverlayPolicy};

/// Reserved column id for row selection when none is configured.
pub const DEFAULT_ROW_OVERLAY_COL: &str = "__row__";

/// Engine configuration, fixed for the lifetime of a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Column id whose cells mean "this row is selected".
    pub row_overlay_col: String,
    /// Label columns where clicking the only selected cell deselects it.
    pub primary_cols: Vec<String>,
    /// Whether a plain `select_cell` keeps row-overlay entries.
    /// `false` reproduces the older asymmetric behavior.
    pub select_cell_preserves_rows: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            row_overlay_col: DEFAULT_ROW_OVERLAY_COL.to_string(),
            primary_cols: vec!["name".to_string()],
            select_cell_preserves_rows: true,
        }
    }
}

/// Keyboard navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

pub struct SelectionStore {
    grid: GridIndex,
    options: SelectionOptions,
    pub(crate) overlay: RowOverlayPolicy,

    pub(crate) selected: CellSet,
    anchor: Option<CellPosition>,
    focused: Option<CellKey>,
    in_progress: bool,

    /// Incremented once per mutation that changed selected/anchor/focus
    pub(crate) version: u64,
    /// Set by the mutation helpers, consumed by `finish`
    dirty: bool,

    listeners: Vec<(SubscriptionId, SelectionCallback)>,
    next_subscription: u64,

    pub(crate) row_cache: RefCell<RowCache>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new(SelectionOptions::default())
    }
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("rows", &self.grid.row_count())
            .field("cols", &self.grid.col_count())
            .field("selected", &self.selected.len())
            .field("anchor", &self.anchor)
            .field("focused", &self.focused)
            .field("in_progress", &self.in_progress)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SelectionStore {
    pub fn new(options: SelectionOptions) -> Self {
        let overlay = RowOverlayPolicy::new(options.row_overlay_col.clone());
        Self {
            grid: GridIndex::new(),
            options,
            overlay,
            selected: CellSet::new(),
            anchor: None,
            focused: None,
            in_progress: false,
            version: 0,
            dirty: false,
            listeners: Vec::new(),
            next_subscription: 0,
            row_cache: RefCell::new(RowCache::default()),
        }
    }

    // =========================================================================
    // Observers
    // =========================================================================

    pub fn subscribe(&mut self, callback: impl FnMut(&SelectionEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: SelectionEvent) {
        for (_, callback) in self.listeners.iter_mut() {
            callback(&event);
        }
    }

    // =========================================================================
    // Grid layout
    // =========================================================================

    /// Replace the row/column layout. Selection, anchor and focus are kept;
    /// entries for rows that disappeared become inert.
    pub fn register_grid<R, C>(&mut self, rows: R, cols: C)
    where
        R: IntoIterator,
        R::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        self.grid.register(rows, cols);
        log::debug!(
            "grid registered: {} rows x {} cols",
            self.grid.row_count(),
            self.grid.col_count()
        );
        self.emit(SelectionEvent::GridRegistered {
            rows: self.grid.row_count(),
            cols: self.grid.col_count(),
        });
    }

    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Pointer down on `cell`.
    ///
    /// Additive: toggles `cell`, anchors on it and starts a drag. Otherwise
    /// selects `cell` alone (keeping row-overlay entries), anchors on it and
    /// starts a drag; clicking the only selected cell of a primary or overlay
    /// column clears everything instead.
    pub fn start_selection(&mut self, cell: CellKey, additive: bool) {
        let focus_before = self.focused.clone();

        if additive {
            log::debug!("additive gesture started at {:?}", cell);
            self.set_anchor(Some(cell.clone()));
            self.toggle(cell);
            self.in_progress = true;
        } else if self.selected.is_exactly(&cell) && self.deselects_on_reclick(&cell.col) {
            log::debug!("re-click on {:?} clears selection", cell);
            self.reset();
        } else {
            log::debug!("gesture started at {:?}", cell);
            self.replace_preserving_rows(CellSet::from_iter([cell.clone()]));
            self.set_anchor(Some(cell.clone()));
            self.focused = Some(cell);
            self.in_progress = true;
        }

        self.finish(focus_before);
    }

    /// Pointer moved to `cell` with the button held.
    pub fn extend_selection(&mut self, cell: &CellKey) {
        if !self.in_progress {
            return;
        }
        let Some(anchor) = self.anchor.clone() else {
            return;
        };
        let focus_before = self.focused.clone();

        let range = compute_range(&self.grid, &anchor, cell);
        self.replace_preserving_rows(range);

        self.finish(focus_before);
    }

    /// Pointer up: commit the current range.
    pub fn end_selection(&mut self) {
        if !self.in_progress {
            return;
        }
        self.in_progress = false;
        log::debug!("gesture ended with {} cells", self.selected.len());
        self.emit(SelectionEvent::GestureEnded { version: self.version });
    }

    // =========================================================================
    // Programmatic / keyboard selection
    // =========================================================================

    /// Click or keyboard selection outside a drag.
    ///
    /// - `range` with an anchor: select the anchor..cell rectangle, merged into
    ///   the current selection when `additive`.
    /// - `additive`: toggle `cell`.
    /// - otherwise: select `cell` alone and anchor on it.
    pub fn select_cell(&mut self, cell: CellKey, additive: bool, range: bool) {
        let focus_before = self.focused.clone();

        match self.anchor.clone() {
            Some(anchor) if range => {
                let cells = compute_range(&self.grid, &anchor, &cell);
                if additive {
                    let mut merged = self.selected.clone();
                    merged.extend(cells.iter_ordered().cloned());
                    self.replace_selected(merged);
                } else {
                    self.replace_preserving_rows(cells);
                }
                self.focused = Some(cell);
            }
            _ if additive => self.toggle(cell),
            _ => {
                let next = CellSet::from_iter([cell.clone()]);
                if self.options.select_cell_preserves_rows {
                    self.replace_preserving_rows(next);
                } else {
                    self.replace_selected(next);
                }
                self.set_anchor(Some(cell.clone()));
                self.focused = Some(cell);
            }
        }

        self.finish(focus_before);
    }

    /// Set the focused cell without touching the selection.
    ///
    /// Focus must stay inside the selection, so a cell that is not selected
    /// is ignored. `None` always clears focus.
    pub fn focus_cell(&mut self, cell: Option<CellKey>) {
        if let Some(ref c) = cell {
            if !self.selected.contains(c) {
                log::debug!("ignoring focus on unselected cell {:?}", c);
                return;
            }
        }
        let focus_before = self.focused.clone();
        self.focused = cell;
        self.finish(focus_before);
    }

    /// Move focus one step, clamped to the grid. With `extend`, selects the
    /// range from the anchor to the new cell; otherwise selects it alone.
    pub fn move_focus(&mut self, direction: Direction, extend: bool) {
        if self.grid.is_empty() {
            return;
        }
        let (row, col) = self
            .focused
            .as_ref()
            .or(self.anchor.as_ref())
            .map(|origin| resolve_or_origin(&self.grid, origin))
            .unwrap_or((0, 0));

        let (d_row, d_col) = direction.delta();
        let max_row = self.grid.row_count() - 1;
        let max_col = self.grid.col_count() - 1;
        let new_row = (row as isize + d_row).clamp(0, max_row as isize) as usize;
        let new_col = (col as isize + d_col).clamp(0, max_col as isize) as usize;

        if let Some(target) = self.grid.key_at(new_row, new_col) {
            self.select_cell(target, false, extend);
        }
    }

    /// Discard the whole selection, anchor and focus.
    pub fn clear_selection(&mut self) {
        let focus_before = self.focused.clone();
        self.reset();
        self.finish(focus_before);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    #[inline]
    pub fn is_cell_selected(&self, cell: &CellKey) -> bool {
        self.selected.contains(cell)
    }

    #[inline]
    pub fn is_cell_focused(&self, cell: &CellKey) -> bool {
        self.focused.as_ref() == Some(cell)
    }

    pub fn border_mask(&self, cell: &CellKey) -> BorderMask {
        borders_of(&self.grid, &self.selected, cell)
    }

    /// Class names for the outline edges of `cell`.
    pub fn cell_border_classes(&self, cell: &CellKey) -> Vec<&'static str> {
        self.border_mask(cell).class_names()
    }

    pub fn selected(&self) -> &CellSet {
        &self.selected
    }

    /// Selected cells in the order they were selected.
    pub fn selected_cells(&self) -> Vec<CellKey> {
        self.selected.iter_ordered().cloned().collect()
    }

    pub fn selection_len(&self) -> usize {
        self.selected.len()
    }

    pub fn anchor(&self) -> Option<&CellPosition> {
        self.anchor.as_ref()
    }

    pub fn focused(&self) -> Option<&CellKey> {
        self.focused.as_ref()
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Selected data cells grouped by row, rows and columns in grid order.
    /// Row-overlay cells are excluded; ids missing from the grid sort last.
    pub fn cells_by_row(&self) -> Vec<(String, Vec<String>)> {
        let mut rows: Vec<(String, Vec<String>)> = Vec::new();
        for cell in self.selected.iter_ordered() {
            if self.overlay.is_overlay(cell) {
                continue;
            }
            match rows.iter_mut().find(|(row, _)| *row == cell.row) {
                Some((_, cols)) => cols.push(cell.col.clone()),
                None => rows.push((cell.row.clone(), vec![cell.col.clone()])),
            }
        }

        let grid = &self.grid;
        rows.sort_by_key(|(row, _)| grid.row_index(row).unwrap_or(usize::MAX));
        for (_, cols) in rows.iter_mut() {
            cols.sort_by_key(|col| grid.col_index(col).unwrap_or(usize::MAX));
        }
        rows
    }

    // =========================================================================
    // Mutation helpers
    // =========================================================================

    fn deselects_on_reclick(&self, col: &str) -> bool {
        col == self.overlay.column() || self.options.primary_cols.iter().any(|c| c == col)
    }

    pub(crate) fn insert_cell(&mut self, cell: CellKey) {
        if self.selected.insert(cell) {
            self.dirty = true;
        }
    }

    pub(crate) fn remove_cells(&mut self, mut remove: impl FnMut(&CellKey) -> bool) {
        let before = self.selected.len();
        self.selected.retain(|k| !remove(k));
        if self.selected.len() != before {
            self.dirty = true;
        }
    }

    fn toggle(&mut self, cell: CellKey) {
        if self.selected.remove(&cell) {
            self.dirty = true;
            if self.focused.as_ref() == Some(&cell) {
                self.focused = self.selected.last().cloned();
            }
        } else {
            self.insert_cell(cell.clone());
            self.focused = Some(cell);
        }
    }

    fn replace_selected(&mut self, next: CellSet) {
        if next != self.selected {
            self.dirty = true;
        }
        self.selected = next;
    }

    /// Replace the selection, then re-insert existing row-overlay entries.
    fn replace_preserving_rows(&mut self, mut next: CellSet) {
        let overlay = &self.overlay;
        next.extend(
            self.selected
                .iter_ordered()
                .filter(|k| overlay.is_overlay(k))
                .cloned(),
        );
        self.replace_selected(next);
    }

    pub(crate) fn set_anchor(&mut self, anchor: Option<CellPosition>) {
        if self.anchor != anchor {
            self.anchor = anchor;
            self.dirty = true;
        }
    }

    pub(crate) fn set_focus(&mut self, cell: Option<CellKey>) {
        self.focused = cell;
    }

    fn reset(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.dirty = true;
        }
        self.set_anchor(None);
        self.focused = None;
        self.in_progress = false;
    }

    /// End of a mutation: restore the focus invariant, bump the version and
    /// notify subscribers of what changed.
    pub(crate) fn finish(&mut self, focus_before: Option<CellKey>) {
        if let Some(ref f) = self.focused {
            if !self.selected.contains(f) {
                self.focused = self.selected.last().cloned();
            }
        }

        let focus_changed = self.focused != focus_before;
        let selection_changed = std::mem::take(&mut self.dirty);
        if !selection_changed && !focus_changed {
            return;
        }

        self.version += 1;
        if selection_changed {
            self.emit(SelectionEvent::SelectionChanged {
                version: self.version,
                selected: self.selected.len(),
            });
        }
        if focus_changed {
            self.emit(SelectionEvent::FocusChanged {
                version: self.version,
                focused: self.focused.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventCollector;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn key(r: &str, c: &str) -> CellKey {
        CellKey::new(r, c)
    }

    fn row(r: &str) -> CellKey {
        CellKey::new(r, DEFAULT_ROW_OVERLAY_COL)
    }

    fn store() -> SelectionStore {
        let mut store = SelectionStore::default();
        store.register_grid(["r1", "r2", "r3"], [DEFAULT_ROW_OVERLAY_COL, "name", "a", "b", "c"]);
        store
    }

    fn set(cells: &[CellKey]) -> CellSet {
        cells.iter().cloned().collect()
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    #[test]
    fn test_start_then_extend_selects_block() {
        let mut store = store();
        store.start_selection(key("r1", "a"), false);
        assert_eq!(store.selected(), &set(&[key("r1", "a")]));
        assert_eq!(store.anchor(), Some(&key("r1", "a")));
        assert_eq!(store.focused(), Some(&key("r1", "a")));
        assert!(store.is_in_progress());

        store.extend_selection(&key("r2", "b"));
        assert_eq!(
            store.selected(),
            &set(&[key("r1", "a"), key("r1", "b"), key("r2", "a"), key("r2", "b")])
        );
        assert_eq!(store.focused(), Some(&key("r1", "a")));

        store.end_selection();
        assert!(!store.is_in_progress());
        assert_eq!(store.selection_len(), 4);
    }

    #[test]
    fn test_extend_can_shrink() {
        let mut store = store();
        store.start_selection(key("r1", "a"), false);
        store.extend_selection(&key("r3", "c"));
        assert_eq!(store.selection_len(), 9);
        store.extend_selection(&key("r1", "b"));
        assert_eq!(store.selected(), &set(&[key("r1", "a"), key("r1", "b")]));
    }

    #[test]
    fn test_extend_without_gesture_is_noop() {
        let mut store = store();
        store.extend_selection(&key("r2", "b"));
        assert!(store.selected().is_empty());

        store.start_selection(key("r1", "a"), false);
        store.end_selection();
        store.extend_selection(&key("r2", "b"));
        assert_eq!(store.selected(), &set(&[key("r1", "a")]));
    }

    #[test]
    fn test_additive_toggle_is_its_own_inverse() {
        let mut store = store();
        store.start_selection(key("r1", "a"), false);
        store.extend_selection(&key("r2", "b"));
        store.end_selection();
        let before = store.selected().clone();

        store.start_selection(key("r3", "c"), true);
        assert!(store.is_cell_selected(&key("r3", "c")));
        assert!(store.is_cell_focused(&key("r3", "c")));
        store.start_selection(key("r3", "c"), true);
        assert_eq!(store.selected(), &before);

        store.start_selection(key("r1", "b"), true);
        store.start_selection(key("r1", "b"), true);
        assert_eq!(store.selected(), &before);
    }

    #[test]
    fn test_additive_start_begins_drag() {
        let mut store = store();
        store.select_cell(key("r1", "a"), false, false);
        store.start_selection(key("r3", "c"), true);

        assert!(store.is_in_progress());
        assert_eq!(store.anchor(), Some(&key("r3", "c")));
        assert_eq!(store.selected(), &set(&[key("r1", "a"), key("r3", "c")]));

        store.extend_selection(&key("r2", "b"));
        assert_eq!(
            store.selected(),
            &set(&[key("r2", "b"), key("r2", "c"), key("r3", "b"), key("r3", "c")])
        );

        store.end_selection();
        assert!(!store.is_in_progress());
    }

    #[test]
    fn test_additive_toggle_off_still_anchors() {
        let mut store = store();
        store.select_cell(key("r1", "a"), false, false);
        store.select_cell(key("r2", "b"), true, false);
        store.start_selection(key("r2", "b"), true);

        assert!(!store.is_cell_selected(&key("r2", "b")));
        assert_eq!(store.anchor(), Some(&key("r2", "b")));
        assert!(store.is_in_progress());
    }

    #[test]
    fn test_toggle_off_focused_moves_focus_to_last_inserted() {
        let mut store = store();
        store.start_selection(key("r1", "a"), false);
        store.end_selection();
        store.start_selection(key("r2", "b"), true);
        store.start_selection(key("r3", "c"), true);
        assert!(store.is_cell_focused(&key("r3", "c")));

        store.start_selection(key("r3", "c"), true);
        assert_eq!(store.focused(), Some(&key("r2", "b")));

        store.start_selection(key("r2", "b"), true);
        store.start_selection(key("r1", "a"), true);
        assert!(store.selected().is_empty());
        assert_eq!(store.focused(), None);
    }

    #[test]
    fn test_reclick_primary_cell_clears() {
        let mut store = store();
        store.start_selection(key("r2", "name"), false);
        store.end_selection();
        store.start_selection(key("r2", "name"), false);

        assert!(store.selected().is_empty());
        assert_eq!(store.anchor(), None);
        assert_eq!(store.focused(), None);
        assert!(!store.is_in_progress());
    }

    #[test]
    fn test_reclick_overlay_cell_clears() {
        let mut store = store();
        store.start_selection(row("r1"), false);
        store.start_selection(row("r1"), false);
        assert!(store.selected().is_empty());
    }

    #[test]
    fn test_reclick_data_cell_keeps_it() {
        let mut store = store();
        store.start_selection(key("r2", "a"), false);
        store.end_selection();
        store.start_selection(key("r2", "a"), false);
        assert_eq!(store.selected(), &set(&[key("r2", "a")]));
    }

    #[test]
    fn test_start_preserves_row_overlay() {
        let mut store = store();
        store.select_all_rows();
        store.start_selection(key("r2", "b"), false);

        assert!(store.is_cell_selected(&key("r2", "b")));
        for r in ["r1", "r2", "r3"] {
            assert!(store.is_row_selected(r));
        }

        store.extend_selection(&key("r3", "c"));
        assert_eq!(store.selection_len(), 4 + 3);
        assert!(store.is_row_selected("r1"));
    }

    // =========================================================================
    // select_cell
    // =========================================================================

    #[test]
    fn test_select_cell_single() {
        let mut store = store();
        store.select_cell(key("r2", "a"), false, false);
        assert_eq!(store.selected(), &set(&[key("r2", "a")]));
        assert_eq!(store.anchor(), Some(&key("r2", "a")));
        assert!(store.is_cell_focused(&key("r2", "a")));
        assert!(!store.is_in_progress());
    }

    #[test]
    fn test_select_cell_range_replaces() {
        let mut store = store();
        store.select_cell(key("r1", "a"), false, false);
        store.select_cell(key("r3", "c"), true, false);
        store.select_cell(key("r2", "b"), false, true);

        assert_eq!(
            store.selected(),
            &set(&[key("r1", "a"), key("r1", "b"), key("r2", "a"), key("r2", "b")])
        );
        assert_eq!(store.anchor(), Some(&key("r1", "a")));
        assert!(store.is_cell_focused(&key("r2", "b")));
    }

    #[test]
    fn test_select_cell_range_additive_merges() {
        let mut store = store();
        store.select_cell(key("r1", "a"), false, false);
        store.select_cell(key("r3", "c"), true, false);
        store.select_cell(key("r1", "b"), true, true);

        assert_eq!(
            store.selected(),
            &set(&[key("r1", "a"), key("r1", "b"), key("r3", "c")])
        );
    }

    #[test]
    fn test_select_cell_range_without_anchor_selects_single() {
        let mut store = store();
        store.select_cell(key("r2", "b"), false, true);
        assert_eq!(store.selected(), &set(&[key("r2", "b")]));
        assert_eq!(store.anchor(), Some(&key("r2", "b")));
    }

    #[test]
    fn test_select_cell_additive_keeps_anchor() {
        let mut store = store();
        store.select_cell(key("r1", "a"), false, false);
        store.select_cell(key("r3", "c"), true, false);
        assert_eq!(store.anchor(), Some(&key("r1", "a")));
        assert_eq!(store.selection_len(), 2);
    }

    #[test]
    fn test_select_cell_preserves_rows_by_default() {
        let mut store = store();
        store.select_all_rows();
        store.select_cell(key("r2", "a"), false, false);
        assert_eq!(store.selected_row_ids().len(), 3);
    }

    #[test]
    fn test_select_cell_legacy_drops_rows() {
        let options = SelectionOptions { select_cell_preserves_rows: false, ..Default::default() };
        let mut store = SelectionStore::new(options);
        store.register_grid(["r1", "r2"], [DEFAULT_ROW_OVERLAY_COL, "a"]);
        store.select_all_rows();
        store.select_cell(key("r2", "a"), false, false);
        assert_eq!(store.selected(), &set(&[key("r2", "a")]));
    }

    // =========================================================================
    // Focus and clearing
    // =========================================================================

    #[test]
    fn test_focus_cell() {
        let mut store = store();
        store.select_cell(key("r1", "a"), false, false);
        store.select_cell(key("r1", "b"), true, false);

        store.focus_cell(Some(key("r1", "a")));
        assert!(store.is_cell_focused(&key("r1", "a")));
        assert_eq!(store.selection_len(), 2);

        store.focus_cell(Some(key("r3", "c")));
        assert!(store.is_cell_focused(&key("r1", "a")));

        store.focus_cell(None);
        assert_eq!(store.focused(), None);
        assert_eq!(store.selection_len(), 2);
    }

    #[test]
    fn test_clear_selection() {
        let mut store = store();
        store.select_all_rows();
        store.select_cell(key("r1", "a"), false, false);
        store.clear_selection();

        assert!(store.selected().is_empty());
        assert_eq!(store.anchor(), None);
        assert_eq!(store.focused(), None);
    }

    #[test]
    fn test_clear_during_drag_discards() {
        let mut store = store();
        store.start_selection(key("r1", "a"), false);
        store.extend_selection(&key("r2", "b"));
        store.clear_selection();
        store.extend_selection(&key("r3", "c"));
        assert!(store.selected().is_empty());
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    #[test]
    fn test_move_focus_clamps() {
        let mut store = store();
        store.select_cell(key("r1", "a"), false, false);
        store.move_focus(Direction::Up, false);
        assert_eq!(store.selected(), &set(&[key("r1", "a")]));

        store.move_focus(Direction::Down, false);
        store.move_focus(Direction::Right, false);
        assert_eq!(store.selected(), &set(&[key("r2", "b")]));
    }

    #[test]
    fn test_move_focus_extend() {
        let mut store = store();
        store.select_cell(key("r1", "a"), false, false);
        store.move_focus(Direction::Down, true);
        store.move_focus(Direction::Right, true);

        assert_eq!(
            store.selected(),
            &set(&[key("r1", "a"), key("r1", "b"), key("r2", "a"), key("r2", "b")])
        );
        assert_eq!(store.anchor(), Some(&key("r1", "a")));
        assert!(store.is_cell_focused(&key("r2", "b")));
    }

    #[test]
    fn test_move_focus_from_nothing_starts_at_origin() {
        let mut store = store();
        store.move_focus(Direction::Right, false);
        assert_eq!(store.selected(), &set(&[key("r1", "name")]));
    }

    #[test]
    fn test_move_focus_on_empty_grid() {
        let mut store = SelectionStore::default();
        store.move_focus(Direction::Down, false);
        assert!(store.selected().is_empty());
    }

    // =========================================================================
    // Layout changes
    // =========================================================================

    #[test]
    fn test_reregister_keeps_stale_entries() {
        let mut store = store();
        store.select_cell(key("r3", "a"), false, false);
        store.register_grid(["r1", "r2"], [DEFAULT_ROW_OVERLAY_COL, "name", "a", "b", "c"]);

        assert!(store.is_cell_selected(&key("r3", "a")));
        assert_eq!(store.border_mask(&key("r3", "a")), BorderMask::all());
    }

    #[test]
    fn test_cells_by_row() {
        let mut store = store();
        store.select_all_rows();
        store.select_cell(key("r2", "b"), false, false);
        store.select_cell(key("r1", "c"), true, false);
        store.select_cell(key("r2", "a"), true, false);
        store.select_cell(key("gone", "a"), true, false);

        assert_eq!(
            store.cells_by_row(),
            vec![
                ("r1".to_string(), vec!["c".to_string()]),
                ("r2".to_string(), vec!["a".to_string(), "b".to_string()]),
                ("gone".to_string(), vec!["a".to_string()]),
            ]
        );
    }

    #[test]
    fn test_border_classes() {
        let mut store = store();
        store.select_cell(key("r1", "a"), false, false);
        store.select_cell(key("r2", "b"), false, true);

        assert_eq!(
            store.cell_border_classes(&key("r1", "a")),
            vec!["selection-top", "selection-left"]
        );
        assert!(store.cell_border_classes(&key("r3", "c")).is_empty());
    }

    // =========================================================================
    // Events
    // =========================================================================

    fn collect(store: &mut SelectionStore) -> Rc<RefCell<EventCollector>> {
        let collector = Rc::new(RefCell::new(EventCollector::new()));
        let sink = Rc::clone(&collector);
        store.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        collector
    }

    #[test]
    fn test_events_emitted_on_change() {
        let mut store = store();
        let events = collect(&mut store);

        store.start_selection(key("r1", "a"), false);
        store.extend_selection(&key("r2", "b"));
        store.end_selection();

        let events = events.borrow();
        assert_eq!(events.selection_changes(), vec![(1, 1), (2, 4)]);
        assert_eq!(events.focus_changes(), vec![Some(key("r1", "a"))]);
        assert_eq!(
            events.events().last(),
            Some(&SelectionEvent::GestureEnded { version: 2 })
        );
    }

    #[test]
    fn test_no_event_without_change() {
        let mut store = store();
        store.start_selection(key("r1", "a"), false);
        let events = collect(&mut store);
        let version = store.version();

        store.extend_selection(&key("r1", "a"));
        store.focus_cell(Some(key("r1", "a")));

        assert!(events.borrow().is_empty());
        assert_eq!(store.version(), version);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = store();
        let counter = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&counter);
        let id = store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.select_cell(key("r1", "a"), false, false);
        let seen = *counter.borrow();
        assert!(seen > 0);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.select_cell(key("r2", "a"), false, false);
        assert_eq!(*counter.borrow(), seen);
    }
}
