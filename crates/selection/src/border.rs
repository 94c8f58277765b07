//! Selection outline edges.
//!
//! A selected cell draws an edge only where its neighbor across that edge
//! is not selected (or does not exist), so any selected region renders as a
//! single outline without interior seams.

use bitflags::bitflags;

use crate::cell_key::CellKey;
use crate::cell_set::CellSet;
use crate::grid_index::GridIndex;

bitflags! {
    /// Edges of a cell that lie on the outer boundary of the selection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BorderMask: u8 {
        const TOP    = 0b0001;
        const RIGHT  = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT   = 0b1000;
    }
}

const EDGES: [(BorderMask, &str, &str); 4] = [
    (BorderMask::TOP, "top", "selection-top"),
    (BorderMask::RIGHT, "right", "selection-right"),
    (BorderMask::BOTTOM, "bottom", "selection-bottom"),
    (BorderMask::LEFT, "left", "selection-left"),
];

impl BorderMask {
    /// Render class names, in top/right/bottom/left order.
    pub fn class_names(self) -> Vec<&'static str> {
        EDGES
            .iter()
            .filter(|(edge, _, _)| self.contains(*edge))
            .map(|(_, _, class)| *class)
            .collect()
    }

    /// Lowercase edge names, in top/right/bottom/left order.
    pub fn edge_names(self) -> Vec<&'static str> {
        EDGES
            .iter()
            .filter(|(edge, _, _)| self.contains(*edge))
            .map(|(_, name, _)| *name)
            .collect()
    }
}

/// Outline edges for `cell` given the current selection.
///
/// Unselected cells get an empty mask. A selected cell whose own position
/// no longer resolves is drawn as isolated (all four edges).
pub fn borders_of(grid: &GridIndex, selected: &CellSet, cell: &CellKey) -> BorderMask {
    if !selected.contains(cell) {
        return BorderMask::empty();
    }
    let Some((row, col)) = grid.position_of(cell) else {
        return BorderMask::all();
    };

    let neighbor_selected = |r: Option<usize>, c: Option<usize>| -> bool {
        match (r, c) {
            (Some(r), Some(c)) => grid.key_at(r, c).is_some_and(|k| selected.contains(&k)),
            _ => false,
        }
    };

    let mut mask = BorderMask::empty();
    if !neighbor_selected(row.checked_sub(1), Some(col)) {
        mask |= BorderMask::TOP;
    }
    if !neighbor_selected(Some(row), col.checked_add(1)) {
        mask |= BorderMask::RIGHT;
    }
    if !neighbor_selected(row.checked_add(1), Some(col)) {
        mask |= BorderMask::BOTTOM;
    }
    if !neighbor_selected(Some(row), col.checked_sub(1)) {
        mask |= BorderMask::LEFT;
    }
    mask
}
