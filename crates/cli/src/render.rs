//! Output formats for a store after replay.

use serde::Serialize;

use gridmark_selection::{CellKey, SelectionStore};

/// Outline edges of one selected cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellBorders {
    pub row: String,
    pub col: String,
    pub edges: Vec<&'static str>,
}

/// Everything a consumer can read from the store, in a stable shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub version: u64,
    pub selected: Vec<CellKey>,
    pub anchor: Option<CellKey>,
    pub focused: Option<CellKey>,
    pub in_progress: bool,
    pub rows: Vec<String>,
    pub all_rows_selected: bool,
    pub some_rows_selected: bool,
    pub borders: Vec<CellBorders>,
}

impl Snapshot {
    pub fn capture(store: &SelectionStore) -> Self {
        let selected = store.selected_cells();
        let borders = selected
            .iter()
            .map(|cell| CellBorders {
                row: cell.row.clone(),
                col: cell.col.clone(),
                edges: store.border_mask(cell).edge_names(),
            })
            .collect();

        Self {
            version: store.version(),
            anchor: store.anchor().cloned(),
            focused: store.focused().cloned(),
            in_progress: store.is_in_progress(),
            rows: store.selected_row_ids().to_vec(),
            all_rows_selected: store.are_all_rows_selected(),
            some_rows_selected: store.are_some_rows_selected(),
            borders,
            selected,
        }
    }
}

fn cell_label(cell: Option<&CellKey>) -> String {
    match cell {
        Some(c) => format!("{}/{}", c.row, c.col),
        None => "-".to_string(),
    }
}

/// Human-readable listing.
pub fn render_text(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("selected: {}\n", snapshot.selected.len()));
    for b in &snapshot.borders {
        if b.edges.is_empty() {
            out.push_str(&format!("  {}/{}\n", b.row, b.col));
        } else {
            out.push_str(&format!("  {}/{}  [{}]\n", b.row, b.col, b.edges.join(" ")));
        }
    }
    out.push_str(&format!("anchor:   {}\n", cell_label(snapshot.anchor.as_ref())));
    out.push_str(&format!("focused:  {}\n", cell_label(snapshot.focused.as_ref())));
    out.push_str(&format!("dragging: {}\n", snapshot.in_progress));

    let state = if snapshot.all_rows_selected {
        "all"
    } else if snapshot.some_rows_selected {
        "some"
    } else {
        "none"
    };
    out.push_str(&format!("rows:     {} ({})\n", snapshot.rows.join(", "), state));
    out
}

/// ASCII map of the registered grid: `@` focused, `#` selected, `.` not.
/// Selected cells outside the current grid are listed underneath.
pub fn render_grid(store: &SelectionStore) -> String {
    let grid = store.grid();
    let row_width = grid.row_ids().iter().map(|r| r.len()).max().unwrap_or(0);
    let col_width = grid.col_ids().iter().map(|c| c.len()).max().unwrap_or(1).max(1);

    let mut out = String::new();
    out.push_str(&" ".repeat(row_width));
    for col in grid.col_ids() {
        out.push_str(&format!(" {:>w$}", col, w = col_width));
    }
    out.push('\n');

    for row in grid.row_ids() {
        out.push_str(&format!("{:<w$}", row, w = row_width));
        for col in grid.col_ids() {
            let cell = CellKey::new(row.as_str(), col.as_str());
            let mark = if store.is_cell_focused(&cell) {
                "@"
            } else if store.is_cell_selected(&cell) {
                "#"
            } else {
                "."
            };
            out.push_str(&format!(" {:>w$}", mark, w = col_width));
        }
        out.push('\n');
    }

    let stale: Vec<String> = store
        .selected_cells()
        .iter()
        .filter(|cell| grid.position_of(cell).is_none())
        .map(|cell| cell_label(Some(cell)))
        .collect();
    if !stale.is_empty() {
        out.push_str(&format!("off-grid: {}\n", stale.join(", ")));
    }
    out
}
