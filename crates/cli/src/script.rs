//! Gesture scripts: a recorded sequence of view intents replayed against a
//! `SelectionStore`.
//!
//! ```json
//! {
//!   "rows": ["r1", "r2", "r3"],
//!   "cols": ["a", "b", "c"],
//!   "ops": [
//!     { "op": "start", "row": "r1", "col": "a" },
//!     { "op": "extend", "row": "r2", "col": "b" },
//!     { "op": "end" }
//!   ]
//! }
//! ```

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use gridmark_selection::{CellKey, CellKeyError, Direction, SelectionStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Initial row layout (registered before the first op when non-empty)
    #[serde(default)]
    pub rows: Vec<String>,
    /// Initial column layout
    #[serde(default)]
    pub cols: Vec<String>,
    pub ops: Vec<Op>,
}

/// One view intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    /// Re-register the grid layout
    Register { rows: Vec<String>, cols: Vec<String> },
    /// Pointer down
    Start {
        row: String,
        col: String,
        #[serde(default)]
        additive: bool,
    },
    /// Pointer move with the button held
    Extend { row: String, col: String },
    /// Pointer up
    End,
    /// Click / keyboard selection
    Select {
        row: String,
        col: String,
        #[serde(default)]
        additive: bool,
        #[serde(default)]
        range: bool,
    },
    /// Focus a cell, or clear focus with `null`
    Focus {
        #[serde(default)]
        cell: Option<CellKey>,
    },
    /// Arrow key
    Move {
        direction: MoveDirection,
        #[serde(default)]
        extend: bool,
    },
    Clear,
    ClearRows,
    SelectAllRows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl From<MoveDirection> for Direction {
    fn from(d: MoveDirection) -> Self {
        match d {
            MoveDirection::Up => Direction::Up,
            MoveDirection::Down => Direction::Down,
            MoveDirection::Left => Direction::Left,
            MoveDirection::Right => Direction::Right,
        }
    }
}

impl Op {
    /// The cell this op targets, if any.
    fn target(&self) -> Option<(&str, &str)> {
        match self {
            Op::Start { row, col, .. } | Op::Extend { row, col } | Op::Select { row, col, .. } => {
                Some((row.as_str(), col.as_str()))
            }
            Op::Focus { cell: Some(cell) } => Some((cell.row.as_str(), cell.col.as_str())),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ScriptError {
    Io(String),
    Parse { line: usize, column: usize, message: String },
    InvalidCell { op_index: usize, reason: CellKeyError },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io(msg) => write!(f, "I/O error: {}", msg),
            ScriptError::Parse { line, column, message } => {
                write!(f, "script parse error at {}:{}: {}", line, column, message)
            }
            ScriptError::InvalidCell { op_index, reason } => {
                write!(f, "op {}: {}", op_index, reason)
            }
        }
    }
}

impl std::error::Error for ScriptError {}

pub fn parse_script(text: &str) -> Result<Script, ScriptError> {
    serde_json::from_str(text).map_err(|e| ScriptError::Parse {
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })
}

/// Read a script from a file, or stdin when `path` is `-`.
pub fn read_script(path: &Path) -> Result<Script, ScriptError> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| ScriptError::Io(format!("stdin: {}", e)))?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| ScriptError::Io(format!("{}: {}", path.display(), e)))?
    };
    parse_script(&text)
}

impl Script {
    /// Reject ops whose cells have empty ids. Runs before anything is applied,
    /// so a bad script leaves the store untouched.
    pub fn validate(&self) -> Result<(), ScriptError> {
        for (op_index, op) in self.ops.iter().enumerate() {
            if let Some((row, col)) = op.target() {
                CellKey::try_new(row, col)
                    .map_err(|reason| ScriptError::InvalidCell { op_index, reason })?;
            }
        }
        Ok(())
    }

    /// Validate, then replay every op. Returns the number of ops applied.
    pub fn apply(&self, store: &mut SelectionStore) -> Result<usize, ScriptError> {
        self.validate()?;

        if !self.rows.is_empty() || !self.cols.is_empty() {
            store.register_grid(self.rows.iter().cloned(), self.cols.iter().cloned());
        }
        for op in &self.ops {
            apply_op(store, op);
        }
        log::info!("replayed {} ops, {} cells selected", self.ops.len(), store.selection_len());
        Ok(self.ops.len())
    }
}

fn apply_op(store: &mut SelectionStore, op: &Op) {
    log::debug!("op: {:?}", op);
    match op {
        Op::Register { rows, cols } => {
            store.register_grid(rows.iter().cloned(), cols.iter().cloned())
        }
        Op::Start { row, col, additive } => {
            store.start_selection(CellKey::new(row.as_str(), col.as_str()), *additive)
        }
        Op::Extend { row, col } => store.extend_selection(&CellKey::new(row.as_str(), col.as_str())),
        Op::End => store.end_selection(),
        Op::Select { row, col, additive, range } => {
            store.select_cell(CellKey::new(row.as_str(), col.as_str()), *additive, *range)
        }
        Op::Focus { cell } => store.focus_cell(cell.clone()),
        Op::Move { direction, extend } => store.move_focus((*direction).into(), *extend),
        Op::Clear => store.clear_selection(),
        Op::ClearRows => store.clear_row_selection(),
        Op::SelectAllRows => store.select_all_rows(),
    }
}
