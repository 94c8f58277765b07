//! Multi-cell selection engine for spreadsheet-style grids.
//!
//! The engine works on opaque row and column ids. The owning view registers
//! the current layout, forwards pointer and keyboard intents, and reads back
//! selection membership, focus, outline edges and row-level state.
//!
//! ```text
//! intents ──> SelectionStore ──(compute_range, RowOverlayPolicy)──> selected/anchor/focus
//!                   │
//!                   └──> borders_of, selected_row_ids ──> rendering, bulk actions
//! ```

pub mod border;
pub mod cell_key;
pub mod cell_set;
pub mod events;
pub mod grid_index;
pub mod range;
pub mod rows;
pub mod store;

pub use border::{borders_of, BorderMask};
pub use cell_key::{CellKey, CellKeyError, CellPosition, KEY_SEPARATOR};
pub use cell_set::CellSet;
pub use events::{EventCollector, SelectionEvent, SubscriptionId};
pub use grid_index::GridIndex;
pub use range::compute_range;
pub use rows::RowOverlayPolicy;
pub use store::{Direction, SelectionOptions, SelectionStore, DEFAULT_ROW_OVERLAY_COL};
