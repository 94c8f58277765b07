//! Change notifications emitted by `SelectionStore`.
//!
//! Views subscribe to re-render after a mutation instead of polling. Events
//! are only emitted when the observable state actually changed.

use crate::cell_key::CellKey;

/// Events emitted by `SelectionStore` after a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// The selected set or the anchor changed.
    SelectionChanged {
        version: u64,
        /// Number of selected cells after the change.
        selected: usize,
    },

    /// The focused cell changed.
    FocusChanged { version: u64, focused: Option<CellKey> },

    /// A drag gesture was committed.
    GestureEnded { version: u64 },

    /// The grid layout was re-registered.
    GridRegistered { rows: usize, cols: usize },
}

/// Callback type for receiving selection events.
pub type SelectionCallback = Box<dyn FnMut(&SelectionEvent)>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Simple event collector for testing.
#[derive(Default, Debug)]
pub struct EventCollector {
    events: Vec<SelectionEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: SelectionEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[SelectionEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Only SelectionChanged events, as (version, selected count).
    pub fn selection_changes(&self) -> Vec<(u64, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SelectionEvent::SelectionChanged { version, selected } => Some((*version, *selected)),
                _ => None,
            })
            .collect()
    }

    /// Only FocusChanged events, as the new focus.
    pub fn focus_changes(&self) -> Vec<Option<CellKey>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SelectionEvent::FocusChanged { focused, .. } => Some(focused.clone()),
                _ => None,
            })
            .collect()
    }
}
