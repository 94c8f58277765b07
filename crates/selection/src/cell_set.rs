//! Insertion-ordered set of cell keys.
//!
//! Membership is O(1) through a hash map from key to insertion sequence.
//! The sequence gives the "most recently inserted" member used for focus
//! reassignment and a stable discovery order for derived row lists.

use rustc_hash::FxHashMap;

use crate::cell_key::CellKey;

#[derive(Clone, Debug, Default)]
pub struct CellSet {
    entries: FxHashMap<CellKey, u64>,
    next_seq: u64,
}

impl CellSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key. Returns false if it was already present; an existing
    /// member keeps its original position.
    pub fn insert(&mut self, key: CellKey) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, self.next_seq);
        self.next_seq += 1;
        true
    }

    pub fn remove(&mut self, key: &CellKey) -> bool {
        self.entries.remove(key).is_some()
    }

    #[inline]
    pub fn contains(&self, key: &CellKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Most recently inserted member still present.
    pub fn last(&self) -> Option<&CellKey> {
        self.entries
            .iter()
            .max_by_key(|(_, seq)| **seq)
            .map(|(key, _)| key)
    }

    /// Members in insertion order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &CellKey> {
        let mut ordered: Vec<(&CellKey, u64)> =
            self.entries.iter().map(|(k, seq)| (k, *seq)).collect();
        ordered.sort_unstable_by_key(|(_, seq)| *seq);
        ordered.into_iter().map(|(k, _)| k)
    }

    /// Members in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &CellKey> {
        self.entries.keys()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&CellKey) -> bool) {
        self.entries.retain(|k, _| keep(k));
    }

    /// True when the set holds `key` and nothing else.
    pub fn is_exactly(&self, key: &CellKey) -> bool {
        self.entries.len() == 1 && self.entries.contains_key(key)
    }
}

impl Extend<CellKey> for CellSet {
    fn extend<I: IntoIterator<Item = CellKey>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<CellKey> for CellSet {
    fn from_iter<I: IntoIterator<Item = CellKey>>(iter: I) -> Self {
        let mut set = CellSet::new();
        set.extend(iter);
        set
    }
}

/// Set equality; insertion order is ignored.
impl PartialEq for CellSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries.keys().all(|k| other.contains(k))
    }
}

impl Eq for CellSet {}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(r: &str, c: &str) -> CellKey {
        CellKey::new(r, c)
    }

    #[test]
    fn test_insert_is_unique() {
        let mut set = CellSet::new();
        assert!(set.insert(key("r1", "a")));
        assert!(!set.insert(key("r1", "a")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_insertion_order_survives_removal() {
        let mut set = CellSet::new();
        set.insert(key("r1", "a"));
        set.insert(key("r2", "a"));
        set.insert(key("r3", "a"));
        set.remove(&key("r2", "a"));

        let ordered: Vec<_> = set.iter_ordered().cloned().collect();
        assert_eq!(ordered, vec![key("r1", "a"), key("r3", "a")]);
        assert_eq!(set.last(), Some(&key("r3", "a")));
    }

    #[test]
    fn test_reinsert_keeps_original_position() {
        let mut set = CellSet::new();
        set.insert(key("r1", "a"));
        set.insert(key("r2", "a"));
        set.insert(key("r1", "a"));
        assert_eq!(set.last(), Some(&key("r2", "a")));
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: CellSet = vec![key("r1", "a"), key("r2", "b")].into_iter().collect();
        let b: CellSet = vec![key("r2", "b"), key("r1", "a")].into_iter().collect();
        assert_eq!(a, b);

        let c: CellSet = vec![key("r1", "a")].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn test_last_on_empty() {
        let set = CellSet::new();
        assert_eq!(set.last(), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_is_exactly() {
        let mut set = CellSet::new();
        set.insert(key("r1", "a"));
        assert!(set.is_exactly(&key("r1", "a")));
        set.insert(key("r1", "b"));
        assert!(!set.is_exactly(&key("r1", "a")));
    }
}
