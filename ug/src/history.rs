//! Per-key history of values already handed out

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::debug;

/// Identifies an independent uniqueness scope: operation name plus arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryKey<A> {
    pub operation: String,
    pub args: Vec<A>,
}

impl<A: Clone> HistoryKey<A> {
    pub fn new(operation: impl Into<String>, args: &[A]) -> Self {
        Self {
            operation: operation.into(),
            args: args.to_vec(),
        }
    }
}

/// Mapping from [`HistoryKey`] to the set of values seen for it
#[derive(Debug)]
pub struct History<A, V> {
    seen: HashMap<HistoryKey<A>, HashSet<V>>,
}

impl<A, V> Default for History<A, V> {
    fn default() -> Self {
        Self { seen: HashMap::new() }
    }
}

impl<A, V> History<A, V>
where
    A: Eq + Hash,
    V: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value set for `key`, creating an empty one on first use
    pub fn entry(&mut self, key: HistoryKey<A>) -> &mut HashSet<V> {
        self.seen.entry(key).or_default()
    }

    /// Record `value` under `key`; returns false if it was already there
    pub fn record(&mut self, key: &HistoryKey<A>, value: V) -> bool
    where
        A: Clone,
    {
        match self.seen.get_mut(key) {
            Some(set) => set.insert(value),
            None => self.entry(key.clone()).insert(value),
        }
    }

    pub fn contains(&self, key: &HistoryKey<A>, value: &V) -> bool {
        self.seen.get(key).is_some_and(|set| set.contains(value))
    }

    /// Number of values recorded for `key`
    pub fn len_for(&self, key: &HistoryKey<A>) -> usize {
        self.seen.get(key).map_or(0, HashSet::len)
    }

    /// Number of keys with a history set
    pub fn key_count(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Drop every key and every recorded value
    pub fn clear(&mut self) {
        debug!(keys = self.seen.len(), "History::clear: called");
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(op: &str, args: &[i32]) -> HistoryKey<i32> {
        HistoryKey::new(op, args)
    }

    #[test]
    fn test_entry_is_created_lazily() {
        let mut history: History<i32, String> = History::new();
        assert!(history.is_empty());
        assert_eq!(history.len_for(&key("name", &[])), 0);

        history.entry(key("name", &[]));
        assert_eq!(history.key_count(), 1);
        assert_eq!(history.len_for(&key("name", &[])), 0);
    }

    #[test]
    fn test_record_deduplicates() {
        let mut history: History<i32, String> = History::new();
        let k = key("name", &[]);

        assert!(history.record(&k, "alice".to_string()));
        assert!(!history.record(&k, "alice".to_string()));
        assert!(history.record(&k, "bob".to_string()));
        assert_eq!(history.len_for(&k), 2);
        assert!(history.contains(&k, &"alice".to_string()));
    }

    #[test]
    fn test_arguments_separate_scopes() {
        let mut history: History<i32, i32> = History::new();

        history.record(&key("number", &[1, 10]), 5);
        assert!(history.contains(&key("number", &[1, 10]), &5));
        assert!(!history.contains(&key("number", &[1, 20]), &5));
        assert!(!history.contains(&key("digit", &[1, 10]), &5));
    }

    #[test]
    fn test_clear_drops_all_keys() {
        let mut history: History<i32, i32> = History::new();
        history.record(&key("a", &[]), 1);
        history.record(&key("b", &[2]), 2);

        history.clear();
        assert!(history.is_empty());
        assert!(!history.contains(&key("a", &[]), &1));
    }
}
