//! Bounded most-recent-first record of selected suggestions.

use std::collections::VecDeque;

/// Number of entries kept by [`RecentQueries`].
pub const HISTORY_CAPACITY: usize = 5;

/// Most-recent-first list of unique past queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentQueries {
    entries: VecDeque<String>,
}

impl RecentQueries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` at the front unless it is already present.
    ///
    /// Existing entries keep their position. When full, the oldest entry is
    /// evicted. Returns true if the history changed.
    pub fn push(&mut self, value: &str) -> bool {
        if self.contains(value) {
            return false;
        }
        self.entries.push_front(value.to_string());
        self.entries.truncate(HISTORY_CAPACITY);
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|e| e == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(history: &RecentQueries) -> Vec<&str> {
        history.iter().collect()
    }

    #[test]
    fn test_most_recent_first() {
        let mut history = RecentQueries::new();
        history.push("rust");
        history.push("async");
        assert_eq!(entries(&history), vec!["async", "rust"]);
    }

    #[test]
    fn test_existing_value_is_not_moved() {
        let mut history = RecentQueries::new();
        history.push("rust");
        history.push("async");
        assert!(!history.push("rust"));
        assert_eq!(entries(&history), vec!["async", "rust"]);
    }

    #[test]
    fn test_oldest_evicted_at_capacity() {
        let mut history = RecentQueries::new();
        for q in ["a", "b", "c", "d", "e", "f"] {
            history.push(q);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(entries(&history), vec!["f", "e", "d", "c", "b"]);
        assert!(!history.contains("a"));
    }
}
