//! Frequency ranking with a deterministic tie-break.
//!
//! Values are counted in the order they are first seen. When several values
//! share the highest count, the one encountered first wins, so the same
//! input always produces the same ranking.

use std::collections::HashMap;
use std::hash::Hash;

use bikeshare_analytics_models::ValueCount;

/// Counts values while remembering first-seen order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    index: HashMap<K, usize>,
    counts: Vec<ValueCount<K>>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            counts: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `value`.
    pub fn add(&mut self, value: K) {
        if let Some(&i) = self.index.get(&value) {
            if let Some(entry) = self.counts.get_mut(i) {
                entry.count += 1;
            }
            return;
        }
        self.index.insert(value.clone(), self.counts.len());
        self.counts.push(ValueCount { value, count: 1 });
    }

    /// Number of distinct values seen.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// The most frequent value, ties going to the first one seen.
    #[must_use]
    pub fn most_frequent(&self) -> Option<&ValueCount<K>> {
        self.counts
            .iter()
            .fold(None, |best: Option<&ValueCount<K>>, candidate| match best {
                Some(b) if b.count >= candidate.count => Some(b),
                _ => Some(candidate),
            })
    }

    /// All values, highest count first. Equal counts keep first-seen order.
    #[must_use]
    pub fn into_ranked(self) -> Vec<ValueCount<K>> {
        let mut counts = self.counts;
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for value in iter {
            table.add(value);
        }
        table
    }
}

/// The most frequent item of `values`, or `None` if it is empty.
#[must_use]
pub fn most_frequent<K, I>(values: I) -> Option<ValueCount<K>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    values
        .into_iter()
        .collect::<FrequencyTable<K>>()
        .most_frequent()
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_mode() {
        assert_eq!(most_frequent(Vec::<u32>::new()), None);
    }

    #[test]
    fn picks_highest_count() {
        let top = most_frequent(["b", "a", "b", "c", "b", "a"]).unwrap();
        assert_eq!(top, ValueCount { value: "b", count: 3 });
    }

    #[test]
    fn ties_go_to_first_seen_value() {
        let top = most_frequent(["x", "y", "y", "x"]).unwrap();
        assert_eq!(top.value, "x");
        let top = most_frequent(["y", "x", "x", "y"]).unwrap();
        assert_eq!(top.value, "y");
    }

    #[test]
    fn mode_has_the_maximum_count() {
        let values = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5];
        let table: FrequencyTable<i32> = values.into_iter().collect();
        let top = table.most_frequent().unwrap().clone();
        let ranked = table.into_ranked();
        assert!(ranked.iter().all(|vc| vc.count <= top.count));
        assert_eq!(top, ValueCount { value: 5, count: 3 });
    }

    #[test]
    fn ranking_is_stable_for_equal_counts() {
        let table: FrequencyTable<&str> = ["c", "a", "b", "a", "c"].into_iter().collect();
        assert_eq!(table.distinct(), 3);
        let ranked: Vec<(&str, u64)> = table
            .into_ranked()
            .into_iter()
            .map(|vc| (vc.value, vc.count))
            .collect();
        assert_eq!(ranked, [("c", 2), ("a", 2), ("b", 1)]);
    }
}
