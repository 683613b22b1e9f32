use std::collections::HashMap;

/// Count-by-key table that remembers the order keys were first seen.
///
/// Ranking is by descending count with ties kept in first-seen order, so the
/// same input always enumerates identically.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.index.get(key).map(|&i| self.entries[i].1).unwrap_or(0)
    }

    /// Sum of the counts for `keys`; absent keys count as zero.
    pub fn sum_of(&self, keys: &[&str]) -> usize {
        keys.iter().map(|k| self.get(k)).sum()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Entries by descending count, ties in first-seen order.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut out: Vec<(&str, usize)> = self.iter().collect();
        // sort_by is stable
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }

    /// The `n` highest-ranked entries and how many distinct keys were left out.
    pub fn top(&self, n: usize) -> (Vec<(&str, usize)>, usize) {
        let mut ranked = self.ranked();
        let remainder = ranked.len().saturating_sub(n);
        ranked.truncate(n);
        (ranked, remainder)
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for key in iter {
            table.increment(key);
        }
        table
    }
}
