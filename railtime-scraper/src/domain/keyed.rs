//! Insertion-ordered keyed record collection.

use std::collections::HashMap;
use std::hash::Hash;

/// Records keyed by id, iterated in first-insertion order.
///
/// Railtime pages are merged by id (vehicle id on boards, station id on
/// trips). Re-inserting a known key replaces the record in place, so the
/// position of the first sighting is kept.
#[derive(Debug, Clone)]
pub struct KeyedRecords<K, V> {
    index: HashMap<K, usize>,
    records: Vec<V>,
}

impl<K: Eq + Hash + Clone, V> KeyedRecords<K, V> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            records: Vec::new(),
        }
    }

    /// Insert or replace the record for `key`.
    pub fn insert(&mut self, key: K, record: V) {
        match self.index.get(&key) {
            Some(&i) => self.records[i] = record,
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.index.get(key).map(|&i| &mut self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.records.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.records.iter_mut()
    }

    pub fn into_values(self) -> Vec<V> {
        self.records
    }
}

impl<K: Eq + Hash + Clone, V> Default for KeyedRecords<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_insertion_position() {
        let mut records = KeyedRecords::new();
        records.insert("a", 1);
        records.insert("b", 2);
        records.insert("a", 3);

        assert_eq!(records.len(), 2);
        assert_eq!(records.into_values(), vec![3, 2]);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut records = KeyedRecords::new();
        records.insert(7, String::from("x"));
        records.get_mut(&7).unwrap().push('y');

        assert_eq!(records.get(&7).map(String::as_str), Some("xy"));
        assert!(records.get_mut(&8).is_none());
    }
}
