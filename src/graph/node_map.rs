// src/graph/node_map.rs
//! Insertion-ordered map keyed by node id.
//!
//! Metric maps iterate in the order nodes were inserted, which follows the
//! pathway's node array. Ranking tie-breaks depend on that order.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::ops::Index;

#[derive(Debug, Clone, PartialEq)]
pub struct NodeMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for NodeMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> NodeMap<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts or replaces a value. A replaced key keeps its original position.
    pub fn insert(&mut self, id: impl Into<String>, value: V) {
        let id = id.into();
        if let Some(&pos) = self.index.get(&id) {
            self.entries[pos].1 = value;
            return;
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, value));
    }

    /// Inserts only if the key is absent. Returns true if inserted.
    pub fn insert_if_absent(&mut self, id: &str, value: V) -> bool {
        if self.index.contains_key(id) {
            return false;
        }
        self.insert(id, value);
        true
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&V> {
        self.index.get(id).map(|&pos| &self.entries[pos].1)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut V> {
        let pos = *self.index.get(id)?;
        Some(&mut self.entries[pos].1)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(id, v)| (id.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V: Copy + Default> NodeMap<V> {
    /// Reads a value, treating absent ids as the default (zero for counts).
    #[must_use]
    pub fn get_or_default(&self, id: &str) -> V {
        self.get(id).copied().unwrap_or_default()
    }
}

impl<V> Index<&str> for NodeMap<V> {
    type Output = V;

    fn index(&self, id: &str) -> &V {
        match self.get(id) {
            Some(v) => v,
            None => panic!("node id '{id}' not present in map"),
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for NodeMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for NodeMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, v) in &self.entries {
            map.serialize_entry(id, v)?;
        }
        map.end()
    }
}
