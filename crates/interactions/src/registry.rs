//! Key registries.
//!
//! A registry assigns every key a dense slot in registration order. The
//! matrices store slots internally, so per-key data lives in plain vectors and
//! iteration over a universe is reproducible between runs.

use crate::types::Key;
use std::collections::HashMap;

/// Ordered set of keys with O(1) key -> slot lookup.
#[derive(Debug, Clone)]
pub struct KeyRegistry<K: Key> {
    keys: Vec<K>,
    slots: HashMap<K, usize>,
}

impl<K: Key> KeyRegistry<K> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Register a key, returning its slot and whether it was new.
    pub fn insert(&mut self, key: K) -> (usize, bool) {
        if let Some(&slot) = self.slots.get(&key) {
            return (slot, false);
        }
        let slot = self.keys.len();
        self.keys.push(key);
        self.slots.insert(key, slot);
        (slot, true)
    }

    pub fn slot(&self, key: K) -> Option<usize> {
        self.slots.get(&key).copied()
    }

    /// Key registered at `slot`, if any
    pub fn get(&self, slot: usize) -> Option<K> {
        self.keys.get(slot).copied()
    }

    /// Slots handed out by the owning structure are always in range.
    pub(crate) fn key(&self, slot: usize) -> K {
        self.keys[slot]
    }

    pub fn contains(&self, key: K) -> bool {
        self.slots.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in registration order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }
}

impl<K: Key> Default for KeyRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut registry = KeyRegistry::new();
        assert_eq!(registry.insert(42u32), (0, true));
        assert_eq!(registry.insert(7u32), (1, true));
        assert_eq!(registry.insert(42u32), (0, false));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.keys(), &[42, 7]);
    }

    #[test]
    fn test_lookup() {
        let mut registry = KeyRegistry::new();
        registry.insert("a");
        assert_eq!(registry.slot("a"), Some(0));
        assert_eq!(registry.slot("b"), None);
        assert_eq!(registry.key(0), "a");
        assert_eq!(registry.get(0), Some("a"));
        assert_eq!(registry.get(1), None);
    }
}
