//! Unweighted user -> item exposure graph ("user saw item").

use crate::registry::KeyRegistry;
use crate::types::{AddOutcome, ItemId, Key, Rejection, UserId};
use std::collections::HashSet;
use tracing::debug;

/// Bipartite presence-only graph with the same registry discipline as
/// `InteractionMatrix`. Each pair is stored at most once.
#[derive(Debug, Clone)]
pub struct ImpressionGraph<U: Key = UserId, I: Key = ItemId> {
    users: KeyRegistry<U>,
    items: KeyRegistry<I>,
    /// Item slots seen by each user slot
    user_neighbors: Vec<Vec<usize>>,
    /// User slots that saw each item slot
    item_neighbors: Vec<Vec<usize>>,
    pairs: HashSet<(usize, usize)>,
}

impl<U: Key, I: Key> ImpressionGraph<U, I> {
    pub fn new() -> Self {
        Self {
            users: KeyRegistry::new(),
            items: KeyRegistry::new(),
            user_neighbors: Vec::new(),
            item_neighbors: Vec::new(),
            pairs: HashSet::new(),
        }
    }

    /// Register a user. Returns false if it was already known.
    pub fn add_user(&mut self, user: U) -> bool {
        let (_, is_new) = self.users.insert(user);
        if is_new {
            self.user_neighbors.push(Vec::new());
        }
        is_new
    }

    /// Register an item. Returns false if it was already known.
    pub fn add_item(&mut self, item: I) -> bool {
        let (_, is_new) = self.items.insert(item);
        if is_new {
            self.item_neighbors.push(Vec::new());
        }
        is_new
    }

    /// Record that `user` was shown `item`.
    ///
    /// Unregistered keys and already-present pairs leave the graph unchanged.
    pub fn add_impression(&mut self, user: U, item: I) -> AddOutcome {
        let Some(u) = self.users.slot(user) else {
            return AddOutcome::Rejected(Rejection::UnknownUser);
        };
        let Some(i) = self.items.slot(item) else {
            return AddOutcome::Rejected(Rejection::UnknownItem);
        };
        if !self.pairs.insert((u, i)) {
            return AddOutcome::Rejected(Rejection::Duplicate);
        }
        self.user_neighbors[u].push(i);
        self.item_neighbors[i].push(u);
        AddOutcome::Added
    }

    pub fn contains(&self, user: U, item: I) -> bool {
        match (self.users.slot(user), self.items.slot(item)) {
            (Some(u), Some(i)) => self.pairs.contains(&(u, i)),
            _ => false,
        }
    }

    /// Items shown to a user (empty if unknown)
    pub fn user_impressions(&self, user: U) -> impl Iterator<Item = I> + '_ {
        let slots = self
            .users
            .slot(user)
            .map(|s| self.user_neighbors[s].as_slice())
            .unwrap_or(&[]);
        slots.iter().map(move |&i| self.items.key(i))
    }

    /// Users an item was shown to (empty if unknown)
    pub fn item_impressions(&self, item: I) -> impl Iterator<Item = U> + '_ {
        let slots = self
            .items
            .slot(item)
            .map(|s| self.item_neighbors[s].as_slice())
            .unwrap_or(&[]);
        slots.iter().map(move |&u| self.users.key(u))
    }

    pub fn user_degree(&self, user: U) -> usize {
        self.users
            .slot(user)
            .map_or(0, |s| self.user_neighbors[s].len())
    }

    pub fn item_degree(&self, item: I) -> usize {
        self.items
            .slot(item)
            .map_or(0, |s| self.item_neighbors[s].len())
    }

    /// All impressions, grouped by user in registration order
    pub fn impressions(&self) -> impl Iterator<Item = (U, I)> + '_ {
        self.user_neighbors
            .iter()
            .enumerate()
            .flat_map(move |(u, items)| {
                items
                    .iter()
                    .map(move |&i| (self.users.key(u), self.items.key(i)))
            })
    }

    pub fn users(&self) -> &[U] {
        self.users.keys()
    }

    pub fn items(&self) -> &[I] {
        self.items.keys()
    }

    pub fn num_users(&self) -> usize {
        self.users.len()
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Distinct (user, item) impressions
    pub fn num_impressions(&self) -> usize {
        self.pairs.len()
    }

    /// Sub-graph with the keys and impressions passing the predicates
    pub fn filter(
        &self,
        user_filter: impl Fn(U) -> bool,
        item_filter: impl Fn(I) -> bool,
        impression_filter: impl Fn(U, I) -> bool,
    ) -> Self {
        let mut filtered = Self::new();
        for &item in self.items() {
            if item_filter(item) {
                filtered.add_item(item);
            }
        }
        for &user in self.users() {
            if user_filter(user) {
                filtered.add_user(user);
            }
        }
        for (user, item) in self.impressions() {
            if impression_filter(user, item) {
                filtered.add_impression(user, item);
            }
        }

        debug!(
            "Filtered impressions: {} -> {}",
            self.num_impressions(),
            filtered.num_impressions()
        );
        filtered
    }
}

impl<U: Key, I: Key> Default for ImpressionGraph<U, I> {
    fn default() -> Self {
        Self::new()
    }
}
