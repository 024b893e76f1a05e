//! The weighted user-item interaction matrix.
//!
//! Storage is a single arena of edges plus two adjacency lists of edge
//! indices (one per user slot, one per item slot). Both views read the weight
//! from the same arena entry, so the user-side and item-side answers can never
//! disagree.

use crate::registry::KeyRegistry;
use crate::types::{AddOutcome, ItemId, Key, MatrixConfig, Rejection, UserId};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// One stored edge. `user` and `item` are registry slots.
#[derive(Debug, Clone, Copy)]
struct Edge {
    user: usize,
    item: usize,
    weight: f64,
}

/// Write counters of an `InteractionMatrix`.
///
/// `distinct*` count (user, item) pairs, `total*` count accepted writes
/// including repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriteCounters {
    pub distinct: usize,
    pub distinct_relevant: usize,
    pub total: usize,
    pub total_relevant: usize,
}

impl WriteCounters {
    fn record_write(&mut self, relevant: bool) {
        self.total += 1;
        if relevant {
            self.total_relevant += 1;
        }
    }
}

/// Sparse bipartite matrix of weighted user -> item edges.
///
/// Keys must be registered with `add_user` / `add_item` before any edge can
/// reference them. There are no removal operations: build it once, then query.
#[derive(Debug, Clone)]
pub struct InteractionMatrix<U: Key = UserId, I: Key = ItemId> {
    config: MatrixConfig,
    users: KeyRegistry<U>,
    items: KeyRegistry<I>,
    edges: Vec<Edge>,
    user_adjacency: Vec<Vec<usize>>,
    item_adjacency: Vec<Vec<usize>>,
    lookup: HashMap<(usize, usize), usize>,
    counters: WriteCounters,
}

impl<U: Key, I: Key> InteractionMatrix<U, I> {
    /// Creates an empty matrix with the given weight policy
    pub fn new(config: MatrixConfig) -> Self {
        Self {
            config,
            users: KeyRegistry::new(),
            items: KeyRegistry::new(),
            edges: Vec::new(),
            user_adjacency: Vec::new(),
            item_adjacency: Vec::new(),
            lookup: HashMap::new(),
            counters: WriteCounters::default(),
        }
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    // Mutators - only used during ingestion

    /// Register a user. Returns false if it was already known.
    pub fn add_user(&mut self, user: U) -> bool {
        let (_, is_new) = self.users.insert(user);
        if is_new {
            self.user_adjacency.push(Vec::new());
        }
        is_new
    }

    /// Register an item. Returns false if it was already known.
    pub fn add_item(&mut self, item: I) -> bool {
        let (_, is_new) = self.items.insert(item);
        if is_new {
            self.item_adjacency.push(Vec::new());
        }
        is_new
    }

    /// Write an edge.
    ///
    /// ## Repeat policy
    /// When the pair already has an edge:
    /// 1. binarized + accumulate: stored = old + binarized(weight)
    /// 2. accumulate only: stored = max(old, weight)
    /// 3. otherwise the write is rejected as a duplicate
    ///
    /// Only the first write of a pair bumps the distinct counter. The distinct
    /// relevant counter also moves when a repeat lifts a non-relevant edge to
    /// relevant. Total counters move on every accepted write.
    pub fn add_edge(&mut self, user: U, item: I, weight: f64) -> AddOutcome {
        let Some(u) = self.users.slot(user) else {
            return AddOutcome::Rejected(Rejection::UnknownUser);
        };
        let Some(i) = self.items.slot(item) else {
            return AddOutcome::Rejected(Rejection::UnknownItem);
        };
        if weight.is_nan() {
            return AddOutcome::Rejected(Rejection::InvalidWeight);
        }

        let value = self.config.stored_value(weight);
        let relevant = self.config.meets_threshold(weight);

        match self.lookup.get(&(u, i)).copied() {
            None => {
                let idx = self.edges.len();
                self.edges.push(Edge {
                    user: u,
                    item: i,
                    weight: value,
                });
                self.user_adjacency[u].push(idx);
                self.item_adjacency[i].push(idx);
                self.lookup.insert((u, i), idx);

                self.counters.distinct += 1;
                if relevant {
                    self.counters.distinct_relevant += 1;
                }
                self.counters.record_write(relevant);
                AddOutcome::Added
            }
            Some(idx) if self.config.accumulate_on_repeat => {
                let old = self.edges[idx].weight;
                let was_relevant = self.config.is_relevant(old);
                self.edges[idx].weight = if self.config.binarize {
                    old + value
                } else {
                    old.max(value)
                };

                if !was_relevant && relevant {
                    self.counters.distinct_relevant += 1;
                }
                self.counters.record_write(relevant);
                AddOutcome::Updated
            }
            Some(_) => AddOutcome::Rejected(Rejection::Duplicate),
        }
    }

    // Queries

    /// Stored weight of an edge, `None` if the pair has none
    pub fn edge(&self, user: U, item: I) -> Option<f64> {
        let u = self.users.slot(user)?;
        let i = self.items.slot(item)?;
        self.lookup.get(&(u, i)).map(|&idx| self.edges[idx].weight)
    }

    /// Whether a stored weight counts as relevant under this matrix's policy
    pub fn is_relevant(&self, stored: f64) -> bool {
        self.config.is_relevant(stored)
    }

    /// Items rated by a user, with their weights.
    ///
    /// Empty if the user has no edges or is not registered.
    pub fn user_edges(&self, user: U) -> impl Iterator<Item = (I, f64)> + '_ {
        self.adjacency_of(&self.user_adjacency, self.users.slot(user))
            .iter()
            .map(move |&idx| {
                let edge = self.edges[idx];
                (self.items.key(edge.item), edge.weight)
            })
    }

    /// Users who rated an item, with their weights
    pub fn item_edges(&self, item: I) -> impl Iterator<Item = (U, f64)> + '_ {
        self.adjacency_of(&self.item_adjacency, self.items.slot(item))
            .iter()
            .map(move |&idx| {
                let edge = self.edges[idx];
                (self.users.key(edge.user), edge.weight)
            })
    }

    /// `user_edges` restricted to relevant weights
    pub fn relevant_user_edges(&self, user: U) -> impl Iterator<Item = (I, f64)> + '_ {
        self.user_edges(user)
            .filter(move |&(_, weight)| self.config.is_relevant(weight))
    }

    /// `item_edges` restricted to relevant weights
    pub fn relevant_item_edges(&self, item: I) -> impl Iterator<Item = (U, f64)> + '_ {
        self.item_edges(item)
            .filter(move |&(_, weight)| self.config.is_relevant(weight))
    }

    /// Number of edges of a user (0 if unknown)
    pub fn user_degree(&self, user: U) -> usize {
        self.adjacency_of(&self.user_adjacency, self.users.slot(user))
            .len()
    }

    /// Number of edges of an item (0 if unknown)
    pub fn item_degree(&self, item: I) -> usize {
        self.adjacency_of(&self.item_adjacency, self.items.slot(item))
            .len()
    }

    pub fn relevant_user_degree(&self, user: U) -> usize {
        self.relevant_user_edges(user).count()
    }

    pub fn relevant_item_degree(&self, item: I) -> usize {
        self.relevant_item_edges(item).count()
    }

    /// All edges in the order they were first written
    pub fn edges(&self) -> impl Iterator<Item = (U, I, f64)> + '_ {
        self.edges.iter().map(move |edge| {
            (
                self.users.key(edge.user),
                self.items.key(edge.item),
                edge.weight,
            )
        })
    }

    /// Registered users in registration order
    pub fn users(&self) -> &[U] {
        self.users.keys()
    }

    /// Registered items in registration order
    pub fn items(&self) -> &[I] {
        self.items.keys()
    }

    pub fn contains_user(&self, user: U) -> bool {
        self.users.contains(user)
    }

    pub fn contains_item(&self, item: I) -> bool {
        self.items.contains(item)
    }

    pub fn num_users(&self) -> usize {
        self.users.len()
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Distinct (user, item) pairs
    pub fn num_edges(&self) -> usize {
        self.counters.distinct
    }

    /// Distinct pairs whose weight is relevant
    pub fn num_relevant_edges(&self) -> usize {
        self.counters.distinct_relevant
    }

    /// Accepted writes, repeats included
    pub fn num_total_writes(&self) -> usize {
        self.counters.total
    }

    /// Accepted writes whose raw weight met the threshold, repeats included
    pub fn num_total_relevant_writes(&self) -> usize {
        self.counters.total_relevant
    }

    pub fn counters(&self) -> WriteCounters {
        self.counters
    }

    /// Build a sub-matrix keeping only the keys and edges that pass the
    /// predicates.
    ///
    /// The result stores the current weights as raw values and rejects
    /// repeats. A binarized source gets a threshold of 0.5 so its 0/1 (or
    /// accumulated) weights keep their relevance.
    pub fn filter(
        &self,
        user_filter: impl Fn(U) -> bool,
        item_filter: impl Fn(I) -> bool,
        edge_filter: impl Fn(U, I, f64) -> bool,
    ) -> Self {
        let threshold = if self.config.binarize {
            0.5
        } else {
            self.config.relevance_threshold
        };
        let mut filtered = Self::new(MatrixConfig::new(threshold));

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
        for (user, item, weight) in self.edges() {
            if edge_filter(user, item, weight) {
                // Dropped keys make this a rejected no-op
                filtered.add_edge(user, item, weight);
            }
        }

        debug!(
            "Filtered matrix: {} -> {} users, {} -> {} items, {} -> {} edges",
            self.num_users(),
            filtered.num_users(),
            self.num_items(),
            filtered.num_items(),
            self.num_edges(),
            filtered.num_edges()
        );
        filtered
    }

    fn adjacency_of<'a>(&self, adjacency: &'a [Vec<usize>], slot: Option<usize>) -> &'a [usize] {
        slot.map(|s| adjacency[s].as_slice()).unwrap_or(&[])
    }
}

impl<U: Key, I: Key> Default for InteractionMatrix<U, I> {
    fn default() -> Self {
        Self::new(MatrixConfig::default())
    }
}
