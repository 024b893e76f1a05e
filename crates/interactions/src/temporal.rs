//! Append-only log of timestamped interactions.
//!
//! The log is sorted lazily: appends are O(1) and mark it unsorted, and the
//! first chronological query after that sorts it once.

use crate::types::{ItemId, Key, Timestamp, UserId};
use serde::Serialize;

/// A single (user, item, timestamp) event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timepoint<U = UserId, I = ItemId> {
    pub user: U,
    pub item: I,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone)]
pub struct TemporalLog<U: Key = UserId, I: Key = ItemId> {
    points: Vec<Timepoint<U, I>>,
    sorted: bool,
    min_timestamp: Option<Timestamp>,
    max_timestamp: Option<Timestamp>,
}

impl<U: Key, I: Key> TemporalLog<U, I> {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            sorted: true,
            min_timestamp: None,
            max_timestamp: None,
        }
    }

    /// Record an event.
    ///
    /// Unlike matrix and graph writes this cannot be rejected: the log has no
    /// key universe to check against, and repeated events are kept as
    /// separate entries.
    pub fn append(&mut self, user: U, item: I, timestamp: Timestamp) {
        self.points.push(Timepoint {
            user,
            item,
            timestamp,
        });
        self.sorted = false;

        if self.min_timestamp.is_none_or(|min| timestamp < min) {
            self.min_timestamp = Some(timestamp);
        }
        if self.max_timestamp.is_none_or(|max| timestamp > max) {
            self.max_timestamp = Some(timestamp);
        }
    }

    /// Sort by timestamp if an append happened since the last sort.
    ///
    /// The sort is stable: events sharing a timestamp keep append order.
    pub fn ensure_sorted(&mut self) {
        if !self.sorted {
            self.points.sort_by_key(|p| p.timestamp);
            self.sorted = true;
        }
    }

    /// Users paired with their event timestamps, oldest first
    pub fn by_user(&mut self) -> Vec<(U, Timestamp)> {
        self.ensure_sorted();
        self.points.iter().map(|p| (p.user, p.timestamp)).collect()
    }

    /// Items paired with their event timestamps, oldest first
    pub fn by_item(&mut self) -> Vec<(I, Timestamp)> {
        self.ensure_sorted();
        self.points.iter().map(|p| (p.item, p.timestamp)).collect()
    }

    /// Events in chronological order
    pub fn chronological(&mut self) -> &[Timepoint<U, I>] {
        self.ensure_sorted();
        &self.points
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Earliest timestamp seen, `None` while empty
    pub fn min_timestamp(&self) -> Option<Timestamp> {
        self.min_timestamp
    }

    /// Latest timestamp seen, `None` while empty
    pub fn max_timestamp(&self) -> Option<Timestamp> {
        self.max_timestamp
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// New log with only the events whose user and item pass the predicates
    pub fn filter(&self, user_filter: impl Fn(U) -> bool, item_filter: impl Fn(I) -> bool) -> Self {
        let mut filtered = Self::new();
        for point in &self.points {
            if user_filter(point.user) && item_filter(point.item) {
                filtered.append(point.user, point.item, point.timestamp);
            }
        }
        filtered
    }
}

impl<U: Key, I: Key> Default for TemporalLog<U, I> {
    fn default() -> Self {
        Self::new()
    }
}
