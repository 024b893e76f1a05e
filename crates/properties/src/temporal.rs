//! Chronological key tables and their dense relabeling.

use interactions::{Key, TemporalLog, Timestamp};
use std::collections::HashMap;

/// Which end of the timeline a relabeling starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Oldest event first; ids follow first appearance
    FirstOccurrence,
    /// Newest event first; ids follow last appearance
    LastOccurrence,
}

impl Direction {
    /// File name suffix used when both directions are written side by side
    pub fn suffix(&self) -> &'static str {
        match self {
            Direction::FirstOccurrence => "",
            Direction::LastOccurrence => "-inv",
        }
    }
}

/// Replace every key of a chronological `(key, timestamp)` table by a dense
/// id, assigned in order of first appearance when walking in `direction`.
///
/// `pairs` must be oldest first (as returned by [`TemporalLog::by_user`]);
/// for [`Direction::LastOccurrence`] the output is newest first.
pub fn relabel<K: Key>(pairs: &[(K, Timestamp)], direction: Direction) -> Vec<(usize, Timestamp)> {
    let mut ids: HashMap<K, usize> = HashMap::new();
    let mut assign = |&(key, timestamp): &(K, Timestamp)| {
        let next = ids.len();
        let id = *ids.entry(key).or_insert(next);
        (id, timestamp)
    };

    match direction {
        Direction::FirstOccurrence => pairs.iter().map(&mut assign).collect(),
        Direction::LastOccurrence => pairs.iter().rev().map(&mut assign).collect(),
    }
}

/// Relabeled user timeline of a log
pub fn user_timeline<U: Key, I: Key>(log: &mut TemporalLog<U, I>, direction: Direction) -> Vec<(usize, Timestamp)> {
    relabel(&log.by_user(), direction)
}

/// Relabeled item timeline of a log
pub fn item_timeline<U: Key, I: Key>(log: &mut TemporalLog<U, I>, direction: Direction) -> Vec<(usize, Timestamp)> {
    relabel(&log.by_item(), direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_log() -> TemporalLog<&'static str, &'static str> {
        let mut log = TemporalLog::new();
        log.append("A", "X", 30);
        log.append("B", "Y", 10);
        log.append("A", "Y", 20);
        log.append("C", "X", 40);
        log
    }

    #[test]
    fn test_first_occurrence() {
        let mut log = create_test_log();
        // B, A, A, C
        assert_eq!(
            user_timeline(&mut log, Direction::FirstOccurrence),
            vec![(0, 10), (1, 20), (1, 30), (2, 40)]
        );
    }

    #[test]
    fn test_last_occurrence() {
        let mut log = create_test_log();
        // C, A, A, B
        assert_eq!(
            user_timeline(&mut log, Direction::LastOccurrence),
            vec![(0, 40), (1, 30), (1, 20), (2, 10)]
        );
    }

    #[test]
    fn test_item_timeline() {
        let mut log = create_test_log();
        // Y, Y, X, X
        assert_eq!(
            item_timeline(&mut log, Direction::FirstOccurrence),
            vec![(0, 10), (0, 20), (1, 30), (1, 40)]
        );
    }

    #[test]
    fn test_empty() {
        let pairs: Vec<(u32, Timestamp)> = Vec::new();
        assert!(relabel(&pairs, Direction::LastOccurrence).is_empty());
        assert_eq!(Direction::LastOccurrence.suffix(), "-inv");
    }
}
