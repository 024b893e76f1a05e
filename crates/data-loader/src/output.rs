//! Tables produced by a dataset analysis, ready for a writer.

use interactions::{Key, TemporalLog, Timestamp};
use properties::{Direction, Distribution, item_timeline, user_timeline};

/// Content of one output table
#[derive(Debug, Clone, PartialEq)]
pub enum TableData {
    /// Interactions per key, most popular first
    Popularity(Distribution),
    /// Impressions per key, largest first
    Impressions(Distribution),
    /// Relabeled key ids in timestamp order
    Timeline(Vec<(usize, Timestamp)>),
}

impl TableData {
    /// Column names of the table
    pub fn header(&self) -> [&'static str; 2] {
        match self {
            TableData::Popularity(_) => ["Id", "Num. Ratings"],
            TableData::Impressions(_) => ["Id", "Num. Impressions"],
            TableData::Timeline(_) => ["Id", "Timestamp"],
        }
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        match self {
            TableData::Popularity(d) | TableData::Impressions(d) => d.len(),
            TableData::Timeline(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named table; the name is the output file stem
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    pub name: String,
    pub data: TableData,
}

impl OutputTable {
    pub fn new(name: impl Into<String>, data: TableData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// User timelines of a log, in both directions
pub fn user_timelines<U: Key, I: Key>(name: &str, log: &mut TemporalLog<U, I>) -> [OutputTable; 2] {
    [Direction::FirstOccurrence, Direction::LastOccurrence].map(|direction| {
        OutputTable::new(
            format!("{}{}", name, direction.suffix()),
            TableData::Timeline(user_timeline(log, direction)),
        )
    })
}

/// Item timelines of a log, in both directions
pub fn item_timelines<U: Key, I: Key>(name: &str, log: &mut TemporalLog<U, I>) -> [OutputTable; 2] {
    [Direction::FirstOccurrence, Direction::LastOccurrence].map(|direction| {
        OutputTable::new(
            format!("{}{}", name, direction.suffix()),
            TableData::Timeline(item_timeline(log, direction)),
        )
    })
}
