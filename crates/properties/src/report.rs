//! Ordered collection of named scalar statistics.
//!
//! An aggregator feeds `(name, value)` pairs into a [`ReportBuilder`]; the
//! resulting [`StatisticsReport`] keeps insertion order so that writers emit
//! statistics in the order they were computed.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A statistic value, rendered either as an integer or as a real number
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Integer(i64),
    Real(f64),
}

impl StatValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            StatValue::Integer(v) => v as f64,
            StatValue::Real(v) => v,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, StatValue::Integer(_))
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Integer(v) => write!(f, "{}", v),
            StatValue::Real(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatEntry {
    pub name: String,
    pub value: StatValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatisticsReport {
    entries: Vec<StatEntry>,
}

impl StatisticsReport {
    pub fn builder() -> ReportBuilder {
        ReportBuilder::default()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[StatEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<StatValue> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.value)
    }

    /// Value of an integer statistic, `None` if absent or real-valued
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            StatValue::Integer(v) => Some(v),
            StatValue::Real(_) => None,
        }
    }

    /// Value of a real statistic, `None` if absent or integer-valued
    pub fn real(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            StatValue::Real(v) => Some(v),
            StatValue::Integer(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON array of `{name, value}` objects.
    ///
    /// Undefined reals (NaN) come out as `null`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Accumulates statistics into a [`StatisticsReport`].
///
/// Adding a name that is already present replaces its value in place.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    entries: Vec<StatEntry>,
    /// name -> position in `entries`
    positions: HashMap<String, usize>,
}

impl ReportBuilder {
    pub fn integer(self, name: impl Into<String>, value: i64) -> Self {
        self.push(name.into(), StatValue::Integer(value))
    }

    /// Integer statistic from a count
    pub fn count(self, name: impl Into<String>, value: usize) -> Self {
        let value = i64::try_from(value).unwrap_or(i64::MAX);
        self.push(name.into(), StatValue::Integer(value))
    }

    pub fn real(self, name: impl Into<String>, value: f64) -> Self {
        self.push(name.into(), StatValue::Real(value))
    }

    /// Append every entry of another report, in its order
    pub fn extend(mut self, report: StatisticsReport) -> Self {
        for entry in report.entries {
            self = self.push(entry.name, entry.value);
        }
        self
    }

    pub fn build(self) -> StatisticsReport {
        StatisticsReport {
            entries: self.entries,
        }
    }

    fn push(mut self, name: String, value: StatValue) -> Self {
        match self.positions.get(&name).copied() {
            Some(position) => self.entries[position].value = value,
            None => {
                self.positions.insert(name.clone(), self.entries.len());
                self.entries.push(StatEntry { name, value });
            }
        }
        self
    }
}
