//! Parsers for the raw dataset files.
//!
//! This module turns text files into typed records:
//! - ContentWise interactions CSV -> `ContentWiseInteraction`
//! - ContentWise impressions CSVs -> `ImpressionRecord`
//! - Yahoo! R6B event logs -> `ReplayerEvent`
//!
//! Parsing is fail-fast: the first malformed line aborts the file with a
//! `ParseError` naming the file and line. Nothing here touches the
//! interaction structures, so files can be parsed in parallel.
//!
//! Rust concepts used here:
//! - Generic parsing through the `FromStr` trait
//! - Borrowed `&str` slices into each line, no per-field allocation
//! - Closures capturing the error context

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Read a whole UTF-8 text file as lines
fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(|s| s.to_string()).collect())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse one field into any `FromStr` type, reporting the column on failure
fn parse_field<T: FromStr>(value: &str, file: &str, line: usize, column: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid {}: {}", column, e),
    })
}

/// Split a CSV record on commas outside double quotes.
///
/// Quotes are stripped; `""` inside a quoted field is a literal quote.
pub fn split_csv_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Column positions of a CSV file, looked up by header name
#[derive(Debug)]
pub struct CsvHeader {
    file: String,
    columns: HashMap<String, usize>,
}

impl CsvHeader {
    pub fn parse(file: &str, line: &str) -> Self {
        let columns = split_csv_record(line)
            .into_iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_string(), idx))
            .collect();
        Self {
            file: file.to_string(),
            columns,
        }
    }

    /// Position of a required column
    pub fn index(&self, column: &str) -> Result<usize> {
        self.columns
            .get(column)
            .copied()
            .ok_or_else(|| DataLoadError::MissingColumn {
                file: self.file.clone(),
                column: column.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Header line plus the non-empty data lines, numbered from 1 at the header
fn read_csv(path: &Path) -> Result<(CsvHeader, Vec<(usize, Vec<String>)>)> {
    let file = file_name(path);
    let lines = read_lines(path)?;
    let mut lines = lines.iter().enumerate();

    let header = lines
        .next()
        .map(|(_, line)| CsvHeader::parse(&file, line))
        .ok_or_else(|| DataLoadError::ParseError {
            file: file.clone(),
            line: 1,
            reason: "Missing header".to_string(),
        })?;

    let mut records = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_record(line);
        if fields.len() != header.len() {
            return Err(DataLoadError::FieldCountMismatch {
                file: file.clone(),
                expected: header.len(),
                found: fields.len(),
                line: line_no,
            });
        }
        records.push((line_no, fields));
    }
    Ok((header, records))
}

/// Parse the ContentWise interactions file
///
/// Required columns: utc_ts_milliseconds, user_id, item_id, series_id,
/// episode_number, series_length, item_type, recommendation_id.
/// Other columns are ignored.
pub fn parse_contentwise_interactions(path: &Path) -> Result<Vec<ContentWiseInteraction>> {
    let file = file_name(path);
    let (header, records) = read_csv(path)?;

    let ts_col = header.index("utc_ts_milliseconds")?;
    let user_col = header.index("user_id")?;
    let item_col = header.index("item_id")?;
    let series_col = header.index("series_id")?;
    let episode_col = header.index("episode_number")?;
    let length_col = header.index("series_length")?;
    let type_col = header.index("item_type")?;
    let rec_col = header.index("recommendation_id")?;

    let mut interactions = Vec::with_capacity(records.len());
    for (line_no, fields) in records {
        let field = |col: usize| fields[col].as_str();

        let type_code: u8 = parse_field(field(type_col), &file, line_no, "item_type")?;
        let item_type = ItemType::from_code(type_code).map_err(|e| DataLoadError::ParseError {
            file: file.clone(),
            line: line_no,
            reason: e.to_string(),
        })?;

        interactions.push(ContentWiseInteraction {
            timestamp: parse_field(field(ts_col), &file, line_no, "utc_ts_milliseconds")?,
            user_id: parse_field(field(user_col), &file, line_no, "user_id")?,
            item: ContentWiseItem {
                id: parse_field(field(item_col), &file, line_no, "item_id")?,
                series_id: parse_field(field(series_col), &file, line_no, "series_id")?,
                episode_number: parse_field(field(episode_col), &file, line_no, "episode_number")?,
                item_type,
            },
            series_length: parse_field(field(length_col), &file, line_no, "series_length")?,
            recommendation_id: parse_field(field(rec_col), &file, line_no, "recommendation_id")?,
        });
    }
    Ok(interactions)
}

/// Parse a ContentWise impressions file, keyed by `key_column`
/// (`recommendation_id` or `user_id`)
pub fn parse_contentwise_impressions<K>(path: &Path, key_column: &str) -> Result<Vec<ImpressionRecord<K>>>
where
    K: FromStr,
    K::Err: std::fmt::Display,
{
    let file = file_name(path);
    let (header, records) = read_csv(path)?;

    let key_col = header.index(key_column)?;
    let list_col = header.index("recommended_series_list")?;

    let mut impressions = Vec::with_capacity(records.len());
    for (line_no, fields) in records {
        impressions.push(ImpressionRecord {
            key: parse_field(&fields[key_col], &file, line_no, key_column)?,
            series: parse_series_list(&fields[list_col]).map_err(|e| DataLoadError::ParseError {
                file: file.clone(),
                line: line_no,
                reason: e.to_string(),
            })?,
        });
    }
    Ok(impressions)
}

/// Parse a bracketed list of series ids such as `[12 7 330]` or `[12, 7]`.
///
/// Any run of separators between two ids is accepted, but ids are unsigned:
/// a `-` or `+` sign is an `InvalidValue`.
pub fn parse_series_list(raw: &str) -> Result<Vec<SeriesId>> {
    let trimmed = raw.trim();
    let invalid = || DataLoadError::InvalidValue {
        field: "recommended_series_list".to_string(),
        value: trimmed.to_string(),
    };

    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(invalid)?;
    if inner.contains(['-', '+']) {
        return Err(invalid());
    }

    inner
        .split(|c: char| !c.is_ascii_digit())
        .filter(|token| !token.is_empty())
        .map(|token| token.parse().map_err(|_| invalid()))
        .collect()
}

/// Parse one Yahoo! R6B event log
///
/// Format: `timestamp displayed_item click |user f1 f2 ... |id1 |id2 ...`
///
/// Feature tokens of `|user` may carry a `:value` suffix, which is ignored.
pub fn parse_replayer_events(path: &Path) -> Result<Vec<ReplayerEvent>> {
    let file = file_name(path);
    let lines = read_lines(path)?;
    let mut events = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut parts = line_trimmed.split_whitespace();
        let mut next_field = |name: &str| {
            parts.next().ok_or_else(|| DataLoadError::ParseError {
                file: file.clone(),
                line: line_no,
                reason: format!("Missing {}", name),
            })
        };

        let timestamp = parse_field(next_field("timestamp")?, &file, line_no, "timestamp")?;
        let displayed_item = next_field("displayed item")?.to_string();
        let click = parse_field(next_field("click")?, &file, line_no, "click")?;

        let mut user = FeatureSignature::default();
        let mut pool = Vec::new();
        let mut in_user = false;
        for token in parts {
            if token == "|user" {
                in_user = true;
            } else if let Some(item) = token.strip_prefix('|') {
                in_user = false;
                pool.push(item.to_string());
            } else if in_user {
                let raw = token.split(':').next().unwrap_or(token);
                let feature: usize = parse_field(raw, &file, line_no, "user feature")?;
                user.set(feature).map_err(|e| DataLoadError::ParseError {
                    file: file.clone(),
                    line: line_no,
                    reason: e.to_string(),
                })?;
            }
            // item features are not used
        }

        events.push(ReplayerEvent {
            timestamp,
            displayed_item,
            click,
            user,
            pool,
        });
    }
    Ok(events)
}
