//! Tab-separated writers for reports and output tables.
//!
//! Every file has a header row and one row per entry. Distribution rows
//! are `rank\tcount`, timeline rows `id\ttimestamp`.

use anyhow::{Context, Result};
use data_loader::{OutputTable, TableData};
use properties::StatisticsReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write a report as `Stat\tValue` rows
pub fn write_report(report: &StatisticsReport, path: &Path) -> Result<()> {
    write_with(path, |out| {
        write!(out, "Stat\tValue")?;
        for entry in report.entries() {
            write!(out, "\n{}\t{}", entry.name, entry.value)?;
        }
        writeln!(out)
    })
}

/// Write a report as a JSON array of `{name, value}` objects
pub fn write_report_json(report: &StatisticsReport, path: &Path) -> Result<()> {
    let json = report.to_json().context("Failed to serialize statistics")?;
    write_with(path, |out| writeln!(out, "{}", json))
}

/// Write a table to `<dir>/<name>.txt`, returning the file path
pub fn write_table(table: &OutputTable, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{}.txt", table.name));
    let [key_column, value_column] = table.data.header();

    write_with(&path, |out| {
        write!(out, "{}\t{}", key_column, value_column)?;
        match &table.data {
            TableData::Popularity(distribution) | TableData::Impressions(distribution) => {
                for (rank, count) in distribution.ranked() {
                    write!(out, "\n{}\t{}", rank, count)?;
                }
            }
            TableData::Timeline(rows) => {
                for (id, timestamp) in rows {
                    write!(out, "\n{}\t{}", id, timestamp)?;
                }
            }
        }
        writeln!(out)
    })?;
    Ok(path)
}

fn write_with<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    body(&mut out)
        .and_then(|_| out.flush())
        .with_context(|| format!("Failed to write {}", path.display()))
}
