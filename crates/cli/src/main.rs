mod writers;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::DatasetSource;
use properties::{StatValue, StatisticsReport};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// dataset-stats - Statistics of recommendation datasets with impressions
#[derive(Parser)]
#[command(name = "dataset-stats")]
#[command(about = "Computes distributional statistics of recommendation datasets", long_about = None)]
struct Cli {
    /// Directory for the statistics and distribution files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Format of the statistics report
    #[arg(long, value_enum, default_value_t = ReportFormat::Tsv)]
    format: ReportFormat,

    /// Only write the statistics report
    #[arg(long)]
    stats_only: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// ContentWise Impressions dataset
    #[command(name = "contentwise")]
    ContentWise {
        /// Interactions CSV file
        interactions: PathBuf,

        /// Impressions CSV with a direct link to the interactions
        impressions_direct: PathBuf,

        /// Impressions CSV without a direct link
        impressions_non_direct: PathBuf,
    },

    /// Yahoo! R6B dataset
    Replayer {
        /// Folder with the event logs
        folder: PathBuf,

        /// Drop users with fewer events (0 keeps everyone)
        #[arg(long, default_value = "0")]
        min_interactions: usize,
    },
}

impl Commands {
    fn into_source(self) -> DatasetSource {
        match self {
            Commands::ContentWise {
                interactions,
                impressions_direct,
                impressions_non_direct,
            } => DatasetSource::ContentWise {
                interactions,
                impressions_direct,
                impressions_non_direct,
            },
            Commands::Replayer {
                folder,
                min_interactions,
            } => DatasetSource::Replayer {
                folder,
                min_interactions,
            },
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// `stats.txt`, tab-separated
    Tsv,
    /// `stats.json`
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("Failed to create output directory {}", cli.output_dir.display()))?;

    let source = cli.command.into_source();
    let kind = source.kind();

    println!("Loading {} dataset...", kind);
    let start = Instant::now();
    let mut dataset = data_loader::load(&source).with_context(|| format!("Failed to load {} dataset", kind))?;
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    // Statistics
    let report = dataset.statistics();
    let report_path = match cli.format {
        ReportFormat::Tsv => {
            let path = cli.output_dir.join("stats.txt");
            writers::write_report(&report, &path)?;
            path
        }
        ReportFormat::Json => {
            let path = cli.output_dir.join("stats.json");
            writers::write_report_json(&report, &path)?;
            path
        }
    };
    println!(
        "{} Stats computed ({:?}), written to {}",
        "✓".green(),
        start.elapsed(),
        report_path.display()
    );
    print_report(&report);

    if cli.stats_only {
        return Ok(());
    }

    // Distributions and timelines
    let tables = dataset.outputs();
    for table in &tables {
        let path = writers::write_table(table, &cli.output_dir)?;
        tracing::debug!("Wrote {} rows to {}", table.data.len(), path.display());
    }
    println!(
        "{} Distributions computed ({:?}), {} files written",
        "✓".green(),
        start.elapsed(),
        tables.len()
    );

    Ok(())
}

/// Print the report, undefined values highlighted
fn print_report(report: &StatisticsReport) {
    println!("{}", "Statistics:".bold().blue());
    for entry in report.entries() {
        let value = match entry.value {
            StatValue::Real(v) if v.is_nan() => "undefined".yellow().to_string(),
            StatValue::Real(v) => format!("{:.4}", v),
            StatValue::Integer(v) => v.to_string(),
        };
        println!("{}{}: {}", "• ".green(), entry.name, value);
    }
}
