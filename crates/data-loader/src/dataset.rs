//! Supported dataset kinds and their loaders.
//!
//! Every kind maps to one loader function in `LOADERS`. A loader returns
//! the dataset behind the `Analysis` trait, which is all a front end needs:
//! a statistics report and the output tables.

use crate::contentwise::ContentWiseDataset;
use crate::error::{DataLoadError, Result};
use crate::output::{OutputTable, TableData, item_timelines, user_timelines};
use crate::replayer::ReplayerDataset;
use crate::statistics::{contentwise_statistics, replayer_statistics};
use properties::{ImpressionDistribution, PopularityDistribution, StatisticsReport};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// ContentWise Impressions
    ContentWise,
    /// Yahoo! R6B
    Replayer,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::ContentWise, DatasetKind::Replayer];

    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::ContentWise => "ContentWise",
            DatasetKind::Replayer => "Replayer",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where to read a dataset from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    ContentWise {
        interactions: PathBuf,
        impressions_direct: PathBuf,
        impressions_non_direct: PathBuf,
    },
    Replayer {
        folder: PathBuf,
        /// 0 keeps every user
        min_interactions: usize,
    },
}

impl DatasetSource {
    pub fn kind(&self) -> DatasetKind {
        match self {
            DatasetSource::ContentWise { .. } => DatasetKind::ContentWise,
            DatasetSource::Replayer { .. } => DatasetKind::Replayer,
        }
    }
}

/// A loaded dataset, seen by a front end
pub trait Analysis: Send {
    fn kind(&self) -> DatasetKind;

    /// Ordered named statistics
    fn statistics(&self) -> StatisticsReport;

    /// Distributions and timelines to write, one table per file.
    ///
    /// Needs `&mut self` because timelines sort the temporal logs.
    fn outputs(&mut self) -> Vec<OutputTable>;
}

pub type Loader = fn(&DatasetSource) -> Result<Box<dyn Analysis>>;

const LOADERS: &[(DatasetKind, Loader)] = &[
    (DatasetKind::ContentWise, load_contentwise),
    (DatasetKind::Replayer, load_replayer),
];

/// Loader registered for a dataset kind
pub fn loader_for(kind: DatasetKind) -> Option<Loader> {
    LOADERS
        .iter()
        .find(|(registered, _)| *registered == kind)
        .map(|&(_, loader)| loader)
}

/// Load a dataset with the loader of its kind
pub fn load(source: &DatasetSource) -> Result<Box<dyn Analysis>> {
    let kind = source.kind();
    let loader = loader_for(kind)
        .ok_or_else(|| DataLoadError::ValidationError(format!("No loader registered for {}", kind)))?;
    loader(source)
}

fn mismatch(expected: DatasetKind, source: &DatasetSource) -> DataLoadError {
    DataLoadError::ValidationError(format!(
        "{} loader cannot read a {} source",
        expected,
        source.kind()
    ))
}

fn load_contentwise(source: &DatasetSource) -> Result<Box<dyn Analysis>> {
    match source {
        DatasetSource::ContentWise {
            interactions,
            impressions_direct,
            impressions_non_direct,
        } => Ok(Box::new(ContentWiseDataset::load(
            interactions,
            impressions_direct,
            impressions_non_direct,
        )?)),
        other => Err(mismatch(DatasetKind::ContentWise, other)),
    }
}

fn load_replayer(source: &DatasetSource) -> Result<Box<dyn Analysis>> {
    match source {
        DatasetSource::Replayer {
            folder,
            min_interactions,
        } => Ok(Box::new(ReplayerDataset::load(folder, *min_interactions)?)),
        other => Err(mismatch(DatasetKind::Replayer, other)),
    }
}

impl Analysis for ContentWiseDataset {
    fn kind(&self) -> DatasetKind {
        DatasetKind::ContentWise
    }

    fn statistics(&self) -> StatisticsReport {
        contentwise_statistics(self)
    }

    fn outputs(&mut self) -> Vec<OutputTable> {
        let popularity = |name: &str, distribution| OutputTable::new(name, TableData::Popularity(distribution));

        let mut tables = vec![
            popularity("pop-user-item", PopularityDistribution::new(self.user_item()).items()),
            popularity("pop-user-series", PopularityDistribution::new(self.user_series()).items()),
            popularity(
                "pop-user-item-impr",
                PopularityDistribution::new(self.user_item_from_recommendations()).items(),
            ),
            popularity(
                "pop-user-series-impr",
                PopularityDistribution::new(self.user_series_from_recommendations()).items(),
            ),
        ];

        let impressions = ImpressionDistribution::new(self.impressions());
        tables.push(OutputTable::new("impr-user", TableData::Impressions(impressions.users())));
        tables.push(OutputTable::new("impr-series", TableData::Impressions(impressions.items())));

        tables.extend(user_timelines("time-users", self.user_item_log()));
        tables.extend(item_timelines("time-items", self.user_item_log()));
        tables.extend(item_timelines("time-series", self.user_series_log()));
        tables.extend(user_timelines("time-users-impressions", self.user_item_from_recommendations_log()));
        tables.extend(item_timelines("time-items-impressions", self.user_item_from_recommendations_log()));
        tables.extend(item_timelines("time-series-impressions", self.user_series_from_recommendations_log()));
        tables
    }
}

impl Analysis for ReplayerDataset {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Replayer
    }

    fn statistics(&self) -> StatisticsReport {
        replayer_statistics(self)
    }

    fn outputs(&mut self) -> Vec<OutputTable> {
        let impressions = ImpressionDistribution::new(self.impressions());
        let mut tables = vec![
            OutputTable::new(
                "pop-user-item",
                TableData::Popularity(PopularityDistribution::new(self.user_item()).items()),
            ),
            OutputTable::new("impr-user", TableData::Impressions(impressions.users())),
            OutputTable::new("impr-items", TableData::Impressions(impressions.items())),
        ];

        tables.extend(user_timelines("time-users", self.log()));
        tables.extend(item_timelines("time-items", self.log()));
        tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    #[test]
    fn test_every_kind_has_a_loader() {
        for kind in DatasetKind::ALL {
            assert!(loader_for(kind).is_some(), "no loader for {}", kind);
        }
    }

    #[test]
    fn test_loader_rejects_other_source() {
        let source = DatasetSource::Replayer {
            folder: PathBuf::from("/nonexistent"),
            min_interactions: 0,
        };
        let result = load_contentwise(&source);
        assert!(matches!(result, Err(DataLoadError::ValidationError(_))));
    }

    #[test]
    fn test_missing_input_is_reported() {
        let source = DatasetSource::ContentWise {
            interactions: PathBuf::from("/nonexistent/interactions.csv"),
            impressions_direct: PathBuf::from("/nonexistent/direct.csv"),
            impressions_non_direct: PathBuf::from("/nonexistent/non-direct.csv"),
        };
        assert!(matches!(load(&source), Err(DataLoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_replayer_outputs() {
        let mut user = FeatureSignature::default();
        user.set(9).unwrap();
        let events = vec![ReplayerEvent {
            timestamp: 1,
            displayed_item: "a".to_string(),
            click: 0.0,
            user,
            pool: vec!["a".to_string()],
        }];
        let mut dataset = ReplayerDataset::from_events(&events, 0);

        let names: Vec<String> = dataset.outputs().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "pop-user-item",
                "impr-user",
                "impr-items",
                "time-users",
                "time-users-inv",
                "time-items",
                "time-items-inv"
            ]
        );
        assert_eq!(dataset.kind(), DatasetKind::Replayer);
    }
}
