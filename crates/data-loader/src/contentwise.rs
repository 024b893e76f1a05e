//! ContentWise Impressions dataset.
//!
//! Three CSV files feed one `ContentWiseDataset`:
//! - the interactions file, which populates four implicit-feedback matrices
//!   (user-item, user-series, and both restricted to interactions that came
//!   from a recommendation) and their temporal logs
//! - the impressions with a direct link, keyed by recommendation id and
//!   resolved to a user through the interactions
//! - the impressions without a direct link, keyed by user id
//!
//! Impressions are series shown to a user, so the impression graph has
//! series on its item side.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use interactions::{ImpressionGraph, InteractionMatrix, ItemId, MatrixConfig, TemporalLog, UserId};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

pub struct ContentWiseDataset {
    user_item: InteractionMatrix<UserId, ItemId>,
    user_series: InteractionMatrix<UserId, SeriesId>,
    user_item_from_recs: InteractionMatrix<UserId, ItemId>,
    user_series_from_recs: InteractionMatrix<UserId, SeriesId>,

    user_item_log: TemporalLog<UserId, ItemId>,
    user_series_log: TemporalLog<UserId, SeriesId>,
    user_item_from_recs_log: TemporalLog<UserId, ItemId>,
    user_series_from_recs_log: TemporalLog<UserId, SeriesId>,

    items: HashMap<ItemId, ContentWiseItem>,
    series: HashMap<SeriesId, ContentWiseSeries>,

    impressions: ImpressionGraph<UserId, SeriesId>,
}

impl ContentWiseDataset {
    fn new() -> Self {
        let config = MatrixConfig::implicit_feedback();
        Self {
            user_item: InteractionMatrix::new(config),
            user_series: InteractionMatrix::new(config),
            user_item_from_recs: InteractionMatrix::new(config),
            user_series_from_recs: InteractionMatrix::new(config),
            user_item_log: TemporalLog::new(),
            user_series_log: TemporalLog::new(),
            user_item_from_recs_log: TemporalLog::new(),
            user_series_from_recs_log: TemporalLog::new(),
            items: HashMap::new(),
            series: HashMap::new(),
            impressions: ImpressionGraph::new(),
        }
    }

    /// Load the dataset from its three CSV files
    ///
    /// The files are parsed in parallel; the structures are then populated
    /// sequentially from the parsed records.
    #[instrument(skip_all, fields(interactions = %interactions.display()))]
    pub fn load(interactions: &Path, impressions_direct: &Path, impressions_non_direct: &Path) -> Result<Self> {
        info!("Loading ContentWise Impressions dataset");

        let (records, (direct, non_direct)) = rayon::join(
            || parser::parse_contentwise_interactions(interactions),
            || {
                rayon::join(
                    || parser::parse_contentwise_impressions::<RecommendationId>(impressions_direct, "recommendation_id"),
                    || parser::parse_contentwise_impressions::<UserId>(impressions_non_direct, "user_id"),
                )
            },
        );
        let records = records?;
        let direct = direct?;
        let non_direct = non_direct?;

        info!(
            "Parsed {} interactions, {} direct and {} non-direct impression lists",
            records.len(),
            direct.len(),
            non_direct.len()
        );

        Ok(Self::from_records(&records, &direct, &non_direct))
    }

    /// Build the dataset from already parsed records
    pub fn from_records(
        records: &[ContentWiseInteraction],
        direct: &[ImpressionRecord<RecommendationId>],
        non_direct: &[ImpressionRecord<UserId>],
    ) -> Self {
        let mut dataset = Self::new();
        let mut rec_to_user: HashMap<RecommendationId, UserId> = HashMap::new();

        for record in records {
            dataset.add_interaction(record, &mut rec_to_user);
        }

        let mut unresolved = 0;
        let mut rejected = 0;
        for record in direct {
            match rec_to_user.get(&record.key) {
                Some(&user) => rejected += dataset.add_impressions(user, &record.series),
                None => unresolved += 1,
            }
        }
        if unresolved > 0 {
            warn!("{} impression lists reference an unknown recommendation id", unresolved);
        }

        for record in non_direct {
            rejected += dataset.add_impressions(record.key, &record.series);
        }
        debug!("{} impressions rejected (unknown user or series, or repeated)", rejected);

        info!(
            "Loaded {} users, {} items, {} series, {} interactions, {} impressions",
            dataset.num_users(),
            dataset.num_items(),
            dataset.num_series(),
            dataset.user_item.num_total_writes(),
            dataset.impressions.num_impressions()
        );
        dataset
    }

    fn add_interaction(&mut self, record: &ContentWiseInteraction, rec_to_user: &mut HashMap<RecommendationId, UserId>) {
        let user = record.user_id;
        let item = record.item.id;
        let series = record.item.series_id;
        let ts = record.timestamp;

        self.items.insert(item, record.item);
        self.series.insert(
            series,
            ContentWiseSeries {
                id: series,
                length: record.series_length,
            },
        );

        // every matrix shares the same universes
        self.user_item.add_user(user);
        self.user_item.add_item(item);
        self.user_item_from_recs.add_user(user);
        self.user_item_from_recs.add_item(item);
        self.user_series.add_user(user);
        self.user_series.add_item(series);
        self.user_series_from_recs.add_user(user);
        self.user_series_from_recs.add_item(series);
        self.impressions.add_user(user);
        self.impressions.add_item(series);

        self.user_item.add_edge(user, item, 1.0);
        self.user_series.add_edge(user, series, 1.0);
        self.user_item_log.append(user, item, ts);
        self.user_series_log.append(user, series, ts);

        if record.from_recommendation() {
            rec_to_user.insert(record.recommendation_id, user);
            self.user_item_from_recs.add_edge(user, item, 1.0);
            self.user_series_from_recs.add_edge(user, series, 1.0);
            self.user_item_from_recs_log.append(user, item, ts);
            self.user_series_from_recs_log.append(user, series, ts);
        }
    }

    /// Returns how many of the impressions were rejected
    fn add_impressions(&mut self, user: UserId, series: &[SeriesId]) -> usize {
        series
            .iter()
            .filter(|&&s| !self.impressions.add_impression(user, s).is_added())
            .count()
    }

    pub fn num_users(&self) -> usize {
        self.user_item.num_users()
    }

    pub fn num_items(&self) -> usize {
        self.user_item.num_items()
    }

    pub fn num_series(&self) -> usize {
        self.user_series.num_items()
    }

    pub fn user_item(&self) -> &InteractionMatrix<UserId, ItemId> {
        &self.user_item
    }

    pub fn user_series(&self) -> &InteractionMatrix<UserId, SeriesId> {
        &self.user_series
    }

    /// User-item interactions that came from a recommendation
    pub fn user_item_from_recommendations(&self) -> &InteractionMatrix<UserId, ItemId> {
        &self.user_item_from_recs
    }

    /// User-series interactions that came from a recommendation
    pub fn user_series_from_recommendations(&self) -> &InteractionMatrix<UserId, SeriesId> {
        &self.user_series_from_recs
    }

    /// Series shown to each user
    pub fn impressions(&self) -> &ImpressionGraph<UserId, SeriesId> {
        &self.impressions
    }

    pub fn user_item_log(&mut self) -> &mut TemporalLog<UserId, ItemId> {
        &mut self.user_item_log
    }

    pub fn user_series_log(&mut self) -> &mut TemporalLog<UserId, SeriesId> {
        &mut self.user_series_log
    }

    pub fn user_item_from_recommendations_log(&mut self) -> &mut TemporalLog<UserId, ItemId> {
        &mut self.user_item_from_recs_log
    }

    pub fn user_series_from_recommendations_log(&mut self) -> &mut TemporalLog<UserId, SeriesId> {
        &mut self.user_series_from_recs_log
    }

    /// Earliest and latest interaction timestamps
    pub fn time_span(&self) -> Option<(i64, i64)> {
        Some((self.user_item_log.min_timestamp()?, self.user_item_log.max_timestamp()?))
    }

    pub fn item(&self, id: ItemId) -> Option<&ContentWiseItem> {
        self.items.get(&id)
    }

    pub fn series(&self, id: SeriesId) -> Option<&ContentWiseSeries> {
        self.series.get(&id)
    }
}
