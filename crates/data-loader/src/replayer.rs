//! Yahoo! R6B "Replayer" dataset.
//!
//! The dataset is a folder of event logs. Each event shows one article to a
//! user and records whether it was clicked, together with the pool of
//! articles it was picked from. Users carry no id: the set of their active
//! features is used as one. Events without any identifying feature are
//! skipped.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::{FeatureSignature, ReplayerEvent};
use interactions::{ImpressionGraph, InteractionMatrix, ItemId, MatrixConfig, TemporalLog, UserId};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Files in the dataset folder that are not event logs
const SKIPPED_FILES: &[&str] = &["README.txt"];

pub struct ReplayerDataset {
    user_item: InteractionMatrix,
    log: TemporalLog,
    impressions: ImpressionGraph,
    /// Source name of each dense item id
    item_names: Vec<String>,
}

impl ReplayerDataset {
    /// Load every event log in `folder`
    ///
    /// With `min_interactions > 0`, users with fewer events are dropped from
    /// all three structures.
    #[instrument(skip_all, fields(folder = %folder.display()))]
    pub fn load(folder: &Path, min_interactions: usize) -> Result<Self> {
        info!("Loading Yahoo! R6B dataset");
        let files = event_files(folder)?;

        // parse in parallel, populate in file order
        let parsed: Vec<Vec<ReplayerEvent>> = files
            .par_iter()
            .map(|path| parser::parse_replayer_events(path))
            .collect::<Result<_>>()?;

        let total: usize = parsed.iter().map(Vec::len).sum();
        info!("Parsed {} events from {} files", total, files.len());

        Ok(Self::from_events(parsed.iter().flatten(), min_interactions))
    }

    /// Build the dataset from parsed events, in the given order
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a ReplayerEvent>, min_interactions: usize) -> Self {
        let mut dataset = Self {
            user_item: InteractionMatrix::new(MatrixConfig::implicit_feedback()),
            log: TemporalLog::new(),
            impressions: ImpressionGraph::new(),
            item_names: Vec::new(),
        };
        let mut users: HashMap<FeatureSignature, UserId> = HashMap::new();
        let mut items: HashMap<String, ItemId> = HashMap::new();
        let mut events_per_user: Vec<usize> = Vec::new();
        let mut anonymous = 0;

        for event in events {
            if event.user.is_empty() {
                anonymous += 1;
                continue;
            }

            let user = match users.get(&event.user) {
                Some(&user) => {
                    events_per_user[user as usize] += 1;
                    user
                }
                None => {
                    let user = users.len() as UserId;
                    users.insert(event.user, user);
                    dataset.user_item.add_user(user);
                    dataset.impressions.add_user(user);
                    events_per_user.push(1);
                    user
                }
            };

            let item = dataset.intern_item(&mut items, &event.displayed_item);
            dataset.user_item.add_edge(user, item, event.click);
            dataset.log.append(user, item, event.timestamp);

            for name in &event.pool {
                let shown = dataset.intern_item(&mut items, name);
                dataset.impressions.add_impression(user, shown);
            }
        }

        if anonymous > 0 {
            debug!("Skipped {} events without user features", anonymous);
        }

        if min_interactions > 0 {
            let keep = |user: UserId| events_per_user[user as usize] >= min_interactions;
            dataset.user_item = dataset.user_item.filter(keep, |_| true, |_, _, _| true);
            dataset.log = dataset.log.filter(keep, |_| true);
            dataset.impressions = dataset.impressions.filter(keep, |_| true, |_, _| true);
            info!(
                "Kept {} of {} users with at least {} events",
                dataset.user_item.num_users(),
                users.len(),
                min_interactions
            );
        }

        info!(
            "Loaded {} users, {} items, {} events, {} impressions",
            dataset.num_users(),
            dataset.num_items(),
            dataset.user_item.num_total_writes(),
            dataset.impressions.num_impressions()
        );
        dataset
    }

    /// Dense id of an item name, registering it on first sight
    fn intern_item(&mut self, items: &mut HashMap<String, ItemId>, name: &str) -> ItemId {
        if let Some(&item) = items.get(name) {
            return item;
        }
        let item = items.len() as ItemId;
        items.insert(name.to_string(), item);
        self.item_names.push(name.to_string());
        self.user_item.add_item(item);
        self.impressions.add_item(item);
        item
    }

    pub fn num_users(&self) -> usize {
        self.user_item.num_users()
    }

    pub fn num_items(&self) -> usize {
        self.user_item.num_items()
    }

    pub fn user_item(&self) -> &InteractionMatrix {
        &self.user_item
    }

    pub fn impressions(&self) -> &ImpressionGraph {
        &self.impressions
    }

    pub fn log(&mut self) -> &mut TemporalLog {
        &mut self.log
    }

    pub fn time_span(&self) -> Option<(i64, i64)> {
        Some((self.log.min_timestamp()?, self.log.max_timestamp()?))
    }

    /// Source name of a dense item id
    pub fn item_name(&self, item: ItemId) -> Option<&str> {
        self.item_names.get(item as usize).map(String::as_str)
    }
}

/// Event log files of a dataset folder, sorted by name
fn event_files(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(DataLoadError::FileNotFound {
            path: folder.display().to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        let skipped = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| SKIPPED_FILES.contains(&name));
        if path.is_file() && !skipped {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(DataLoadError::ValidationError(format!(
            "No event logs in {}",
            folder.display()
        )));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn event(timestamp: i64, features: &[usize], displayed: &str, click: f64, pool: &[&str]) -> ReplayerEvent {
        let mut user = FeatureSignature::default();
        for &f in features {
            user.set(f).unwrap();
        }
        ReplayerEvent {
            timestamp,
            displayed_item: displayed.to_string(),
            click,
            user,
            pool: pool.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn create_test_events() -> Vec<ReplayerEvent> {
        vec![
            event(10, &[2, 5], "a", 0.0, &["a", "b"]),
            event(20, &[1], "a", 1.0, &["a"]),
            event(30, &[5, 2], "b", 1.0, &["a", "b", "c"]),
            event(40, &[3], "a", 1.0, &["a", "c"]),
            event(50, &[2, 5], "b", 0.0, &["b"]),
        ]
    }

    #[test]
    fn test_users_from_signatures() {
        let events = create_test_events();
        let dataset = ReplayerDataset::from_events(&events, 0);

        // [2, 5] and [5, 2] are one user, [1] is anonymous
        assert_eq!(dataset.num_users(), 2);
        assert_eq!(dataset.num_items(), 3);
        assert_eq!(dataset.item_name(2), Some("c"));

        let matrix = dataset.user_item();
        assert_eq!(matrix.num_total_writes(), 4);
        assert_eq!(matrix.num_edges(), 3);
        // every displayed article counts, clicked or not
        assert_eq!(matrix.edge(0, 1), Some(2.0));

        assert_eq!(dataset.impressions().user_degree(0), 3);
        assert_eq!(dataset.impressions().user_degree(1), 2);
        assert_eq!(dataset.time_span(), Some((10, 50)));
    }

    #[test]
    fn test_min_interactions_filter() {
        let events = create_test_events();
        let mut dataset = ReplayerDataset::from_events(&events, 2);

        assert_eq!(dataset.num_users(), 1);
        assert_eq!(dataset.num_items(), 3);
        assert_eq!(dataset.user_item().num_edges(), 2);
        assert_eq!(dataset.impressions().num_impressions(), 3);
        assert_eq!(dataset.log().len(), 3);
    }

    #[test]
    fn test_load_folder() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.txt"), "not an event log\n").unwrap();
        fs::write(
            dir.path().join("day1"),
            "100 id-1 0 |user 1 4 |id-1 |id-2\n200 id-2 1 |user 1 4 |id-2\n",
        )
        .unwrap();
        fs::write(dir.path().join("day2"), "300 id-3 1 |user 1 7 |id-3\n").unwrap();

        let dataset = ReplayerDataset::load(dir.path(), 0).unwrap();
        assert_eq!(dataset.num_users(), 2);
        assert_eq!(dataset.num_items(), 3);
        assert_eq!(dataset.user_item().num_total_writes(), 3);
        assert_eq!(dataset.time_span(), Some((100, 300)));
    }

    #[test]
    fn test_empty_folder() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            ReplayerDataset::load(dir.path(), 0),
            Err(DataLoadError::ValidationError(_))
        ));
    }
}
