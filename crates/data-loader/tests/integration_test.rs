//! Integration tests for the data loaders.
//!
//! These write small dataset files to a temporary directory and go through
//! the public `load` entry point, as a front end would.

use data_loader::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const INTERACTIONS: &str = "\
utc_ts_milliseconds,user_id,item_id,series_id,episode_number,series_length,item_type,recommendation_id,interaction_type,vision_factor,explicit_rating
1000,1,100,10,1,2,3,-1,0,0.5,-1.0
2000,1,101,10,2,2,3,7,0,1.0,-1.0
3000,2,100,10,1,2,3,8,0,0.8,-1.0
4000,2,200,20,0,1,0,-1,3,-1.0,4.0
";

const DIRECT: &str = "\
recommendation_id,row_position,recommendation_list_length,recommended_series_list
7,0,2,\"[10 20]\"
8,1,1,[20]
";

const NON_DIRECT: &str = "\
user_id,row_position,recommendation_list_length,recommended_series_list
1,0,1,[10]
3,0,1,[10]
";

fn write_contentwise(dir: &Path) -> DatasetSource {
    let interactions = dir.join("interactions.csv");
    let direct = dir.join("impressions-direct-link.csv");
    let non_direct = dir.join("impressions-non-direct-link.csv");
    fs::write(&interactions, INTERACTIONS).unwrap();
    fs::write(&direct, DIRECT).unwrap();
    fs::write(&non_direct, NON_DIRECT).unwrap();

    DatasetSource::ContentWise {
        interactions,
        impressions_direct: direct,
        impressions_non_direct: non_direct,
    }
}

#[test]
fn test_contentwise_end_to_end() {
    let dir = TempDir::new().unwrap();
    let source = write_contentwise(dir.path());

    let mut dataset = load(&source).unwrap();
    assert_eq!(dataset.kind(), DatasetKind::ContentWise);

    let report = dataset.statistics();
    assert_eq!(report.integer("# users"), Some(2));
    assert_eq!(report.integer("# items"), Some(3));
    assert_eq!(report.integer("# series"), Some(2));
    assert_eq!(report.integer("# user-item interactions (no reps)"), Some(4));
    assert_eq!(report.integer("# total interactions from impressions (with reps)"), Some(2));
    // (1,10) (1,20) from rec 7, (2,20) from rec 8; (1,10) again and user 3 rejected
    assert_eq!(report.integer("# impressions"), Some(3));
    assert_eq!(report.integer("Min. timestamp"), Some(1000));
    assert_eq!(report.real("Density (items)"), Some(4.0 / 6.0));

    let tables = dataset.outputs();
    assert_eq!(tables.len(), 18);

    let pop = tables.iter().find(|t| t.name == "pop-user-item").unwrap();
    assert_eq!(pop.data.header(), ["Id", "Num. Ratings"]);
    match &pop.data {
        TableData::Popularity(distribution) => assert_eq!(distribution.as_slice(), &[2, 1, 1]),
        other => panic!("unexpected table {:?}", other),
    }

    let timeline = tables.iter().find(|t| t.name == "time-users-inv").unwrap();
    assert_eq!(
        timeline.data,
        TableData::Timeline(vec![(0, 4000), (0, 3000), (1, 2000), (1, 1000)])
    );
}

#[test]
fn test_replayer_end_to_end() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("ydata-fp-td-clicks-v2_0.20111002"),
        "1317513291 id-1 0 |user 1 2 |id-1 |id-2\n\
         1317513292 id-2 1 |user 1 2 |id-1 |id-2\n\
         1317513293 id-1 1 |user 1 3 |id-1\n\
         1317513294 id-1 0 |user 1 |id-1\n",
    )
    .unwrap();

    let source = DatasetSource::Replayer {
        folder: dir.path().to_path_buf(),
        min_interactions: 2,
    };
    let mut dataset = load(&source).unwrap();

    let report = dataset.statistics();
    assert_eq!(report.integer("# users"), Some(1));
    assert_eq!(report.integer("# items"), Some(2));
    assert_eq!(report.integer("# user-item interactions (no reps)"), Some(2));
    assert_eq!(report.real("Density (items)"), Some(1.0));

    assert_eq!(dataset.outputs().len(), 7);
}

#[test]
fn test_malformed_record_fails() {
    let dir = TempDir::new().unwrap();
    let source = write_contentwise(dir.path());
    if let DatasetSource::ContentWise { interactions, .. } = &source {
        fs::write(
            interactions,
            "utc_ts_milliseconds,user_id,item_id,series_id,episode_number,series_length,item_type,recommendation_id\n\
             1000,1,100,10,1,2,9,-1\n",
        )
        .unwrap();
    }

    match load(&source) {
        Err(DataLoadError::ParseError { line, .. }) => assert_eq!(line, 2),
        Err(other) => panic!("unexpected error {}", other),
        Ok(_) => panic!("item type 9 should not load"),
    }
}
