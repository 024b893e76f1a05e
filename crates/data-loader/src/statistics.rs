//! Statistics reports of the supported datasets.
//!
//! Each dataset gets a fixed, ordered list of named statistics. The metric
//! families of independent matrices are computed in parallel with
//! `rayon::join`; the report itself is assembled in a fixed order afterwards.

use crate::contentwise::ContentWiseDataset;
use crate::replayer::ReplayerDataset;
use interactions::{ImpressionGraph, InteractionMatrix, Key};
use properties::{CountSummary, Density, GiniIndex, ImpressionCount, InteractionCount, ReportBuilder, StatisticsReport};

/// Metrics of one interaction matrix
#[derive(Debug, Clone, Copy)]
struct MatrixSummary {
    density: f64,
    users: CountSummary,
    items: CountSummary,
    /// NaN when undefined
    user_gini: f64,
    item_gini: f64,
}

impl MatrixSummary {
    fn compute<U: Key, I: Key>(matrix: &InteractionMatrix<U, I>) -> Self {
        let counts = InteractionCount::new(matrix);
        let gini = GiniIndex::new(matrix);
        Self {
            density: Density::new(matrix).density(),
            users: counts.users(),
            items: counts.items(),
            user_gini: gini.users().unwrap_or(f64::NAN),
            item_gini: gini.items().unwrap_or(f64::NAN),
        }
    }
}

/// Average/min/max impressions per user and per item
fn impression_summary<U: Key, I: Key>(graph: &ImpressionGraph<U, I>) -> (CountSummary, CountSummary) {
    let counts = ImpressionCount::new(graph);
    (counts.users(), counts.items())
}

/// Order of the min and max entries after the average
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SummaryOrder {
    MinFirst,
    MaxFirst,
}

/// Append the "Average / Min / Max <what>" entries of a summary
fn add_summary(builder: ReportBuilder, summary: CountSummary, what: &str, order: SummaryOrder) -> ReportBuilder {
    let builder = builder.real(format!("Average {}", what), summary.average);
    match order {
        SummaryOrder::MinFirst => builder
            .count(format!("Min {}", what), summary.min)
            .count(format!("Max {}", what), summary.max),
        SummaryOrder::MaxFirst => builder
            .count(format!("Max {}", what), summary.max)
            .count(format!("Min {}", what), summary.min),
    }
}

fn add_time_span(builder: ReportBuilder, span: Option<(i64, i64)>) -> ReportBuilder {
    match span {
        Some((min, max)) => builder.integer("Min. timestamp", min).integer("Max. timestamp", max),
        None => builder,
    }
}

/// Statistics of the ContentWise Impressions dataset
pub fn contentwise_statistics(dataset: &ContentWiseDataset) -> StatisticsReport {
    let ((item, series), ((item_recs, series_recs), impressions)) = rayon::join(
        || {
            rayon::join(
                || MatrixSummary::compute(dataset.user_item()),
                || MatrixSummary::compute(dataset.user_series()),
            )
        },
        || {
            rayon::join(
                || {
                    rayon::join(
                        || MatrixSummary::compute(dataset.user_item_from_recommendations()),
                        || MatrixSummary::compute(dataset.user_series_from_recommendations()),
                    )
                },
                || impression_summary(dataset.impressions()),
            )
        },
    );

    let mut builder = StatisticsReport::builder()
        .count("# users", dataset.num_users())
        .count("# items", dataset.num_items())
        .count("# series", dataset.num_series())
        .count("# user-item interactions (no reps)", dataset.user_item().num_edges())
        .count("# user-series interactions (no reps)", dataset.user_series().num_edges())
        .count(
            "# user-item interactions from impressions (no reps)",
            dataset.user_item_from_recommendations().num_edges(),
        )
        .count(
            "# user-series interactions from impressions (no reps)",
            dataset.user_series_from_recommendations().num_edges(),
        )
        .count("# total interactions (with reps)", dataset.user_item().num_total_writes())
        .count(
            "# total interactions from impressions (with reps)",
            dataset.user_item_from_recommendations().num_total_writes(),
        )
        .count("# impressions", dataset.impressions().num_impressions());
    builder = add_time_span(builder, dataset.time_span());

    builder = builder
        .real("Density (items)", item.density)
        .real("Density (series)", series.density)
        .real("Density (items, from impressions)", item_recs.density)
        .real("Density (series, from impressions)", series_recs.density);

    for (summary, per_user, per_item) in [
        (item, "ratings per user (item)", "ratings per item"),
        (series, "ratings per user (series)", "ratings per series"),
        (
            item_recs,
            "ratings per user (item, from impressions)",
            "ratings per item (from impressions)",
        ),
        (
            series_recs,
            "ratings per user (series, from impressions)",
            "ratings per series (from impressions)",
        ),
    ] {
        builder = add_summary(builder, summary.users, per_user, SummaryOrder::MinFirst);
        builder = add_summary(builder, summary.items, per_item, SummaryOrder::MinFirst);
    }

    builder = builder
        .real("User Gini (item)", item.user_gini)
        .real("Item Gini", item.item_gini)
        .real("User Gini (series)", series.user_gini)
        .real("Series Gini", series.item_gini)
        .real("User Gini (item, from impressions)", item_recs.user_gini)
        .real("Item Gini (from impressions)", item_recs.item_gini)
        .real("User Gini (series, from impressions)", series_recs.user_gini)
        .real("Series Gini (from impressions)", series_recs.item_gini);

    let (per_user, per_series) = impressions;
    builder = add_summary(builder, per_user, "impressions per user", SummaryOrder::MinFirst);
    builder = add_summary(builder, per_series, "impressions per series", SummaryOrder::MinFirst);

    builder.build()
}

/// Statistics of the Yahoo! R6B dataset
pub fn replayer_statistics(dataset: &ReplayerDataset) -> StatisticsReport {
    let (matrix, (per_user, per_item)) = rayon::join(
        || MatrixSummary::compute(dataset.user_item()),
        || impression_summary(dataset.impressions()),
    );

    let mut builder = StatisticsReport::builder()
        .count("# users", dataset.num_users())
        .count("# items", dataset.num_items())
        .count("# total interactions (with reps)", dataset.user_item().num_total_writes())
        .count("# impressions", dataset.impressions().num_impressions())
        .count("# user-item interactions (no reps)", dataset.user_item().num_edges());
    builder = add_time_span(builder, dataset.time_span());

    builder = builder.real("Density (items)", matrix.density);
    builder = add_summary(builder, matrix.users, "ratings per user (item)", SummaryOrder::MaxFirst);
    builder = add_summary(builder, matrix.items, "ratings per item", SummaryOrder::MaxFirst);
    builder = builder
        .real("Item Gini", matrix.item_gini)
        .real("User Gini (item)", matrix.user_gini);
    builder = add_summary(builder, per_user, "impressions per user", SummaryOrder::MaxFirst);
    builder = add_summary(builder, per_item, "impressions per item", SummaryOrder::MaxFirst);

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;
    use properties::StatValue;

    fn contentwise() -> ContentWiseDataset {
        let records: Vec<ContentWiseInteraction> = [(1, 100, 10, 5), (1, 101, 10, -1), (2, 100, 10, -1)]
            .into_iter()
            .enumerate()
            .map(|(ts, (user_id, id, series_id, rec))| ContentWiseInteraction {
                timestamp: ts as i64 * 10,
                user_id,
                item: ContentWiseItem {
                    id,
                    series_id,
                    episode_number: 0,
                    item_type: ItemType::Movie,
                },
                series_length: 1,
                recommendation_id: rec,
            })
            .collect();
        let non_direct = vec![ImpressionRecord { key: 2, series: vec![10] }];
        ContentWiseDataset::from_records(&records, &[], &non_direct)
    }

    #[test]
    fn test_contentwise_report() {
        let report = contentwise_statistics(&contentwise());

        assert_eq!(report.entries()[0].name, "# users");
        assert_eq!(report.integer("# users"), Some(2));
        assert_eq!(report.integer("# series"), Some(1));
        assert_eq!(report.integer("# user-item interactions from impressions (no reps)"), Some(1));
        assert_eq!(report.integer("Max. timestamp"), Some(20));
        assert_eq!(report.real("Density (items)"), Some(0.75));
        assert_eq!(report.real("Average ratings per user (item)"), Some(1.5));
        assert_eq!(report.integer("Min ratings per item"), Some(1));
        assert_eq!(report.real("Average impressions per series"), Some(1.0));

        // a single series has no defined Gini index
        assert!(report.real("Series Gini").is_some_and(f64::is_nan));
        // users [2, 1]: (1/1) * ((2*2-2-1)*2/3 + (2*1-2-1)*1/3) = 1/3
        let gini = report.real("User Gini (item)").unwrap();
        assert!((gini - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_contentwise_report_is_complete() {
        let report = contentwise_statistics(&contentwise());
        // 10 counts, 2 timestamps, 4 densities, 24 per-side summaries,
        // 8 Gini values, 6 impression summaries
        assert_eq!(report.len(), 54);
        assert!(report.entries().iter().all(|e| match e.value {
            StatValue::Integer(_) => true,
            StatValue::Real(v) => !v.is_nan() || e.name.contains("Gini"),
        }));
    }

    fn names(report: &StatisticsReport) -> Vec<&str> {
        report.entries().iter().map(|e| e.name.as_str()).collect()
    }

    fn summary_names(what: &str, max_first: bool) -> Vec<String> {
        let (second, third) = if max_first { ("Max", "Min") } else { ("Min", "Max") };
        vec![
            format!("Average {}", what),
            format!("{} {}", second, what),
            format!("{} {}", third, what),
        ]
    }

    #[test]
    fn test_contentwise_report_order() {
        let report = contentwise_statistics(&contentwise());

        let mut expected: Vec<String> = [
            "# users",
            "# items",
            "# series",
            "# user-item interactions (no reps)",
            "# user-series interactions (no reps)",
            "# user-item interactions from impressions (no reps)",
            "# user-series interactions from impressions (no reps)",
            "# total interactions (with reps)",
            "# total interactions from impressions (with reps)",
            "# impressions",
            "Min. timestamp",
            "Max. timestamp",
            "Density (items)",
            "Density (series)",
            "Density (items, from impressions)",
            "Density (series, from impressions)",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        for what in [
            "ratings per user (item)",
            "ratings per item",
            "ratings per user (series)",
            "ratings per series",
            "ratings per user (item, from impressions)",
            "ratings per item (from impressions)",
            "ratings per user (series, from impressions)",
            "ratings per series (from impressions)",
        ] {
            expected.extend(summary_names(what, false));
        }
        expected.extend(
            [
                "User Gini (item)",
                "Item Gini",
                "User Gini (series)",
                "Series Gini",
                "User Gini (item, from impressions)",
                "Item Gini (from impressions)",
                "User Gini (series, from impressions)",
                "Series Gini (from impressions)",
            ]
            .iter()
            .map(|s| s.to_string()),
        );
        expected.extend(summary_names("impressions per user", false));
        expected.extend(summary_names("impressions per series", false));

        assert_eq!(names(&report), expected);
    }

    #[test]
    fn test_replayer_report() {
        let mut user = FeatureSignature::default();
        user.set(3).unwrap();
        let events = vec![ReplayerEvent {
            timestamp: 7,
            displayed_item: "a".to_string(),
            click: 1.0,
            user,
            pool: vec!["a".to_string(), "b".to_string()],
        }];
        let dataset = ReplayerDataset::from_events(&events, 0);
        let report = replayer_statistics(&dataset);

        assert_eq!(report.len(), 22);
        assert_eq!(report.integer("# items"), Some(2));
        assert_eq!(report.integer("# impressions"), Some(2));
        assert_eq!(report.real("Density (items)"), Some(0.5));
        assert_eq!(report.integer("Min ratings per item"), Some(0));
        assert_eq!(report.integer("Min. timestamp"), Some(7));

        let mut expected: Vec<String> = [
            "# users",
            "# items",
            "# total interactions (with reps)",
            "# impressions",
            "# user-item interactions (no reps)",
            "Min. timestamp",
            "Max. timestamp",
            "Density (items)",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        expected.extend(summary_names("ratings per user (item)", true));
        expected.extend(summary_names("ratings per item", true));
        expected.push("Item Gini".to_string());
        expected.push("User Gini (item)".to_string());
        expected.extend(summary_names("impressions per user", true));
        expected.extend(summary_names("impressions per item", true));

        assert_eq!(names(&report), expected);
    }
}
