use data_loader::{DatasetSource, load};
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let source = DatasetSource::Replayer {
        folder: PathBuf::from("data/R6B"),
        min_interactions: 0,
    };

    println!("Loading Yahoo! R6B dataset...\n");

    let start = Instant::now();
    let dataset = load(&source).expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let report = dataset.statistics();
    let total = report.integer("# total interactions (with reps)").unwrap_or(0);

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", report.integer("# users").unwrap_or(0));
    println!("Items: {}", report.integer("# items").unwrap_or(0));
    println!("Events: {}", total);
    println!("\nPerformance: {:.0} events/second",
             total as f64 / elapsed.as_secs_f64());
}
