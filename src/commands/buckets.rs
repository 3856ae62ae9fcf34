use crate::services::{self, BUCKET_DEFINITIONS};
use crate::utils::get_output_path;
use std::path::PathBuf;

pub fn run(output: Option<PathBuf>) {
    let path = output.unwrap_or_else(get_output_path);

    let dataset = match services::read_dataset(&path) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            eprintln!("   Run 'build' first.");
            std::process::exit(1);
        }
    };

    println!("🪣 Buckets as of {} ({} records)\n", dataset.metadata.as_of_date, dataset.metadata.total_records);

    let buckets = services::stock_buckets(&dataset.records);
    if buckets.is_empty() {
        println!("No bucket has any matching stock.");
        return;
    }

    for bucket in buckets {
        let description = BUCKET_DEFINITIONS
            .iter()
            .find(|d| d.id == bucket.id)
            .map(|d| d.description)
            .unwrap_or_default();

        println!("{} ({})", bucket.title, bucket.matches.len());
        println!("   {}", description);
        println!("   Criteria: {}", bucket.criteria);

        let symbols: Vec<&str> = bucket.matches.iter().map(|r| r.symbol.as_str()).collect();
        println!("   {}\n", symbols.join(", "));
    }
}
