use crate::services;
use crate::utils::get_output_path;
use std::path::PathBuf;

pub fn run(query: &str, output: Option<PathBuf>) {
    let path = output.unwrap_or_else(get_output_path);

    let dataset = match services::read_dataset(&path) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            eprintln!("   Run 'build' first.");
            std::process::exit(1);
        }
    };

    let matches = services::filter_records(&dataset.records, query);
    println!("🔍 {} match(es) for '{}'\n", matches.len(), query);

    for record in matches {
        let close = record
            .metrics
            .close
            .map_or("-".to_string(), |v| format!("{:.2}", v));
        let change = record
            .deltas
            .price("1d")
            .map_or("-".to_string(), |v| format!("{:+.2}%", v));

        println!(
            "{:<12} {:<40} {:>10} {:>9}  {}",
            record.symbol,
            record.name.as_deref().unwrap_or("-"),
            close,
            change,
            record.sector.as_deref().unwrap_or("-")
        );
    }
}
