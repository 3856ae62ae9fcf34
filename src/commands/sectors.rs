use crate::services;
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

    println!("🗺️  Sector heatmap as of {}\n", dataset.metadata.as_of_date);
    println!(
        "{:<32} {:>6} {:>16} {:>10} {:>7}",
        "Sector", "Stocks", "Mkt Cap (mn)", "Avg 1d %", "+/-"
    );

    for sector in services::sector_heatmap(&dataset.records) {
        println!(
            "{:<32} {:>6} {:>16.0} {:>10.2} {:>3}/{:<3}",
            sector.name,
            sector.stock_count,
            sector.total_mkt_cap,
            sector.avg_change,
            sector.positive_count,
            sector.negative_count
        );
    }
}
