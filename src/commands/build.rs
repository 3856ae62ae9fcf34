use crate::error::AppError;
use crate::models::BuildConfig;
use crate::services;
use std::path::PathBuf;

pub fn run(data_dir: Option<PathBuf>, output: Option<PathBuf>, history_window: Option<usize>) {
    let config = BuildConfig::new(data_dir, output, history_window).with_progress(true);

    println!("📁 Snapshot directory: {}", config.data_dir.display());
    println!("📄 Output: {}", config.output_path.display());

    match services::run_build(&config) {
        Ok(report) => {
            let stats = &report.stats;
            println!("\n📊 Build Summary:");
            println!("  ✅ Records: {}", stats.records);
            println!("  ✅ As of: {} ({})", stats.as_of_date, stats.base_file);
            println!("  ✅ Windows resolved: {}/{}", stats.windows_resolved, crate::models::WINDOW_COUNT);
            println!("  ✅ History snapshots: {}", stats.history_snapshots);
            println!("  ✅ Files read: {} of {}", stats.files_read, stats.snapshots_available);
            if !stats.missing_headers.is_empty() {
                println!("  ⚠️  Missing metric headers: {}", stats.missing_headers.join(", "));
            }
            println!(
                "\n🎉 Wrote {} ({:.1} KB) in {:.2}s",
                report.output_path.display(),
                report.bytes_written as f64 / 1024.0,
                stats.duration.as_secs_f64()
            );
        }
        Err(e) => {
            eprintln!("\n❌ Build failed during {}: {}", failed_stage(&e), e);
            eprintln!("   The previous dataset was left untouched.");
            std::process::exit(1);
        }
    }
}

fn failed_stage(err: &AppError) -> &'static str {
    match err {
        AppError::NoSnapshotsAvailable(_) => "catalog scan",
        AppError::MalformedSnapshot { .. } => "base snapshot parse",
        AppError::Config(_) | AppError::InvalidInput(_) => "configuration",
        AppError::Serialization(_) => "dataset serialization",
        AppError::Io(_) => "file access",
    }
}
