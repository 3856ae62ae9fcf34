use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "dse-market-lens")]
#[command(about = "DSE market dataset builder", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the market dataset from the snapshot directory
    Build {
        /// Directory of YYYY-MM-DD.csv snapshots [env: SNAPSHOT_DIR]
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Dataset output path [env: MARKET_DATA_OUTPUT]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of trailing snapshots in each price history [env: HISTORY_WINDOW]
        #[arg(long)]
        history_window: Option<usize>,
    },
    /// Show snapshot catalog status and window resolution
    Status {
        /// Directory of YYYY-MM-DD.csv snapshots [env: SNAPSHOT_DIR]
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// List bucket matches from the built dataset
    Buckets {
        /// Dataset path [env: MARKET_DATA_OUTPUT]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show sector aggregates from the built dataset
    Sectors {
        /// Dataset path [env: MARKET_DATA_OUTPUT]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Search records by symbol, company name, or sector
    Search {
        /// Case-insensitive search text
        query: String,

        /// Dataset path [env: MARKET_DATA_OUTPUT]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { data_dir, output, history_window } => {
            commands::build::run(data_dir, output, history_window);
        }
        Commands::Status { data_dir } => {
            commands::status::run(data_dir);
        }
        Commands::Buckets { output } => {
            commands::buckets::run(output);
        }
        Commands::Sectors { output } => {
            commands::sectors::run(output);
        }
        Commands::Search { query, output } => {
            commands::search::run(&query, output);
        }
    }
}
