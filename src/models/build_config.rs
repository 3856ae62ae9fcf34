use crate::error::{AppError, Result};
use crate::utils::{get_history_window, get_output_path, get_snapshot_dir};
use std::path::PathBuf;

/// Configuration for a dataset build run
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding the dated snapshot files
    pub data_dir: PathBuf,

    /// Where the dataset artifact is written
    pub output_path: PathBuf,

    /// Number of trailing snapshots in each rolling history
    pub history_window: usize,

    /// Draw a progress bar while scanning history files
    pub show_progress: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            data_dir: get_snapshot_dir(),
            output_path: get_output_path(),
            history_window: get_history_window(),
            show_progress: false,
        }
    }
}

impl BuildConfig {
    /// Create new config, falling back to environment defaults for unset values
    pub fn new(
        data_dir: Option<PathBuf>,
        output_path: Option<PathBuf>,
        history_window: Option<usize>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: data_dir.unwrap_or(defaults.data_dir),
            output_path: output_path.unwrap_or(defaults.output_path),
            history_window: history_window.unwrap_or(defaults.history_window),
            show_progress: defaults.show_progress,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_window == 0 {
            return Err(AppError::Config("history window must be at least 1".to_string()));
        }
        if self.output_path.file_name().is_none() {
            return Err(AppError::InvalidInput(format!(
                "output path {} does not name a file",
                self.output_path.display()
            )));
        }
        Ok(())
    }
}
