//! Settings for the `load-events` binary.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::BatchSize;

const DEFAULT_FILE_PATH: &str = "/app/data/sample.csv";

/// Largest batch whose multi-row insert stays within PostgreSQL's 65535 bind
/// parameters at three parameters per row.
pub const MAX_BATCH_SIZE: usize = 21_845;

/// Errors raised while interpreting loader settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoaderSettingsError {
    /// The configured batch size is zero or too large for one statement.
    #[error("batch size must be between 1 and {max}, got {value}")]
    BatchSize { value: usize, max: usize },
}

/// Input file and batching settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LOADER")]
pub struct LoaderSettings {
    /// Path of the CSV file to load.
    #[ortho_config(default = PathBuf::from(DEFAULT_FILE_PATH))]
    pub file_path: PathBuf,
    /// Records per insert statement.
    #[ortho_config(default = BatchSize::DEFAULT.get())]
    pub batch_size: usize,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            batch_size: BatchSize::DEFAULT.get(),
        }
    }
}

impl LoaderSettings {
    /// Configured batch size as a validated [`BatchSize`].
    ///
    /// # Errors
    /// Returns [`LoaderSettingsError::BatchSize`] for zero or for a size above
    /// [`MAX_BATCH_SIZE`].
    pub fn batch_size(&self) -> Result<BatchSize, LoaderSettingsError> {
        BatchSize::new(self.batch_size)
            .filter(|size| size.get() <= MAX_BATCH_SIZE)
            .ok_or(LoaderSettingsError::BatchSize {
                value: self.batch_size,
                max: MAX_BATCH_SIZE,
            })
    }
}
