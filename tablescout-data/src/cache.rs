//! The on-disk location where the downloaded dataset is staged.

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use tablescout_core::IndexOptions;

use crate::fs::{is_file, remove_file_if_present};
use crate::{DatasetError, LoadedDataset, load_dataset};

/// Default location of the staged dataset, relative to the working directory.
pub const DEFAULT_CACHE_PATH: &str = "data/zomato.csv";

/// Whether a load may reuse the staged dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Reuse the staged file when present; download only when missing.
    #[default]
    PreferCache,
    /// Always download and replace the staged file.
    Refresh,
}

/// A staged dataset file.
///
/// # Examples
/// ```
/// use tablescout_data::DatasetCache;
///
/// let cache = DatasetCache::default();
/// assert_eq!(cache.path().as_str(), "data/zomato.csv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetCache {
    path: Utf8PathBuf,
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_PATH)
    }
}

impl DatasetCache {
    /// Stage the dataset at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the staged file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Report whether a staged file is present.
    ///
    /// # Errors
    /// Returns [`DatasetError::Inspect`] when the path cannot be inspected.
    pub fn exists(&self) -> Result<bool, DatasetError> {
        is_file(&self.path).map_err(|source| DatasetError::Inspect {
            path: self.path.clone(),
            source,
        })
    }

    /// Remove the staged file, reporting whether one was present.
    ///
    /// # Errors
    /// Returns [`DatasetError::Clear`] when removal fails.
    pub fn clear(&self) -> Result<bool, DatasetError> {
        let removed = remove_file_if_present(&self.path).map_err(|source| DatasetError::Clear {
            path: self.path.clone(),
            source,
        })?;
        if removed {
            info!("Removed cached dataset at {}", self.path);
        }
        Ok(removed)
    }

    /// Load and index the staged file.
    ///
    /// # Errors
    /// Propagates [`load_dataset`] errors.
    pub fn load(&self, options: IndexOptions) -> Result<LoadedDataset, DatasetError> {
        load_dataset(&self.path, options)
    }
}
