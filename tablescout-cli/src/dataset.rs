//! Dataset location resolution and loading shared by the commands.

use camino::Utf8PathBuf;
use tablescout_core::IndexOptions;
use tablescout_data::{
    CachePolicy, DEFAULT_CACHE_PATH, DEFAULT_DATASET_URL, DatasetCache, DatasetSource,
    HttpDatasetSource, LoadedDataset, block_on, prepare_dataset,
};

use crate::CliError;

/// Where the dataset is staged and where it is downloaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DatasetLocation {
    pub(crate) path: Utf8PathBuf,
    pub(crate) url: String,
}

impl DatasetLocation {
    /// Apply defaults to unset location options.
    pub(crate) fn resolve(path: Option<Utf8PathBuf>, url: Option<String>) -> Self {
        Self {
            path: path.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CACHE_PATH)),
            url: url.unwrap_or_else(|| DEFAULT_DATASET_URL.to_owned()),
        }
    }

    pub(crate) fn cache(&self) -> DatasetCache {
        DatasetCache::new(self.path.clone())
    }
}

/// Builds the [`DatasetSource`] used when the cache must be filled.
pub(crate) trait SourceFactory {
    fn build(&self, url: &str) -> Result<Box<dyn DatasetSource>, CliError>;
}

/// Production factory downloading over HTTP.
pub(crate) struct HttpSourceFactory;

impl SourceFactory for HttpSourceFactory {
    fn build(&self, url: &str) -> Result<Box<dyn DatasetSource>, CliError> {
        Ok(Box::new(HttpDatasetSource::new(url)?))
    }
}

/// Stage (when needed) and load the dataset at `location`.
pub(crate) fn load_index(
    location: &DatasetLocation,
    refresh: bool,
    sources: &dyn SourceFactory,
) -> Result<LoadedDataset, CliError> {
    let source = sources.build(&location.url)?;
    let policy = if refresh {
        CachePolicy::Refresh
    } else {
        CachePolicy::PreferCache
    };
    let cache = location.cache();
    let loaded = block_on(prepare_dataset(
        source.as_ref(),
        &cache,
        policy,
        IndexOptions::default(),
    ))??;
    Ok(loaded)
}
