//! Downloading the dataset into the cache and loading it.

use std::future::Future;
use std::io::Write;

use camino::Utf8PathBuf;
use log::info;
use tablescout_core::IndexOptions;
use tempfile::NamedTempFile;

use crate::fs::{ensure_parent_dir, parent_of};
use crate::{CachePolicy, DatasetCache, DatasetError, DatasetSource, LoadedDataset};

/// Outcome of [`fetch_dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    /// Where the dataset is staged.
    pub path: Utf8PathBuf,
    /// Bytes downloaded; zero when the staged file was reused.
    pub bytes_written: u64,
    /// Whether an existing staged file was kept instead of downloading.
    pub reused: bool,
}

/// Stage the dataset from `source` into `cache`.
///
/// An existing staged file is kept unless `overwrite` is set. The download
/// is streamed into a temporary file beside the cache path and moved into
/// place only once complete, so an interrupted download never leaves a
/// truncated dataset behind.
///
/// # Errors
/// Returns [`DatasetError::Download`] when the transfer fails and
/// [`DatasetError::CreateDir`] or [`DatasetError::Write`] when staging fails.
pub async fn fetch_dataset<S: DatasetSource + ?Sized>(
    source: &S,
    cache: &DatasetCache,
    overwrite: bool,
) -> Result<FetchReport, DatasetError> {
    let path = cache.path();
    if !overwrite && cache.exists()? {
        info!("Using cached dataset at {path}");
        return Ok(FetchReport {
            path: path.to_path_buf(),
            bytes_written: 0,
            reused: true,
        });
    }

    ensure_parent_dir(path).map_err(|source| DatasetError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    let write_error = |source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut staged = NamedTempFile::new_in(parent_of(path)).map_err(write_error)?;
    info!("Downloading dataset from {}", source.url());
    let bytes_written = source
        .download(staged.as_file_mut())
        .await
        .map_err(|source| DatasetError::Download { source })?;
    staged.as_file_mut().flush().map_err(write_error)?;
    staged.persist(path).map_err(|err| write_error(err.error))?;
    info!("Staged {bytes_written} bytes at {path}");

    Ok(FetchReport {
        path: path.to_path_buf(),
        bytes_written,
        reused: false,
    })
}

/// Make sure the dataset is staged according to `policy`, then load it.
///
/// # Errors
/// Propagates staging errors from [`fetch_dataset`] and loading errors from
/// [`DatasetCache::load`].
pub async fn prepare_dataset<S: DatasetSource + ?Sized>(
    source: &S,
    cache: &DatasetCache,
    policy: CachePolicy,
    options: IndexOptions,
) -> Result<LoadedDataset, DatasetError> {
    fetch_dataset(source, cache, policy == CachePolicy::Refresh).await?;
    cache.load(options)
}

/// Drive `future` to completion on a fresh current-thread runtime.
///
/// # Errors
/// Returns [`DatasetError::Runtime`] when the runtime cannot be built.
pub fn block_on<F: Future>(future: F) -> Result<F::Output, DatasetError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| DatasetError::Runtime { source })?;
    Ok(runtime.block_on(future))
}
