//! Dataset staging for the tablescout engine.
//!
//! Responsibilities:
//! - Download the raw restaurant CSV and stage it in an on-disk cache.
//! - Decode staged CSV into raw rows, counting malformed ones.
//! - Build a [`tablescout_core::DatasetIndex`] and report row accounting.
//!
//! Boundaries:
//! - Field normalisation and ranking live in `tablescout-core`.
//! - Network access goes through [`DatasetSource`] so tests can stub it.

#![forbid(unsafe_code)]

mod cache;
mod error;
mod fetch;
mod fs;
mod load;
mod source;

#[cfg(any(test, feature = "test-support"))]
mod test_support;
#[cfg(any(test, feature = "test-support"))]
pub use test_support::{StubSource, block_on_for_tests};

pub use cache::{CachePolicy, DEFAULT_CACHE_PATH, DatasetCache};
pub use error::{DatasetError, TransportError};
pub use fetch::{FetchReport, block_on, fetch_dataset, prepare_dataset};
pub use load::{LoadReport, LoadedDataset, RowBatch, load_dataset, load_from_reader, read_rows};
pub use source::{DEFAULT_DATASET_URL, DEFAULT_USER_AGENT, DatasetSource, HttpDatasetSource};
