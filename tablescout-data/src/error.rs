//! Error types produced while staging and loading the dataset.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors produced while fetching, caching, or decoding the dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    /// The staged dataset could not be opened.
    #[error("failed to open dataset at {path}: {source}")]
    Open {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The dataset could not be read as CSV.
    #[error("failed to read dataset at {path}: {source}")]
    Parse {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },
    /// Probing the cache failed for a reason other than absence.
    #[error("failed to inspect cached dataset at {path}: {source}")]
    Inspect {
        /// Cache path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The cache directory could not be created.
    #[error("failed to create cache directory for {path}: {source}")]
    CreateDir {
        /// Cache path whose parent was being created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Writing the downloaded dataset failed.
    #[error("failed to write dataset to {path}: {source}")]
    Write {
        /// Cache path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Removing the cached dataset failed.
    #[error("failed to clear cached dataset at {path}: {source}")]
    Clear {
        /// Cache path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The dataset URL was not a valid absolute URL.
    #[error("invalid dataset URL {url}: {source}")]
    InvalidUrl {
        /// Rejected URL text.
        url: String,
        /// Parse failure.
        source: url::ParseError,
    },
    /// The HTTP client could not be configured.
    #[error("failed to configure HTTP client: {source}")]
    Client {
        /// Underlying client error.
        source: reqwest::Error,
    },
    /// The dataset download failed.
    #[error("failed to download dataset: {source}")]
    Download {
        /// Transport failure.
        source: TransportError,
    },
    /// The async runtime driving a blocking call could not start.
    #[error("failed to start async runtime: {source}")]
    Runtime {
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Transport-level errors encountered while issuing HTTP requests.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The server returned an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description.
        message: String,
    },
    /// The request failed before a status was received, or the body could
    /// not be streamed.
    #[error("network error contacting {url}: {source}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// I/O error reported by the transport or sink.
        source: io::Error,
    },
}
