//! Error types emitted by the tablescout CLI.
//!
//! Keep this error type reasonably small, as every command returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use tablescout_core::QueryError;
use tablescout_data::DatasetError;
use thiserror::Error;

/// Errors emitted by the tablescout CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// User input failed validation.
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    /// The validated input could not form a query.
    #[error("invalid query: {0}")]
    Query(#[from] QueryError),
    /// Staging or loading the dataset failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    /// Serialising JSON output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

/// Reasons raw city and budget input is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The city was blank.
    #[error("City cannot be empty.")]
    EmptyCity,
    /// The city is not listed in the dataset.
    #[error("City '{city}' not found in dataset. Choose from: {choices}")]
    UnknownCity {
        /// City as entered, trimmed.
        city: String,
        /// Comma-separated sample of known cities.
        choices: String,
    },
    /// A budget was not a number.
    #[error("--{field} must be a valid number, got '{value}'.")]
    NotANumber {
        /// Flag that carried the value.
        field: &'static str,
        /// Raw text.
        value: String,
    },
    /// The maximum budget was zero or negative.
    #[error("Price must be positive.")]
    NonPositiveMaximum,
    /// The minimum budget was negative.
    #[error("Min price cannot be negative.")]
    NegativeMinimum,
    /// The minimum budget exceeded the maximum.
    #[error("Min price cannot be greater than max price.")]
    MinimumAboveMaximum,
    /// The budget could not form a price range.
    #[error(transparent)]
    Range(#[from] QueryError),
}
