//! Dataset cache commands: `fetch` and `clear-cache`.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tablescout_data::{block_on, fetch_dataset};

use crate::dataset::{DatasetLocation, HttpSourceFactory, SourceFactory};
use crate::render::write_line;
use crate::{ARG_DATASET, ARG_DATASET_URL, ARG_OVERWRITE, CliError};

/// CLI arguments for the `fetch` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "fetch", about = "Download the dataset into the local cache")]
#[ortho_config(prefix = "TABLESCOUT")]
pub(crate) struct FetchArgs {
    /// Path of the staged dataset CSV.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// URL the dataset is downloaded from.
    #[arg(long = ARG_DATASET_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) dataset_url: Option<String>,
    /// Replace a dataset that is already staged.
    #[arg(long = ARG_OVERWRITE, action = ArgAction::SetTrue)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) overwrite: bool,
}

/// CLI arguments for the `clear-cache` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "clear-cache", about = "Remove the staged dataset")]
#[ortho_config(prefix = "TABLESCOUT")]
pub(crate) struct ClearCacheArgs {
    /// Path of the staged dataset CSV.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
}

pub(super) fn run_fetch(args: &FetchArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_fetch_with(args, &HttpSourceFactory, &mut stdout)
}

pub(super) fn run_fetch_with(
    args: &FetchArgs,
    sources: &dyn SourceFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let location = DatasetLocation::resolve(merged.dataset, merged.dataset_url);
    let source = sources.build(&location.url)?;
    let report = block_on(fetch_dataset(
        source.as_ref(),
        &location.cache(),
        merged.overwrite,
    ))??;
    let message = if report.reused {
        format!(
            "Dataset already cached at {} (use --{ARG_OVERWRITE} to replace it).",
            report.path
        )
    } else {
        format!(
            "Downloaded {} bytes to {}.",
            report.bytes_written, report.path
        )
    };
    write_line(writer, &message)
}

pub(super) fn run_clear_cache(args: &ClearCacheArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_clear_cache_with(args, &mut stdout)
}

pub(super) fn run_clear_cache_with(
    args: &ClearCacheArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let location = DatasetLocation::resolve(merged.dataset, None);
    let message = if location.cache().clear()? {
        format!("Removed cached dataset at {}.", location.path)
    } else {
        format!("No cached dataset at {}.", location.path)
    };
    write_line(writer, &message)
}
