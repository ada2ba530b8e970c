//! Cities command: list the cities the dataset covers.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetLocation, HttpSourceFactory, SourceFactory, load_index};
use crate::render::{CityRow, OutputFormat, write_cities};
use crate::{ARG_DATASET, ARG_DATASET_URL, ARG_FORMAT, ARG_REFRESH, CliError};

/// CLI arguments for the `cities` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "cities", about = "List the cities covered by the dataset")]
#[ortho_config(prefix = "TABLESCOUT")]
pub(crate) struct CitiesArgs {
    /// Output format.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
    /// Path of the staged dataset CSV.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// URL the dataset is downloaded from when not staged.
    #[arg(long = ARG_DATASET_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) dataset_url: Option<String>,
    /// Download the dataset again even when it is staged.
    #[arg(long = ARG_REFRESH, action = ArgAction::SetTrue)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) refresh: bool,
}

pub(super) fn run_cities(args: &CitiesArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_cities_with(args, &HttpSourceFactory, &mut stdout)
}

pub(super) fn run_cities_with(
    args: &CitiesArgs,
    sources: &dyn SourceFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let location = DatasetLocation::resolve(merged.dataset, merged.dataset_url);
    let loaded = load_index(&location, merged.refresh, sources)?;
    let mut cities: Vec<CityRow> = loaded
        .index
        .cities()
        .map(|summary| CityRow {
            name: summary.name.to_owned(),
            restaurants: summary.records,
        })
        .collect();
    cities.sort_by_cached_key(|city| city.name.to_lowercase());
    write_cities(writer, merged.format.unwrap_or_default(), &cities)
}
