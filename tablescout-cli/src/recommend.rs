//! Recommend command implementation for the tablescout CLI.

use std::io::Write;
use std::num::NonZeroUsize;

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tablescout_core::{DEFAULT_TOP_N, Query, Recommendation, ScoredCandidate, recommend};

use crate::dataset::{DatasetLocation, HttpSourceFactory, SourceFactory, load_index};
use crate::input::{ensure_known_city, resolve_budget, validate_city};
use crate::render::{OutputFormat, write_recommendations};
use crate::{
    ARG_CITY, ARG_DATASET, ARG_DATASET_URL, ARG_FORMAT, ARG_MAX_PRICE, ARG_MIN_PRICE, ARG_PRICE,
    ARG_REFRESH, ARG_TOP_N, ARG_VALIDATE_CITY, CliError, ENV_RECOMMEND_CITY, ENV_RECOMMEND_PRICE,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "recommend",
    long_about = "Recommend restaurants in a city within a budget for two. \
                  Results are ranked by rating weighted by the logarithm of \
                  the vote count. Options can come from CLI flags, \
                  configuration files, or environment variables.",
    about = "Recommend restaurants for a city and budget"
)]
#[ortho_config(prefix = "TABLESCOUT")]
pub(crate) struct RecommendArgs {
    /// City or area name, e.g. "Banashankari".
    #[arg(long = ARG_CITY, value_name = "name")]
    #[serde(default)]
    pub(crate) city: Option<String>,
    /// Maximum approximate cost for two.
    #[arg(long = ARG_PRICE, value_name = "amount")]
    #[serde(default)]
    pub(crate) price: Option<String>,
    /// Minimum approximate cost for two.
    #[arg(long = ARG_MIN_PRICE, value_name = "amount")]
    #[serde(default)]
    pub(crate) min_price: Option<String>,
    /// Maximum approximate cost for two; overrides --price.
    #[arg(long = ARG_MAX_PRICE, value_name = "amount")]
    #[serde(default)]
    pub(crate) max_price: Option<String>,
    /// Number of restaurants to return.
    #[arg(long = ARG_TOP_N, value_name = "count")]
    #[serde(default)]
    pub(crate) top_n: Option<NonZeroUsize>,
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
    /// Reject cities that the dataset does not list exactly.
    #[arg(long = ARG_VALIDATE_CITY, action = ArgAction::SetTrue)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) validate_city: bool,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) query: Query,
    pub(crate) format: OutputFormat,
    pub(crate) dataset: DatasetLocation,
    pub(crate) refresh: bool,
    pub(crate) validate_city: bool,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let raw_city = args.city.ok_or(CliError::MissingArgument {
            field: ARG_CITY,
            env: ENV_RECOMMEND_CITY,
        })?;
        let city = validate_city(&raw_city)?;

        let (max_price, max_field) = match (args.max_price, args.price) {
            (Some(max), _) => (max, ARG_MAX_PRICE),
            (None, Some(price)) => (price, ARG_PRICE),
            (None, None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_PRICE,
                    env: ENV_RECOMMEND_PRICE,
                });
            }
        };
        let price = resolve_budget(&max_price, max_field, args.min_price.as_deref())?;

        let query = Query::new(city, price)?
            .with_top_n(args.top_n.unwrap_or(DEFAULT_TOP_N));
        Ok(Self {
            query,
            format: args.format.unwrap_or_default(),
            dataset: DatasetLocation::resolve(args.dataset, args.dataset_url),
            refresh: args.refresh,
            validate_city: args.validate_city,
        })
    }
}

pub(super) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &HttpSourceFactory, &mut stdout)
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    sources: &dyn SourceFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let results = execute_recommend(&config, sources)?;
    write_recommendations(
        writer,
        config.format,
        config.query.city(),
        config.query.price(),
        &results,
    )
}

fn execute_recommend(
    config: &RecommendConfig,
    sources: &dyn SourceFactory,
) -> Result<Vec<Recommendation>, CliError> {
    let loaded = load_index(&config.dataset, config.refresh, sources)?;
    if config.validate_city {
        ensure_known_city(&loaded.index, config.query.city())?;
    }
    Ok(recommend(&loaded.index, &config.query)
        .iter()
        .map(ScoredCandidate::to_recommendation)
        .collect())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
