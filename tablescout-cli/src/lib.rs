//! Command-line interface for tablescout restaurant recommendations.
#![forbid(unsafe_code)]

use clap::{ArgAction, Parser, Subcommand};

mod cities;
mod dataset;
mod error;
mod fetch;
mod input;
mod logging;
mod recommend;
mod render;

pub use error::{CliError, InputError};
pub use render::OutputFormat;

use cities::{CitiesArgs, run_cities};
use fetch::{ClearCacheArgs, FetchArgs, run_clear_cache, run_fetch};
use recommend::{RecommendArgs, run_recommend};

const ARG_CITY: &str = "city";
const ARG_PRICE: &str = "price";
const ARG_MIN_PRICE: &str = "min-price";
const ARG_MAX_PRICE: &str = "max-price";
const ARG_TOP_N: &str = "top-n";
const ARG_FORMAT: &str = "format";
const ARG_DATASET: &str = "dataset";
const ARG_DATASET_URL: &str = "dataset-url";
const ARG_REFRESH: &str = "refresh";
const ARG_VALIDATE_CITY: &str = "validate-city";
const ARG_OVERWRITE: &str = "overwrite";
const ENV_RECOMMEND_CITY: &str = "TABLESCOUT_CMDS_RECOMMEND_CITY";
const ENV_RECOMMEND_PRICE: &str = "TABLESCOUT_CMDS_RECOMMEND_PRICE";

/// Run the tablescout CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] describing the first failure; clap parse errors,
/// including help and version requests, arrive as
/// [`CliError::ArgumentParsing`].
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logging(cli.verbose);
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
        Command::Fetch(args) => run_fetch(&args),
        Command::Cities(args) => run_cities(&args),
        Command::ClearCache(args) => run_clear_cache(&args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tablescout",
    about = "Restaurant recommendations by city and budget",
    version
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend restaurants for a city and budget.
    Recommend(RecommendArgs),
    /// Download the dataset into the local cache.
    Fetch(FetchArgs),
    /// List the cities covered by the dataset.
    Cities(CitiesArgs),
    /// Remove the staged dataset.
    ClearCache(ClearCacheArgs),
}

#[cfg(test)]
mod tests;
