//! Console table and JSON rendering of command results.

use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tablescout_core::{PriceRange, Recommendation};

use crate::CliError;

const NAME_WIDTH: usize = 28;
const LOCATION_WIDTH: usize = 22;
const CUISINES_WIDTH: usize = 30;
const ELLIPSIS: char = '…';
const MISSING: &str = "-";

/// How command output is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width console table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// One listed city with its record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CityRow {
    pub(crate) name: String,
    pub(crate) restaurants: usize,
}

pub(crate) fn write_recommendations(
    writer: &mut dyn Write,
    format: OutputFormat,
    city: &str,
    price: PriceRange,
    results: &[Recommendation],
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(writer, &results),
        OutputFormat::Table if results.is_empty() => write_line(
            writer,
            &format!(
                "No restaurants found in {city} for a budget of {}.",
                describe_budget(price)
            ),
        ),
        OutputFormat::Table => write_recommendation_table(writer, results),
    }
}

pub(crate) fn write_cities(
    writer: &mut dyn Write,
    format: OutputFormat,
    cities: &[CityRow],
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(writer, &cities),
        OutputFormat::Table if cities.is_empty() => {
            write_line(writer, "The dataset lists no cities.")
        }
        OutputFormat::Table => {
            let width = cities
                .iter()
                .map(|city| city.name.chars().count())
                .max()
                .unwrap_or(0)
                .max("City".len());
            write_line(writer, &format!("{:<width$}  Restaurants", "City"))?;
            for city in cities {
                write_line(
                    writer,
                    &format!("{:<width$}  {:>11}", city.name, city.restaurants),
                )?;
            }
            Ok(())
        }
    }
}

pub(crate) fn write_line(writer: &mut dyn Write, line: &str) -> Result<(), CliError> {
    writeln!(writer, "{line}").map_err(CliError::WriteOutput)
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    write_line(writer, &payload)
}

fn write_recommendation_table(
    writer: &mut dyn Write,
    results: &[Recommendation],
) -> Result<(), CliError> {
    write_line(
        writer,
        &format!(
            "{:>3}  {:<NAME_WIDTH$}  {:<LOCATION_WIDTH$}  {:<CUISINES_WIDTH$}  {:>6}  {:>6}  {:>8}  {:>6}",
            "#", "Name", "Location", "Cuisines", "Rating", "Votes", "Cost", "Score"
        ),
    )?;
    for (rank, result) in results.iter().enumerate() {
        let rating = result
            .rating
            .map_or_else(|| MISSING.to_owned(), |value| format!("{value:.1}"));
        let cost = result
            .approx_cost_for_two
            .map_or_else(|| MISSING.to_owned(), |value| format!("{value:.0}"));
        write_line(
            writer,
            &format!(
                "{:>3}  {:<NAME_WIDTH$}  {:<LOCATION_WIDTH$}  {:<CUISINES_WIDTH$}  {:>6}  {:>6}  {:>8}  {:>6.2}",
                rank + 1,
                fit(&result.name, NAME_WIDTH),
                fit(&result.location, LOCATION_WIDTH),
                fit(&result.cuisines.join(", "), CUISINES_WIDTH),
                rating,
                result.votes,
                cost,
                result.score,
            ),
        )?;
    }
    Ok(())
}

fn describe_budget(price: PriceRange) -> String {
    if price.floor() > 0.0 {
        format!("{:.0}-{:.0}", price.floor(), price.ceiling())
    } else {
        format!("up to {:.0}", price.ceiling())
    }
}

/// Shorten `text` to at most `width` characters, marking the cut.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut shortened: String = text.chars().take(width.saturating_sub(1)).collect();
    shortened.push(ELLIPSIS);
    shortened
}
