//! Field normalisation: raw dataset text into canonical record values.
//!
//! Every function here is pure and works on a single row. Rows that cannot
//! be matched against any query (no usable city) are rejected with a
//! [`RowRejection`]; the caller decides how to count or report them.
//!
//! Price ranges such as `500-1000` resolve to the arithmetic mean of their
//! bounds.

use thiserror::Error;

use crate::{CityKey, Rating, RawRestaurantRow, RestaurantRecord};

const UNRATED_TOKENS: [&str; 2] = ["NEW", "-"];
const RATING_SCALE: &str = "5";
const THOUSANDS_SEPARATOR: char = ',';
const TOKEN_SEPARATOR: char = ',';
const RANGE_SEPARATOR: char = '-';

/// Reasons a raw row cannot become a [`RestaurantRecord`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RowRejection {
    /// The listed city was missing or blank.
    #[error("row has no usable city")]
    MissingCity,
}

/// Normalise one raw row into a [`RestaurantRecord`].
///
/// # Errors
/// Returns [`RowRejection::MissingCity`] when the city column is absent or
/// blank.
///
/// # Examples
/// ```
/// use tablescout_core::{RawRestaurantRow, normalize::normalize_row};
///
/// let row = RawRestaurantRow {
///     name: Some("Jalsa".into()),
///     city: Some(" Banashankari ".into()),
///     rate: Some("4.1/5".into()),
///     votes: Some("775".into()),
///     approx_cost: Some("800".into()),
///     cuisines: Some("North Indian, Mughlai, Chinese".into()),
///     ..RawRestaurantRow::default()
/// };
/// let record = normalize_row(&row).expect("row has a city");
/// assert_eq!(record.city, "Banashankari");
/// assert_eq!(record.city_key.as_str(), "banashankari");
/// assert_eq!(record.cuisines, ["North Indian", "Mughlai", "Chinese"]);
/// assert_eq!(record.approx_cost_for_two, Some(800.0));
/// ```
pub fn normalize_row(row: &RawRestaurantRow) -> Result<RestaurantRecord, RowRejection> {
    let raw_city = row.city.as_deref().unwrap_or_default();
    let city_key = CityKey::new(raw_city).ok_or(RowRejection::MissingCity)?;

    Ok(RestaurantRecord {
        name: trimmed(row.name.as_deref()),
        address: trimmed(row.address.as_deref()),
        city: raw_city.trim().to_owned(),
        city_key,
        location: trimmed(row.location.as_deref()),
        cuisines: row.cuisines.as_deref().map(split_tokens).unwrap_or_default(),
        dish_liked: row.dish_liked.as_deref().map(split_tokens).unwrap_or_default(),
        rest_type: trimmed(row.rest_type.as_deref()),
        rating: row.rate.as_deref().and_then(parse_rating),
        votes: row.votes.as_deref().map_or(0, parse_votes),
        approx_cost_for_two: row.approx_cost.as_deref().and_then(parse_price),
        online_order: row.online_order.as_deref().is_some_and(parse_flag),
        book_table: row.book_table.as_deref().is_some_and(parse_flag),
    })
}

/// Parse an approximate cost into a non-negative amount.
///
/// Thousands separators are stripped. A range (`500-1000`) yields the mean of
/// its bounds. Empty, negative, non-finite, or otherwise non-numeric input
/// yields `None`.
///
/// # Examples
/// ```
/// use tablescout_core::normalize::parse_price;
///
/// assert_eq!(parse_price("1,000"), Some(1000.0));
/// assert_eq!(parse_price("500-1000"), Some(750.0));
/// assert_eq!(parse_price("free"), None);
/// assert_eq!(parse_price(""), None);
/// ```
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != THOUSANDS_SEPARATOR).collect();
    let text = cleaned.trim();
    if text.is_empty() {
        return None;
    }
    match text.split_once(RANGE_SEPARATOR) {
        Some((low, high)) => Some(f64::midpoint(parse_amount(low)?, parse_amount(high)?)),
        None => parse_amount(text),
    }
}

/// Parse a rating such as `4.1/5` into a [`Rating`].
///
/// The unrated markers `NEW` and `-` map to `None`, as do blank text, bare
/// numbers without a scale, scales other than `/5`, and values outside
/// `0.0..=5.0`.
///
/// # Examples
/// ```
/// use tablescout_core::normalize::parse_rating;
///
/// assert_eq!(parse_rating(" 4.2 / 5 ").map(|r| r.value()), Some(4.2));
/// assert!(parse_rating("NEW").is_none());
/// assert!(parse_rating("-").is_none());
/// assert!(parse_rating("3.9").is_none());
/// ```
#[must_use]
pub fn parse_rating(raw: &str) -> Option<Rating> {
    let text = raw.trim();
    if text.is_empty()
        || UNRATED_TOKENS
            .iter()
            .any(|token| text.eq_ignore_ascii_case(token))
    {
        return None;
    }
    let (numerator, scale) = text.split_once('/')?;
    if scale.trim() != RATING_SCALE {
        return None;
    }
    numerator.trim().parse::<f64>().ok().and_then(Rating::new)
}

/// Parse a vote count, treating anything unparseable as zero votes.
#[must_use]
pub fn parse_votes(raw: &str) -> u64 {
    let cleaned: String = raw.chars().filter(|c| *c != THOUSANDS_SEPARATOR).collect();
    cleaned.trim().parse().unwrap_or(0)
}

/// Parse a yes/no flag. Only affirmative spellings count as `true`.
#[must_use]
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

/// Split a comma-separated list, trimming tokens and dropping empty ones.
///
/// # Examples
/// ```
/// use tablescout_core::normalize::split_tokens;
///
/// assert_eq!(split_tokens(" Pasta, ,Pizza ,"), ["Pasta", "Pizza"]);
/// assert!(split_tokens("").is_empty());
/// ```
#[must_use]
pub fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(TOKEN_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_owned()
}
