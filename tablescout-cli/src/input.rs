//! Validation of raw city and budget text.

use tablescout_core::{CityKey, DatasetIndex, PriceRange};

use crate::{ARG_MIN_PRICE, InputError};

const CITY_CHOICES_SHOWN: usize = 10;

/// Trim `city`, rejecting blank input.
pub(crate) fn validate_city(city: &str) -> Result<String, InputError> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyCity);
    }
    Ok(trimmed.to_owned())
}

/// Require `city` to name a dataset city exactly, ignoring case.
///
/// The error lists the first few known cities alphabetically.
pub(crate) fn ensure_known_city(index: &DatasetIndex, city: &str) -> Result<(), InputError> {
    let wanted = CityKey::new(city).ok_or(InputError::EmptyCity)?;
    if index.cities().any(|summary| *summary.key == wanted) {
        return Ok(());
    }
    let mut known: Vec<&str> = index.cities().map(|summary| summary.key.as_str()).collect();
    known.sort_unstable();
    let mut choices = known
        .iter()
        .take(CITY_CHOICES_SHOWN)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if known.len() > CITY_CHOICES_SHOWN {
        choices.push_str("...");
    }
    Err(InputError::UnknownCity {
        city: city.trim().to_owned(),
        choices,
    })
}

/// Parse a budget, accepting thousands separators such as `1,000`.
pub(crate) fn parse_budget(raw: &str, field: &'static str) -> Result<f64, InputError> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| InputError::NotANumber {
            field,
            value: raw.to_owned(),
        })
}

/// Resolve the budget flags into a price range.
///
/// `max_field` names the flag `max_price` came from, so errors point at the
/// flag the user actually set.
pub(crate) fn resolve_budget(
    max_price: &str,
    max_field: &'static str,
    min_price: Option<&str>,
) -> Result<PriceRange, InputError> {
    let ceiling = parse_budget(max_price, max_field)?;
    if ceiling <= 0.0 {
        return Err(InputError::NonPositiveMaximum);
    }
    let floor = min_price
        .map(|raw| parse_budget(raw, ARG_MIN_PRICE))
        .transpose()?;
    match floor {
        Some(value) if value < 0.0 => Err(InputError::NegativeMinimum),
        Some(value) if value > ceiling => Err(InputError::MinimumAboveMaximum),
        _ => Ok(PriceRange::new(floor, ceiling)?),
    }
}
