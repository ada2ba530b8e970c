//! Restaurant records and the raw dataset rows they are normalised from.
//!
//! A [`RawRestaurantRow`] carries the dataset's text columns verbatim. The
//! [`normalize`](crate::normalize) module turns each row into a
//! [`RestaurantRecord`] whose numeric fields are canonical and whose city has
//! a lower-cased [`CityKey`] for matching.

use std::fmt;

/// One dataset row exactly as it was staged.
///
/// Every column is optional text. Column names follow the published Zomato
/// dataset, so the struct can be deserialised straight from its CSV headers
/// when the `serde` feature is enabled. Unknown columns are ignored.
///
/// # Examples
/// ```
/// use tablescout_core::RawRestaurantRow;
///
/// let row = RawRestaurantRow {
///     name: Some("Jalsa".into()),
///     city: Some("Banashankari".into()),
///     rate: Some("4.1/5".into()),
///     ..RawRestaurantRow::default()
/// };
/// assert_eq!(row.city.as_deref(), Some("Banashankari"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct RawRestaurantRow {
    /// Restaurant name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Street address.
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: Option<String>,
    /// Listed city used for matching.
    #[cfg_attr(feature = "serde", serde(default, rename = "listed_in(city)"))]
    pub city: Option<String>,
    /// Neighbourhood or sub-area.
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<String>,
    /// Comma-separated cuisines.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cuisines: Option<String>,
    /// Comma-separated dishes that diners liked.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dish_liked: Option<String>,
    /// Establishment type, such as "Casual Dining".
    #[cfg_attr(feature = "serde", serde(default))]
    pub rest_type: Option<String>,
    /// Rating text such as `4.1/5`, `NEW` or `-`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rate: Option<String>,
    /// Vote count text.
    #[cfg_attr(feature = "serde", serde(default))]
    pub votes: Option<String>,
    /// Approximate cost for two, possibly with separators or a range.
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "approx_cost(for two people)")
    )]
    pub approx_cost: Option<String>,
    /// Whether online ordering is offered (`Yes`/`No`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub online_order: Option<String>,
    /// Whether table booking is offered (`Yes`/`No`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub book_table: Option<String>,
}

/// A rating on the dataset's `0.0..=5.0` scale.
///
/// # Examples
/// ```
/// use tablescout_core::Rating;
///
/// assert_eq!(Rating::new(4.1).map(Rating::value), Some(4.1));
/// assert!(Rating::new(5.5).is_none());
/// assert!(Rating::new(f64::NAN).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Rating(f64);

impl Rating {
    /// Highest rating on the scale.
    pub const MAX: f64 = 5.0;

    /// Validate and wrap a rating value.
    ///
    /// Returns `None` for non-finite values and values outside `0.0..=5.0`.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && (0.0..=Self::MAX).contains(&value)).then_some(Self(value))
    }

    /// Return the wrapped value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Case-insensitive matching key for a city.
///
/// Keys are trimmed and lower-cased; an empty key cannot be constructed.
///
/// # Examples
/// ```
/// use tablescout_core::CityKey;
///
/// let key = CityKey::new("  Banashankari ").expect("non-empty city");
/// assert_eq!(key.as_str(), "banashankari");
/// assert!(CityKey::new("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CityKey(String);

impl CityKey {
    /// Build a key from raw city text.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_lowercase()))
    }

    /// Borrow the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Report whether `other` occurs anywhere inside this key.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.0.contains(other.as_str())
    }
}

impl AsRef<str> for CityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A normalised restaurant, immutable once indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantRecord {
    /// Restaurant name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Listed city, trimmed but in its original case for display.
    pub city: String,
    /// Lower-cased city used for matching.
    pub city_key: CityKey,
    /// Neighbourhood or sub-area.
    pub location: String,
    /// Cuisines in dataset order.
    pub cuisines: Vec<String>,
    /// Liked dishes in dataset order; often empty.
    pub dish_liked: Vec<String>,
    /// Establishment type.
    pub rest_type: String,
    /// Rating, or `None` when the restaurant is unrated.
    pub rating: Option<Rating>,
    /// Number of votes behind the rating.
    pub votes: u64,
    /// Approximate cost for two, or `None` when unknown.
    pub approx_cost_for_two: Option<f64>,
    /// Whether online ordering is offered.
    pub online_order: bool,
    /// Whether table booking is offered.
    pub book_table: bool,
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "tests fail fast on invalid fixtures"
    )]
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, true)]
    #[case(5.0, true)]
    #[case(-0.1, false)]
    #[case(5.01, false)]
    #[case(f64::INFINITY, false)]
    fn rating_bounds(#[case] value: f64, #[case] valid: bool) {
        assert_eq!(Rating::new(value).is_some(), valid);
    }

    #[rstest]
    fn rating_displays_one_decimal() {
        let rating = Rating::new(4.0).expect("valid rating");
        assert_eq!(rating.to_string(), "4.0");
    }

    #[rstest]
    #[case("Banashankari", "banashankari")]
    #[case("  BTM  ", "btm")]
    #[case("Koramangala 5th Block", "koramangala 5th block")]
    fn city_key_normalises(#[case] raw: &str, #[case] expected: &str) {
        let key = CityKey::new(raw).expect("non-empty city");
        assert_eq!(key.as_str(), expected);
    }

    #[rstest]
    fn city_key_substring() {
        let bucket = CityKey::new("Koramangala 5th Block").expect("city");
        let query = CityKey::new("KORAMANGALA").expect("city");
        assert!(bucket.contains(&query));
        assert!(!query.contains(&bucket));
    }
}
