//! In-memory dataset index with city-bucketed lookup.
//!
//! The index owns every normalised [`RestaurantRecord`] for the lifetime of a
//! run. Records are grouped into buckets keyed by [`CityKey`]; buckets keep
//! the order in which records were loaded, and the buckets themselves keep
//! the order in which their city was first seen. Both orders feed the
//! ranker's final tie-break, so lookups are fully deterministic.

use std::borrow::Borrow;
use std::collections::HashMap;

use log::{debug, warn};

use crate::normalize::normalize_row;
use crate::{CityKey, Rating, RawRestaurantRow, RestaurantRecord};

/// Neutral rating used when a dataset holds no rated restaurants at all.
pub const FALLBACK_NEUTRAL_RATING: f64 = 2.5;

/// How unrated restaurants are scored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NeutralRating {
    /// Use the mean of every present rating in the dataset.
    #[default]
    DatasetMean,
    /// Use a fixed rating.
    Fixed(Rating),
}

/// Options applied while building a [`DatasetIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndexOptions {
    /// Policy for the rating substituted when a record is unrated.
    pub neutral_rating: NeutralRating,
}

impl IndexOptions {
    /// Replace the neutral rating policy.
    #[must_use]
    pub const fn with_neutral_rating(mut self, neutral_rating: NeutralRating) -> Self {
        self.neutral_rating = neutral_rating;
        self
    }
}

/// Row accounting captured while building an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    /// Rows that became records.
    pub accepted: usize,
    /// Rows dropped because they had no usable city.
    pub skipped: usize,
}

/// How a city lookup was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The query key named a bucket directly.
    Exact,
    /// No bucket matched exactly; one or more bucket keys contain the query.
    Substring,
    /// Nothing matched.
    Unmatched,
}

/// Records returned by [`DatasetIndex::lookup_by_city`].
#[derive(Debug, Clone, PartialEq)]
pub struct CityMatch<'a> {
    kind: MatchKind,
    records: Vec<&'a RestaurantRecord>,
}

impl<'a> CityMatch<'a> {
    const fn unmatched() -> Self {
        Self {
            kind: MatchKind::Unmatched,
            records: Vec::new(),
        }
    }

    /// How the lookup was satisfied.
    #[must_use]
    pub const fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Matched records in bucket order.
    #[must_use]
    pub fn records(&self) -> &[&'a RestaurantRecord] {
        &self.records
    }

    /// Number of matched records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Report whether nothing matched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the match and return its records.
    #[must_use]
    pub fn into_records(self) -> Vec<&'a RestaurantRecord> {
        self.records
    }
}

/// Summary of one city bucket, as listed by [`DatasetIndex::cities`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitySummary<'a> {
    /// City text as first seen in the dataset.
    pub name: &'a str,
    /// Matching key of the bucket.
    pub key: &'a CityKey,
    /// Number of records in the bucket.
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct CityBucket {
    key: CityKey,
    display: String,
    records: Vec<RestaurantRecord>,
}

/// Immutable, city-bucketed collection of restaurant records.
///
/// # Examples
/// ```
/// use tablescout_core::{DatasetIndex, IndexOptions, MatchKind, RawRestaurantRow};
///
/// let rows = vec![
///     RawRestaurantRow {
///         name: Some("Jalsa".into()),
///         city: Some("Banashankari".into()),
///         ..RawRestaurantRow::default()
///     },
///     RawRestaurantRow {
///         name: Some("Nowhere".into()),
///         ..RawRestaurantRow::default()
///     },
/// ];
/// let index = DatasetIndex::build(rows, IndexOptions::default());
/// assert_eq!(index.report().skipped, 1);
///
/// let found = index.lookup_by_city("BANASHANKARI");
/// assert_eq!(found.kind(), MatchKind::Exact);
/// assert_eq!(found.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetIndex {
    buckets: Vec<CityBucket>,
    positions: HashMap<CityKey, usize>,
    neutral_rating: f64,
    report: BuildReport,
}

impl DatasetIndex {
    /// Normalise raw rows and index the usable ones.
    ///
    /// Rows without a usable city are counted in [`BuildReport::skipped`] and
    /// never reach the index.
    pub fn build<I>(rows: I, options: IndexOptions) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<RawRestaurantRow>,
    {
        let mut skipped = 0_usize;
        let records: Vec<RestaurantRecord> = rows
            .into_iter()
            .filter_map(|row| match normalize_row(row.borrow()) {
                Ok(record) => Some(record),
                Err(rejection) => {
                    debug!("Dropping dataset row: {rejection}");
                    skipped += 1;
                    None
                }
            })
            .collect();
        if skipped > 0 {
            warn!("Skipped {skipped} dataset rows without a usable city");
        }
        let mut index = Self::from_records(records, options);
        index.report.skipped = skipped;
        index
    }

    /// Index records that were normalised elsewhere.
    pub fn from_records<I>(records: I, options: IndexOptions) -> Self
    where
        I: IntoIterator<Item = RestaurantRecord>,
    {
        let mut buckets: Vec<CityBucket> = Vec::new();
        let mut positions: HashMap<CityKey, usize> = HashMap::new();
        let mut accepted = 0_usize;
        for record in records {
            accepted += 1;
            let position = *positions.entry(record.city_key.clone()).or_insert_with(|| {
                buckets.push(CityBucket {
                    key: record.city_key.clone(),
                    display: record.city.clone(),
                    records: Vec::new(),
                });
                buckets.len() - 1
            });
            if let Some(bucket) = buckets.get_mut(position) {
                bucket.records.push(record);
            }
        }

        let neutral_rating = match options.neutral_rating {
            NeutralRating::Fixed(rating) => rating.value(),
            NeutralRating::DatasetMean => {
                mean_rating(buckets.iter().flat_map(|bucket| bucket.records.iter()))
                    .unwrap_or(FALLBACK_NEUTRAL_RATING)
            }
        };
        debug!(
            "Indexed {accepted} restaurants across {} cities (neutral rating {neutral_rating:.3})",
            buckets.len()
        );

        Self {
            buckets,
            positions,
            neutral_rating,
            report: BuildReport {
                accepted,
                skipped: 0,
            },
        }
    }

    /// Look up the records listed in `city`.
    ///
    /// The exact key is tried first. When it names no bucket, every bucket
    /// whose key contains the query key is returned, in first-seen order.
    /// A city that matches nothing yields an empty, [`MatchKind::Unmatched`]
    /// result rather than an error.
    #[must_use]
    pub fn lookup_by_city(&self, city: &str) -> CityMatch<'_> {
        let Some(key) = CityKey::new(city) else {
            return CityMatch::unmatched();
        };
        if let Some(bucket) = self
            .positions
            .get(&key)
            .and_then(|&position| self.buckets.get(position))
        {
            return CityMatch {
                kind: MatchKind::Exact,
                records: bucket.records.iter().collect(),
            };
        }
        let records: Vec<&RestaurantRecord> = self
            .buckets
            .iter()
            .filter(|bucket| bucket.key.contains(&key))
            .flat_map(|bucket| bucket.records.iter())
            .collect();
        if records.is_empty() {
            return CityMatch::unmatched();
        }
        CityMatch {
            kind: MatchKind::Substring,
            records,
        }
    }

    /// Rating substituted for unrated records, fixed for the index lifetime.
    #[must_use]
    pub const fn neutral_rating(&self) -> f64 {
        self.neutral_rating
    }

    /// Row accounting from the build.
    #[must_use]
    pub const fn report(&self) -> BuildReport {
        self.report
    }

    /// Iterate over city buckets in first-seen order.
    pub fn cities(&self) -> impl Iterator<Item = CitySummary<'_>> + '_ {
        self.buckets.iter().map(|bucket| CitySummary {
            name: &bucket.display,
            key: &bucket.key,
            records: bucket.records.len(),
        })
    }

    /// Iterate over every record in bucket order.
    pub fn records(&self) -> impl Iterator<Item = &RestaurantRecord> + '_ {
        self.buckets.iter().flat_map(|bucket| bucket.records.iter())
    }

    /// Number of indexed records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.report.accepted
    }

    /// Report whether the index holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.report.accepted == 0
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the neutral rating is the arithmetic mean of present ratings"
)]
fn mean_rating<'a, I>(records: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a RestaurantRecord>,
{
    let (sum, count) = records
        .into_iter()
        .filter_map(|record| record.rating)
        .fold((0.0_f64, 0_usize), |(sum, count), rating| {
            (sum + rating.value(), count + 1)
        });
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        clippy::float_arithmetic,
        reason = "tests fail fast on invalid fixtures and compute expected means inline"
    )]
    use super::*;
    use crate::test_support::{banashankari_rows, raw_row};
    use rstest::{fixture, rstest};

    #[fixture]
    fn index() -> DatasetIndex {
        let mut rows = banashankari_rows();
        rows.push(raw_row(
            "Corner House",
            "Koramangala 5th Block",
            "4.5/5",
            "900",
            "400",
        ));
        rows.push(raw_row(
            "Truffles",
            "Koramangala 7th Block",
            "4.4/5",
            "1200",
            "900",
        ));
        rows.push(raw_row("Lost Row", "", "4.0/5", "10", "200"));
        DatasetIndex::build(rows, IndexOptions::default())
    }

    #[rstest]
    fn counts_accepted_and_skipped_rows(index: DatasetIndex) {
        assert_eq!(
            index.report(),
            BuildReport {
                accepted: 4,
                skipped: 1
            }
        );
        assert_eq!(index.len(), 4);
    }

    #[rstest]
    #[case("Banashankari")]
    #[case("banashankari")]
    #[case("  BANASHANKARI ")]
    fn exact_lookup_ignores_case(index: DatasetIndex, #[case] city: &str) {
        let found = index.lookup_by_city(city);
        assert_eq!(found.kind(), MatchKind::Exact);
        let names: Vec<&str> = found.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Jalsa", "Onesta"]);
    }

    #[rstest]
    fn substring_fallback_spans_buckets_in_first_seen_order(index: DatasetIndex) {
        let found = index.lookup_by_city("koramangala");
        assert_eq!(found.kind(), MatchKind::Substring);
        let names: Vec<&str> = found.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Corner House", "Truffles"]);
    }

    #[rstest]
    #[case("Mysore")]
    #[case("")]
    fn unknown_city_is_empty(index: DatasetIndex, #[case] city: &str) {
        let found = index.lookup_by_city(city);
        assert_eq!(found.kind(), MatchKind::Unmatched);
        assert!(found.is_empty());
    }

    #[rstest]
    fn neutral_rating_is_dataset_mean(index: DatasetIndex) {
        let expected = (4.6 + 4.1 + 4.5 + 4.4) / 4.0;
        assert!((index.neutral_rating() - expected).abs() < 1e-9);
    }

    #[rstest]
    fn neutral_rating_can_be_fixed() {
        let rating = Rating::new(3.0).expect("valid rating");
        let options = IndexOptions::default().with_neutral_rating(NeutralRating::Fixed(rating));
        let built = DatasetIndex::build(banashankari_rows(), options);
        assert!((built.neutral_rating() - 3.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn unrated_dataset_falls_back() {
        let rows = vec![raw_row("Fresh Place", "Banashankari", "NEW", "10", "400")];
        let built = DatasetIndex::build(rows, IndexOptions::default());
        assert!((built.neutral_rating() - FALLBACK_NEUTRAL_RATING).abs() < f64::EPSILON);
    }

    #[rstest]
    fn lists_cities_with_display_names(index: DatasetIndex) {
        let cities: Vec<(&str, usize)> = index
            .cities()
            .map(|city| (city.name, city.records))
            .collect();
        assert_eq!(
            cities,
            [
                ("Banashankari", 2),
                ("Koramangala 5th Block", 1),
                ("Koramangala 7th Block", 1)
            ]
        );
    }

    #[rstest]
    fn empty_input_builds_empty_index() {
        let built = DatasetIndex::build(Vec::<RawRestaurantRow>::new(), IndexOptions::default());
        assert!(built.is_empty());
        assert_eq!(built.cities().count(), 0);
    }
}
