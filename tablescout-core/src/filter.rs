//! Query filtering: city lookup followed by the price predicate.

use log::debug;

use crate::{DatasetIndex, Query, RestaurantRecord};

/// Select the records that match `query`'s city and price range.
///
/// Candidates keep the order the index returned them in. A record whose
/// approximate cost is unknown never passes the price predicate. An empty
/// result is a valid outcome.
///
/// # Examples
/// ```
/// use tablescout_core::{DatasetIndex, IndexOptions, PriceRange, Query, RawRestaurantRow, filter};
///
/// # fn main() -> Result<(), tablescout_core::QueryError> {
/// let row = |name: &str, cost: &str| RawRestaurantRow {
///     name: Some(name.into()),
///     city: Some("BTM".into()),
///     approx_cost: Some(cost.into()),
///     ..RawRestaurantRow::default()
/// };
/// let index = DatasetIndex::build(
///     [row("Cheap", "300"), row("Dear", "1,500")],
///     IndexOptions::default(),
/// );
/// let query = Query::new("btm", PriceRange::up_to(500.0)?)?;
/// let names: Vec<_> = filter(&index, &query).iter().map(|r| r.name.as_str()).collect();
/// assert_eq!(names, ["Cheap"]);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn filter<'a>(index: &'a DatasetIndex, query: &Query) -> Vec<&'a RestaurantRecord> {
    let found = index.lookup_by_city(query.city());
    let kind = found.kind();
    let matched = found.len();
    let price = query.price();
    let candidates: Vec<&RestaurantRecord> = found
        .into_records()
        .into_iter()
        .filter(|record| price.contains(record.approx_cost_for_two))
        .collect();
    debug!(
        "City '{}' matched {matched} records ({kind:?}); {} within price range",
        query.city(),
        candidates.len()
    );
    candidates
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "tests fail fast on invalid fixtures"
    )]
    use super::*;
    use crate::test_support::{banashankari_rows, raw_row};
    use crate::{IndexOptions, PriceRange};
    use rstest::{fixture, rstest};

    #[fixture]
    fn index() -> DatasetIndex {
        let mut rows = banashankari_rows();
        rows.push(raw_row("Mystery Cost", "Banashankari", "4.0/5", "50", ""));
        rows.push(raw_row(
            "Range Place",
            "Banashankari",
            "3.8/5",
            "40",
            "500-1000",
        ));
        DatasetIndex::build(rows, IndexOptions::default())
    }

    fn names<'a>(records: &[&'a RestaurantRecord]) -> Vec<&'a str> {
        records.iter().map(|record| record.name.as_str()).collect()
    }

    fn query(city: &str, floor: Option<f64>, ceiling: f64) -> Query {
        let price = PriceRange::new(floor, ceiling).expect("valid range");
        Query::new(city, price).expect("valid query")
    }

    #[rstest]
    fn keeps_bucket_order(index: DatasetIndex) {
        let found = filter(&index, &query("Banashankari", None, 800.0));
        assert_eq!(names(&found), ["Jalsa", "Onesta", "Range Place"]);
    }

    #[rstest]
    fn ceiling_excludes_dearer_records(index: DatasetIndex) {
        let found = filter(&index, &query("Banashankari", None, 600.0));
        assert_eq!(names(&found), ["Onesta"]);
    }

    #[rstest]
    fn floor_excludes_cheaper_records(index: DatasetIndex) {
        let found = filter(&index, &query("Banashankari", Some(700.0), 800.0));
        assert_eq!(names(&found), ["Jalsa", "Range Place"]);
    }

    #[rstest]
    fn unknown_cost_never_matches(index: DatasetIndex) {
        let found = filter(&index, &query("Banashankari", None, 1_000_000.0));
        assert!(!names(&found).contains(&"Mystery Cost"));
    }

    #[rstest]
    fn unknown_city_yields_nothing(index: DatasetIndex) {
        assert!(filter(&index, &query("Whitefield", None, 800.0)).is_empty());
    }
}
