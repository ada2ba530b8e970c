//! Property-based tests for the recommendation engine.
//!
//! # Invariants tested
//!
//! - **Price window:** every result has a known cost within the query range.
//! - **Ordering:** results are sorted by non-increasing score, then votes.
//! - **Truncation:** results never exceed the requested `top_n`.
//! - **Zero votes:** a record without votes always scores zero.
//! - **Idempotence:** re-normalising a normalised price returns it unchanged.

use std::num::NonZeroUsize;

use proptest::prelude::*;
use tablescout_core::normalize::parse_price;
use tablescout_core::{
    DatasetIndex, IndexOptions, PriceRange, Query, Ranker, RawRestaurantRow, recommend,
};

const CITIES: [&str; 3] = ["Banashankari", "BTM", "Koramangala 5th Block"];

fn row_strategy() -> impl Strategy<Value = RawRestaurantRow> {
    (
        0_usize..CITIES.len(),
        prop_oneof![
            (0_u32..=50).prop_map(|tenths| format!("{}.{}/5", tenths / 10, tenths % 10)),
            Just("NEW".to_owned()),
            Just("-".to_owned()),
        ],
        0_u32..5000,
        prop_oneof![
            (0_u32..3000).prop_map(|cost| cost.to_string()),
            (0_u32..1500).prop_map(|low| format!("{low}-{}", low + 500)),
            Just(String::new()),
        ],
    )
        .prop_map(|(city, rate, votes, cost)| RawRestaurantRow {
            name: Some(format!("Restaurant {votes}")),
            city: CITIES.get(city).map(|name| (*name).to_owned()),
            rate: Some(rate),
            votes: Some(votes.to_string()),
            approx_cost: Some(cost),
            ..RawRestaurantRow::default()
        })
}

fn query_strategy() -> impl Strategy<Value = Query> {
    (0_usize..CITIES.len(), 0_u32..2000, 0_u32..2000, 1_usize..15).prop_map(
        |(city, a, b, top_n)| {
            let (floor, ceiling) = if a <= b { (a, b) } else { (b, a) };
            let price = PriceRange::new(Some(f64::from(floor)), f64::from(ceiling))
                .unwrap_or_else(|err| panic!("ordered bounds: {err}"));
            let city = CITIES.get(city).copied().unwrap_or("BTM");
            let top_n = NonZeroUsize::new(top_n).unwrap_or(NonZeroUsize::MIN);
            Query::new(city, price)
                .unwrap_or_else(|err| panic!("non-empty city: {err}"))
                .with_top_n(top_n)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: every returned candidate's cost is present and in range.
    #[test]
    fn results_respect_price_window(
        rows in prop::collection::vec(row_strategy(), 0..40),
        query in query_strategy(),
    ) {
        let index = DatasetIndex::build(rows, IndexOptions::default());
        let price = query.price();
        for candidate in recommend(&index, &query) {
            let cost = candidate.record.approx_cost_for_two;
            prop_assert!(cost.is_some(), "unknown cost leaked into results");
            prop_assert!(price.contains(cost), "cost {cost:?} outside {price:?}");
        }
    }

    /// Property: results are sorted and never longer than `top_n`.
    #[test]
    fn results_are_sorted_and_truncated(
        rows in prop::collection::vec(row_strategy(), 0..40),
        query in query_strategy(),
    ) {
        let index = DatasetIndex::build(rows, IndexOptions::default());
        let results = recommend(&index, &query);
        prop_assert!(results.len() <= query.top_n().get());
        for pair in results.windows(2) {
            let [first, second] = pair else { continue };
            prop_assert!(first.score >= second.score);
            if first.score.total_cmp(&second.score).is_eq() {
                prop_assert!(first.record.votes >= second.record.votes);
            }
        }
    }

    /// Property: identical input always yields identical output.
    #[test]
    fn ranking_is_deterministic(
        rows in prop::collection::vec(row_strategy(), 0..40),
        query in query_strategy(),
    ) {
        let index = DatasetIndex::build(rows, IndexOptions::default());
        let names = || -> Vec<String> {
            recommend(&index, &query)
                .iter()
                .map(|c| c.record.name.clone())
                .collect()
        };
        prop_assert_eq!(names(), names());
    }

    /// Property: zero votes score zero whatever the rating.
    #[test]
    fn zero_votes_score_zero(rows in prop::collection::vec(row_strategy(), 1..20)) {
        let zeroed: Vec<RawRestaurantRow> = rows
            .into_iter()
            .map(|row| RawRestaurantRow {
                votes: Some("0".to_owned()),
                ..row
            })
            .collect();
        let index = DatasetIndex::build(zeroed, IndexOptions::default());
        let top_n = NonZeroUsize::new(index.len().max(1)).unwrap_or(NonZeroUsize::MIN);
        for candidate in Ranker::for_index(&index).rank(index.records(), top_n) {
            prop_assert!(candidate.score.abs() < f64::EPSILON);
        }
    }

    /// Property: normalising an already-normalised price is a no-op.
    #[test]
    fn price_normalisation_is_idempotent(raw in "[0-9]{1,5}(-[0-9]{1,5})?") {
        if let Some(once) = parse_price(&raw) {
            prop_assert_eq!(parse_price(&once.to_string()), Some(once));
        }
    }
}
