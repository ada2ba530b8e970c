//! Shared fixtures for unit tests.

use crate::RawRestaurantRow;

/// Build a raw row with the columns that drive filtering and ranking.
pub(crate) fn raw_row(
    name: &str,
    city: &str,
    rate: &str,
    votes: &str,
    cost: &str,
) -> RawRestaurantRow {
    RawRestaurantRow {
        name: Some(name.to_owned()),
        city: Some(city.to_owned()),
        location: Some(city.to_owned()),
        cuisines: Some("North Indian, Chinese".to_owned()),
        rate: Some(rate.to_owned()),
        votes: Some(votes.to_owned()),
        approx_cost: Some(cost.to_owned()),
        ..RawRestaurantRow::default()
    }
}

/// Two Banashankari restaurants, the lower-scoring one first.
pub(crate) fn banashankari_rows() -> Vec<RawRestaurantRow> {
    vec![
        raw_row("Jalsa", "Banashankari", "4.1/5", "775", "800"),
        raw_row("Onesta", "Banashankari", "4.6/5", "2556", "600"),
    ]
}
