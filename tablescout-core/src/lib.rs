//! Filter-and-rank engine for restaurant recommendations.
//!
//! Raw dataset rows are normalised into [`RestaurantRecord`]s once, at load
//! time, and grouped by city in a [`DatasetIndex`]. Each [`Query`] then flows
//! through [`filter`] (city match and price window) into a [`Ranker`], which
//! orders candidates by `effective_rating * ln(1 + votes)` and keeps the top
//! N.
//!
//! ```
//! use tablescout_core::{
//!     DatasetIndex, IndexOptions, PriceRange, Query, RawRestaurantRow, recommend,
//! };
//!
//! # fn main() -> Result<(), tablescout_core::QueryError> {
//! let rows = vec![RawRestaurantRow {
//!     name: Some("Onesta".into()),
//!     city: Some("Banashankari".into()),
//!     rate: Some("4.6/5".into()),
//!     votes: Some("2556".into()),
//!     approx_cost: Some("600".into()),
//!     ..RawRestaurantRow::default()
//! }];
//! let index = DatasetIndex::build(rows, IndexOptions::default());
//! let query = Query::new("banashankari", PriceRange::up_to(800.0)?)?;
//! let results = recommend(&index, &query);
//! assert_eq!(results.len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod filter;
mod index;
pub mod normalize;
mod query;
mod ranker;
mod recommend;
mod record;
mod snapshot;

#[cfg(test)]
mod test_support;

pub use filter::filter;
pub use index::{
    BuildReport, CityMatch, CitySummary, DatasetIndex, FALLBACK_NEUTRAL_RATING, IndexOptions,
    MatchKind, NeutralRating,
};
pub use normalize::RowRejection;
pub use query::{DEFAULT_TOP_N, PriceRange, Query, QueryError};
pub use ranker::{Ranker, ScoredCandidate, Scorer, VoteWeightedScorer};
pub use recommend::{Recommendation, recommend};
pub use record::{CityKey, Rating, RawRestaurantRow, RestaurantRecord};
pub use snapshot::IndexHandle;
