//! Facade crate for the tablescout restaurant recommendation engine.
//!
//! This crate re-exports the core domain types: normalised records, the
//! dataset index, queries, and the ranker. Staging the dataset lives in
//! `tablescout-data`; the command-line front end in `tablescout-cli`.

#![forbid(unsafe_code)]

pub use tablescout_core::{
    BuildReport, CityKey, DEFAULT_TOP_N, DatasetIndex, IndexHandle, IndexOptions, NeutralRating,
    PriceRange, Query, QueryError, Ranker, Rating, RawRestaurantRow, Recommendation,
    RestaurantRecord, ScoredCandidate, Scorer, VoteWeightedScorer, normalize, recommend,
};
