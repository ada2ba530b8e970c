//! Candidate scoring and deterministic top-N ordering.
//!
//! A candidate's score is its effective rating multiplied by `ln(1 + votes)`.
//! Unrated candidates take the index's neutral rating, so they are neither
//! zeroed out nor allowed to dominate rated ones. Zero votes always score
//! zero.

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use crate::{DatasetIndex, RestaurantRecord};

/// Assigns a ranking score to a restaurant.
///
/// Implementations must be deterministic and must return finite,
/// non-negative values; [`Scorer::sanitise`] is available to enforce the
/// latter.
///
/// # Examples
/// ```
/// use tablescout_core::{RestaurantRecord, Scorer};
///
/// struct VotesOnly;
///
/// impl Scorer for VotesOnly {
///     #[expect(clippy::cast_precision_loss, reason = "vote counts are small")]
///     fn score(&self, record: &RestaurantRecord) -> f64 {
///         Self::sanitise(record.votes as f64)
///     }
/// }
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `record`.
    fn score(&self, record: &RestaurantRecord) -> f64;

    /// Replace non-finite or negative scores with `0.0`.
    #[must_use]
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if score.is_finite() && score > 0.0 {
            score
        } else {
            0.0
        }
    }
}

/// Scores by effective rating weighted by the logarithm of the vote count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoteWeightedScorer {
    neutral_rating: f64,
}

impl VoteWeightedScorer {
    /// Build a scorer that substitutes `neutral_rating` for unrated records.
    #[must_use]
    pub const fn new(neutral_rating: f64) -> Self {
        Self { neutral_rating }
    }

    /// Rating used for `record`: its own, or the neutral one when absent.
    #[must_use]
    pub fn effective_rating(&self, record: &RestaurantRecord) -> f64 {
        record
            .rating
            .map_or(self.neutral_rating, crate::Rating::value)
    }
}

impl Scorer for VoteWeightedScorer {
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "score is rating times ln(1 + votes)"
    )]
    fn score(&self, record: &RestaurantRecord) -> f64 {
        Self::sanitise(self.effective_rating(record) * (record.votes as f64).ln_1p())
    }
}

/// A record paired with its score for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    /// The scored record.
    pub record: &'a RestaurantRecord,
    /// Score assigned by the ranker's [`Scorer`].
    pub score: f64,
    position: usize,
}

/// Orders candidates by score, then votes, then their original position.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use tablescout_core::{
///     DatasetIndex, IndexOptions, PriceRange, Query, Ranker, RawRestaurantRow, filter,
/// };
///
/// # fn main() -> Result<(), tablescout_core::QueryError> {
/// let row = |name: &str, rate: &str, votes: &str| RawRestaurantRow {
///     name: Some(name.into()),
///     city: Some("Banashankari".into()),
///     rate: Some(rate.into()),
///     votes: Some(votes.into()),
///     approx_cost: Some("600".into()),
///     ..RawRestaurantRow::default()
/// };
/// let index = DatasetIndex::build(
///     [row("Jalsa", "4.1/5", "775"), row("Onesta", "4.6/5", "2556")],
///     IndexOptions::default(),
/// );
/// let query = Query::new("Banashankari", PriceRange::up_to(800.0)?)?;
/// let ranked = Ranker::for_index(&index).rank(filter(&index, &query), query.top_n());
/// assert_eq!(ranked[0].record.name, "Onesta");
/// assert_eq!(ranked.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Ranker<S = VoteWeightedScorer> {
    scorer: S,
}

impl Ranker<VoteWeightedScorer> {
    /// Build a vote-weighted ranker using `index`'s neutral rating.
    #[must_use]
    pub const fn for_index(index: &DatasetIndex) -> Self {
        Self::new(VoteWeightedScorer::new(index.neutral_rating()))
    }
}

impl<S: Scorer> Ranker<S> {
    /// Build a ranker around `scorer`.
    #[must_use]
    pub const fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Borrow the scorer.
    #[must_use]
    pub const fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Score `candidates` and return at most `top_n` of them, best first.
    ///
    /// Ties on score fall back to descending votes and then to the order the
    /// candidates were supplied in, so identical input always yields
    /// identical output.
    pub fn rank<'a, I>(&self, candidates: I, top_n: NonZeroUsize) -> Vec<ScoredCandidate<'a>>
    where
        I: IntoIterator<Item = &'a RestaurantRecord>,
    {
        let mut scored: Vec<ScoredCandidate<'a>> = candidates
            .into_iter()
            .enumerate()
            .map(|(position, record)| ScoredCandidate {
                record,
                score: self.scorer.score(record),
                position,
            })
            .collect();
        scored.sort_by(compare_candidates);
        scored.truncate(top_n.get());
        scored
    }
}

fn compare_candidates(left: &ScoredCandidate<'_>, right: &ScoredCandidate<'_>) -> Ordering {
    right
        .score
        .total_cmp(&left.score)
        .then_with(|| right.record.votes.cmp(&left.record.votes))
        .then_with(|| left.position.cmp(&right.position))
}
