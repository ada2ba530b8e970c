//! End-to-end query entry point and the result shape handed to renderers.

use crate::{DatasetIndex, Query, Ranker, ScoredCandidate, filter};

/// Run `query` against `index`: filter, then rank.
///
/// The result holds at most `query.top_n()` candidates, best first. An
/// unknown city or an empty price window yields an empty result.
#[must_use]
pub fn recommend<'a>(index: &'a DatasetIndex, query: &Query) -> Vec<ScoredCandidate<'a>> {
    Ranker::for_index(index).rank(filter(index, query), query.top_n())
}

/// One ranked restaurant as presented to a display layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Recommendation {
    /// Restaurant name.
    pub name: String,
    /// Neighbourhood or sub-area.
    pub location: String,
    /// Cuisines in dataset order.
    pub cuisines: Vec<String>,
    /// Rating, or `None` when unrated.
    pub rating: Option<f64>,
    /// Vote count.
    pub votes: u64,
    /// Approximate cost for two.
    pub approx_cost_for_two: Option<f64>,
    /// Ranking score.
    pub score: f64,
}

impl ScoredCandidate<'_> {
    /// Copy the displayable fields out of the candidate.
    #[must_use]
    pub fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            name: self.record.name.clone(),
            location: self.record.location.clone(),
            cuisines: self.record.cuisines.clone(),
            rating: self.record.rating.map(crate::Rating::value),
            votes: self.record.votes,
            approx_cost_for_two: self.record.approx_cost_for_two,
            score: self.score,
        }
    }
}

impl From<ScoredCandidate<'_>> for Recommendation {
    fn from(candidate: ScoredCandidate<'_>) -> Self {
        candidate.to_recommendation()
    }
}
