//! Shared, swappable access to a built index.
//!
//! Queries read an immutable [`DatasetIndex`] through an [`Arc`] snapshot.
//! A reload builds a fresh index off to the side and publishes it in one
//! step; queries already holding the previous snapshot finish against it.

use std::sync::{Arc, PoisonError, RwLock};

use crate::{DatasetIndex, Query, Recommendation, recommend};

/// Holder for the index currently served to queries.
#[derive(Debug)]
pub struct IndexHandle {
    current: RwLock<Arc<DatasetIndex>>,
}

impl IndexHandle {
    /// Wrap an initial index.
    #[must_use]
    pub fn new(index: DatasetIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// Return the index currently published.
    #[must_use]
    pub fn snapshot(&self) -> Arc<DatasetIndex> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the served index and return the one it replaced.
    pub fn publish(&self, index: DatasetIndex) -> Arc<DatasetIndex> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(index))
    }

    /// Answer `query` against the current snapshot.
    #[must_use]
    pub fn recommend(&self, query: &Query) -> Vec<Recommendation> {
        let index = self.snapshot();
        recommend(&index, query)
            .iter()
            .map(crate::ScoredCandidate::to_recommendation)
            .collect()
    }
}

impl From<DatasetIndex> for IndexHandle {
    fn from(index: DatasetIndex) -> Self {
        Self::new(index)
    }
}
