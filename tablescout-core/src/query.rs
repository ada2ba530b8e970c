//! Query values handed to the engine by the input layer.
//!
//! Constructors validate their invariants so the engine can rely on them:
//! a [`Query`] always names a city and carries a well-formed [`PriceRange`].

use std::num::NonZeroUsize;

use thiserror::Error;

/// Number of results returned when the caller does not choose one.
pub const DEFAULT_TOP_N: NonZeroUsize = NonZeroUsize::MIN.saturating_add(9);

/// Errors returned by [`Query::new`] and [`PriceRange::new`].
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum QueryError {
    /// The city was empty after trimming.
    #[error("query city must not be empty")]
    EmptyCity,
    /// A price bound was negative or not finite.
    #[error("price bound {value} must be a finite, non-negative amount")]
    InvalidPrice {
        /// Offending bound.
        value: f64,
    },
    /// The floor exceeded the ceiling.
    #[error("price floor {floor} exceeds price ceiling {ceiling}")]
    FloorAboveCeiling {
        /// Requested floor.
        floor: f64,
        /// Requested ceiling.
        ceiling: f64,
    },
}

/// Inclusive bounds on the approximate cost for two.
///
/// # Examples
/// ```
/// use tablescout_core::PriceRange;
///
/// # fn main() -> Result<(), tablescout_core::QueryError> {
/// let range = PriceRange::new(Some(300.0), 800.0)?;
/// assert!(range.contains(Some(800.0)));
/// assert!(!range.contains(Some(200.0)));
/// assert!(!range.contains(None));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    floor: f64,
    ceiling: f64,
}

impl PriceRange {
    /// Build a range; a missing floor defaults to zero.
    ///
    /// # Errors
    /// Returns [`QueryError::InvalidPrice`] for negative or non-finite bounds
    /// and [`QueryError::FloorAboveCeiling`] when the bounds are inverted.
    pub fn new(floor: Option<f64>, ceiling: f64) -> Result<Self, QueryError> {
        let floor_value = floor.unwrap_or(0.0);
        for value in [floor_value, ceiling] {
            if !value.is_finite() || value < 0.0 {
                return Err(QueryError::InvalidPrice { value });
            }
        }
        if floor_value > ceiling {
            return Err(QueryError::FloorAboveCeiling {
                floor: floor_value,
                ceiling,
            });
        }
        Ok(Self {
            floor: floor_value,
            ceiling,
        })
    }

    /// Build a ceiling-only range.
    ///
    /// # Errors
    /// Returns [`QueryError::InvalidPrice`] for a negative or non-finite
    /// ceiling.
    pub fn up_to(ceiling: f64) -> Result<Self, QueryError> {
        Self::new(None, ceiling)
    }

    /// Lower bound, zero unless set.
    #[must_use]
    pub const fn floor(&self) -> f64 {
        self.floor
    }

    /// Upper bound.
    #[must_use]
    pub const fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Report whether a cost lies within the range.
    ///
    /// An unknown cost is never within range: it cannot be shown to be
    /// affordable.
    #[must_use]
    pub fn contains(&self, cost: Option<f64>) -> bool {
        cost.is_some_and(|value| (self.floor..=self.ceiling).contains(&value))
    }
}

/// One recommendation request.
///
/// # Examples
/// ```
/// use tablescout_core::{PriceRange, Query};
///
/// # fn main() -> Result<(), tablescout_core::QueryError> {
/// let query = Query::new("  Banashankari ", PriceRange::up_to(800.0)?)?;
/// assert_eq!(query.city(), "Banashankari");
/// assert_eq!(query.top_n().get(), 10);
/// assert!(Query::new(" ", PriceRange::up_to(800.0)?).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    city: String,
    price: PriceRange,
    top_n: NonZeroUsize,
}

impl Query {
    /// Build a query returning [`DEFAULT_TOP_N`] results.
    ///
    /// # Errors
    /// Returns [`QueryError::EmptyCity`] when `city` is blank.
    pub fn new(city: impl Into<String>, price: PriceRange) -> Result<Self, QueryError> {
        let raw = city.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryError::EmptyCity);
        }
        Ok(Self {
            city: trimmed.to_owned(),
            price,
            top_n: DEFAULT_TOP_N,
        })
    }

    /// Replace the number of results to return.
    #[must_use]
    pub const fn with_top_n(mut self, top_n: NonZeroUsize) -> Self {
        self.top_n = top_n;
        self
    }

    /// City to match, trimmed.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Accepted price range.
    #[must_use]
    pub const fn price(&self) -> PriceRange {
        self.price
    }

    /// Maximum number of results.
    #[must_use]
    pub const fn top_n(&self) -> NonZeroUsize {
        self.top_n
    }
}
