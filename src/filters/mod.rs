//! Faceted play filtering
//!
//! Filter state is two independent maps keyed by category name: discrete
//! selections (OR within a category, AND across categories) and inclusive
//! numeric ranges (AND with everything else). The filter table in
//! [`schema`] describes which categories exist; [`FilterEngine`] evaluates
//! filter state against plays.

pub mod category;
pub mod engine;
pub mod facets;
pub mod schema;

pub use category::{get_value_for_category, Category, NumericField};
pub use engine::{active_categories, active_ranges, has_active_filters, FilterEngine};
pub use facets::{FacetCount, FacetCounts};
pub use schema::{
    Bucket, BucketCategory, CategoryInfo, CategoryKind, DiscreteCategory, FilterSchema,
    RangeCategory, SchemaError,
};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Discrete filter state: category → accepted values
pub type FilterState = BTreeMap<String, BTreeSet<String>>;

/// Range filter state: category → inclusive numeric interval
pub type RangeFilterState = BTreeMap<String, NumericRange>;

/// Inclusive numeric interval `[lo, hi]`
///
/// An inverted interval (`lo > hi`) contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub lo: f64,
    pub hi: f64,
}

impl NumericRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    pub fn is_inverted(&self) -> bool {
        self.lo > self.hi
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lo, self.hi)
    }
}

/// Errors from parsing filter selections given as text
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ParseFilterError {
    #[error("expected CATEGORY=VALUES, got '{0}'")]
    MissingSeparator(String),

    #[error("empty category name in '{0}'")]
    EmptyCategory(String),

    #[error("expected LO:HI, got '{0}'")]
    InvalidRange(String),
}

impl FromStr for NumericRange {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lo, hi) = s
            .split_once(':')
            .ok_or_else(|| ParseFilterError::InvalidRange(s.to_string()))?;
        let lo = lo
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseFilterError::InvalidRange(s.to_string()))?;
        let hi = hi
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseFilterError::InvalidRange(s.to_string()))?;
        Ok(Self { lo, hi })
    }
}

/// Parse `playType=Pass,Run` into a category and its accepted values
///
/// Values are separated by commas; blank values are dropped, so
/// `down=` selects nothing (an inactive category).
pub fn parse_selection(s: &str) -> Result<(String, BTreeSet<String>), ParseFilterError> {
    let (category, values) = split_assignment(s)?;
    let values = values
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    Ok((category, values))
}

/// Parse `yardLine=0:32` into a category and its interval
pub fn parse_range_selection(s: &str) -> Result<(String, NumericRange), ParseFilterError> {
    let (category, range) = split_assignment(s)?;
    Ok((category, range.parse()?))
}

fn split_assignment(s: &str) -> Result<(String, &str), ParseFilterError> {
    let (category, rest) = s
        .split_once('=')
        .ok_or_else(|| ParseFilterError::MissingSeparator(s.to_string()))?;
    let category = category.trim();
    if category.is_empty() {
        return Err(ParseFilterError::EmptyCategory(s.to_string()));
    }
    Ok((category.to_string(), rest))
}

/// Merge repeated selections for the same category into one filter state
pub fn build_filter_state(
    selections: impl IntoIterator<Item = (String, BTreeSet<String>)>,
) -> FilterState {
    let mut state = FilterState::new();
    for (category, values) in selections {
        state.entry(category).or_default().extend(values);
    }
    state
}
