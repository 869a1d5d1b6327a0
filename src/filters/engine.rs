//! Play matching against discrete and range filter state

use film_core::PlayRecord;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use super::category::{Category, NumericField};
use super::schema::{BucketCategory, FilterSchema, SchemaError};
use super::{FilterState, NumericRange, RangeFilterState};

/// Discrete categories with a non-empty selection
pub fn active_categories(filters: &FilterState) -> Vec<(&str, &BTreeSet<String>)> {
    filters
        .iter()
        .filter(|(_, accepted)| !accepted.is_empty())
        .map(|(category, accepted)| (category.as_str(), accepted))
        .collect()
}

/// Every range entry; full-span entries are not filtered out here
pub fn active_ranges(ranges: &RangeFilterState) -> Vec<(&str, NumericRange)> {
    ranges
        .iter()
        .map(|(category, range)| (category.as_str(), *range))
        .collect()
}

pub fn has_active_filters(filters: &FilterState, ranges: &RangeFilterState) -> bool {
    !ranges.is_empty() || filters.values().any(|accepted| !accepted.is_empty())
}

/// One resolved discrete selection
enum SetMatcher<'a> {
    /// Plain field; an unknown name compares as `""`
    Field {
        category: Option<Category>,
        accepted: &'a BTreeSet<String>,
    },

    /// Synthetic category: the field must fall in one of the selected buckets
    Buckets {
        category: &'a BucketCategory,
        accepted: &'a BTreeSet<String>,
    },
}

impl SetMatcher<'_> {
    fn matches(&self, play: &PlayRecord) -> bool {
        match self {
            SetMatcher::Field { category, accepted } => match category {
                Some(category) => accepted.contains(&*category.value_of(play)),
                None => accepted.contains(""),
            },
            SetMatcher::Buckets { category, accepted } => match category.field.value_of(play) {
                Some(value) => category
                    .buckets
                    .iter()
                    .any(|bucket| accepted.contains(&bucket.label) && bucket.contains(value)),
                None => false,
            },
        }
    }
}

/// One resolved range selection; `None` source never matches
struct RangeMatcher {
    source: Option<NumericField>,
    range: NumericRange,
}

impl RangeMatcher {
    fn matches(&self, play: &PlayRecord) -> bool {
        self.source
            .and_then(|field| field.value_of(play))
            .map(|value| self.range.contains(value))
            .unwrap_or(false)
    }
}

/// Evaluates filter state against plays using a filter table
///
/// The engine is immutable once built; every method is pure and total.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    schema: FilterSchema,

    /// Bucketed category name → index into `schema.bucketed`
    bucketed_index: HashMap<String, usize>,

    /// Range category name → index into `schema.ranges`
    range_index: HashMap<String, usize>,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(FilterSchema::default())
    }
}

impl FilterEngine {
    /// Build an engine without validating the table
    ///
    /// On duplicate names the first entry wins.
    pub fn new(schema: FilterSchema) -> Self {
        let mut bucketed_index = HashMap::new();
        for (idx, category) in schema.bucketed.iter().enumerate() {
            bucketed_index.entry(category.name.clone()).or_insert(idx);
        }

        let mut range_index = HashMap::new();
        for (idx, range) in schema.ranges.iter().enumerate() {
            range_index.entry(range.name.clone()).or_insert(idx);
        }

        Self {
            schema,
            bucketed_index,
            range_index,
        }
    }

    /// Build an engine from a table that must pass validation
    pub fn try_new(schema: FilterSchema) -> Result<Self, SchemaError> {
        schema.validate()?;
        Ok(Self::new(schema))
    }

    pub fn schema(&self) -> &FilterSchema {
        &self.schema
    }

    /// Numeric source for a range category
    ///
    /// Table entries win; plain numeric field names are accepted as a fallback.
    pub fn range_source(&self, category: &str) -> Option<NumericField> {
        match self.range_index.get(category) {
            Some(&idx) => Some(self.schema.ranges[idx].field),
            None => NumericField::from_name(category),
        }
    }

    /// The play's value for a range category, `None` for an unknown category
    pub fn numeric_value_for_range(&self, play: &PlayRecord, category: &str) -> Option<f64> {
        self.range_source(category)
            .and_then(|field| field.value_of(play))
    }

    fn set_matcher<'a>(&'a self, category: &str, accepted: &'a BTreeSet<String>) -> SetMatcher<'a> {
        match self.bucketed_index.get(category) {
            Some(&idx) => SetMatcher::Buckets {
                category: &self.schema.bucketed[idx],
                accepted,
            },
            None => SetMatcher::Field {
                category: Category::from_name(category),
                accepted,
            },
        }
    }

    fn range_matcher(&self, category: &str, range: NumericRange) -> RangeMatcher {
        RangeMatcher {
            source: self.range_source(category),
            range,
        }
    }

    /// AND across categories, OR across the accepted values of each
    ///
    /// `active` is expected to hold non-empty sets only; an empty set here
    /// matches nothing. An empty `active` matches every play.
    pub fn matches_set_filters(&self, play: &PlayRecord, active: &[(&str, &BTreeSet<String>)]) -> bool {
        active
            .iter()
            .all(|(category, accepted)| self.set_matcher(category, accepted).matches(play))
    }

    /// AND across ranges, each inclusive on both ends
    ///
    /// Unknown categories and inverted ranges never match. An empty
    /// `active` matches every play.
    pub fn matches_range_filters(&self, play: &PlayRecord, active: &[(&str, NumericRange)]) -> bool {
        active
            .iter()
            .all(|(category, range)| self.range_matcher(category, *range).matches(play))
    }

    /// Whether a play passes both the discrete and the range filter state
    pub fn matches_filters(
        &self,
        play: &PlayRecord,
        filters: &FilterState,
        ranges: &RangeFilterState,
    ) -> bool {
        self.matches_set_filters(play, &active_categories(filters))
            && self.matches_range_filters(play, &active_ranges(ranges))
    }

    /// Plays passing the filter state, in their original order
    ///
    /// With no active filters this returns `Cow::Borrowed(plays)`: the
    /// caller's own slice, so identity checks (`std::ptr::eq`) can detect
    /// that nothing changed. Any active filter produces a new owned
    /// sequence, even when every play survives.
    pub fn filter_plays<'a>(
        &self,
        plays: &'a [PlayRecord],
        filters: &FilterState,
        ranges: &RangeFilterState,
    ) -> Cow<'a, [PlayRecord]> {
        let set_matchers: Vec<SetMatcher<'_>> = active_categories(filters)
            .into_iter()
            .map(|(category, accepted)| self.set_matcher(category, accepted))
            .collect();
        let range_matchers: Vec<RangeMatcher> = active_ranges(ranges)
            .into_iter()
            .map(|(category, range)| self.range_matcher(category, range))
            .collect();

        if set_matchers.is_empty() && range_matchers.is_empty() {
            return Cow::Borrowed(plays);
        }

        let filtered: Vec<PlayRecord> = plays
            .iter()
            .filter(|play| {
                set_matchers.iter().all(|matcher| matcher.matches(play))
                    && range_matchers.iter().all(|matcher| matcher.matches(play))
            })
            .cloned()
            .collect();

        debug!(
            "Filtered {} of {} plays ({} categories, {} ranges)",
            filtered.len(),
            plays.len(),
            set_matchers.len(),
            range_matchers.len()
        );

        Cow::Owned(filtered)
    }
}
