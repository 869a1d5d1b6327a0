//! Facet counts: how many plays carry each value of a category

use film_core::PlayRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::category::get_value_for_category;
use super::engine::FilterEngine;
use super::{FilterState, RangeFilterState};

/// Number of plays carrying one value of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

pub type FacetCounts = Vec<FacetCount>;

impl FilterEngine {
    /// Value counts for `category` over `plays`
    ///
    /// Bucketed categories list every bucket in table order, including
    /// empty ones. Field categories list the non-empty values present,
    /// most frequent first, ties broken by value.
    pub fn facet_counts(&self, plays: &[PlayRecord], category: &str) -> FacetCounts {
        if let Some(bucketed) = self.schema().bucket_category(category) {
            return bucketed
                .buckets
                .iter()
                .map(|bucket| FacetCount {
                    value: bucket.label.clone(),
                    count: plays
                        .iter()
                        .filter_map(|play| bucketed.field.value_of(play))
                        .filter(|value| bucket.contains(*value))
                        .count(),
                })
                .collect();
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        for play in plays {
            let value = get_value_for_category(play, category);
            if value.is_empty() {
                continue;
            }
            *counts.entry(value.into_owned()).or_insert(0) += 1;
        }

        let mut facets: FacetCounts = counts
            .into_iter()
            .map(|(value, count)| FacetCount { value, count })
            .collect();
        facets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        facets
    }

    /// Drill-down counts for `category`
    ///
    /// Applies every active filter except the selection on `category`
    /// itself, so the counts show what choosing another value would yield.
    pub fn facet_counts_with(
        &self,
        plays: &[PlayRecord],
        category: &str,
        filters: &FilterState,
        ranges: &RangeFilterState,
    ) -> FacetCounts {
        let mut others = filters.clone();
        others.remove(category);
        let narrowed = self.filter_plays(plays, &others, ranges);
        self.facet_counts(&narrowed, category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::NumericRange;
    use film_core::PlayKind;
    use std::collections::BTreeSet;

    fn plays() -> Vec<PlayRecord> {
        vec![
            PlayRecord::new("1", PlayKind::pass("Complete")).with_down_and_distance(1, 10),
            PlayRecord::new("2", PlayKind::pass("Incomplete")).with_down_and_distance(2, 2),
            PlayRecord::new("3", PlayKind::run("Left")).with_down_and_distance(3, 1),
            PlayRecord::new("4", PlayKind::pass("Complete")).with_down_and_distance(3, 5),
        ]
    }

    fn count(facets: &FacetCounts, value: &str) -> Option<usize> {
        facets.iter().find(|f| f.value == value).map(|f| f.count)
    }

    #[test]
    fn test_field_counts_skip_empty_values() {
        let engine = FilterEngine::default();
        let facets = engine.facet_counts(&plays(), "passResult");

        assert_eq!(
            facets,
            vec![
                FacetCount { value: "Complete".to_string(), count: 2 },
                FacetCount { value: "Incomplete".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_bucket_counts_in_table_order() {
        let engine = FilterEngine::default();
        let facets = engine.facet_counts(&plays(), "distanceType");

        let labels: Vec<&str> = facets.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(labels, vec!["Short: 1-3", "Medium: 4-7", "Long: 8+"]);
        assert_eq!(count(&facets, "Short: 1-3"), Some(2));
        assert_eq!(count(&facets, "Medium: 4-7"), Some(1));
        assert_eq!(count(&facets, "Long: 8+"), Some(1));
    }

    #[test]
    fn test_drill_down_ignores_own_selection() {
        let engine = FilterEngine::default();
        let mut filters = FilterState::new();
        filters.insert("down".to_string(), BTreeSet::from(["3".to_string()]));
        filters.insert("playType".to_string(), BTreeSet::from(["Pass".to_string()]));

        let downs = engine.facet_counts_with(&plays(), "down", &filters, &RangeFilterState::new());
        assert_eq!(count(&downs, "1"), Some(1));
        assert_eq!(count(&downs, "2"), Some(1));
        assert_eq!(count(&downs, "3"), Some(1));

        let types = engine.facet_counts_with(&plays(), "playType", &filters, &RangeFilterState::new());
        assert_eq!(count(&types, "Pass"), Some(1));
        assert_eq!(count(&types, "Run"), Some(1));
    }

    #[test]
    fn test_bucket_drill_down_ignores_own_selection() {
        let engine = FilterEngine::default();
        let mut filters = FilterState::new();
        filters.insert("distanceType".to_string(), BTreeSet::from(["Short: 1-3".to_string()]));
        let mut ranges = RangeFilterState::new();
        ranges.insert("distanceRange".to_string(), NumericRange::new(1.0, 6.0));

        let facets = engine.facet_counts_with(&plays(), "distanceType", &filters, &ranges);
        assert_eq!(count(&facets, "Short: 1-3"), Some(2));
        assert_eq!(count(&facets, "Medium: 4-7"), Some(1));
        assert_eq!(count(&facets, "Long: 8+"), Some(0));

        // Other categories still see the bucket selection
        let downs = engine.facet_counts_with(&plays(), "down", &filters, &ranges);
        assert_eq!(count(&downs, "2"), Some(1));
        assert_eq!(count(&downs, "3"), Some(1));
        assert_eq!(count(&downs, "1"), None);
    }

    #[test]
    fn test_unknown_category_has_no_facets() {
        let engine = FilterEngine::default();
        assert!(engine.facet_counts(&plays(), "notAField").is_empty());
    }
}
