//! Filter table: the categories a play library can be filtered by
//!
//! The table is plain data. Matching code never names a category; adding a
//! filter means adding an entry here or in the `[filters]` section of the
//! config file.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use super::category::{Category, NumericField};
use super::{NumericRange, RangeFilterState};

/// A discrete category backed directly by a play field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteCategory {
    /// Category name, must be a play field name (see [`Category`])
    pub name: String,

    /// Display label
    pub label: String,

    /// Known values shown before any data is loaded
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// A named inclusive band of a numeric field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,

    /// Lower bound, unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Upper bound, unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bucket {
    pub fn new(label: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            label: label.into(),
            min,
            max,
        }
    }

    pub fn lower(&self) -> f64 {
        self.min.unwrap_or(f64::NEG_INFINITY)
    }

    pub fn upper(&self) -> f64 {
        self.max.unwrap_or(f64::INFINITY)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower() <= value && value <= self.upper()
    }
}

/// A synthetic discrete category computed by bucketing a numeric field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketCategory {
    pub name: String,
    pub label: String,
    pub field: NumericField,

    /// Range category whose slider follows the selected buckets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    pub buckets: Vec<Bucket>,
}

impl BucketCategory {
    pub fn bucket(&self, label: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|bucket| bucket.label == label)
    }
}

/// A numeric range category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeCategory {
    pub name: String,
    pub label: String,
    pub field: NumericField,

    /// Default (full) span of the slider
    pub min: f64,
    pub max: f64,

    #[serde(default = "default_step")]
    pub step: f64,
}

fn default_step() -> f64 {
    1.0
}

impl RangeCategory {
    pub fn full_span(&self) -> NumericRange {
        NumericRange::new(self.min, self.max)
    }
}

/// What kind of filter a category is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryKind {
    Discrete,
    Bucketed,
    Range,
}

/// Catalogue entry describing one filterable category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub label: String,
    pub kind: CategoryKind,
}

/// Inconsistencies in a filter table
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("Category '{0}' is defined more than once")]
    DuplicateCategory(String),

    #[error("Discrete category '{0}' is not a play field")]
    UnknownField(String),

    #[error("Bucketed category '{0}' shadows a play field of the same name")]
    ShadowsField(String),

    #[error("Bucketed category '{0}' has no buckets")]
    NoBuckets(String),

    #[error("Bucket '{label}' in '{category}' is defined more than once")]
    DuplicateBucket { category: String, label: String },

    #[error("Bucket '{label}' in '{category}' has min greater than max")]
    InvertedBucket { category: String, label: String },

    #[error("Bucket '{label}' in '{category}' has a bound that is not a finite number")]
    InvalidBucketBound { category: String, label: String },

    #[error("Buckets '{first}' and '{second}' in '{category}' overlap")]
    OverlappingBuckets {
        category: String,
        first: String,
        second: String,
    },

    #[error("Buckets '{first}' and '{second}' in '{category}' leave a gap")]
    GapBetweenBuckets {
        category: String,
        first: String,
        second: String,
    },

    #[error("Bucketed category '{category}' links to unknown range '{range}'")]
    UnknownRange { category: String, range: String },

    #[error("Range category '{0}' has min greater than max")]
    InvertedRange(String),

    #[error("Range category '{0}' has a bound that is not a finite number")]
    InvalidRangeBound(String),

    #[error("Range category '{0}' has a step that is not positive")]
    InvalidStep(String),
}

/// The complete filter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSchema {
    #[serde(default)]
    pub discrete: Vec<DiscreteCategory>,

    #[serde(default)]
    pub bucketed: Vec<BucketCategory>,

    #[serde(default)]
    pub ranges: Vec<RangeCategory>,
}

impl FilterSchema {
    /// An empty table
    pub fn empty() -> Self {
        Self {
            discrete: Vec::new(),
            bucketed: Vec::new(),
            ranges: Vec::new(),
        }
    }

    pub fn discrete_category(&self, name: &str) -> Option<&DiscreteCategory> {
        self.discrete.iter().find(|category| category.name == name)
    }

    pub fn bucket_category(&self, name: &str) -> Option<&BucketCategory> {
        self.bucketed.iter().find(|category| category.name == name)
    }

    pub fn range_category(&self, name: &str) -> Option<&RangeCategory> {
        self.ranges.iter().find(|category| category.name == name)
    }

    /// Every category in the table, discrete first, then bucketed, then ranges
    pub fn categories(&self) -> Vec<CategoryInfo> {
        let discrete = self.discrete.iter().map(|c| CategoryInfo {
            name: c.name.clone(),
            label: c.label.clone(),
            kind: CategoryKind::Discrete,
        });
        let bucketed = self.bucketed.iter().map(|c| CategoryInfo {
            name: c.name.clone(),
            label: c.label.clone(),
            kind: CategoryKind::Bucketed,
        });
        let ranges = self.ranges.iter().map(|c| CategoryInfo {
            name: c.name.clone(),
            label: c.label.clone(),
            kind: CategoryKind::Range,
        });
        discrete.chain(bucketed).chain(ranges).collect()
    }

    /// Slider bounds for a bucketed category's selection
    ///
    /// The result spans the union of the selected buckets. An unbounded
    /// side falls back to the linked range category's default span.
    /// Returns `None` for an unknown category or when no selected label
    /// names a bucket.
    pub fn slider_bounds(&self, category: &str, selected: &BTreeSet<String>) -> Option<NumericRange> {
        let bucketed = self.bucket_category(category)?;
        let linked = bucketed
            .range
            .as_deref()
            .and_then(|name| self.range_category(name));

        let mut chosen = bucketed
            .buckets
            .iter()
            .filter(|bucket| selected.contains(&bucket.label))
            .peekable();
        chosen.peek()?;

        let (lo, hi) = chosen.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), bucket| {
            (lo.min(bucket.lower()), hi.max(bucket.upper()))
        });

        let lo = match linked {
            Some(range) if lo.is_infinite() => range.min,
            _ => lo,
        };
        let hi = match linked {
            Some(range) if hi.is_infinite() => range.max,
            _ => hi,
        };
        Some(NumericRange::new(lo, hi))
    }

    /// Whether `range` covers the default span of a range category
    ///
    /// Unknown categories are never full span.
    pub fn is_full_span(&self, category: &str, range: &NumericRange) -> bool {
        self.range_category(category)
            .map(|def| range.lo <= def.min && range.hi >= def.max)
            .unwrap_or(false)
    }

    /// Copy of `ranges` without the entries that cover their full span
    pub fn strip_full_span_ranges(&self, ranges: &RangeFilterState) -> RangeFilterState {
        ranges
            .iter()
            .filter(|(category, range)| !self.is_full_span(category, range))
            .map(|(category, range)| (category.clone(), *range))
            .collect()
    }

    /// Check the table for inconsistencies
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut names = HashSet::new();

        for category in &self.discrete {
            if Category::from_name(&category.name).is_none() {
                return Err(SchemaError::UnknownField(category.name.clone()));
            }
            if !names.insert(category.name.as_str()) {
                return Err(SchemaError::DuplicateCategory(category.name.clone()));
            }
        }

        for category in &self.bucketed {
            if Category::from_name(&category.name).is_some() {
                return Err(SchemaError::ShadowsField(category.name.clone()));
            }
            if !names.insert(category.name.as_str()) {
                return Err(SchemaError::DuplicateCategory(category.name.clone()));
            }
            validate_buckets(category)?;
            if let Some(range) = &category.range {
                if self.range_category(range).is_none() {
                    return Err(SchemaError::UnknownRange {
                        category: category.name.clone(),
                        range: range.clone(),
                    });
                }
            }
        }

        // Range state is a separate map, so range names only clash with each other
        let mut range_names = HashSet::new();
        for range in &self.ranges {
            if !range_names.insert(range.name.as_str()) {
                return Err(SchemaError::DuplicateCategory(range.name.clone()));
            }
            if !range.min.is_finite() || !range.max.is_finite() {
                return Err(SchemaError::InvalidRangeBound(range.name.clone()));
            }
            if range.min > range.max {
                return Err(SchemaError::InvertedRange(range.name.clone()));
            }
            if range.step <= 0.0 || range.step.is_nan() {
                return Err(SchemaError::InvalidStep(range.name.clone()));
            }
        }

        Ok(())
    }
}

/// Buckets must be non-empty, uniquely labelled and non-overlapping; on
/// whole-number fields they must also be contiguous
fn validate_buckets(category: &BucketCategory) -> Result<(), SchemaError> {
    if category.buckets.is_empty() {
        return Err(SchemaError::NoBuckets(category.name.clone()));
    }

    let mut labels = HashSet::new();
    for bucket in &category.buckets {
        if !labels.insert(bucket.label.as_str()) {
            return Err(SchemaError::DuplicateBucket {
                category: category.name.clone(),
                label: bucket.label.clone(),
            });
        }
        // Unbounded sides are written as an absent min or max
        if [bucket.min, bucket.max].iter().flatten().any(|bound| !bound.is_finite()) {
            return Err(SchemaError::InvalidBucketBound {
                category: category.name.clone(),
                label: bucket.label.clone(),
            });
        }
        if bucket.lower() > bucket.upper() {
            return Err(SchemaError::InvertedBucket {
                category: category.name.clone(),
                label: bucket.label.clone(),
            });
        }
    }

    let mut sorted: Vec<&Bucket> = category.buckets.iter().collect();
    sorted.sort_by(|a, b| a.lower().total_cmp(&b.lower()));

    for pair in sorted.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if second.lower() <= first.upper() {
            return Err(SchemaError::OverlappingBuckets {
                category: category.name.clone(),
                first: first.label.clone(),
                second: second.label.clone(),
            });
        }
        if category.field.is_integral() && second.lower() > first.upper() + 1.0 {
            return Err(SchemaError::GapBetweenBuckets {
                category: category.name.clone(),
                first: first.label.clone(),
                second: second.label.clone(),
            });
        }
    }

    Ok(())
}

impl Default for FilterSchema {
    fn default() -> Self {
        let discrete = vec![
            ("game", "Game", vec![]),
            ("quarter", "Quarter", vec!["1", "2", "3", "4", "5"]),
            ("down", "Down", vec!["1", "2", "3", "4"]),
            ("distance", "Distance", vec![]),
            ("yardLine", "Yard Line", vec![]),
            ("hash", "Hash", vec!["Left", "Middle", "Right"]),
            ("playType", "Play Type", vec!["Pass", "Run", "Special Teams"]),
            ("formation", "Formation", vec![]),
            ("offensivePersonnel", "Offensive Personnel", vec![]),
            ("defensivePersonnel", "Defensive Personnel", vec![]),
            ("passResult", "Pass Result", vec!["Complete", "Incomplete", "Interception", "Sack"]),
            ("passLocation", "Pass Location", vec![]),
            ("runDirection", "Run Direction", vec!["Left", "Middle", "Right"]),
            ("runGap", "Run Gap", vec![]),
            ("specialTeamsType", "Special Teams", vec!["Punt", "Kickoff", "Field Goal", "Extra Point"]),
            ("isTouchdown", "Touchdown", vec!["Yes", "No"]),
            ("isFirstDown", "First Down", vec!["Yes", "No"]),
            ("isPenalty", "Penalty", vec!["Yes", "No"]),
            ("isTwoMinuteDrill", "Two-Minute Drill", vec!["Yes", "No"]),
            ("isShotgun", "Shotgun", vec!["Yes", "No"]),
        ]
        .into_iter()
        .map(|(name, label, options)| DiscreteCategory {
            name: name.to_string(),
            label: label.to_string(),
            options: options.into_iter().map(String::from).collect(),
        })
        .collect();

        let bucketed = vec![
            BucketCategory {
                name: "distanceType".to_string(),
                label: "Distance Type".to_string(),
                field: NumericField::Distance,
                buckets: vec![
                    Bucket::new("Short: 1-3", Some(1.0), Some(3.0)),
                    Bucket::new("Medium: 4-7", Some(4.0), Some(7.0)),
                    Bucket::new("Long: 8+", Some(8.0), None),
                ],
                range: Some("distanceRange".to_string()),
            },
            BucketCategory {
                name: "fieldZone".to_string(),
                label: "Field Zone".to_string(),
                field: NumericField::YardLineNumeric,
                buckets: vec![
                    Bucket::new("Backed Up: 0-10", Some(0.0), Some(10.0)),
                    Bucket::new("Own Territory: 11-50", Some(11.0), Some(50.0)),
                    Bucket::new("Plus Territory: 51-79", Some(51.0), Some(79.0)),
                    Bucket::new("Red Zone: 80-100", Some(80.0), Some(100.0)),
                ],
                range: Some("yardLine".to_string()),
            },
            BucketCategory {
                name: "gainType".to_string(),
                label: "Gain Type".to_string(),
                field: NumericField::YardsGained,
                buckets: vec![
                    Bucket::new("Loss", None, Some(-1.0)),
                    Bucket::new("No Gain", Some(0.0), Some(0.0)),
                    Bucket::new("Short Gain: 1-4", Some(1.0), Some(4.0)),
                    Bucket::new("Medium Gain: 5-9", Some(5.0), Some(9.0)),
                    Bucket::new("Explosive: 10+", Some(10.0), None),
                ],
                range: Some("yardsAfterContactRange".to_string()),
            },
        ];

        let ranges = vec![
            ("yardLine", "Yard Line", NumericField::YardLineNumeric, 0.0, 100.0, 1.0),
            ("distanceRange", "Distance", NumericField::Distance, 1.0, 30.0, 1.0),
            ("yardsAfterContactRange", "Yards Gained", NumericField::YardsGained, -20.0, 100.0, 1.0),
            ("puntReturnRange", "Punt Return Yards", NumericField::YardsGained, -10.0, 100.0, 1.0),
            ("kickoffReturnRange", "Kickoff Return Yards", NumericField::YardsGained, -10.0, 100.0, 1.0),
            ("epaRange", "EPA", NumericField::Epa, -10.0, 10.0, 0.1),
        ]
        .into_iter()
        .map(|(name, label, field, min, max, step)| RangeCategory {
            name: name.to_string(),
            label: label.to_string(),
            field,
            min,
            max,
            step,
        })
        .collect();

        Self {
            discrete,
            bucketed,
            ranges,
        }
    }
}
