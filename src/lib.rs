/// Film Room - play library and faceted filtering for football film study
///
/// Play records come from `film-core`; this crate adds the filter table,
/// the filter engine, facet counts and the application configuration.

pub mod config;
pub mod filters;
pub mod report;

// Re-export main types for easy access
pub use crate::config::{Config, ConfigBuilder, OutputFormat};
pub use crate::filters::{
    FacetCount, FacetCounts, FilterEngine, FilterSchema, FilterState, NumericRange,
    RangeFilterState, SchemaError,
};
pub use film_core::{PlayKind, PlayLibrary, PlayLoader, PlayRecord};
