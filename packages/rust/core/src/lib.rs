//! Catalog building and querying for the climate robotics map.
//!
//! This crate ties the sheet parser and the geo lookups together:
//! - [`columns`] — which spreadsheet column feeds which entry field
//! - [`normalize`] — row → entry, with explicit rejection reasons
//! - [`pipeline`] — download + build, with a fail-soft entry point
//! - [`filter`] — facet values and multi-criteria filtering

pub mod columns;
pub mod filter;
pub mod normalize;
pub mod pipeline;

pub use columns::{ColumnMap, ColumnRef};
pub use filter::{FacetField, FilterCriteria, filter_entries, unique_values};
pub use normalize::{NormalizeContext, Rejection, RowOutcome, normalize_row};
pub use pipeline::{
    CatalogReport, ProgressReporter, SilentProgress, SkipCounts, build_catalog,
    fetch_all_entries, fetch_report,
};
