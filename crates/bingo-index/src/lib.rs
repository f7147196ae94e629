//! Drop-rate indexing: era resolution, aggregation, dataset slots, and
//! table projection.

pub mod aggregate;
pub mod catalog;
pub mod era;
pub mod error;
pub mod metrics;
pub mod projection;

pub use aggregate::{AggregationResult, DropRow, aggregate};
pub use catalog::{
    COMBINED_KEY, COMBINED_LABEL, CategoryListing, DatasetCatalog, DatasetInfo, Selection,
};
pub use era::{EraResolver, OTHER_ERA};
pub use error::DivisionError;
pub use metrics::{Efficiency, efficiency, round_one_decimal};
pub use projection::{CATEGORY_COLUMNS, Column, Projection, TYPE_COLUMNS, ViewKey, project};
