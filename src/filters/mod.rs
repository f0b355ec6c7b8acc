//! Translation of storefront query strings into MongoDB filter and sort documents.
//!
//! The builders here never touch the database; handlers pass their output
//! straight to `find`/`count_documents`.

pub mod diamond;
pub mod grades;
pub mod jewelry;
pub mod pagination;
pub mod params;
pub mod sort;

pub use diamond::{build_diamond_filter, DiamondQuery};
pub use jewelry::{build_jewelry_filter, JewelryQuery};
pub use pagination::{Paginated, PaginationMeta, PaginationParams};
pub use sort::SortOrder;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("invalid range for {field}: min {min} is greater than max {max}")]
    InvalidRange { field: String, min: f64, max: f64 },

    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: String, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    NegativeValue { field: String, value: f64 },

    #[error("unknown {scale} grade '{grade}'")]
    UnknownGrade { scale: String, grade: String },

    #[error("unknown sort order '{0}'")]
    UnknownSort(String),
}
