//! Format-agnostic sheet processing.
//!
//! Everything here works against [`crate::ingestion::SheetReader`], so `.xlsx` and `.xls`
//! workbooks share one set of rules:
//!
//! - [`header`]: canonical header keys and the key -> column binding
//! - [`normalize`]: per-row defaulting, coercion and the inclusion filter
//! - [`cell`]: the raw cell semantics both of the above rely on
//!
//! ## Example
//!
//! ```rust
//! use calamine::Data;
//! use tender_ingest::processing::HeaderMap;
//!
//! let headers = [
//!     Data::String(" Work_No".to_string()),
//!     Data::Empty,
//!     Data::String("ESTIMATED_COST".to_string()),
//! ];
//! let map = HeaderMap::from_cells(&headers);
//! assert_eq!(map.column_of("work_no"), Some(0));
//! assert_eq!(map.column_of("estimated_cost"), Some(2));
//! assert_eq!(map.len(), 2);
//! ```

pub mod cell;
pub mod header;
pub mod normalize;

pub use header::{canonical_key, HeaderMap};
pub use normalize::{normalize_sheet, NormalizedSheet};
