//! Ingestion entrypoints and format readers.
//!
//! Most callers should use [`ingest`] (from [`unified`]) which:
//!
//! - picks the workbook format from the file name (`.xlsx` or `.xls`)
//! - maps the header row and normalizes each data row into a [`crate::types::WorkItem`]
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! The format readers are also available directly under [`xlsx`] and [`xls`]; both implement
//! [`SheetReader`], and [`Workbook`] selects between them.

pub mod observability;
pub mod reader;
pub mod unified;
pub mod xls;
pub mod xlsx;

pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
pub use reader::{SheetReader, Workbook};
pub use unified::{
    check_file_name, ingest, ingest_from_path, ingest_with_options, IngestionOptions, IngestionRequest,
    SpreadsheetFormat,
};
