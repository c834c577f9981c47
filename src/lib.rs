//! `tender-ingest` turns the workbooks attached to public tender notices into normalized
//! [`types::WorkItem`] records.
//!
//! The primary entrypoint is [`ingestion::ingest`], which takes the raw bytes of an upload plus
//! its original file name and returns the work items found on the workbook's first sheet.
//!
//! ## What you can ingest
//!
//! **File formats (selected by exact, case-sensitive file name suffix):**
//!
//! - **Modern workbooks**: `.xlsx` (the active worksheet; header in row 1)
//! - **Legacy workbooks**: `.xls` (sheet index 0; header in row 1)
//!
//! **Recognized columns** (header text is lower-cased and trimmed before matching):
//!
//! | column | field | when blank |
//! |---|---|---|
//! | `work_no` | [`types::WorkItem::work_no`] | synthesized as `WORK_<n>` |
//! | `work_description` | [`types::WorkItem::work_description`] | empty string |
//! | `estimated_cost` | [`types::WorkItem::estimated_cost`] | `None`; non-numeric text is an error |
//! | `completion_time`, `location`, `category` | optional strings | `None` |
//!
//! A row becomes a work item only when its `work_no` or `work_description` cell is set; other
//! rows are skipped silently. Fully blank rows do not count towards the `<n>` in `WORK_<n>`.
//!
//! ## Quick example
//!
//! ```no_run
//! use tender_ingest::ingestion::ingest;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("works.xls")?;
//! let items = ingest(&bytes, "works.xls")?;
//! for item in &items {
//!     println!("{} {:?}", item.work_no(), item.estimated_cost());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: the facade, format readers and observer hooks
//! - [`processing`]: header mapping and row normalization, shared by both formats
//! - [`types`]: the work item record
//! - [`tender`]: tender notice assembly around an upload
//! - [`execution`]: parallel batch ingestion of many files
//! - [`error`]: error types used across ingestion

pub mod error;
pub mod execution;
pub mod ingestion;
pub mod processing;
pub mod tender;
pub mod types;

pub use error::{IngestionError, IngestionErrorKind, IngestionResult, SheetError};
pub use ingestion::{ingest, ingest_with_options};
pub use types::{WorkItem, WorkItemFields};
