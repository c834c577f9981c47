//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest`], which turns the bytes of an uploaded workbook into an
//! ordered list of [`WorkItem`]s.
//!
//! - The workbook format is chosen from the file name suffix (`.xlsx` or `.xls`), unless
//!   [`IngestionOptions::format`] forces one.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.
//!
//! Ingestion is synchronous and holds no shared state: concurrent calls on independent buffers
//! need no coordination, and nothing borrowed from the input outlives the call.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult, SheetError};
use crate::processing::{normalize_sheet, HeaderMap, NormalizedSheet};
use crate::types::WorkItem;

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::reader::{SheetReader, Workbook};

/// Supported workbook formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpreadsheetFormat {
    /// Office Open XML workbook (zip container), Excel 2007 and later.
    Xlsx,
    /// BIFF workbook in a compound file, Excel 97-2003.
    Xls,
}

impl SpreadsheetFormat {
    /// Detect the format from a file name.
    ///
    /// Matching is an exact, case-sensitive suffix test: `report.xlsx` is accepted,
    /// `REPORT.XLSX` is not.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        if file_name.ends_with(".xlsx") {
            Some(Self::Xlsx)
        } else if file_name.ends_with(".xls") {
            Some(Self::Xls)
        } else {
            None
        }
    }

    /// File extension for this format, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
        }
    }
}

impl fmt::Display for SpreadsheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Boundary check for uploads: accept only `.xlsx` / `.xls` file names.
pub fn check_file_name(file_name: &str) -> IngestionResult<SpreadsheetFormat> {
    SpreadsheetFormat::from_file_name(file_name).ok_or_else(|| IngestionError::UnsupportedFormat {
        file_name: file_name.to_string(),
    })
}

/// Options controlling ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, detect the format from the file name.
    pub format: Option<SpreadsheetFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Ingest an uploaded workbook with default options.
///
/// Returns the qualifying rows of the ingested sheet as [`WorkItem`]s, in sheet order. An empty
/// vector (no header, or no qualifying rows) is a success. Any failure while decoding the
/// workbook or coercing a cell aborts the whole call; no partial results are returned.
///
/// # Examples
///
/// ```no_run
/// use tender_ingest::ingestion::ingest;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = std::fs::read("bill_of_quantities.xlsx")?;
/// let items = ingest(&bytes, "bill_of_quantities.xlsx")?;
/// for item in &items {
///     println!("{} {}", item.work_no(), item.work_description());
/// }
/// # Ok(())
/// # }
/// ```
pub fn ingest(bytes: &[u8], file_name: &str) -> IngestionResult<Vec<WorkItem>> {
    ingest_with_options(bytes, file_name, &IngestionOptions::default())
}

/// Ingest an uploaded workbook.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use tender_ingest::ingestion::{
///     ingest_with_options, IngestionOptions, IngestionSeverity, SpreadsheetFormat, TracingObserver,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = std::fs::read("upload.bin")?;
/// let opts = IngestionOptions {
///     // The stored upload lost its extension; force the legacy reader.
///     format: Some(SpreadsheetFormat::Xls),
///     observer: Some(Arc::new(TracingObserver)),
///     alert_at_or_above: IngestionSeverity::Error,
/// };
/// let items = ingest_with_options(&bytes, "upload.bin", &opts)?;
/// println!("work items={}", items.len());
/// # Ok(())
/// # }
/// ```
pub fn ingest_with_options(
    bytes: &[u8],
    file_name: &str,
    options: &IngestionOptions,
) -> IngestionResult<Vec<WorkItem>> {
    let format = match options.format {
        Some(f) => Ok(f),
        None => check_file_name(file_name),
    };

    let ctx = IngestionContext {
        file_name: file_name.to_string(),
        format: format.as_ref().ok().copied(),
    };

    let result = format.and_then(|fmt| {
        read_workbook(fmt, bytes).map_err(|e| IngestionError::workbook(file_name, e))
    });

    match &result {
        Ok(sheet) => tracing::debug!(
            file_name,
            format = ?ctx.format,
            data_rows = sheet.data_rows,
            skipped_rows = sheet.skipped_rows,
            work_items = sheet.work_items.len(),
            "workbook ingested"
        ),
        Err(e) => tracing::debug!(file_name, error = %e, "workbook ingestion failed"),
    }

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(sheet) => obs.on_success(
                &ctx,
                IngestionStats {
                    data_rows: sheet.data_rows,
                    skipped_rows: sheet.skipped_rows,
                    work_items: sheet.work_items.len(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|sheet| sheet.work_items)
}

/// Read a workbook from disk and ingest it, dispatching on the path's file name.
pub fn ingest_from_path(
    path: impl AsRef<Path>,
    options: &IngestionOptions,
) -> IngestionResult<Vec<WorkItem>> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(source) => {
            let err = IngestionError::Io {
                path: path.to_path_buf(),
                source,
            };
            if let Some(obs) = options.observer.as_ref() {
                let ctx = IngestionContext {
                    format: options.format.or_else(|| SpreadsheetFormat::from_file_name(&file_name)),
                    file_name,
                };
                let sev = severity_for_error(&err);
                obs.on_failure(&ctx, sev, &err);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, &err);
                }
            }
            return Err(err);
        }
    };

    ingest_with_options(&bytes, &file_name, options)
}

fn read_workbook(format: SpreadsheetFormat, bytes: &[u8]) -> Result<NormalizedSheet, SheetError> {
    let workbook = Workbook::open(format, bytes)?;
    let headers = HeaderMap::from_cells(workbook.header_cells());
    tracing::trace!(
        sheet = workbook.sheet_name(),
        columns = workbook.column_count(),
        rows = workbook.row_count(),
        bound_headers = headers.len(),
        "sheet opened"
    );
    normalize_sheet(&workbook, &headers)
}

pub(crate) fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io { .. } => IngestionSeverity::Critical,
        IngestionError::UnsupportedFormat { .. }
        | IngestionError::Workbook { .. }
        | IngestionError::InvalidFormField { .. } => IngestionSeverity::Error,
    }
}

/// Convenience helper for callers that want an owned request object.
///
/// This can be useful if you want to enqueue ingestion work in a job system.
#[derive(Clone)]
pub struct IngestionRequest {
    /// Original file name; its suffix selects the format.
    pub file_name: String,
    /// Workbook bytes.
    pub bytes: Vec<u8>,
    /// Options controlling ingestion.
    pub options: IngestionOptions,
}

impl fmt::Debug for IngestionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionRequest")
            .field("file_name", &self.file_name)
            .field("bytes_len", &self.bytes.len())
            .field("options", &self.options)
            .finish()
    }
}

impl IngestionRequest {
    /// Execute the request by calling [`ingest_with_options`].
    pub fn run(&self) -> IngestionResult<Vec<WorkItem>> {
        ingest_with_options(&self.bytes, &self.file_name, &self.options)
    }
}
