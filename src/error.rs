use std::path::PathBuf;

use thiserror::Error;

use crate::ingestion::SpreadsheetFormat;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Failure raised while reading or normalizing a single sheet.
///
/// Format readers and the row normalizer only know about bytes and cells; the facade attaches the
/// file name by wrapping this in [`IngestionError::Workbook`].
#[derive(Debug, Error)]
pub enum SheetError {
    /// The byte stream could not be decoded as the claimed container format.
    #[error("malformed {format} workbook: {source}")]
    MalformedWorkbook {
        format: SpreadsheetFormat,
        #[source]
        source: calamine::Error,
    },

    /// A cell that must be numeric could not be coerced.
    #[error("failed to coerce value at row {row} column '{column}': {message} (raw='{raw}')")]
    CellCoercion {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

/// Error type returned by the ingestion facade and the surrounding helpers.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// File name does not end in a recognized workbook extension.
    #[error("unsupported file '{file_name}': only Excel files (.xlsx, .xls) are supported")]
    UnsupportedFormat { file_name: String },

    /// Reading or normalizing the workbook failed.
    #[error("error parsing Excel file '{file_name}': {source}")]
    Workbook {
        file_name: String,
        #[source]
        source: SheetError,
    },

    /// Underlying I/O error while loading a workbook from disk.
    #[error("io error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tender form field could not be interpreted.
    #[error("invalid value for '{field}': {message} (raw='{value}')")]
    InvalidFormField {
        field: &'static str,
        value: String,
        message: String,
    },
}

/// Abstract classification of an [`IngestionError`], independent of the carried context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngestionErrorKind {
    UnsupportedFormat,
    MalformedWorkbook,
    CellCoercion,
    Io,
    InvalidFormField,
}

impl IngestionError {
    pub(crate) fn workbook(file_name: &str, source: SheetError) -> Self {
        Self::Workbook {
            file_name: file_name.to_string(),
            source,
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> IngestionErrorKind {
        match self {
            Self::UnsupportedFormat { .. } => IngestionErrorKind::UnsupportedFormat,
            Self::Workbook {
                source: SheetError::MalformedWorkbook { .. },
                ..
            } => IngestionErrorKind::MalformedWorkbook,
            Self::Workbook {
                source: SheetError::CellCoercion { .. },
                ..
            } => IngestionErrorKind::CellCoercion,
            Self::Io { .. } => IngestionErrorKind::Io,
            Self::InvalidFormField { .. } => IngestionErrorKind::InvalidFormField,
        }
    }

    /// The sheet-level cause, if this failure came from reading or normalizing a workbook.
    pub fn sheet_error(&self) -> Option<&SheetError> {
        match self {
            Self::Workbook { source, .. } => Some(source),
            _ => None,
        }
    }
}
