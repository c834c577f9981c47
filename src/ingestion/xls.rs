//! Legacy (`.xls`, BIFF records in a compound file) workbook reader.

use std::io::Cursor;

use calamine::{Data, Reader, Xls};

use crate::error::SheetError;

use super::reader::{SheetGrid, SheetReader};
use super::unified::SpreadsheetFormat;

/// Reads the sheet at index 0 of an `.xls` workbook.
///
/// Row 0 is the header row; rows 1 through the last used row are data.
#[derive(Debug)]
pub struct XlsReader {
    sheet_name: String,
    grid: SheetGrid,
}

impl XlsReader {
    /// Decode an `.xls` workbook held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SheetError> {
        let mut workbook: Xls<_> = Xls::new(Cursor::new(bytes)).map_err(malformed)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| malformed(calamine::Error::Msg("workbook has no sheets")))?;

        let range = workbook.worksheet_range(&sheet_name).map_err(malformed)?;
        Ok(Self {
            sheet_name,
            grid: SheetGrid::new(range),
        })
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }
}

impl SheetReader for XlsReader {
    fn column_count(&self) -> usize {
        self.grid.width()
    }

    fn row_count(&self) -> usize {
        self.grid.height().saturating_sub(1)
    }

    fn header_cell(&self, col: usize) -> &Data {
        self.grid.get(0, col)
    }

    fn cell(&self, row: usize, col: usize) -> &Data {
        self.grid.get(row + 1, col)
    }
}

fn malformed(err: impl Into<calamine::Error>) -> SheetError {
    SheetError::MalformedWorkbook {
        format: SpreadsheetFormat::Xls,
        source: err.into(),
    }
}
