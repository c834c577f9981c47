//! Modern (`.xlsx`, OOXML zip container) workbook reader.

use std::io::Cursor;

use calamine::{Data, Reader, SheetType, Xlsx};

use crate::error::SheetError;

use super::reader::{SheetGrid, SheetReader};
use super::unified::SpreadsheetFormat;

/// Reads the active worksheet of an `.xlsx` workbook.
///
/// Physical row 1 is the header row; rows 2 through the last used row are data.
#[derive(Debug)]
pub struct XlsxReader {
    sheet_name: String,
    grid: SheetGrid,
}

impl XlsxReader {
    /// Decode an `.xlsx` workbook held in memory.
    ///
    /// The active sheet is the first worksheet in workbook order; chart and dialog sheets are
    /// passed over.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SheetError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(malformed)?;

        let sheet_name = workbook
            .sheets_metadata()
            .iter()
            .find(|s| matches!(s.typ, SheetType::WorkSheet))
            .map(|s| s.name.clone())
            .ok_or_else(|| malformed(calamine::Error::Msg("workbook has no worksheets")))?;

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

impl SheetReader for XlsxReader {
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
        format: SpreadsheetFormat::Xlsx,
        source: err.into(),
    }
}
