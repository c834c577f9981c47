//! The uniform row-iteration shape shared by both workbook formats.
//!
//! Each format reader exposes the header row and the data rows beneath it as raw
//! [`calamine::Data`] cells. Nothing here coerces types; that is left to
//! [`crate::processing::normalize`].

use calamine::{Data, Range};

use crate::error::SheetError;

use super::unified::SpreadsheetFormat;
use super::{xls::XlsReader, xlsx::XlsxReader};

static EMPTY: Data = Data::Empty;

/// Read access to one worksheet: a header row followed by data rows.
///
/// Data rows are indexed from 0 (the first row below the header); columns from 0 (column A).
/// Out-of-range lookups yield [`Data::Empty`].
pub trait SheetReader {
    /// Number of columns spanned by the sheet (header row included).
    fn column_count(&self) -> usize;

    /// Number of rows below the header row.
    fn row_count(&self) -> usize;

    /// Raw header cell for `col`.
    fn header_cell(&self, col: usize) -> &Data;

    /// Raw cell at data row `row`, column `col`.
    fn cell(&self, row: usize, col: usize) -> &Data;

    /// Header cells in column order.
    fn header_cells(&self) -> Vec<&Data> {
        (0..self.column_count()).map(|c| self.header_cell(c)).collect()
    }

    /// 1-based spreadsheet row number of data row `row`, used in error messages.
    fn display_row(&self, row: usize) -> usize {
        row + 2
    }
}

/// An absolutely-addressed view over a calamine [`Range`].
///
/// calamine trims ranges to the used area, so a sheet whose first populated cell is `C3` starts
/// at `(2, 2)`. This view re-anchors addressing at `A1` so row 0 is always the first physical row.
#[derive(Debug, Clone)]
pub(crate) struct SheetGrid {
    range: Range<Data>,
    height: usize,
    width: usize,
}

impl SheetGrid {
    pub(crate) fn new(range: Range<Data>) -> Self {
        let (height, width) = match range.end() {
            Some((row, col)) if !range.is_empty() => (row as usize + 1, col as usize + 1),
            _ => (0, 0),
        };
        Self {
            range,
            height,
            width,
        }
    }

    /// Number of physical rows from row 0 through the last used row.
    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn get(&self, row: usize, col: usize) -> &Data {
        match (u32::try_from(row), u32::try_from(col)) {
            (Ok(r), Ok(c)) => self.range.get_value((r, c)).unwrap_or(&EMPTY),
            _ => &EMPTY,
        }
    }
}

/// A decoded worksheet of either format.
///
/// The header mapper and row normalizer only see [`SheetReader`]; this variant is what the
/// facade hands them after dispatching on [`SpreadsheetFormat`].
#[derive(Debug)]
pub enum Workbook {
    Xlsx(XlsxReader),
    Xls(XlsReader),
}

impl Workbook {
    /// Decode `bytes` as `format` and select the sheet that format ingests.
    pub fn open(format: SpreadsheetFormat, bytes: &[u8]) -> Result<Self, SheetError> {
        match format {
            SpreadsheetFormat::Xlsx => XlsxReader::from_bytes(bytes).map(Self::Xlsx),
            SpreadsheetFormat::Xls => XlsReader::from_bytes(bytes).map(Self::Xls),
        }
    }

    /// Name of the worksheet being ingested.
    pub fn sheet_name(&self) -> &str {
        match self {
            Self::Xlsx(r) => r.sheet_name(),
            Self::Xls(r) => r.sheet_name(),
        }
    }

    fn inner(&self) -> &dyn SheetReader {
        match self {
            Self::Xlsx(r) => r,
            Self::Xls(r) => r,
        }
    }
}

impl SheetReader for Workbook {
    fn column_count(&self) -> usize {
        self.inner().column_count()
    }

    fn row_count(&self) -> usize {
        self.inner().row_count()
    }

    fn header_cell(&self, col: usize) -> &Data {
        self.inner().header_cell(col)
    }

    fn cell(&self, row: usize, col: usize) -> &Data {
        self.inner().cell(row, col)
    }
}
