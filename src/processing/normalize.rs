//! Row normalization: raw cells -> [`WorkItem`] records.

use calamine::Data;

use crate::error::SheetError;
use crate::ingestion::SheetReader;
use crate::types::{WorkItem, WorkItemFields};

use super::cell::{cell_to_string, coerce_f64, is_blank, is_truthy};
use super::header::HeaderMap;

pub const WORK_NO: &str = "work_no";
pub const WORK_DESCRIPTION: &str = "work_description";
pub const ESTIMATED_COST: &str = "estimated_cost";
pub const COMPLETION_TIME: &str = "completion_time";
pub const LOCATION: &str = "location";
pub const CATEGORY: &str = "category";

/// Output of [`normalize_sheet`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSheet {
    /// Qualifying rows in sheet order.
    pub work_items: Vec<WorkItem>,
    /// Non-blank rows below the header (the rows that receive an ordinal).
    pub data_rows: usize,
    /// Data rows dropped because both `work_no` and `work_description` were unset.
    pub skipped_rows: usize,
    /// Rows with every cell empty; not counted as data rows.
    pub blank_rows: usize,
}

/// Cells of one data row, looked up through the header binding.
struct RowView<'a, R: SheetReader + ?Sized> {
    reader: &'a R,
    headers: &'a HeaderMap,
    row: usize,
}

impl<R: SheetReader + ?Sized> RowView<'_, R> {
    /// The populated raw value for `key`; blank cells and unbound keys are absent.
    fn get(&self, key: &str) -> Option<&Data> {
        let col = self.headers.column_of(key)?;
        let cell = self.reader.cell(self.row, col);
        (!is_blank(cell)).then_some(cell)
    }

    fn truthy(&self, key: &str) -> Option<&Data> {
        self.get(key).filter(|c| is_truthy(c))
    }

    fn optional_string(&self, key: &str) -> Option<String> {
        self.truthy(key).map(cell_to_string)
    }

    fn is_blank_row(&self) -> bool {
        (0..self.reader.column_count()).all(|c| is_blank(self.reader.cell(self.row, c)))
    }
}

/// Normalize every data row of `reader` into work items.
///
/// A row is kept when its raw `work_no` or `work_description` is truthy; the check runs before
/// any defaulting, so rows carrying only other columns are dropped. Fully blank rows are skipped
/// without consuming an ordinal. A non-numeric `estimated_cost` on a kept row aborts the sheet.
pub fn normalize_sheet<R: SheetReader + ?Sized>(
    reader: &R,
    headers: &HeaderMap,
) -> Result<NormalizedSheet, SheetError> {
    let mut out = NormalizedSheet::default();

    for row in 0..reader.row_count() {
        let view = RowView {
            reader,
            headers,
            row,
        };
        if view.is_blank_row() {
            out.blank_rows += 1;
            continue;
        }
        out.data_rows += 1;
        let ordinal = out.data_rows;

        if view.truthy(WORK_NO).is_none() && view.truthy(WORK_DESCRIPTION).is_none() {
            out.skipped_rows += 1;
            continue;
        }

        let fields = normalize_row(&view, ordinal)?;
        out.work_items.push(WorkItem::new(fields));
    }

    Ok(out)
}

fn normalize_row<R: SheetReader + ?Sized>(
    view: &RowView<'_, R>,
    ordinal: usize,
) -> Result<WorkItemFields, SheetError> {
    let work_no = view
        .get(WORK_NO)
        .map(cell_to_string)
        .unwrap_or_else(|| format!("WORK_{ordinal}"));

    let work_description = view
        .get(WORK_DESCRIPTION)
        .map(cell_to_string)
        .unwrap_or_default();

    let estimated_cost = match view.truthy(ESTIMATED_COST) {
        Some(cell) => Some(coerce_f64(cell).map_err(|message| SheetError::CellCoercion {
            row: view.reader.display_row(view.row),
            column: ESTIMATED_COST.to_string(),
            raw: cell_to_string(cell),
            message,
        })?),
        None => None,
    };

    Ok(WorkItemFields {
        work_no,
        work_description,
        estimated_cost,
        completion_time: view.optional_string(COMPLETION_TIME),
        location: view.optional_string(LOCATION),
        category: view.optional_string(CATEGORY),
    })
}
