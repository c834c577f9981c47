//! Header row -> canonical field name mapping.

use std::collections::HashMap;

use calamine::Data;

use super::cell::{cell_to_string, is_blank};

/// Canonical key for a header cell: stringified, lower-cased, surrounding whitespace removed.
///
/// Returns `None` for blank cells and for headers that are empty once trimmed.
pub fn canonical_key(cell: &Data) -> Option<String> {
    if is_blank(cell) {
        return None;
    }
    let key = cell_to_string(cell).trim().to_lowercase();
    if key.is_empty() { None } else { Some(key) }
}

/// Binding of canonical field names to column positions, built once per sheet.
///
/// Columns with a blank header are not bound and are ignored for every row. When two columns
/// share a canonical key, the later column wins and the earlier one is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    columns: HashMap<String, usize>,
}

impl HeaderMap {
    /// Build the mapping from header cells in column order.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a Data>) -> Self {
        let mut columns = HashMap::new();
        for (col, cell) in cells.into_iter().enumerate() {
            let Some(key) = canonical_key(cell) else {
                continue;
            };
            if let Some(prev) = columns.insert(key.clone(), col) {
                tracing::warn!(
                    header = %key,
                    ignored_column = prev,
                    used_column = col,
                    "duplicate header; last column wins"
                );
            }
        }
        Self { columns }
    }

    /// Column bound to `key`, if any.
    pub fn column_of(&self, key: &str) -> Option<usize> {
        self.columns.get(key).copied()
    }

    /// Number of bound columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Bound `(key, column)` pairs ordered by column.
    pub fn bindings(&self) -> Vec<(&str, usize)> {
        let mut out: Vec<(&str, usize)> = self
            .columns
            .iter()
            .map(|(k, &c)| (k.as_str(), c))
            .collect();
        out.sort_by_key(|&(_, c)| c);
        out
    }
}
