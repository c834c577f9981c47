//! Core record types produced by ingestion.
//!
//! Ingestion turns each qualifying spreadsheet row into one [`WorkItem`]. The record is built once
//! and never mutated; its content lives in a [`WorkItemFields`] value so that callers can compare
//! ingestion results without tripping over the generated identifier and timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The file-derived content of a work item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkItemFields {
    /// Work number from the `work_no` column, or a synthesized `WORK_<n>`.
    pub work_no: String,
    /// Free-text description; empty when the column is missing or blank.
    pub work_description: String,
    /// Estimated cost; `None` when the cell is blank (never zero by default).
    pub estimated_cost: Option<f64>,
    pub completion_time: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
}

/// A single work item within a tender notice.
///
/// `id` and `created_at` are assigned at construction and are not derived from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    id: Uuid,
    #[serde(flatten)]
    fields: WorkItemFields,
    created_at: DateTime<Utc>,
}

impl WorkItem {
    /// Create a work item with a fresh identifier and the current timestamp.
    pub fn new(fields: WorkItemFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            fields,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn work_no(&self) -> &str {
        &self.fields.work_no
    }

    pub fn work_description(&self) -> &str {
        &self.fields.work_description
    }

    pub fn estimated_cost(&self) -> Option<f64> {
        self.fields.estimated_cost
    }

    pub fn completion_time(&self) -> Option<&str> {
        self.fields.completion_time.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.fields.location.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.fields.category.as_deref()
    }

    /// Borrow the file-derived content of this item.
    pub fn fields(&self) -> &WorkItemFields {
        &self.fields
    }

    /// Consume the item, keeping only its file-derived content.
    pub fn into_fields(self) -> WorkItemFields {
        self.fields
    }
}
