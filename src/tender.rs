//! Tender notice assembly around an ingested workbook.
//!
//! An upload carries the workbook plus a few form fields describing the enclosing tender. This
//! module turns both into a [`TenderNotice`] ready to be stored by the caller. It performs no I/O
//! and knows nothing about the transport the upload arrived on.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{IngestionError, IngestionResult};
use crate::ingestion::{check_file_name, ingest_with_options, IngestionOptions};
use crate::types::WorkItem;

/// Form fields submitted alongside a workbook upload.
///
/// Dates are kept as received (ISO-8601 text); [`TenderNotice::from_upload`] parses them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeForm {
    pub tender_no: String,
    pub notice_title: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub last_date_submission: Option<String>,
}

/// Lifecycle state of a tender notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    #[default]
    Active,
    Closed,
    Cancelled,
}

/// A tender notice and the work items ingested from its workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderNotice {
    pub id: Uuid,
    pub tender_no: String,
    pub notice_title: String,
    pub organization: Option<String>,
    pub publication_date: Option<NaiveDateTime>,
    pub last_date_submission: Option<NaiveDateTime>,
    pub work_items: Vec<WorkItem>,
    pub excel_file_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: TenderStatus,
}

impl TenderNotice {
    /// Build a notice from an uploaded workbook and its form fields.
    ///
    /// Rejects file names that are not `.xlsx`/`.xls` before touching the bytes, then validates
    /// the dates and ingests the workbook. Any failure rejects the whole upload.
    pub fn from_upload(
        form: NoticeForm,
        bytes: &[u8],
        file_name: &str,
        options: &IngestionOptions,
    ) -> IngestionResult<Self> {
        check_file_name(file_name)?;

        let publication_date = parse_form_date("publication_date", form.publication_date.as_deref())?;
        let last_date_submission =
            parse_form_date("last_date_submission", form.last_date_submission.as_deref())?;

        let work_items = ingest_with_options(bytes, file_name, options)?;

        Ok(Self {
            id: Uuid::new_v4(),
            tender_no: form.tender_no,
            notice_title: form.notice_title,
            organization: form.organization.filter(|o| !o.is_empty()),
            publication_date,
            last_date_submission,
            work_items,
            excel_file_name: Some(file_name.to_string()),
            created_at: Utc::now(),
            status: TenderStatus::Active,
        })
    }

    /// Response body describing a completed upload.
    pub fn upload_summary(&self) -> UploadSummary {
        UploadSummary {
            message: "Tender notice uploaded successfully".to_string(),
            tender_id: self.id,
            work_items_count: self.work_items.len(),
            work_items: self.work_items.clone(),
        }
    }
}

/// What a successful upload reports back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub message: String,
    pub tender_id: Uuid,
    pub work_items_count: usize,
    pub work_items: Vec<WorkItem>,
}

/// Parse an optional ISO-8601 form date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]` (also with a space separator) and RFC 3339
/// timestamps with an offset, which are converted to UTC. Missing or empty values are `None`.
fn parse_form_date(field: &'static str, raw: Option<&str>) -> IngestionResult<Option<NaiveDateTime>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.with_timezone(&Utc).naive_utc()));
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(Some(dt));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(Some)
        .ok_or_else(|| IngestionError::InvalidFormField {
            field,
            value: raw.to_string(),
            message: "expected an ISO-8601 date or date-time".to_string(),
        })
}
