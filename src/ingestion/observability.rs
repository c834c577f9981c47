//! Observer hooks for ingestion outcomes.
//!
//! The facade reports every call to an optional [`IngestionObserver`]. Implementations here cover
//! `tracing` events, an append-only log file and fan-out to several observers.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};

use crate::error::IngestionError;

use super::unified::SpreadsheetFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the upload was rejected).
    Error,
    /// Critical error (I/O or other infrastructure failures).
    Critical,
}

/// Context about an ingestion attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// Original file name of the upload.
    pub file_name: String,
    /// Format used for ingestion; `None` when the file name was not recognized.
    pub format: Option<SpreadsheetFormat>,
}

impl IngestionContext {
    fn format_label(&self) -> &'static str {
        self.format.map_or("unknown", SpreadsheetFormat::extension)
    }
}

/// Row counts reported on successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Non-blank rows below the header.
    pub data_rows: usize,
    /// Data rows dropped because neither `work_no` nor `work_description` was set.
    pub skipped_rows: usize,
    /// Work items produced.
    pub work_items: usize,
}

/// Observer interface for ingestion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait IngestionObserver: Send + Sync {
    /// Called when ingestion succeeds.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when ingestion fails.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &IngestionError) {}

    /// Called when an ingestion failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Emits structured `tracing` events.
///
/// Successes log at `info`, failures at `warn` (or `error` for [`IngestionSeverity::Critical`]),
/// alerts at `error` with `alert = true`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        tracing::info!(
            file_name = %ctx.file_name,
            format = ctx.format_label(),
            data_rows = stats.data_rows,
            skipped_rows = stats.skipped_rows,
            work_items = stats.work_items,
            "ingest ok"
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        if severity >= IngestionSeverity::Critical {
            tracing::error!(
                file_name = %ctx.file_name,
                format = ctx.format_label(),
                severity = ?severity,
                error = %error,
                "ingest failed"
            );
        } else {
            tracing::warn!(
                file_name = %ctx.file_name,
                format = ctx.format_label(),
                severity = ?severity,
                error = %error,
                "ingest failed"
            );
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        tracing::error!(
            alert = true,
            file_name = %ctx.file_name,
            format = ctx.format_label(),
            severity = ?severity,
            error = %error,
            "ingest alert"
        );
    }
}

/// One observer callback, rendered as a single `key=value` line by [`FileObserver`].
#[derive(Debug, Clone, Copy)]
enum EventLine<'a> {
    Ok(IngestionStats),
    Fail(IngestionSeverity, &'a IngestionError),
    Alert(IngestionSeverity, &'a IngestionError),
}

impl EventLine<'_> {
    fn render(&self, ctx: &IngestionContext) -> String {
        let (tag, severity, error) = match *self {
            Self::Ok(stats) => {
                return format!(
                    "ok format={} file={} rows={} skipped={} work_items={}",
                    ctx.format_label(),
                    ctx.file_name,
                    stats.data_rows,
                    stats.skipped_rows,
                    stats.work_items
                );
            }
            Self::Fail(severity, error) => ("fail", severity, error),
            Self::Alert(severity, error) => ("ALERT", severity, error),
        };
        format!(
            "{tag} severity={severity:?} format={} file={} err={error}",
            ctx.format_label(),
            ctx.file_name
        )
    }
}

/// Appends ingestion events to a local log file, one timestamped line per callback.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append(&self, ctx: &IngestionContext, event: EventLine<'_>) {
        let line = event.render(ctx);
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{} {line}", Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.append(ctx, EventLine::Ok(stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.append(ctx, EventLine::Fail(severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.append(ctx, EventLine::Alert(severity, error));
    }
}
