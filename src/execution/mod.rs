//! Batch execution: ingest many workbooks in parallel.
//!
//! This module sits "above" [`crate::ingestion`]. It finds `.xlsx`/`.xls` files, runs the
//! ingestion facade on each of them on a rayon thread pool and reports one outcome per file.
//! Files never share state, so one file's failure does not affect the others.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use walkdir::WalkDir;

use crate::error::{IngestionError, IngestionResult};
use crate::ingestion::{ingest_from_path, IngestionOptions, SpreadsheetFormat};
use crate::types::WorkItem;

/// Configuration for batch ingestion.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Number of worker threads.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Descend into subdirectories when scanning a directory.
    pub recursive: bool,
    /// Options applied to every file.
    pub ingestion: IngestionOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            num_threads: None,
            recursive: false,
            ingestion: IngestionOptions::default(),
        }
    }
}

/// Outcome of ingesting one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: IngestionResult<Vec<WorkItem>>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// List the workbook files under `dir`, sorted by path.
///
/// Only names accepted by [`SpreadsheetFormat::from_file_name`] are returned.
pub fn find_workbooks(dir: impl AsRef<Path>, recursive: bool) -> IngestionResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .sort_by_file_name();

    let mut out = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| IngestionError::Io {
            path: e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_workbook = entry
            .file_name()
            .to_str()
            .and_then(SpreadsheetFormat::from_file_name)
            .is_some();
        if is_workbook {
            out.push(entry.into_path());
        }
    }
    out.sort();
    Ok(out)
}

/// Ingest every workbook in `dir`.
///
/// Fails only if the directory itself cannot be scanned; per-file failures are reported in the
/// returned [`FileReport`]s, which are ordered by path.
pub fn ingest_dir(dir: impl AsRef<Path>, opts: &BatchOptions) -> IngestionResult<Vec<FileReport>> {
    let paths = find_workbooks(dir, opts.recursive)?;
    Ok(ingest_paths(&paths, opts))
}

/// Ingest the given files in parallel, returning reports in input order.
pub fn ingest_paths(paths: &[PathBuf], opts: &BatchOptions) -> Vec<FileReport> {
    let run = || {
        paths
            .par_iter()
            .map(|path| FileReport {
                path: path.clone(),
                outcome: ingest_from_path(path, &opts.ingestion),
            })
            .collect::<Vec<_>>()
    };

    let mut builder = ThreadPoolBuilder::new();
    if let Some(n) = opts.num_threads {
        builder = builder.num_threads(n.max(1));
    }
    match builder.build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            tracing::warn!(error = %e, "failed to build batch thread pool; using the global pool");
            run()
        }
    }
}
