//! tender-ingest CLI: parse tender workbooks and print the work items they contain.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tender_ingest::execution::{find_workbooks, ingest_paths, BatchOptions, FileReport};
use tender_ingest::ingestion::{IngestionOptions, TracingObserver};
use tender_ingest::WorkItem;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tender-ingest", about = "Extract work items from .xlsx/.xls tender workbooks")]
struct Cli {
    /// Workbook files or directories containing workbooks
    #[arg(required = true)]
    paths: Vec<PathBuf>,
    /// Descend into subdirectories
    #[arg(long, short)]
    recursive: bool,
    /// Worker threads (defaults to available parallelism)
    #[arg(long)]
    threads: Option<usize>,
    /// Print work items as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut files = Vec::new();
    for path in &cli.paths {
        if path.is_dir() {
            files.extend(find_workbooks(path, cli.recursive)?);
        } else {
            files.push(path.clone());
        }
    }
    if files.is_empty() {
        eprintln!("No Excel files found");
        return Ok(ExitCode::SUCCESS);
    }

    let opts = BatchOptions {
        num_threads: cli.threads,
        ingestion: IngestionOptions {
            observer: Some(Arc::new(TracingObserver)),
            ..Default::default()
        },
        ..Default::default()
    };
    let reports = ingest_paths(&files, &opts);

    if cli.json {
        print_json(&reports)?;
    } else {
        println!("Found {} Excel files\n", reports.len());
        for report in &reports {
            print_report(report);
        }
    }

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    if failed > 0 {
        eprintln!("{failed} of {} files failed", reports.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &FileReport) {
    println!("File: {}", report.path.display());
    println!("{}", "-".repeat(50));
    match &report.outcome {
        Ok(items) => {
            println!("Parsed {} work items:", items.len());
            for (i, item) in items.iter().enumerate() {
                print_item(i + 1, item);
            }
        }
        Err(e) => println!("Error: {e}"),
    }
    println!("\n{}", "=".repeat(50));
}

fn print_item(n: usize, item: &WorkItem) {
    println!("\nWork Item {n}:");
    println!("  Work No: {}", item.work_no());
    println!("  Description: {}", item.work_description());
    if let Some(cost) = item.estimated_cost() {
        println!("  Estimated Cost: {cost}");
    }
    if let Some(t) = item.completion_time() {
        println!("  Completion Time: {t}");
    }
    if let Some(l) = item.location() {
        println!("  Location: {l}");
    }
    if let Some(c) = item.category() {
        println!("  Category: {c}");
    }
}

fn print_json(reports: &[FileReport]) -> anyhow::Result<()> {
    let out: Vec<serde_json::Value> = reports
        .iter()
        .map(|r| match &r.outcome {
            Ok(items) => serde_json::json!({
                "file": r.path.display().to_string(),
                "work_items": items,
            }),
            Err(e) => serde_json::json!({
                "file": r.path.display().to_string(),
                "error": e.to_string(),
            }),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
