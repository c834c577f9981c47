mod common;

use std::fs;
use std::sync::{Arc, Mutex};

use common::{xlsx_bytes, Empty, N, S};
use tender_ingest::ingestion::{
    ingest_from_path, ingest_with_options, CompositeObserver, FileObserver, IngestionContext,
    IngestionObserver, IngestionOptions, IngestionSeverity, IngestionStats, SpreadsheetFormat,
};
use tender_ingest::IngestionError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(String, IngestionStats)>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.successes
            .lock()
            .unwrap()
            .push((ctx.file_name.clone(), stats));
    }

    fn on_failure(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &IngestionError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &IngestionError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn opts_with(obs: Arc<RecordingObserver>, alert_at_or_above: IngestionSeverity) -> IngestionOptions {
    IngestionOptions {
        observer: Some(obs),
        alert_at_or_above,
        ..Default::default()
    }
}

#[test]
fn observer_receives_row_stats_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    let bytes = xlsx_bytes(&[
        vec![S("work_no"), S("work_description"), S("location")],
        vec![S("W-1"), S("Paving"), Empty],
        vec![Empty, Empty, S("Ward 7")],
        vec![],
        vec![Empty, S("Kerbs"), Empty],
    ]);

    let items =
        ingest_with_options(&bytes, "works.xlsx", &opts_with(obs.clone(), IngestionSeverity::Critical))
            .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].work_no(), "WORK_3");

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(
        successes,
        vec![(
            "works.xlsx".to_string(),
            IngestionStats {
                data_rows: 3,
                skipped_rows: 1,
                work_items: 2,
            }
        )]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let obs = Arc::new(RecordingObserver::default());
    let bytes = xlsx_bytes(&[
        vec![S("work_no"), S("estimated_cost")],
        vec![S("W-1"), S("lots")],
    ]);

    let _ = ingest_with_options(&bytes, "works.xlsx", &opts_with(obs.clone(), IngestionSeverity::Critical))
        .unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn observer_alerts_when_threshold_is_lowered() {
    let obs = Arc::new(RecordingObserver::default());

    let _ = ingest_with_options(b"", "works.csv", &opts_with(obs.clone(), IngestionSeverity::Error))
        .unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Error]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![IngestionSeverity::Error]);
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = IngestionOptions {
        format: Some(SpreadsheetFormat::Xlsx),
        ..opts_with(obs.clone(), IngestionSeverity::Critical)
    };

    let _ = ingest_from_path("tests/fixtures/does_not_exist.xlsx", &opts).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Critical]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![IngestionSeverity::Critical]);
}

#[test]
fn composite_and_file_observers_record_events() {
    let log = std::env::temp_dir().join(format!(
        "tender_ingest_observer_{}_{}.log",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let recording = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn IngestionObserver>> =
        vec![recording.clone(), Arc::new(FileObserver::new(&log))];
    let composite = CompositeObserver::new(observers);
    let opts = IngestionOptions {
        observer: Some(Arc::new(composite)),
        alert_at_or_above: IngestionSeverity::Error,
        ..Default::default()
    };

    let ok = xlsx_bytes(&[vec![S("work_no"), S("estimated_cost")], vec![S("W-1"), N(5.0)]]);
    ingest_with_options(&ok, "ok.xlsx", &opts).unwrap();
    let _ = ingest_with_options(b"not a zip", "bad.xlsx", &opts).unwrap_err();

    assert_eq!(recording.successes.lock().unwrap().len(), 1);
    assert_eq!(recording.alerts.lock().unwrap().len(), 1);

    let contents = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("ok format=xlsx file=ok.xlsx rows=1 skipped=0 work_items=1"));
    assert!(lines[1].contains("fail severity=Error format=xlsx file=bad.xlsx"));
    assert!(lines[2].contains("ALERT severity=Error"));

    fs::remove_file(&log).unwrap();
}
