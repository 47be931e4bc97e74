/*!
 * Trace Loader Tests
 * Reading process traces from disk
 */

use partition_sched_sim::{load_trace, ProcessDescriptor, Scheduler, SimulationConfig, TraceError};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn trace_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_trace_from_file() {
    let file = trace_file("# header\n1, 0, 4, 2, 1, 5\n\n2, 0, 2, 0, 0, 5\n3, 7, 1, 0, 0, 40\n");
    let descriptors = load_trace(file.path()).unwrap();

    assert_eq!(
        descriptors,
        vec![
            ProcessDescriptor::new(1, 0, 4, 5).with_io(2, 1),
            ProcessDescriptor::new(2, 0, 2, 5),
            ProcessDescriptor::new(3, 7, 1, 40),
        ]
    );
}

#[test]
fn test_loaded_trace_runs_to_completion() {
    let file = trace_file("1, 0, 3, 0, 0, 20\n2, 1, 2, 1, 2, 30\n3, 2, 1, 0, 0, 2\n");
    let descriptors = load_trace(file.path()).unwrap();

    let mut scheduler = Scheduler::new(SimulationConfig::default(), descriptors).unwrap();
    let summary = scheduler.run().unwrap();
    assert_eq!(summary.completed, 3);
}

#[test]
fn test_malformed_line_reports_line_number() {
    let file = trace_file("1, 0, 4, 2, 1, 5\n# comment\n2, 0, x, 0, 0, 5\n");
    match load_trace(file.path()) {
        Err(TraceError::Malformed { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected malformed line error, got {:?}", other),
    }
}

#[test]
fn test_unreadable_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let err = load_trace(&missing).unwrap_err();

    assert!(matches!(err, TraceError::Read { ref path, .. } if path == &missing));
    assert!(err.to_string().contains("missing.txt"));
}
