/*!
 * Report Output Tests
 * Writing execution, memory, and process reports to disk
 */

use partition_sched_sim::config::{ENV_JSON_OUTPUT, ENV_OUTPUT_DIR};
use partition_sched_sim::{
    parse_trace, to_json, write_outputs, EventLog, OutputConfig, Scheduler, SimulationConfig,
    SimulationSummary,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn simulate() -> (EventLog, SimulationSummary) {
    let descriptors = parse_trace("1, 0, 4, 2, 1, 5\n2, 0, 2, 0, 0, 5\n").unwrap();
    let mut scheduler = Scheduler::new(SimulationConfig::default(), descriptors).unwrap();
    let summary = scheduler.run().unwrap();
    (scheduler.into_sink(), summary)
}

fn output_config(dir: &Path, json: bool) -> OutputConfig {
    let dir = dir.to_string_lossy().into_owned();
    let json = if json { "true" } else { "false" };
    OutputConfig::from_lookup(|key| match key {
        k if k == ENV_OUTPUT_DIR => Some(dir.clone()),
        k if k == ENV_JSON_OUTPUT => Some(json.to_string()),
        _ => None,
    })
    .unwrap()
}

#[test]
fn test_writes_text_reports() {
    let dir = tempfile::tempdir().unwrap();
    let (log, summary) = simulate();

    let written = write_outputs(&output_config(dir.path(), false), &log, &summary).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["execution.txt", "memory_status.txt", "pcb_summary.txt"]);

    let execution = fs::read_to_string(dir.path().join("execution.txt")).unwrap();
    let data_rows = execution.lines().filter(|l| l.starts_with('|')).count() - 1;
    assert_eq!(data_rows, log.transitions().len());
    assert!(execution.contains("TERMINATED"));

    let memory = fs::read_to_string(dir.path().join("memory_status.txt")).unwrap();
    assert!(memory.contains("-1, -1, -1, -1,  1, -1"));

    let pcb = fs::read_to_string(dir.path().join("pcb_summary.txt")).unwrap();
    assert!(pcb.contains("Average wait time:       2.00"));
}

#[test]
fn test_json_report_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    let (log, summary) = simulate();

    write_outputs(&output_config(dir.path(), false), &log, &summary).unwrap();
    assert!(!dir.path().join("simulation.json").exists());

    let written = write_outputs(&output_config(dir.path(), true), &log, &summary).unwrap();
    assert_eq!(written.len(), 4);

    let raw = fs::read_to_string(dir.path().join("simulation.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["summary"]["makespan"], 6);
    assert_eq!(value["summary"]["policy"], "fcfs");
    assert_eq!(value["transitions"].as_array().unwrap().len(), 9);
    assert_eq!(value["transitions"][0]["new_state"], "READY");
    assert_eq!(value["memory"].as_array().unwrap().len(), 4);
}

#[test]
fn test_creates_missing_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("reports").join("run-1");
    let (log, summary) = simulate();

    write_outputs(&output_config(&nested, false), &log, &summary).unwrap();
    assert!(nested.join("execution.txt").is_file());
}

#[test]
fn test_to_json_matches_written_file() {
    let dir = tempfile::tempdir().unwrap();
    let (log, summary) = simulate();

    write_outputs(&output_config(dir.path(), true), &log, &summary).unwrap();
    let on_disk = fs::read_to_string(dir.path().join("simulation.json")).unwrap();
    assert_eq!(on_disk, to_json(&log, &summary).unwrap());
}
