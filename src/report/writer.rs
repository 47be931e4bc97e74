/*!
 * Report Writer
 * Persists the rendered tables and optional JSON report
 */

use super::tables::{render_execution_log, render_memory_log, render_process_table};
use crate::config::OutputConfig;
use crate::core::limits::{EXECUTION_LOG_FILE, JSON_REPORT_FILE, MEMORY_STATUS_FILE, PCB_SUMMARY_FILE};
use crate::memory::MemorySnapshot;
use crate::monitoring::{EventLog, TransitionEvent};
use crate::scheduler::SimulationSummary;
use miette::Diagnostic;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Output result
pub type OutputResult<T> = Result<T, OutputError>;

/// Output errors
#[derive(Error, Debug, Diagnostic)]
pub enum OutputError {
    #[error("Failed to write {}", .path.display())]
    #[diagnostic(
        code(output::write_failed),
        help("Check that SIM_OUTPUT_DIR exists or can be created and is writable.")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode JSON report")]
    #[diagnostic(code(output::encode_failed))]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a SimulationSummary,
    transitions: &'a [TransitionEvent],
    memory: &'a [MemorySnapshot],
}

/// Pretty-printed JSON of the summary and both logs
pub fn to_json(log: &EventLog, summary: &SimulationSummary) -> OutputResult<String> {
    let report = JsonReport {
        summary,
        transitions: log.transitions(),
        memory: log.memory(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Write every report into the configured directory, returning the files written
pub fn write_outputs(
    config: &OutputConfig,
    log: &EventLog,
    summary: &SimulationSummary,
) -> OutputResult<Vec<PathBuf>> {
    let dir = config.output_dir.as_path();
    fs::create_dir_all(dir).map_err(|source| OutputError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = vec![
        write_file(dir, EXECUTION_LOG_FILE, &render_execution_log(log.transitions()))?,
        write_file(dir, MEMORY_STATUS_FILE, &render_memory_log(log.memory()))?,
        write_file(dir, PCB_SUMMARY_FILE, &render_process_table(summary))?,
    ];
    if config.json {
        written.push(write_file(dir, JSON_REPORT_FILE, &to_json(log, summary)?)?);
    }

    info!(
        dir = %dir.display(),
        files = written.len(),
        transitions = log.transitions().len(),
        snapshots = log.memory().len(),
        "Reports written"
    );
    Ok(written)
}

fn write_file(dir: &Path, name: &str, contents: &str) -> OutputResult<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).map_err(|source| OutputError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
