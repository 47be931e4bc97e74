/*!
 * Trace Loader
 *
 * Reads process descriptors, one per line:
 *
 * ```text
 * pid, arrival_time, total_cpu_time, io_frequency, io_duration, memory_size
 * ```
 *
 * Blank lines and lines starting with `#` are skipped. Field values must be
 * non-negative integers.
 */

use crate::core::limits::{TRACE_COMMENT_PREFIX, TRACE_FIELD_COUNT};
use crate::process::ProcessDescriptor;
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

const FIELD_NAMES: [&str; TRACE_FIELD_COUNT] = [
    "pid",
    "arrival_time",
    "total_cpu_time",
    "io_frequency",
    "io_duration",
    "memory_size",
];

/// Trace result
pub type TraceResult<T> = Result<T, TraceError>;

/// Trace loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum TraceError {
    #[error("Malformed trace line {line}: {reason}")]
    #[diagnostic(
        code(trace::malformed),
        help("Each line needs six comma-separated integers: pid, arrival, cpu, io frequency, io duration, memory")
    )]
    Malformed { line: usize, reason: String },

    #[error("Failed to read trace file {}", .path.display())]
    #[diagnostic(code(trace::read_failed))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a whole trace, preserving line order
pub fn parse_trace(input: &str) -> TraceResult<Vec<ProcessDescriptor>> {
    let mut descriptors = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(TRACE_COMMENT_PREFIX) {
            continue;
        }
        descriptors.push(parse_line(trimmed, index + 1)?);
    }
    debug!(processes = descriptors.len(), "Trace parsed");
    Ok(descriptors)
}

/// Parse one trace line; `line` is the 1-based line number used in errors
pub fn parse_line(text: &str, line: usize) -> TraceResult<ProcessDescriptor> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if fields.len() != TRACE_FIELD_COUNT {
        return Err(TraceError::Malformed {
            line,
            reason: format!("expected {} fields, found {}", TRACE_FIELD_COUNT, fields.len()),
        });
    }

    Ok(ProcessDescriptor {
        pid: field(&fields, 0, line)?,
        arrival_time: field(&fields, 1, line)?,
        total_cpu_time: field(&fields, 2, line)?,
        io_frequency: field(&fields, 3, line)?,
        io_duration: field(&fields, 4, line)?,
        memory_size: field(&fields, 5, line)?,
    })
}

fn field<T>(fields: &[&str], position: usize, line: usize) -> TraceResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    fields[position].parse().map_err(|e| TraceError::Malformed {
        line,
        reason: format!("{} '{}': {}", FIELD_NAMES[position], fields[position], e),
    })
}

/// Read and parse a trace file
pub fn load_trace(path: impl AsRef<Path>) -> TraceResult<Vec<ProcessDescriptor>> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path).map_err(|source| TraceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let descriptors = parse_trace(&input)?;
    info!(path = %path.display(), processes = descriptors.len(), "Trace loaded");
    Ok(descriptors)
}
