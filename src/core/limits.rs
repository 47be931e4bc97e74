/*!
 * Simulation Limits and Constants
 *
 * Centralized location for fixed tables, bounds, and file names.
 * Organized by domain.
 */

use super::types::MemSize;

// =============================================================================
// MEMORY LIMITS
// =============================================================================

/// Partition capacities (MB) of the reference machine, largest first.
/// Best-fit scans this table from the last entry towards the first.
pub const DEFAULT_PARTITION_SIZES: [MemSize; 6] = [40, 25, 15, 10, 8, 2];

/// Upper bound on a configured partition table
pub const PARTITION_LIMIT: usize = 64;

// =============================================================================
// TRACE FORMAT
// =============================================================================

/// Fields per trace line: pid, arrival, cpu, io frequency, io duration, memory
pub const TRACE_FIELD_COUNT: usize = 6;

/// Lines starting with this marker are ignored by the trace loader
pub const TRACE_COMMENT_PREFIX: char = '#';

// =============================================================================
// OUTPUT FILES
// =============================================================================

pub const EXECUTION_LOG_FILE: &str = "execution.txt";
pub const MEMORY_STATUS_FILE: &str = "memory_status.txt";
pub const PCB_SUMMARY_FILE: &str = "pcb_summary.txt";
pub const JSON_REPORT_FILE: &str = "simulation.json";
