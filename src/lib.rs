/*!
 * Partition Scheduler Simulator Library
 * FCFS process scheduling over a best-fit fixed-partition memory
 */

pub mod config;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod report;
pub mod scheduler;
pub mod trace;

// Re-exports
pub use config::{ConfigError, OutputConfig, SimulationConfig, SimulationConfigBuilder};
pub use crate::core::{MemSize, PartitionIndex, Pid, SimulationError, SimulationResult, Tick};
pub use memory::{MemoryError, MemorySnapshot, MemoryStatus, Partition, PartitionTable};
pub use monitoring::{generate_run_id, init_tracing, EventLog, EventSink, TransitionEvent};
pub use process::{ProcessDescriptor, ProcessRecord, ProcessState};
pub use report::{
    render_execution_log, render_memory_log, render_process_table, to_json, write_outputs, OutputError,
};
pub use scheduler::{ProcessStats, Scheduler, SchedulingPolicy, SimulationSummary};
pub use trace::{load_trace, parse_trace, TraceError};
