/*!
 * Error Types
 * Simulation errors with thiserror, miette, and serde support
 */

use super::types::{MemSize, Pid, Tick};
use crate::memory::MemoryError;
use crate::process::{ProcessState, QueueError};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation operation result
pub type SimulationResult<T> = Result<T, SimulationError>;

/// Errors raised while building or stepping a simulation
///
/// Admission failures are not errors: a process that finds no free partition
/// simply stays in New and is retried on the next tick.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimulationError {
    #[error("Process {pid} needs {memory_size} MB but no partition is that large (capacities: {capacities:?})")]
    #[diagnostic(
        code(simulation::unplaceable_process),
        help("Raise a partition capacity to at least the process memory size, or drop the process from the trace.")
    )]
    UnplaceableProcess {
        pid: Pid,
        memory_size: MemSize,
        capacities: Vec<MemSize>,
    },

    #[error("Invalid descriptor for process {pid}: {reason}")]
    #[diagnostic(
        code(simulation::invalid_descriptor),
        help("Every process needs a total CPU time and a memory size greater than zero.")
    )]
    InvalidDescriptor { pid: Pid, reason: String },

    #[error("Duplicate process id {0} in trace")]
    #[diagnostic(
        code(simulation::duplicate_pid),
        help("Process ids must be unique within a trace.")
    )]
    DuplicatePid(Pid),

    #[error("Scheduling policy '{0}' is not implemented")]
    #[diagnostic(
        code(simulation::unsupported_policy),
        help("Only first-come-first-served (fcfs) scheduling is available.")
    )]
    UnsupportedPolicy(String),

    #[error("Tick limit {limit} reached with processes still active: {active:?}")]
    #[diagnostic(
        code(simulation::tick_limit_exceeded),
        help("Increase SIM_MAX_TICKS or check the trace for processes that can never finish.")
    )]
    TickLimitExceeded { limit: Tick, active: Vec<Pid> },

    #[error("Invalid state transition for process {pid}: {from} -> {to}")]
    #[diagnostic(code(simulation::invalid_transition))]
    InvalidTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },

    #[error("Scheduler invariant violated at tick {tick}: {reason}")]
    #[diagnostic(code(simulation::invariant_violation))]
    InvariantViolation { tick: Tick, reason: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Queue(#[from] QueueError),
}
