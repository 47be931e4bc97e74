/*!
 * Process Types
 * Descriptors, scheduling records, and the process state machine
 */

use crate::core::types::{MemSize, PartitionIndex, Pid, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    /// Loaded from the trace, not yet holding memory
    New,
    /// Resident and queued for the CPU
    Ready,
    /// Head of the ready queue, executing
    Running,
    /// Blocked on I/O, still resident
    Waiting,
    /// Finished; memory released
    Terminated,
}

impl ProcessState {
    pub const ALL: [ProcessState; 5] = [
        Self::New,
        Self::Ready,
        Self::Running,
        Self::Waiting,
        Self::Terminated,
    ];

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Waiting => "WAITING",
            Self::Terminated => "TERMINATED",
        }
    }

    /// States in which the process owns a memory partition
    #[inline]
    pub const fn is_resident(&self) -> bool {
        matches!(self, Self::Ready | Self::Running | Self::Waiting)
    }

    /// Edges of the state machine
    pub const fn can_transition_to(&self, next: ProcessState) -> bool {
        matches!(
            (self, next),
            (Self::New, Self::Ready)
                | (Self::Ready, Self::Running)
                | (Self::Running, Self::Waiting)
                | (Self::Running, Self::Terminated)
                | (Self::Waiting, Self::Ready)
        )
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a process as recorded in the trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub total_cpu_time: Tick,
    /// CPU ticks between I/O bursts; 0 never blocks
    pub io_frequency: Tick,
    /// Length of each I/O burst
    pub io_duration: Tick,
    pub memory_size: MemSize,
}

impl ProcessDescriptor {
    /// CPU-bound process with no I/O
    pub fn new(pid: Pid, arrival_time: Tick, total_cpu_time: Tick, memory_size: MemSize) -> Self {
        Self {
            pid,
            arrival_time,
            total_cpu_time,
            io_frequency: 0,
            io_duration: 0,
            memory_size,
        }
    }

    pub fn with_io(mut self, frequency: Tick, duration: Tick) -> Self {
        self.io_frequency = frequency;
        self.io_duration = duration;
        self
    }
}

/// Per-process scheduling record (the PCB)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    #[serde(flatten)]
    pub descriptor: ProcessDescriptor,
    pub remaining_cpu: Tick,
    /// Ticks left in the current I/O burst
    pub remaining_io: Tick,
    pub state: ProcessState,
    pub prev_state: ProcessState,
    pub partition: Option<PartitionIndex>,
    /// Ticks spent in Ready behind another process
    pub wait_time: Tick,
    pub turnaround_time: Option<Tick>,
    pub response_time: Option<Tick>,
}

impl ProcessRecord {
    pub fn new(descriptor: ProcessDescriptor) -> Self {
        Self {
            remaining_cpu: descriptor.total_cpu_time,
            remaining_io: descriptor.io_duration,
            state: ProcessState::New,
            prev_state: ProcessState::New,
            partition: None,
            wait_time: 0,
            turnaround_time: None,
            response_time: None,
            descriptor,
        }
    }

    #[inline(always)]
    pub fn pid(&self) -> Pid {
        self.descriptor.pid
    }

    /// CPU ticks consumed so far
    #[inline]
    pub fn executed(&self) -> Tick {
        self.descriptor.total_cpu_time - self.remaining_cpu
    }

    /// Whether the CPU tick just executed ends a burst
    pub fn blocks_for_io(&self) -> bool {
        let frequency = self.descriptor.io_frequency;
        frequency > 0
            && self.descriptor.io_duration > 0
            && self.executed() > 0
            && self.executed() % frequency == 0
    }
}
