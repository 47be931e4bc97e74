/*!
 * Scheduler Types
 * Policy selection and run statistics
 */

use crate::core::types::{MemSize, Pid, Tick};
use crate::process::{ProcessRecord, ProcessState};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Scheduler policy configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchedulingPolicy {
    /// Non-preemptive first-come-first-served
    #[default]
    Fcfs,
    /// Priority-based scheduling (not implemented)
    Priority,
    /// Round-robin with fixed time quantum (not implemented)
    RoundRobin,
}

impl SchedulingPolicy {
    /// Convert to string representation
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Priority => "priority",
            Self::RoundRobin => "round_robin",
        }
    }

    pub const fn is_implemented(&self) -> bool {
        matches!(self, Self::Fcfs)
    }
}

impl FromStr for SchedulingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" | "first_come_first_served" => Ok(Self::Fcfs),
            "priority" | "prio" => Ok(Self::Priority),
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            _ => Err(format!(
                "Invalid policy '{}'. Valid: fcfs, priority, round_robin",
                s
            )),
        }
    }
}

impl Serialize for SchedulingPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedulingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Final statistics of one process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStats {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub total_cpu_time: Tick,
    pub memory_size: MemSize,
    pub state: ProcessState,
    pub wait_time: Tick,
    pub turnaround_time: Option<Tick>,
    pub response_time: Option<Tick>,
}

impl From<&ProcessRecord> for ProcessStats {
    fn from(record: &ProcessRecord) -> Self {
        Self {
            pid: record.pid(),
            arrival_time: record.descriptor.arrival_time,
            total_cpu_time: record.descriptor.total_cpu_time,
            memory_size: record.descriptor.memory_size,
            state: record.state,
            wait_time: record.wait_time,
            turnaround_time: record.turnaround_time,
            response_time: record.response_time,
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub policy: SchedulingPolicy,
    /// Ticks executed before every queue drained
    pub makespan: Tick,
    pub completed: usize,
    pub processes: Vec<ProcessStats>,
    pub average_wait: f64,
    pub average_turnaround: f64,
    pub average_response: f64,
    /// Completed processes per tick
    pub throughput: f64,
}

impl SimulationSummary {
    pub fn new(policy: SchedulingPolicy, makespan: Tick, processes: Vec<ProcessStats>) -> Self {
        let finished: Vec<&ProcessStats> = processes
            .iter()
            .filter(|p| p.state == ProcessState::Terminated)
            .collect();
        let completed = finished.len();

        let average_wait = mean(finished.iter().map(|p| p.wait_time));
        let average_turnaround = mean(finished.iter().filter_map(|p| p.turnaround_time));
        let average_response = mean(finished.iter().filter_map(|p| p.response_time));
        let throughput = if makespan == 0 {
            0.0
        } else {
            completed as f64 / makespan as f64
        };

        Self {
            policy,
            makespan,
            completed,
            processes,
            average_wait,
            average_turnaround,
            average_response,
            throughput,
        }
    }

    pub fn process(&self, pid: Pid) -> Option<&ProcessStats> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

fn mean(values: impl Iterator<Item = Tick>) -> f64 {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
