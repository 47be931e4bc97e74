/*!
 * CPU Scheduler
 *
 * Discrete-time FCFS engine driving processes through
 * NEW -> READY -> RUNNING -> {WAITING, TERMINATED}, WAITING -> READY.
 *
 * Each tick runs four phases in a fixed order:
 * 1. Admission: New head(s) that have arrived get a best-fit partition;
 *    the first failure blocks the rest of New for this tick
 * 2. I/O completion: Waiting records count down and rejoin Ready
 * 3. Wait accounting: every Ready record behind the head accrues a tick
 * 4. Dispatch: the Ready head runs one CPU tick, then may terminate or block
 *
 * The run ends once New, Ready, and Waiting are all empty.
 */

mod invariants;
mod phases;
pub mod types;

pub use types::{ProcessStats, SchedulingPolicy, SimulationSummary};

use crate::config::SimulationConfig;
use crate::core::errors::{SimulationError, SimulationResult};
use crate::core::types::{Pid, Tick};
use crate::memory::PartitionTable;
use crate::monitoring::{generate_run_id, EventLog, EventSink};
use crate::process::{ProcessDescriptor, ProcessId, ProcessState, ProcessStore, QueueKind, QueueSet};
use tracing::{info, info_span};

/// Simulation context for one run
///
/// Owns the process arena, the queues, the partition table, and the event
/// sink. Nothing is shared between runs.
pub struct Scheduler<S: EventSink = EventLog> {
    config: SimulationConfig,
    store: ProcessStore,
    queues: QueueSet,
    partitions: PartitionTable,
    sink: S,
    clock: Tick,
    terminated: usize,
}

impl Scheduler<EventLog> {
    /// Create a scheduler recording into a fresh [`EventLog`]
    pub fn new(
        config: SimulationConfig,
        descriptors: impl IntoIterator<Item = ProcessDescriptor>,
    ) -> SimulationResult<Self> {
        Self::with_sink(config, descriptors, EventLog::new())
    }
}

impl<S: EventSink> Scheduler<S> {
    /// Create a scheduler emitting into `sink`
    ///
    /// Fails fast on processes that no partition could ever hold, so the
    /// tick loop is guaranteed to drain.
    pub fn with_sink(
        config: SimulationConfig,
        descriptors: impl IntoIterator<Item = ProcessDescriptor>,
        sink: S,
    ) -> SimulationResult<Self> {
        let policy = config.policy();
        if !policy.is_implemented() {
            return Err(SimulationError::UnsupportedPolicy(policy.as_str().to_string()));
        }

        let partitions = PartitionTable::new(config.partitions());
        let mut store = ProcessStore::new();
        for descriptor in descriptors {
            validate_descriptor(&descriptor, &partitions)?;
            store.insert(descriptor)?;
        }

        // Stable sort: trace order breaks arrival ties
        let mut arrivals: Vec<ProcessId> = store.ids().collect();
        arrivals.sort_by_key(|&id| store[id].descriptor.arrival_time);

        let mut queues = QueueSet::with_capacity(store.len());
        for id in arrivals {
            queues.push(id, QueueKind::New)?;
        }

        info!(
            processes = store.len(),
            partitions = partitions.len(),
            policy = policy.as_str(),
            "Scheduler initialized"
        );

        Ok(Self {
            config,
            store,
            queues,
            partitions,
            sink,
            clock: 0,
            terminated: 0,
        })
    }

    /// Step until every queue has drained
    pub fn run(&mut self) -> SimulationResult<SimulationSummary> {
        let span = info_span!(
            "simulation",
            run_id = %generate_run_id(),
            processes = self.store.len()
        );
        let _guard = span.enter();
        info!(partitions = ?self.partitions.capacities(), "Simulation started");

        while !self.is_finished() {
            self.skip_idle();
            self.step()?;
        }

        let summary = self.summary();
        info!(
            ticks = summary.makespan,
            completed = summary.completed,
            average_wait = summary.average_wait,
            average_turnaround = summary.average_turnaround,
            average_response = summary.average_response,
            "Simulation finished"
        );
        Ok(summary)
    }

    /// Statistics as of the current tick
    pub fn summary(&self) -> SimulationSummary {
        let processes = self.store.iter().map(|(_, r)| ProcessStats::from(r)).collect();
        SimulationSummary::new(self.config.policy(), self.clock, processes)
    }

    pub fn is_finished(&self) -> bool {
        self.queues.is_idle()
    }

    /// Next tick to execute
    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn terminated_count(&self) -> usize {
        self.terminated
    }

    /// Pids still in New, Ready, or Waiting
    pub fn active_pids(&self) -> Vec<Pid> {
        QueueKind::ALL
            .iter()
            .flat_map(|&kind| self.queues.iter(kind))
            .map(|id| self.store[id].pid())
            .collect()
    }

    /// Pid of the process that ran during the last tick and still holds the CPU
    pub fn running(&self) -> Option<Pid> {
        self.queues
            .front(QueueKind::Ready)
            .map(|id| &self.store[id])
            .filter(|r| r.state == ProcessState::Running)
            .map(|r| r.pid())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn store(&self) -> &ProcessStore {
        &self.store
    }

    pub fn queues(&self) -> &QueueSet {
        &self.queues
    }

    pub fn partitions(&self) -> &PartitionTable {
        &self.partitions
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

fn validate_descriptor(
    descriptor: &ProcessDescriptor,
    partitions: &PartitionTable,
) -> SimulationResult<()> {
    if descriptor.total_cpu_time == 0 {
        return Err(SimulationError::InvalidDescriptor {
            pid: descriptor.pid,
            reason: "total CPU time must be greater than zero".to_string(),
        });
    }
    if descriptor.memory_size == 0 {
        return Err(SimulationError::InvalidDescriptor {
            pid: descriptor.pid,
            reason: "memory size must be greater than zero".to_string(),
        });
    }
    if !partitions.can_ever_fit(descriptor.memory_size) {
        return Err(SimulationError::UnplaceableProcess {
            pid: descriptor.pid,
            memory_size: descriptor.memory_size,
            capacities: partitions.capacities(),
        });
    }
    Ok(())
}
