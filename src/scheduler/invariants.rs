/*!
 * Scheduler Invariants
 * Consistency checks across the store, queues, and partition table
 */

use super::Scheduler;
use crate::core::errors::{SimulationError, SimulationResult};
use crate::monitoring::EventSink;
use crate::process::{ProcessState, QueueKind};

impl<S: EventSink> Scheduler<S> {
    /// Verify that queues, record states, and memory agree
    ///
    /// Checked after every tick in debug builds.
    pub fn check_invariants(&self) -> SimulationResult<()> {
        let violation = |reason: String| SimulationError::InvariantViolation {
            tick: self.clock,
            reason,
        };

        let accounted = self.queues.total_len() + self.terminated;
        if accounted != self.store.len() {
            return Err(violation(format!(
                "{} queued + {} terminated != {} processes",
                self.queues.total_len(),
                self.terminated,
                self.store.len()
            )));
        }

        let mut running = 0;
        for (id, record) in self.store.iter() {
            let expected = match record.state {
                ProcessState::New => Some(QueueKind::New),
                ProcessState::Ready | ProcessState::Running => Some(QueueKind::Ready),
                ProcessState::Waiting => Some(QueueKind::Waiting),
                ProcessState::Terminated => None,
            };
            if self.queues.location(id) != expected {
                return Err(violation(format!(
                    "process {} is {} but queued in {:?}",
                    record.pid(),
                    record.state,
                    self.queues.location(id)
                )));
            }

            if record.partition.is_some() != record.state.is_resident() {
                return Err(violation(format!(
                    "process {} is {} with partition {:?}",
                    record.pid(),
                    record.state,
                    record.partition
                )));
            }
            if let Some(index) = record.partition {
                let occupant = self.partitions.get(index).and_then(|p| p.occupant);
                if occupant != Some(record.pid()) {
                    return Err(violation(format!(
                        "process {} holds partition index {} occupied by {:?}",
                        record.pid(),
                        index,
                        occupant
                    )));
                }
            }

            if record.state == ProcessState::Running {
                running += 1;
                if self.queues.front(QueueKind::Ready) != Some(id) {
                    return Err(violation(format!(
                        "process {} is running but not at the ready head",
                        record.pid()
                    )));
                }
            }
        }
        if running > 1 {
            return Err(violation(format!("{} processes running", running)));
        }

        let capacity: u64 = self.partitions.partitions().iter().map(|p| u64::from(p.capacity)).sum();
        let used: u64 = self.partitions.partitions().iter().map(|p| u64::from(p.used)).sum();
        let usable: u64 = self
            .partitions
            .partitions()
            .iter()
            .filter(|p| p.is_free())
            .map(|p| u64::from(p.capacity))
            .sum();
        let status = self.partitions.status();
        if status.total_free != capacity - used || status.usable_free != usable {
            return Err(violation(format!(
                "memory status {:?} disagrees with partitions (total {}, usable {})",
                status,
                capacity - used,
                usable
            )));
        }

        Ok(())
    }
}
