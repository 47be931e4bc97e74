/*!
 * Scheduler Phases
 * Admission, I/O completion, wait accounting, and dispatch for one tick
 */

use super::Scheduler;
use crate::core::errors::{SimulationError, SimulationResult};
use crate::monitoring::{EventSink, TransitionEvent};
use crate::process::{ProcessId, ProcessState, QueueKind};
use tracing::{debug, trace};

impl<S: EventSink> Scheduler<S> {
    /// Execute exactly one tick; a finished simulation does not advance
    pub fn step(&mut self) -> SimulationResult<()> {
        if self.is_finished() {
            return Ok(());
        }
        if let Some(limit) = self.config.max_ticks() {
            if self.clock >= limit {
                return Err(SimulationError::TickLimitExceeded {
                    limit,
                    active: self.active_pids(),
                });
            }
        }

        trace!(tick = self.clock, "Tick started");
        self.admit()?;
        self.complete_io()?;
        self.account_wait();
        self.dispatch()?;

        #[cfg(debug_assertions)]
        self.check_invariants()?;

        self.clock += 1;
        Ok(())
    }

    /// Jump the clock to the next arrival while no process is resident
    ///
    /// Skipped ticks would emit nothing. The jump stops at the tick limit so
    /// the next `step` still reports it.
    pub(super) fn skip_idle(&mut self) {
        if !self.queues.is_empty(QueueKind::Ready) || !self.queues.is_empty(QueueKind::Waiting) {
            return;
        }
        let Some(id) = self.queues.front(QueueKind::New) else {
            return;
        };

        let mut next = self.store[id].descriptor.arrival_time;
        if let Some(limit) = self.config.max_ticks() {
            next = next.min(limit);
        }
        if next > self.clock {
            trace!(from = self.clock, to = next, "Skipping idle ticks");
            self.clock = next;
        }
    }

    /// NEW -> READY for arrived processes, in arrival order, until one does not fit
    fn admit(&mut self) -> SimulationResult<()> {
        while let Some(id) = self.queues.front(QueueKind::New) {
            let record = &self.store[id];
            if record.descriptor.arrival_time > self.clock {
                break;
            }
            let (pid, size) = (record.pid(), record.descriptor.memory_size);

            let Some(index) = self.partitions.find_best_fit(size) else {
                debug!(
                    tick = self.clock,
                    pid,
                    memory_size = size,
                    blocked = self.queues.len(QueueKind::New),
                    "Admission blocked: no free partition fits"
                );
                break;
            };

            let snapshot = self.partitions.allocate(index, pid, size, self.clock)?;
            self.sink.record_memory(snapshot);
            self.store.record_mut(id).partition = Some(index);
            self.transition(id, ProcessState::Ready)?;
            self.queues.append(id, QueueKind::New, QueueKind::Ready)?;
        }
        Ok(())
    }

    /// WAITING -> READY for records whose I/O burst just ended
    fn complete_io(&mut self) -> SimulationResult<()> {
        let waiting: Vec<ProcessId> = self.queues.iter(QueueKind::Waiting).collect();

        for id in waiting {
            let record = self.store.record_mut(id);
            record.remaining_io = record.remaining_io.saturating_sub(1);
            if record.remaining_io > 0 {
                continue;
            }
            record.remaining_io = record.descriptor.io_duration;

            self.transition(id, ProcessState::Ready)?;
            self.queues.append(id, QueueKind::Waiting, QueueKind::Ready)?;
        }
        Ok(())
    }

    fn account_wait(&mut self) {
        for id in self.queues.iter(QueueKind::Ready).skip(1) {
            self.store.record_mut(id).wait_time += 1;
        }
    }

    /// Run the Ready head for one CPU tick
    fn dispatch(&mut self) -> SimulationResult<()> {
        let Some(id) = self.queues.front(QueueKind::Ready) else {
            trace!(tick = self.clock, "CPU idle");
            return Ok(());
        };

        if self.store[id].state != ProcessState::Running {
            self.transition(id, ProcessState::Running)?;
            let clock = self.clock;
            let record = self.store.record_mut(id);
            if record.response_time.is_none() {
                record.response_time = Some(clock - record.descriptor.arrival_time);
            }
        }

        let record = self.store.record_mut(id);
        record.remaining_cpu = record.remaining_cpu.saturating_sub(1);

        if record.remaining_cpu == 0 {
            return self.terminate(id);
        }
        if record.blocks_for_io() {
            // Partition stays allocated while blocked
            self.transition(id, ProcessState::Waiting)?;
            self.queues.append(id, QueueKind::Ready, QueueKind::Waiting)?;
        }
        Ok(())
    }

    /// RUNNING -> TERMINATED: release memory and leave the queues for good
    fn terminate(&mut self, id: ProcessId) -> SimulationResult<()> {
        self.transition(id, ProcessState::Terminated)?;

        let clock = self.clock;
        let record = self.store.record_mut(id);
        let pid = record.pid();
        let index = record
            .partition
            .take()
            .ok_or_else(|| SimulationError::InvariantViolation {
                tick: clock,
                reason: format!("process {} terminated without a partition", pid),
            })?;

        let (_, snapshot) = self.partitions.free(index, clock)?;
        self.sink.record_memory(snapshot);

        let record = self.store.record_mut(id);
        record.turnaround_time = Some(clock - record.descriptor.arrival_time);

        self.queues.pop(id, QueueKind::Ready)?;
        self.terminated += 1;
        Ok(())
    }

    /// Apply a state-machine edge and emit it to the sink
    fn transition(&mut self, id: ProcessId, next: ProcessState) -> SimulationResult<()> {
        let clock = self.clock;
        let record = self.store.record_mut(id);
        let from = record.state;
        let pid = record.pid();

        if !from.can_transition_to(next) {
            return Err(SimulationError::InvalidTransition { pid, from, to: next });
        }
        record.prev_state = from;
        record.state = next;

        debug!(tick = clock, pid, from = from.as_str(), to = next.as_str(), "State transition");
        self.sink
            .record_transition(TransitionEvent::new(clock, pid, from, next));
        Ok(())
    }
}
