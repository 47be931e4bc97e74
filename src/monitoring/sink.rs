/*!
 * Event Sink
 * Append-only record of state transitions and memory snapshots
 */

use crate::core::types::{Pid, Tick};
use crate::memory::MemorySnapshot;
use crate::process::ProcessState;
use serde::{Deserialize, Serialize};

/// One state change of one process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub time: Tick,
    pub pid: Pid,
    pub old_state: ProcessState,
    pub new_state: ProcessState,
}

impl TransitionEvent {
    pub const fn new(time: Tick, pid: Pid, old_state: ProcessState, new_state: ProcessState) -> Self {
        Self {
            time,
            pid,
            old_state,
            new_state,
        }
    }
}

/// Receiver for everything the scheduler emits, in emission order
pub trait EventSink {
    fn record_transition(&mut self, event: TransitionEvent);

    fn record_memory(&mut self, snapshot: MemorySnapshot);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record_transition(&mut self, event: TransitionEvent) {
        (**self).record_transition(event);
    }

    fn record_memory(&mut self, snapshot: MemorySnapshot) {
        (**self).record_memory(snapshot);
    }
}

/// In-memory sink keeping both streams
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    transitions: Vec<TransitionEvent>,
    memory: Vec<MemorySnapshot>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> &[TransitionEvent] {
        &self.transitions
    }

    pub fn memory(&self) -> &[MemorySnapshot] {
        &self.memory
    }

    /// Transitions of a single process, oldest first
    pub fn transitions_for(&self, pid: Pid) -> impl Iterator<Item = &TransitionEvent> {
        self.transitions.iter().filter(move |e| e.pid == pid)
    }

    /// Tick at which `pid` entered `state` for the first time
    pub fn first_entry(&self, pid: Pid, state: ProcessState) -> Option<Tick> {
        self.transitions_for(pid)
            .find(|e| e.new_state == state)
            .map(|e| e.time)
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty() && self.memory.is_empty()
    }
}

impl EventSink for EventLog {
    fn record_transition(&mut self, event: TransitionEvent) {
        self.transitions.push(event);
    }

    fn record_memory(&mut self, snapshot: MemorySnapshot) {
        self.memory.push(snapshot);
    }
}
