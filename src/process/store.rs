/*!
 * Process Record Store
 * Arena owning every process record, addressed by stable handles
 */

use super::types::{ProcessDescriptor, ProcessRecord, ProcessState};
use crate::core::errors::{SimulationError, SimulationResult};
use crate::core::types::Pid;
use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

/// Stable handle to a record in a [`ProcessStore`]
///
/// Handles are minted by the store in trace order and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProcessId(usize);

impl ProcessId {
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns all process records for one run
#[derive(Debug, Clone, Default)]
pub struct ProcessStore {
    records: Vec<ProcessRecord>,
    by_pid: HashMap<Pid, ProcessId, RandomState>,
}

impl ProcessStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            by_pid: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Add a record in NEW state; pids must be unique
    pub fn insert(&mut self, descriptor: ProcessDescriptor) -> SimulationResult<ProcessId> {
        if self.by_pid.contains_key(&descriptor.pid) {
            return Err(SimulationError::DuplicatePid(descriptor.pid));
        }
        let id = ProcessId(self.records.len());
        self.by_pid.insert(descriptor.pid, id);
        self.records.push(ProcessRecord::new(descriptor));
        Ok(id)
    }

    pub fn get(&self, id: ProcessId) -> Option<&ProcessRecord> {
        self.records.get(id.0)
    }

    pub(crate) fn record_mut(&mut self, id: ProcessId) -> &mut ProcessRecord {
        &mut self.records[id.0]
    }

    pub fn lookup(&self, pid: Pid) -> Option<ProcessId> {
        self.by_pid.get(&pid).copied()
    }

    pub fn by_pid(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.lookup(pid).and_then(|id| self.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = ProcessId> {
        (0..self.records.len()).map(ProcessId)
    }

    /// Records in trace order
    pub fn iter(&self) -> impl Iterator<Item = (ProcessId, &ProcessRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (ProcessId(index), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count_in(&self, state: ProcessState) -> usize {
        self.records.iter().filter(|r| r.state == state).count()
    }
}

impl Index<ProcessId> for ProcessStore {
    type Output = ProcessRecord;

    fn index(&self, id: ProcessId) -> &ProcessRecord {
        &self.records[id.0]
    }
}
