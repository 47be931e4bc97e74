/*!
 * Memory Types
 * Partitions, free-memory counters, and snapshots
 */

use crate::core::types::{MemSize, PartitionIndex, Pid, Tick};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Partition index {index} out of range ({count} partitions)")]
    #[diagnostic(code(memory::invalid_partition))]
    InvalidPartition { index: PartitionIndex, count: usize },

    #[error("Partition {number} is already occupied by process {occupant}")]
    #[diagnostic(
        code(memory::partition_occupied),
        help("Only free partitions can be allocated. Use find_best_fit to pick one.")
    )]
    PartitionOccupied { number: u32, occupant: Pid },

    #[error("Partition {number} cannot hold {requested} MB (capacity {capacity} MB)")]
    #[diagnostic(code(memory::insufficient_capacity))]
    InsufficientCapacity {
        number: u32,
        requested: MemSize,
        capacity: MemSize,
    },

    #[error("Partition {number} is not allocated")]
    #[diagnostic(code(memory::partition_free))]
    PartitionFree { number: u32 },
}

/// A fixed memory partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// 1-based partition number
    pub number: u32,
    /// Capacity in MB
    pub capacity: MemSize,
    /// Resident process, if any
    pub occupant: Option<Pid>,
    /// Memory size of the resident process
    pub used: MemSize,
}

impl Partition {
    pub fn new(number: u32, capacity: MemSize) -> Self {
        Self {
            number,
            capacity,
            occupant: None,
            used: 0,
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Aggregate free-memory counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStatus {
    pub total_free: u64,
    pub usable_free: u64,
}

/// Partition occupancy captured right after an allocate or free
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub time: Tick,
    /// Occupant of each partition, in partition order
    pub occupants: Vec<Option<Pid>>,
    pub total_free: u64,
    pub usable_free: u64,
}

impl MemorySnapshot {
    /// Number of partitions with no occupant
    pub fn free_partitions(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_none()).count()
    }
}
