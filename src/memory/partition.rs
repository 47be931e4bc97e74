/*!
 * Partition Table
 * Best-fit lookup and allocate/free over fixed partitions
 */

use super::types::{MemoryError, MemoryResult, MemorySnapshot, MemoryStatus, Partition};
use crate::core::types::{MemSize, PartitionIndex, Pid, Tick};
use tracing::debug;

/// Fixed set of memory partitions plus the free-memory counters derived from them
#[derive(Debug, Clone)]
pub struct PartitionTable {
    partitions: Vec<Partition>,
    status: MemoryStatus,
}

impl PartitionTable {
    /// Create a table with one free partition per capacity, numbered from 1
    pub fn new(capacities: &[MemSize]) -> Self {
        let partitions: Vec<Partition> = capacities
            .iter()
            .enumerate()
            .map(|(index, &capacity)| Partition::new(index as u32 + 1, capacity))
            .collect();
        let free: u64 = capacities.iter().map(|&c| u64::from(c)).sum();

        debug!(
            partitions = partitions.len(),
            free_mb = free,
            "Partition table initialized"
        );

        Self {
            partitions,
            status: MemoryStatus {
                total_free: free,
                usable_free: free,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn get(&self, index: PartitionIndex) -> Option<&Partition> {
        self.partitions.get(index)
    }

    pub fn status(&self) -> MemoryStatus {
        self.status
    }

    pub fn capacities(&self) -> Vec<MemSize> {
        self.partitions.iter().map(|p| p.capacity).collect()
    }

    /// Largest capacity in the table, free or not
    pub fn largest_capacity(&self) -> Option<MemSize> {
        self.partitions.iter().map(|p| p.capacity).max()
    }

    /// Whether some partition could ever hold `size` once it is free
    pub fn can_ever_fit(&self, size: MemSize) -> bool {
        self.largest_capacity().is_some_and(|largest| largest >= size)
    }

    /// Smallest-slack free partition able to hold `size`, scanning from the last index
    pub fn find_best_fit(&self, size: MemSize) -> Option<PartitionIndex> {
        let mut best: Option<(PartitionIndex, MemSize)> = None;

        for (index, partition) in self.partitions.iter().enumerate().rev() {
            if !partition.is_free() || partition.capacity < size {
                continue;
            }
            let slack = partition.capacity - size;
            // Strict comparison keeps the first partition scanned on ties
            if best.map_or(true, |(_, best_slack)| slack < best_slack) {
                best = Some((index, slack));
            }
        }

        best.map(|(index, _)| index)
    }

    /// Place `pid` (needing `size` MB) into the partition at `index`
    pub fn allocate(
        &mut self,
        index: PartitionIndex,
        pid: Pid,
        size: MemSize,
        time: Tick,
    ) -> MemoryResult<MemorySnapshot> {
        let count = self.partitions.len();
        let partition = self
            .partitions
            .get_mut(index)
            .ok_or(MemoryError::InvalidPartition { index, count })?;

        if let Some(occupant) = partition.occupant {
            return Err(MemoryError::PartitionOccupied {
                number: partition.number,
                occupant,
            });
        }
        if partition.capacity < size {
            return Err(MemoryError::InsufficientCapacity {
                number: partition.number,
                requested: size,
                capacity: partition.capacity,
            });
        }

        partition.occupant = Some(pid);
        partition.used = size;
        self.status.total_free -= u64::from(size);
        self.status.usable_free -= u64::from(partition.capacity);

        debug!(
            tick = time,
            pid,
            partition = partition.number,
            capacity = partition.capacity,
            size,
            "Partition allocated"
        );

        Ok(self.snapshot(time))
    }

    /// Release the partition at `index`, returning the evicted pid and the new snapshot
    pub fn free(&mut self, index: PartitionIndex, time: Tick) -> MemoryResult<(Pid, MemorySnapshot)> {
        let count = self.partitions.len();
        let partition = self
            .partitions
            .get_mut(index)
            .ok_or(MemoryError::InvalidPartition { index, count })?;

        let pid = partition.occupant.take().ok_or(MemoryError::PartitionFree {
            number: partition.number,
        })?;
        self.status.total_free += u64::from(partition.used);
        self.status.usable_free += u64::from(partition.capacity);
        partition.used = 0;

        debug!(
            tick = time,
            pid,
            partition = partition.number,
            "Partition freed"
        );

        Ok((pid, self.snapshot(time)))
    }

    /// Current occupancy and counters stamped with `time`
    pub fn snapshot(&self, time: Tick) -> MemorySnapshot {
        MemorySnapshot {
            time,
            occupants: self.partitions.iter().map(|p| p.occupant).collect(),
            total_free: self.status.total_free,
            usable_free: self.status.usable_free,
        }
    }
}
