/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Simulated time in ticks since the start of a run
pub type Tick = u64;

/// Memory size in MB
pub type MemSize = u32;

/// Zero-based position of a partition in the partition table
pub type PartitionIndex = usize;
