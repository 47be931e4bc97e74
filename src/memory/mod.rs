/*!
 * Memory Management
 *
 * Fixed-partition memory with best-fit placement.
 *
 * ## Placement
 *
 * The partition table is scanned from the last entry to the first. With the
 * reference layout (largest partition first) this visits the smallest
 * partition first. The free partition with the least slack (capacity minus
 * requested size) wins; on equal slack the partition scanned first is kept.
 *
 * ## Accounting
 *
 * - **Total free**: capacity not consumed by resident memory sizes, so
 *   internal fragmentation still counts as free
 * - **Usable free**: capacities of partitions with no occupant
 *
 * Every allocate/free returns a snapshot taken after the mutation.
 */

mod partition;
pub mod types;

pub use partition::PartitionTable;
pub use types::{MemoryError, MemoryResult, MemorySnapshot, MemoryStatus, Partition};
