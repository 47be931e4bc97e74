/*!
 * Core Module
 * Shared types, limits, and error definitions
 */

pub mod errors;
pub mod limits;
pub mod types;

pub use errors::{SimulationError, SimulationResult};
pub use types::{MemSize, PartitionIndex, Pid, Tick};
